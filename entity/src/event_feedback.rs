use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

/// Participant feedback on an event, rated 1 to 5.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub event_id: Uuid,
    pub participant_name: String,
    pub email: String,
    #[sea_orm(indexed)]
    pub rating: i32,
    pub feedback_text: String,
    pub suggestions: String,
    pub would_recommend: bool,
    pub areas_of_improvement: String,
    pub is_anonymous: bool,
    #[sea_orm(indexed)]
    pub submitted_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else if self.participant_name.trim().is_empty() {
            "N/A"
        } else {
            &self.participant_name
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "Cascade"
    )]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_range("rating", self.rating, 1, 5);
        errors.check_not_blank("feedback_text", &self.feedback_text);
        errors.into_result()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::stamp_created(&mut self.submitted_at, insert);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
