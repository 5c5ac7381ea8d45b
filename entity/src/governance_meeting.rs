use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "governance_meeting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub governance_body_id: Uuid,
    #[sea_orm(indexed)]
    pub meeting_date: DateTimeWithTimeZone,
    pub agenda: String,
    pub minutes: String,
    pub decisions_made: String,
    pub action_items: String,
    pub next_meeting_date: DateTimeWithTimeZone,
    pub attachments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::governance_body::Entity",
        from = "Column::GovernanceBodyId",
        to = "super::governance_body::Column::Id",
        on_delete = "Cascade"
    )]
    Body,
    #[sea_orm(has_many = "super::governance_meeting_attendee::Entity")]
    Attendees,
}

impl Related<super::governance_body::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Body.def()
    }
}

impl Related<super::governance_meeting_attendee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendees.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.next_meeting_date <= self.meeting_date {
            errors.add(
                "next_meeting_date",
                "Next meeting must be scheduled after this meeting",
            );
        }
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
        hooks::stamp(&mut self.created_at, &mut self.updated_at, insert);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
