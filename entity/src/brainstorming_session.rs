use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brainstorming_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub session_type: SessionType,
    #[sea_orm(indexed)]
    pub date: NaiveDate,
    pub location: String,
    pub facilitator_id: Uuid,
    pub participants_count: i32,
    pub agenda: String,
    pub summary: String,
    pub key_outcomes: String,
    pub next_steps: String,
    pub notes: String,
    pub materials_used: String,
    pub attachments: Option<String>,
    pub feedback_summary: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    #[sea_orm(string_value = "INTERNAL")]
    Internal,
    #[sea_orm(string_value = "COMMUNITY")]
    Community,
    #[sea_orm(string_value = "STAKEHOLDER")]
    Stakeholder,
    /// Focus group discussion.
    #[sea_orm(string_value = "FGD")]
    Fgd,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::initiative::Entity",
        from = "Column::InitiativeId",
        to = "super::initiative::Column::Id",
        on_delete = "Cascade"
    )]
    Initiative,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::FacilitatorId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Facilitator,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("location", &self.location);
        errors.check_non_negative("participants_count", self.participants_count);
        errors.check_not_blank("agenda", &self.agenda);
        errors.check_not_blank("summary", &self.summary);
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
        hooks::stamp_created(&mut self.created_at, insert);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
