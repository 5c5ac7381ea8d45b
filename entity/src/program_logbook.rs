use chrono::NaiveDate;
use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "program_logbook")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    #[sea_orm(indexed)]
    pub date: NaiveDate,
    pub activity_type: Option<ActivityType>,
    pub activity_description: Option<String>,
    pub participants_count: Option<i32>,
    pub milestone_reached: String,
    pub challenges_faced: String,
    pub next_steps: String,
    pub recorded_by: Uuid,
    pub attachments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    #[sea_orm(string_value = "WORKSHOP")]
    Workshop,
    #[sea_orm(string_value = "OUTREACH")]
    Outreach,
    #[sea_orm(string_value = "TRAINING")]
    Training,
    #[sea_orm(string_value = "MEETING")]
    Meeting,
    #[sea_orm(string_value = "EVENT")]
    Event,
    #[sea_orm(string_value = "OTHER")]
    Other,
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
        from = "Column::RecordedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Recorder,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(count) = self.participants_count {
            errors.check_non_negative("participants_count", count);
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
        if insert && matches!(self.date, ActiveValue::NotSet) {
            self.date = ActiveValue::Set(hooks::today());
        }
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
