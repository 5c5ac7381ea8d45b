use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_committee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub member_id: Uuid,
    pub role: Role,
    pub term_start: NaiveDate,
    pub term_end: NaiveDate,
    pub responsibilities: String,
    pub achievements: String,
    pub handover_notes: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Term length in 30-day months.
    pub fn term_duration_months(&self) -> i64 {
        (self.term_end - self.term_start).num_days() / 30
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[sea_orm(string_value = "CHAIR")]
    Chair,
    #[sea_orm(string_value = "VICE_CHAIR")]
    ViceChair,
    #[sea_orm(string_value = "SECRETARY")]
    Secretary,
    #[sea_orm(string_value = "TREASURER")]
    Treasurer,
    #[sea_orm(string_value = "DEPT_HEAD")]
    DeptHead,
    #[sea_orm(string_value = "TECHNICAL_LEAD")]
    TechnicalLead,
    #[sea_orm(string_value = "EVENT_COORDINATOR")]
    EventCoordinator,
    #[sea_orm(string_value = "PR_COORDINATOR")]
    PrCoordinator,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.term_end <= self.term_start {
            errors.add("term_end", "Term end date must be after term start date");
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
