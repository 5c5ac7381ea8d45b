use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::budget::variance_percentage;
use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_tracking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub month: NaiveDate,
    pub category: Category,
    pub description: String,
    pub budgeted_cents: i64,
    pub actual_cents: i64,
    pub variance_notes: String,
    pub bills_attachment: Option<String>,
    pub recorded_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn variance_amount(&self) -> i64 {
        self.actual_cents - self.budgeted_cents
    }

    pub fn variance_percentage(&self) -> f64 {
        variance_percentage(self.budgeted_cents, self.actual_cents)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[sea_orm(string_value = "STAFF")]
    Staff,
    #[sea_orm(string_value = "MATERIALS")]
    Materials,
    #[sea_orm(string_value = "VENUE")]
    Venue,
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    #[sea_orm(string_value = "REFRESHMENTS")]
    Refreshments,
    #[sea_orm(string_value = "MARKETING")]
    Marketing,
    #[sea_orm(string_value = "MISC")]
    Misc,
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
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ApprovedBy",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Approver,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_non_negative("budgeted_cents", self.budgeted_cents);
        errors.check_non_negative("actual_cents", self.actual_cents);
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
