use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annual_budget")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year: String,
    pub total_cents: i64,
    pub staff_salaries_cents: i64,
    pub operational_costs_cents: i64,
    pub program_costs_cents: i64,
    pub marketing_costs_cents: i64,
    pub contingency_fund_cents: i64,
    pub detailed_breakdown: Json,
    pub status: Status,
    pub notes: String,
    pub prepared_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Sum of the per-category allocations.
    pub fn allocated_cents(&self) -> i64 {
        self.staff_salaries_cents
            + self.operational_costs_cents
            + self.program_costs_cents
            + self.marketing_costs_cents
            + self.contingency_fund_cents
    }

    pub fn unallocated_cents(&self) -> i64 {
        self.total_cents - self.allocated_cents()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "REVIEW")]
    Review,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::PreparedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Preparer,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ApprovedBy",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Approver,
    #[sea_orm(has_many = "super::budget_tracking::Entity")]
    TrackingRecords,
}

impl Related<super::budget_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackingRecords.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("fiscal_year", &self.fiscal_year);
        errors.check_non_negative("total_cents", self.total_cents);
        if !self.detailed_breakdown.is_object() && !self.detailed_breakdown.is_array() {
            errors.add("detailed_breakdown", "Breakdown must be a JSON object or list");
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
