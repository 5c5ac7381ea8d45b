use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub budget_type: BudgetType,
    pub item_name: String,
    pub description: String,
    pub estimated_cents: i64,
    pub actual_cents: i64,
    pub quantity: i32,
    pub unit_cost_cents: Option<i64>,
    pub variance_explanation: String,
    pub date_required: NaiveDate,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<NaiveDate>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn variance_amount(&self) -> i64 {
        self.actual_cents - self.estimated_cents
    }

    /// Variance as a percentage of the estimate; zero without an estimate.
    pub fn variance_percentage(&self) -> f64 {
        variance_percentage(self.estimated_cents, self.actual_cents)
    }
}

pub(crate) fn variance_percentage(planned: i64, actual: i64) -> f64 {
    if planned == 0 {
        0.0
    } else {
        (actual - planned) as f64 / planned as f64 * 100.0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetType {
    #[sea_orm(string_value = "OPERATIONAL")]
    Operational,
    #[sea_orm(string_value = "CAPITAL")]
    Capital,
    #[sea_orm(string_value = "PROGRAM")]
    Program,
    #[sea_orm(string_value = "EMERGENCY")]
    Emergency,
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
        errors.check_not_blank("item_name", &self.item_name);
        errors.check_non_negative("estimated_cents", self.estimated_cents);
        errors.check_non_negative("actual_cents", self.actual_cents);
        if self.quantity < 1 {
            errors.add("quantity", "Ensure this value is greater than or equal to 1");
        }
        if let Some(unit_cost) = self.unit_cost_cents {
            errors.check_non_negative("unit_cost_cents", unit_cost);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variance_against_estimate() {
        assert_eq!(variance_percentage(100_000, 120_000), 20.0);
        assert_eq!(variance_percentage(100_000, 80_000), -20.0);
        assert_eq!(variance_percentage(0, 5_000), 0.0);
    }
}
