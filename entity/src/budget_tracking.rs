use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::budget::variance_percentage;
use crate::hooks;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_tracking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub annual_budget_id: Uuid,
    pub month: NaiveDate,
    pub category: String,
    pub budgeted_cents: i64,
    pub actual_cents: i64,
    pub variance_explanation: String,
    pub recorded_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn variance_amount(&self) -> i64 {
        self.actual_cents - self.budgeted_cents
    }

    pub fn variance_percentage(&self) -> f64 {
        variance_percentage(self.budgeted_cents, self.actual_cents)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::annual_budget::Entity",
        from = "Column::AnnualBudgetId",
        to = "super::annual_budget::Column::Id",
        on_delete = "Cascade"
    )]
    AnnualBudget,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::RecordedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Recorder,
}

impl Related<super::annual_budget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnnualBudget.def()
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
        Ok(self)
    }
}
