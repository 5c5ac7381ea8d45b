use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

/// One reading of a KPI metric.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "metric_progress")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub metric_id: Uuid,
    pub value: f64,
    #[sea_orm(indexed)]
    pub date_recorded: NaiveDate,
    pub recorded_by: Uuid,
    pub notes: String,
    pub supporting_document: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kpi_metric::Entity",
        from = "Column::MetricId",
        to = "super::kpi_metric::Column::Id",
        on_delete = "Cascade"
    )]
    Metric,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::RecordedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Recorder,
}

impl Related<super::kpi_metric::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metric.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !self.value.is_finite() {
            errors.add("value", "Enter a number");
        }
        errors.into_result()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
