use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

/// Periodic report sent to a CSR funder.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "csr_report")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub report_type: ReportType,
    pub period_start: NaiveDate,
    #[sea_orm(indexed)]
    pub period_end: NaiveDate,
    pub sdg5_metrics: Json,
    pub sdg8_metrics: Json,
    pub executive_summary: String,
    pub program_highlights: String,
    pub beneficiary_impact: String,
    pub sdg_alignment_narrative: String,
    pub challenges_learnings: String,
    pub future_plans: String,
    pub dashboard_link: String,
    pub budget_utilized_cents: i64,
    pub cost_per_beneficiary_cents: i64,
    pub status: Status,
    pub prepared_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub report_file: Option<String>,
    pub stakeholder_feedback: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Number of entries recorded against SDG 5 and SDG 8.
    pub fn sdg_metric_counts(&self) -> (usize, usize) {
        (metric_count(&self.sdg5_metrics), metric_count(&self.sdg8_metrics))
    }
}

fn metric_count(metrics: &Json) -> usize {
    metrics.as_object().map_or(0, |entries| entries.len())
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "ANNUAL")]
    Annual,
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
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
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
        from = "Column::PreparedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Preparer,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ReviewedBy",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Reviewer,
    #[sea_orm(has_many = "super::csr_report_story::Entity")]
    FeaturedStories,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Related<super::impact_story::Entity> for Entity {
    fn to() -> RelationDef {
        super::csr_report_story::Relation::Story.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::csr_report_story::Relation::Report.def().rev())
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.period_end < self.period_start {
            errors.add("period_end", "Period end must be after period start");
        }
        if !self.sdg5_metrics.is_object() {
            errors.add("sdg5_metrics", "Metrics must be a JSON object");
        }
        if !self.sdg8_metrics.is_object() {
            errors.add("sdg8_metrics", "Metrics must be a JSON object");
        }
        errors.check_non_negative("budget_utilized_cents", self.budget_utilized_cents);
        errors.check_non_negative("cost_per_beneficiary_cents", self.cost_per_beneficiary_cents);
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
    use serde_json::json;

    use super::*;

    fn report(start: NaiveDate, end: NaiveDate) -> Model {
        let now = hooks::now();
        Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            report_type: ReportType::Quarterly,
            period_start: start,
            period_end: end,
            sdg5_metrics: json!({"women_trained": 120, "women_in_leadership": 8}),
            sdg8_metrics: json!({"placements": 45}),
            executive_summary: String::new(),
            program_highlights: String::new(),
            beneficiary_impact: String::new(),
            sdg_alignment_narrative: String::new(),
            challenges_learnings: String::new(),
            future_plans: String::new(),
            dashboard_link: String::new(),
            budget_utilized_cents: 250_000,
            cost_per_beneficiary_cents: 1_500,
            status: Status::Draft,
            prepared_by: Uuid::nil(),
            reviewed_by: None,
            report_file: None,
            stakeholder_feedback: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn counts_metrics_per_goal() {
        let mut record = report(day(2024, 1, 1), day(2024, 3, 31));
        assert_eq!(record.sdg_metric_counts(), (2, 1));
        record.sdg8_metrics = json!([]);
        assert_eq!(record.sdg_metric_counts(), (2, 0));
    }

    #[test]
    fn period_must_run_forward() {
        let err = report(day(2024, 4, 1), day(2024, 3, 31)).validate().unwrap_err();
        assert!(err.has_field("period_end"));
        assert!(report(day(2024, 1, 1), day(2024, 1, 1)).validate().is_ok());
    }
}
