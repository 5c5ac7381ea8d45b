use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "initiative")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_cents: i64,
    pub actual_spend_cents: i64,
    pub status: Status,
    pub sdg_alignment: Sdg,
    #[sea_orm(indexed)]
    pub department_id: Uuid,
    #[sea_orm(indexed)]
    pub created_by: Uuid,
    pub target_beneficiaries: String,
    pub success_metrics: String,
    pub challenges_faced: Option<String>,
    pub lessons_learned: Option<String>,
    pub attachments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Spend as a share of budget, in percent. Zero budgets report 0.
    pub fn budget_utilization(&self) -> f64 {
        if self.budget_cents == 0 {
            return 0.0;
        }
        self.actual_spend_cents as f64 / self.budget_cents as f64 * 100.0
    }

    /// Elapsed share of the planned timeline, clamped to 0..=100.
    pub fn timeline_progress(&self, today: NaiveDate) -> f64 {
        let total = (self.end_date - self.start_date).num_days();
        if total <= 0 {
            return 0.0;
        }
        let passed = (today - self.start_date).num_days();
        (passed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "PLANNED")]
    Planned,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "ON_HOLD")]
    OnHold,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

/// UN Sustainable Development Goal an initiative primarily serves.
#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Sdg {
    #[sea_orm(string_value = "SDG_1")]
    #[serde(rename = "SDG_1")]
    NoPoverty,
    #[sea_orm(string_value = "SDG_2")]
    #[serde(rename = "SDG_2")]
    ZeroHunger,
    #[sea_orm(string_value = "SDG_3")]
    #[serde(rename = "SDG_3")]
    GoodHealth,
    #[sea_orm(string_value = "SDG_4")]
    #[serde(rename = "SDG_4")]
    QualityEducation,
    #[sea_orm(string_value = "SDG_5")]
    #[serde(rename = "SDG_5")]
    GenderEquality,
    #[sea_orm(string_value = "SDG_6")]
    #[serde(rename = "SDG_6")]
    CleanWater,
    #[sea_orm(string_value = "SDG_7")]
    #[serde(rename = "SDG_7")]
    CleanEnergy,
    #[sea_orm(string_value = "SDG_8")]
    #[serde(rename = "SDG_8")]
    DecentWork,
    #[sea_orm(string_value = "SDG_9")]
    #[serde(rename = "SDG_9")]
    Industry,
    #[sea_orm(string_value = "SDG_10")]
    #[serde(rename = "SDG_10")]
    ReducedInequalities,
    #[sea_orm(string_value = "SDG_11")]
    #[serde(rename = "SDG_11")]
    SustainableCities,
    #[sea_orm(string_value = "SDG_12")]
    #[serde(rename = "SDG_12")]
    ResponsibleConsumption,
    #[sea_orm(string_value = "SDG_13")]
    #[serde(rename = "SDG_13")]
    ClimateAction,
    #[sea_orm(string_value = "SDG_14")]
    #[serde(rename = "SDG_14")]
    LifeBelowWater,
    #[sea_orm(string_value = "SDG_15")]
    #[serde(rename = "SDG_15")]
    LifeOnLand,
    #[sea_orm(string_value = "SDG_16")]
    #[serde(rename = "SDG_16")]
    PeaceJustice,
    #[sea_orm(string_value = "SDG_17")]
    #[serde(rename = "SDG_17")]
    Partnerships,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "Cascade"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::CreatedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::milestone::Entity")]
    Milestones,
    #[sea_orm(has_many = "super::risk::Entity")]
    Risks,
    #[sea_orm(has_many = "super::kpi::Entity")]
    Kpis,
    #[sea_orm(has_many = "super::budget::Entity")]
    Budgets,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::milestone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl Related<super::risk::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Risks.def()
    }
}

impl Related<super::kpi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kpis.def()
    }
}

impl Related<super::budget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::stakeholder::Entity> for Entity {
    fn to() -> RelationDef {
        super::initiative_stakeholder::Relation::Stakeholder.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::initiative_stakeholder::Relation::Initiative.def().rev())
    }
}

impl Related<super::student_volunteer::Entity> for Entity {
    fn to() -> RelationDef {
        super::initiative_volunteer::Relation::Volunteer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::initiative_volunteer::Relation::Initiative.def().rev())
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("name", &self.name);
        errors.check_non_negative("budget_cents", self.budget_cents);
        errors.check_non_negative("actual_spend_cents", self.actual_spend_cents);
        if self.end_date <= self.start_date {
            errors.add("end_date", "End date must be after start date");
        }
        if self.actual_spend_cents > self.budget_cents {
            errors.add("actual_spend_cents", "Actual spend cannot exceed budget");
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn initiative() -> Model {
        let now = hooks::now();
        Model {
            id: Uuid::nil(),
            name: "Clean Water Drive".into(),
            description: "Wells for three villages".into(),
            start_date: date(2024, 1, 1),
            end_date: date(2024, 12, 31),
            budget_cents: 1_000_000,
            actual_spend_cents: 250_000,
            status: Status::InProgress,
            sdg_alignment: Sdg::CleanWater,
            department_id: Uuid::nil(),
            created_by: Uuid::nil(),
            target_beneficiaries: "1200 residents".into(),
            success_metrics: "Wells commissioned".into(),
            challenges_faced: None,
            lessons_learned: None,
            attachments: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let mut record = initiative();
        record.end_date = record.start_date;
        let err = record.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "end_date: End date must be after start date"
        );
    }

    #[test]
    fn spend_cannot_exceed_budget() {
        let mut record = initiative();
        record.actual_spend_cents = record.budget_cents + 1;
        let err = record.validate().unwrap_err();
        assert!(err.has_field("actual_spend_cents"));

        record.actual_spend_cents = record.budget_cents;
        assert!(record.validate().is_ok());
    }

    #[test]
    fn utilization_and_timeline() {
        let record = initiative();
        assert_eq!(record.budget_utilization(), 25.0);
        assert_eq!(record.timeline_progress(date(2023, 6, 1)), 0.0);
        assert_eq!(record.timeline_progress(date(2025, 6, 1)), 100.0);
        let zero_budget = Model {
            budget_cents: 0,
            actual_spend_cents: 0,
            ..record
        };
        assert_eq!(zero_budget.budget_utilization(), 0.0);
    }
}
