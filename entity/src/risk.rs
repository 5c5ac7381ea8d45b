use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "risk")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub risk_type: RiskType,
    pub description: String,
    /// Assessed independently of [`Model::risk_score`].
    pub risk_level: RiskLevel,
    pub probability: i32,
    pub impact: i32,
    pub mitigation_plan: String,
    pub contingency_plan: String,
    #[sea_orm(indexed)]
    pub owner_id: Uuid,
    pub status: Status,
    pub review_date: NaiveDate,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn risk_score(&self) -> i32 {
        self.probability * self.impact
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskType {
    #[sea_orm(string_value = "FINANCIAL")]
    Financial,
    #[sea_orm(string_value = "OPERATIONAL")]
    Operational,
    #[sea_orm(string_value = "STRATEGIC")]
    Strategic,
    #[sea_orm(string_value = "COMPLIANCE")]
    Compliance,
    #[sea_orm(string_value = "REPUTATION")]
    Reputation,
    #[sea_orm(string_value = "SAFETY")]
    Safety,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "CRITICAL")]
    Critical,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "IDENTIFIED")]
    Identified,
    #[sea_orm(string_value = "ASSESSED")]
    Assessed,
    #[sea_orm(string_value = "MITIGATED")]
    Mitigated,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
    #[sea_orm(string_value = "OCCURRED")]
    Occurred,
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
        from = "Column::OwnerId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("description", &self.description);
        errors.check_range("probability", self.probability, 1, 5);
        errors.check_range("impact", self.impact, 1, 5);
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

    fn risk(probability: i32, impact: i32) -> Model {
        let now = hooks::now();
        Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            risk_type: RiskType::Financial,
            description: "Sponsor withdraws funding".into(),
            risk_level: RiskLevel::Low,
            probability,
            impact,
            mitigation_plan: String::new(),
            contingency_plan: String::new(),
            owner_id: Uuid::nil(),
            status: Status::Identified,
            review_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn score_is_probability_times_impact() {
        assert_eq!(risk(3, 4).risk_score(), 12);
        assert_eq!(risk(5, 5).risk_score(), 25);
    }

    #[test]
    fn level_is_not_derived_from_score() {
        let model = risk(5, 5);
        assert_eq!(model.risk_level, RiskLevel::Low);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn scales_are_one_to_five() {
        let err = risk(0, 6).validate().unwrap_err();
        assert!(err.has_field("probability"));
        assert!(err.has_field("impact"));
    }
}
