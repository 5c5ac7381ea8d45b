use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "risk_assessment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub risk_type: RiskType,
    pub description: String,
    pub likelihood: Grade,
    pub impact: Grade,
    pub status: Status,
    pub identified_by: Uuid,
    pub assigned_to: Uuid,
    pub next_review_date: NaiveDate,
    pub mitigation_plan: String,
    pub contingency_plan: String,
    pub fallback_strategy: String,
    pub actual_impact: Option<String>,
    pub resolution_date: Option<NaiveDate>,
    pub lessons_learned: Option<String>,
    pub attachments: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn risk_score(&self) -> i32 {
        self.likelihood.weight() * self.impact.weight()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskType {
    #[sea_orm(string_value = "POLITICAL")]
    Political,
    #[sea_orm(string_value = "FUNDING")]
    Funding,
    #[sea_orm(string_value = "OPERATIONAL")]
    Operational,
    #[sea_orm(string_value = "REPUTATIONAL")]
    Reputational,
    #[sea_orm(string_value = "COMPLIANCE")]
    Compliance,
    #[sea_orm(string_value = "SECURITY")]
    Security,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
}

impl Grade {
    pub fn weight(self) -> i32 {
        match self {
            Grade::Low => 1,
            Grade::Medium => 2,
            Grade::High => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "IDENTIFIED")]
    Identified,
    #[sea_orm(string_value = "MONITORED")]
    Monitored,
    #[sea_orm(string_value = "MITIGATED")]
    Mitigated,
    #[sea_orm(string_value = "OCCURRED")]
    Occurred,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
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
        from = "Column::IdentifiedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Identifier,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::AssignedTo",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Assignee,
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
    fn grades_multiply() {
        assert_eq!(Grade::High.weight() * Grade::Medium.weight(), 6);
        assert_eq!(Grade::Low.weight() * Grade::Low.weight(), 1);
        assert_eq!(Grade::High.weight() * Grade::High.weight(), 9);
    }
}
