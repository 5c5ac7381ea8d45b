use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "csr_proposal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub company_name: String,
    pub submission_deadline: NaiveDate,
    pub requested_cents: i64,
    pub approved_cents: i64,
    pub status: Status,
    pub prepared_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub executive_summary: String,
    pub alignment_with_sdgs: String,
    pub budget_breakdown: String,
    pub impact_metrics: String,
    pub partnership_details: String,
    pub submission_date: Option<NaiveDate>,
    pub feedback_received: String,
    pub proposal_document: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "REVIEW")]
    Review,
    #[sea_orm(string_value = "SUBMITTED")]
    Submitted,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "AWARDED")]
    Awarded,
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
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("title", &self.title);
        errors.check_not_blank("company_name", &self.company_name);
        errors.check_non_negative("requested_cents", self.requested_cents);
        errors.check_non_negative("approved_cents", self.approved_cents);
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
