use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub job_id: Uuid,
    #[sea_orm(indexed)]
    pub applicant_id: Uuid,
    pub resume: Option<String>,
    pub cover_letter: String,
    pub status: Status,
    pub applied_date: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub is_viewed: bool,
    pub viewed_date: Option<DateTimeWithTimeZone>,
    pub notes: String,
    pub expected_salary_cents: Option<i64>,
    pub reference: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Status {
    #[sea_orm(string_value = "PD")]
    #[serde(rename = "PD")]
    Pending,
    #[sea_orm(string_value = "RV")]
    #[serde(rename = "RV")]
    Reviewing,
    #[sea_orm(string_value = "SC")]
    #[serde(rename = "SC")]
    Shortlisted,
    #[sea_orm(string_value = "IV")]
    #[serde(rename = "IV")]
    InterviewScheduled,
    #[sea_orm(string_value = "AC")]
    #[serde(rename = "AC")]
    Accepted,
    #[sea_orm(string_value = "RJ")]
    #[serde(rename = "RJ")]
    Rejected,
    #[sea_orm(string_value = "WD")]
    #[serde(rename = "WD")]
    Withdrawn,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job::Entity",
        from = "Column::JobId",
        to = "super::job::Column::Id",
        on_delete = "Cascade"
    )]
    Job,
    #[sea_orm(
        belongs_to = "super::job_seeker::Entity",
        from = "Column::ApplicantId",
        to = "super::job_seeker::Column::Id",
        on_delete = "Cascade"
    )]
    Applicant,
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::job_seeker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::stamp(&mut self.applied_date, &mut self.updated_at, insert);
        Ok(self)
    }
}
