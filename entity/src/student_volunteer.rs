use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_volunteer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: String,
    pub sex: Sex,
    pub university: String,
    pub current_semester: i32,
    #[sea_orm(indexed)]
    pub department_id: Option<Uuid>,
    #[sea_orm(indexed)]
    pub event_id: Option<Uuid>,
    #[sea_orm(indexed)]
    pub initiative_id: Option<Uuid>,
    pub work_duration_months: i32,
    pub university_permission: bool,
    pub resume: Option<String>,
    pub photograph: Option<String>,
    pub completion_certificate: Option<String>,
    pub application_date: DateTimeWithTimeZone,
    pub status: Status,
    pub approved_by: Option<Uuid>,
    pub approval_date: Option<DateTimeWithTimeZone>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Sex {
    #[sea_orm(string_value = "M")]
    #[serde(rename = "M")]
    Male,
    #[sea_orm(string_value = "F")]
    #[serde(rename = "F")]
    Female,
    #[sea_orm(string_value = "O")]
    #[serde(rename = "O")]
    Other,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "SetNull"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::initiative::Entity",
        from = "Column::InitiativeId",
        to = "super::initiative::Column::Id",
        on_delete = "SetNull"
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

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("name", &self.name);
        if !self.email.contains('@') {
            errors.add("email", "Enter a valid email address");
        }
        errors.check_range("current_semester", self.current_semester, 1, 12);
        errors.check_range("work_duration_months", self.work_duration_months, 1, 12);
        if self.status == Status::Approved && self.approved_by.is_none() {
            errors.add("approved_by", "Approved volunteers must have an approver");
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
        hooks::stamp_created(&mut self.application_date, insert);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
