use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::company;
use crate::hooks::{self, current, short_suffix, slugify};
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub company_id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub benefits: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub experience_years_min: i32,
    pub experience_years_max: i32,
    pub education_requirement: String,
    #[sea_orm(indexed)]
    pub industry_id: Option<Uuid>,
    pub location: String,
    pub is_remote: bool,
    pub salary_min_cents: i64,
    pub salary_max_cents: i64,
    pub salary_is_negotiable: bool,
    pub hide_salary: bool,
    pub status: Status,
    pub is_featured: bool,
    pub posted_date: DateTimeWithTimeZone,
    pub deadline: DateTimeWithTimeZone,
    pub positions_available: i32,
    pub applications_count: i32,
    pub views_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_open(&self, now: DateTimeWithTimeZone) -> bool {
        self.status == Status::Active && self.deadline > now
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum JobType {
    #[sea_orm(string_value = "FT")]
    #[serde(rename = "FT")]
    FullTime,
    #[sea_orm(string_value = "PT")]
    #[serde(rename = "PT")]
    PartTime,
    #[sea_orm(string_value = "CT")]
    #[serde(rename = "CT")]
    Contract,
    #[sea_orm(string_value = "IN")]
    #[serde(rename = "IN")]
    Internship,
    #[sea_orm(string_value = "RM")]
    #[serde(rename = "RM")]
    Remote,
    #[sea_orm(string_value = "FL")]
    #[serde(rename = "FL")]
    Freelance,
    #[sea_orm(string_value = "TP")]
    #[serde(rename = "TP")]
    Temporary,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum ExperienceLevel {
    #[sea_orm(string_value = "EN")]
    #[serde(rename = "EN")]
    Entry,
    #[sea_orm(string_value = "JR")]
    #[serde(rename = "JR")]
    Junior,
    #[sea_orm(string_value = "MD")]
    #[serde(rename = "MD")]
    Mid,
    #[sea_orm(string_value = "SR")]
    #[serde(rename = "SR")]
    Senior,
    #[sea_orm(string_value = "LD")]
    #[serde(rename = "LD")]
    Lead,
    #[sea_orm(string_value = "EX")]
    #[serde(rename = "EX")]
    Executive,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Status {
    #[sea_orm(string_value = "DR")]
    #[serde(rename = "DR")]
    Draft,
    #[sea_orm(string_value = "PN")]
    #[serde(rename = "PN")]
    Pending,
    #[sea_orm(string_value = "AC")]
    #[serde(rename = "AC")]
    Active,
    #[sea_orm(string_value = "PS")]
    #[serde(rename = "PS")]
    Paused,
    #[sea_orm(string_value = "CL")]
    #[serde(rename = "CL")]
    Closed,
    #[sea_orm(string_value = "EX")]
    #[serde(rename = "EX")]
    Expired,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::industry::Entity",
        from = "Column::IndustryId",
        to = "super::industry::Column::Id",
        on_delete = "SetNull"
    )]
    Industry,
    #[sea_orm(has_many = "super::job_application::Entity")]
    Applications,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::industry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Industry.def()
    }
}

impl Related<super::job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("title", &self.title);
        if self.salary_min_cents > self.salary_max_cents {
            errors.add(
                "salary_max_cents",
                "Maximum salary must not be below minimum salary",
            );
        }
        if self.experience_years_min > self.experience_years_max {
            errors.add(
                "experience_years_max",
                "Maximum experience must not be below minimum experience",
            );
        }
        if self.positions_available < 1 {
            errors.add(
                "positions_available",
                "Ensure this value is greater than or equal to 1",
            );
        }
        errors.into_result()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::stamp(&mut self.created_at, &mut self.updated_at, insert);
        if insert && matches!(self.posted_date, sea_orm::ActiveValue::NotSet) {
            self.posted_date = Set(hooks::now());
        }
        if hooks::is_blank(&self.slug)
            && let (Some(title), Some(company_id)) =
                (current(&self.title), current(&self.company_id))
        {
            let owner = company::Entity::find_by_id(*company_id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("company {company_id}")))?;
            let slug = slugify(&format!(
                "{}-{}-{}",
                title,
                owner.company_name,
                short_suffix()
            ));
            self.slug = Set(slug);
        }
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
