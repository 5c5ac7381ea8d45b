use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks::{self, current, slugify};
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub company_name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub website: String,
    pub location: String,
    pub established_date: NaiveDate,
    pub company_size: CompanySize,
    #[sea_orm(indexed)]
    pub industry_id: Option<Uuid>,
    pub is_verified: bool,
    pub is_featured: bool,
    pub logo: Option<String>,
    #[sea_orm(unique)]
    pub company_email: String,
    pub phone: String,
    pub address: String,
    pub registration_number: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum CompanySize {
    #[sea_orm(string_value = "1-10")]
    #[serde(rename = "1-10")]
    Micro,
    #[sea_orm(string_value = "11-50")]
    #[serde(rename = "11-50")]
    Small,
    #[sea_orm(string_value = "51-200")]
    #[serde(rename = "51-200")]
    Medium,
    #[sea_orm(string_value = "201-500")]
    #[serde(rename = "201-500")]
    Large,
    #[sea_orm(string_value = "501-1000")]
    #[serde(rename = "501-1000")]
    Enterprise,
    #[sea_orm(string_value = "1001+")]
    #[serde(rename = "1001+")]
    Corporation,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::industry::Entity",
        from = "Column::IndustryId",
        to = "super::industry::Column::Id",
        on_delete = "SetNull"
    )]
    Industry,
    #[sea_orm(has_many = "super::job::Entity")]
    Jobs,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::industry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Industry.def()
    }
}

impl Related<super::job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Jobs.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("company_name", &self.company_name);
        errors.check_not_blank("slug", &self.slug);
        if !self.company_email.contains('@') {
            errors.add("company_email", "Enter a valid email address");
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
        if hooks::is_blank(&self.slug)
            && let Some(name) = current(&self.company_name)
        {
            let slug = slugify(name);
            self.slug = Set(slug);
        }
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
