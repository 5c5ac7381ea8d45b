use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks::{self, current, short_suffix, slugify};
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_seeker")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub resume: Option<String>,
    pub cover_letter_template: String,
    pub experience_years: f64,
    pub education: String,
    pub preferred_job_types: String,
    pub preferred_locations: String,
    pub expected_salary_cents: Option<i64>,
    pub phone: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub github_url: String,
    pub is_available: bool,
    pub profile_visibility: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
    #[sea_orm(has_many = "super::job_application::Entity")]
    Applications,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::job_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
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
        if hooks::is_blank(&self.slug)
            && let Some(user_id) = current(&self.user_id)
        {
            let owner = user::Entity::find_by_id(*user_id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id}")))?;
            self.slug = Set(slugify(&format!("{}-{}", owner.username, short_suffix())));
        }
        Ok(self)
    }
}
