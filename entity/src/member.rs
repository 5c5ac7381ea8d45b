use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub member_type: MemberType,
    pub join_date: NaiveDate,
    pub status: Status,
    pub skills: String,
    pub certifications: String,
    pub bio: String,
    pub linkedin_profile: Option<String>,
    pub github_profile: Option<String>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub last_active: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Whole years since joining, floored.
    pub fn years_of_membership(&self, today: NaiveDate) -> i64 {
        ((today - self.join_date).num_days() / 365).max(0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberType {
    #[sea_orm(string_value = "ASSOCIATE")]
    Associate,
    #[sea_orm(string_value = "REGULAR")]
    Regular,
    #[sea_orm(string_value = "SENIOR")]
    Senior,
    #[sea_orm(string_value = "HONORARY")]
    Honorary,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
    #[sea_orm(string_value = "ALUMNI")]
    Alumni,
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
    #[sea_orm(has_many = "super::core_committee::Entity")]
    CommitteePositions,
    #[sea_orm(has_many = "super::initiative::Entity")]
    CreatedInitiatives,
    #[sea_orm(has_many = "super::task::Entity")]
    AssignedTasks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::core_committee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommitteePositions.def()
    }
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedInitiatives.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedTasks.def()
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
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_years_are_floored() {
        let now = hooks::now();
        let member = Model {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            member_type: MemberType::Regular,
            join_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            status: Status::Active,
            skills: String::new(),
            certifications: String::new(),
            bio: String::new(),
            linkedin_profile: None,
            github_profile: None,
            profile_picture: None,
            phone_number: None,
            emergency_contact: None,
            last_active: None,
            created_at: now,
            updated_at: now,
        };
        let today = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert_eq!(member.years_of_membership(today), 3);
    }
}
