use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestone")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub title: String,
    pub description: String,
    pub target_date: NaiveDate,
    pub actual_completion_date: Option<NaiveDate>,
    pub status: Status,
    pub deliverables: String,
    #[sea_orm(indexed)]
    pub responsible_person_id: Uuid,
    pub progress: i32,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Past its target date without a recorded completion.
    pub fn is_delayed(&self, today: NaiveDate) -> bool {
        self.actual_completion_date.is_none() && self.target_date < today
    }

    /// Days until the target date; negative once overdue.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.target_date - today).num_days()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "DELAYED")]
    Delayed,
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
        from = "Column::ResponsiblePersonId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    ResponsiblePerson,
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("title", &self.title);
        errors.check_range("progress", self.progress, 0, 100);
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
