use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub name: String,
    pub event_type: EventType,
    pub description: String,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub location: String,
    pub virtual_meeting_link: Option<String>,
    #[sea_orm(indexed)]
    pub organizer_id: Uuid,
    pub status: Status,
    pub max_participants: i32,
    pub current_participants: i32,
    pub budget_cents: i64,
    pub actual_spend_cents: i64,
    pub feedback_summary: String,
    pub materials: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    pub fn registration_open(&self) -> bool {
        !self.is_full() && self.status == Status::Confirmed
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    #[sea_orm(string_value = "WORKSHOP")]
    Workshop,
    #[sea_orm(string_value = "SEMINAR")]
    Seminar,
    #[sea_orm(string_value = "TRAINING")]
    Training,
    #[sea_orm(string_value = "COMMUNITY")]
    Community,
    #[sea_orm(string_value = "MEETING")]
    Meeting,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "PLANNED")]
    Planned,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
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
        from = "Column::OrganizerId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Organizer,
    #[sea_orm(has_many = "super::student_volunteer::Entity")]
    Applicants,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Related<super::student_volunteer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicants.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("name", &self.name);
        errors.check_non_negative("max_participants", self.max_participants);
        errors.check_non_negative("current_participants", self.current_participants);
        errors.check_non_negative("budget_cents", self.budget_cents);
        errors.check_non_negative("actual_spend_cents", self.actual_spend_cents);
        if self.end_date <= self.start_date {
            errors.add("end_date", "End date must be after start date");
        }
        if self.current_participants > self.max_participants {
            errors.add(
                "current_participants",
                "Current participants cannot exceed maximum participants",
            );
        }
        if self.actual_spend_cents > self.budget_cents {
            errors.add("actual_spend_cents", "Actual spend cannot exceed budget");
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
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn event() -> Model {
        let start = Utc::now();
        Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            name: "Water safety workshop".into(),
            event_type: EventType::Workshop,
            description: String::new(),
            start_date: start.into(),
            end_date: (start + Duration::hours(3)).into(),
            location: "Community hall".into(),
            virtual_meeting_link: None,
            organizer_id: Uuid::nil(),
            status: Status::Confirmed,
            max_participants: 30,
            current_participants: 12,
            budget_cents: 50_000,
            actual_spend_cents: 10_000,
            feedback_summary: String::new(),
            materials: None,
            created_at: start.into(),
            updated_at: start.into(),
        }
    }

    #[test]
    fn registration_requires_confirmed_and_capacity() {
        let mut record = event();
        assert!(record.registration_open());

        record.current_participants = 30;
        assert!(record.is_full());
        assert!(!record.registration_open());

        record.current_participants = 5;
        record.status = Status::Planned;
        assert!(!record.registration_open());
    }

    #[test]
    fn participants_and_spend_are_bounded() {
        let mut record = event();
        record.current_participants = 31;
        record.actual_spend_cents = 60_000;
        record.end_date = record.start_date;
        let err = record.validate().unwrap_err();
        assert!(err.has_field("current_participants"));
        assert!(err.has_field("actual_spend_cents"));
        assert!(err.has_field("end_date"));
    }
}
