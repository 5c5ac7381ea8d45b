use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::hooks::{self, current};
use crate::milestone;
use crate::task_dependency;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    #[sea_orm(indexed)]
    pub milestone_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    #[sea_orm(indexed)]
    pub assigned_to: Option<Uuid>,
    pub priority: Priority,
    pub status: Status,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub progress: i32,
    pub comments: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_delayed(&self, today: NaiveDate) -> bool {
        self.status != Status::Completed && self.due_date < today
    }

    /// Days left before the due date; zero once the task is completed.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        if self.status == Status::Completed {
            return 0;
        }
        (self.due_date - today).num_days()
    }

    /// True when every task this one depends on is completed.
    pub async fn can_start<C>(&self, db: &C) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        dependencies_completed(db, self.id).await
    }
}

pub async fn dependencies_completed<C>(db: &C, task_id: Uuid) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let blocking: Vec<Uuid> = task_dependency::Entity::find()
        .select_only()
        .column(task_dependency::Column::DependsOnId)
        .filter(task_dependency::Column::TaskId.eq(task_id))
        .into_tuple()
        .all(db)
        .await?;
    if blocking.is_empty() {
        return Ok(true);
    }
    let open = Entity::find()
        .filter(Column::Id.is_in(blocking))
        .filter(Column::Status.ne(Status::Completed))
        .count(db)
        .await?;
    Ok(open == 0)
}

/// Clamp a requested progress value into 0..=100.
pub fn clamp_progress(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// Status and completion date implied by the progress value.
///
/// Full progress completes the task, stamping `today` when no completion
/// date was recorded. Anything below 100 clears the completion date: partial
/// progress moves the task to in-progress, and zero progress keeps the status
/// unless the task was completed, in which case it is reopened as to-do.
pub fn derive_progress_state(
    progress: i32,
    status: Status,
    completion_date: Option<NaiveDate>,
    today: NaiveDate,
) -> (Status, Option<NaiveDate>) {
    if progress >= 100 {
        (Status::Completed, completion_date.or(Some(today)))
    } else if progress > 0 {
        (Status::InProgress, None)
    } else if status == Status::Completed {
        (Status::Todo, None)
    } else {
        (status, None)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[sea_orm(string_value = "TODO")]
    Todo,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "REVIEW")]
    Review,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "ON_HOLD")]
    OnHold,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[sea_orm(string_value = "LOW")]
    Low,
    #[sea_orm(string_value = "MEDIUM")]
    Medium,
    #[sea_orm(string_value = "HIGH")]
    High,
    #[sea_orm(string_value = "URGENT")]
    Urgent,
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
        belongs_to = "super::milestone::Entity",
        from = "Column::MilestoneId",
        to = "super::milestone::Column::Id",
        on_delete = "SetNull"
    )]
    Milestone,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::AssignedTo",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Assignee,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Related<super::milestone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestone.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("title", &self.title);
        errors.check_range("progress", self.progress, 0, 100);
        if self.due_date < self.start_date {
            errors.add("due_date", "Due date must be after start date");
        }
        if let Some(completed) = self.completion_date {
            if completed < self.start_date {
                errors.add(
                    "completion_date",
                    "Completion date cannot be before start date",
                );
            }
            if self.status != Status::Completed {
                errors.add("status", "Status must be COMPLETED if completion date is set");
            }
        }
        if self.progress == 100 && self.status != Status::Completed {
            errors.add("progress", "Task with 100% progress should be marked as completed");
        }
        if self.status == Status::Completed && self.progress != 100 {
            errors.add("status", "Completed task should have 100% progress");
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

        if let (Some(progress), Some(status), Some(completion)) = (
            current(&self.progress),
            current(&self.status),
            current(&self.completion_date),
        ) {
            let (status, completion) =
                derive_progress_state(*progress, *status, *completion, hooks::today());
            self.status = Set(status);
            self.completion_date = Set(completion);
        }

        let model = hooks::validated::<Self, Model>(&self)?;
        if let Some(milestone_id) = model.milestone_id {
            let milestone = milestone::Entity::find_by_id(milestone_id).one(db).await?;
            let mut errors = ValidationErrors::new();
            match milestone {
                Some(found) if found.initiative_id != model.initiative_id => {
                    errors.add("milestone_id", "Milestone must belong to the same initiative");
                }
                None => errors.add("milestone_id", "Milestone does not exist"),
                Some(_) => {}
            }
            errors.into_result()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_progress_completes_and_stamps_today() {
        let today = date(2024, 6, 15);
        let (status, completed) = derive_progress_state(100, Status::InProgress, None, today);
        assert_eq!(status, Status::Completed);
        assert_eq!(completed, Some(today));

        let earlier = date(2024, 6, 1);
        let (_, kept) = derive_progress_state(100, Status::Review, Some(earlier), today);
        assert_eq!(kept, Some(earlier));
    }

    #[test]
    fn zero_progress_keeps_status() {
        let today = date(2024, 6, 15);
        assert_eq!(
            derive_progress_state(0, Status::Todo, None, today),
            (Status::Todo, None)
        );
        assert_eq!(
            derive_progress_state(0, Status::OnHold, None, today).0,
            Status::OnHold
        );
    }

    #[test]
    fn partial_progress_moves_to_in_progress() {
        let today = date(2024, 6, 15);
        for progress in [1, 50, 99] {
            let (status, completed) = derive_progress_state(progress, Status::Todo, None, today);
            assert_eq!(status, Status::InProgress);
            assert_eq!(completed, None);
        }
    }

    #[test]
    fn lowering_progress_reopens_a_completed_task() {
        let today = date(2024, 6, 15);
        let done = Some(date(2024, 6, 10));
        assert_eq!(
            derive_progress_state(50, Status::Completed, done, today),
            (Status::InProgress, None)
        );
        assert_eq!(
            derive_progress_state(0, Status::Completed, done, today),
            (Status::Todo, None)
        );
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(42), 42);
        assert_eq!(clamp_progress(180), 100);
    }

    #[test]
    fn completed_status_needs_full_progress() {
        let now = hooks::now();
        let task = Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            milestone_id: None,
            title: "Site survey".into(),
            description: String::new(),
            assigned_to: None,
            priority: Priority::High,
            status: Status::Completed,
            start_date: date(2024, 1, 1),
            due_date: date(2024, 1, 31),
            completion_date: None,
            progress: 0,
            comments: String::new(),
            created_at: now,
            updated_at: now,
        };
        let err = task.validate().unwrap_err();
        assert!(err.has_field("status"));

        let overdue = Model {
            status: Status::InProgress,
            progress: 30,
            ..task
        };
        assert!(overdue.is_delayed(date(2024, 2, 2)));
        assert_eq!(overdue.days_until_due(date(2024, 1, 21)), 10);
        assert_eq!(overdue.days_until_due(date(2024, 2, 3)), -3);

        let finished = Model {
            status: Status::Completed,
            progress: 100,
            completion_date: Some(date(2024, 2, 1)),
            ..overdue
        };
        assert!(!finished.is_delayed(date(2024, 2, 3)));
        assert_eq!(finished.days_until_due(date(2024, 2, 3)), 0);
    }
}
