use async_graphql::{Context, ID, InputObject, Object, SimpleObject};
use chrono::NaiveDate;
use entity::{department, initiative, initiative_stakeholder, stakeholder, task};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QuerySelect, TransactionTrait,
};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use super::context::{database, db_error, parse_uuid, parse_uuids, require_viewer, write_failure};
use super::types::{InitiativeNode, InitiativeStatus, Sdg, TaskNode};

#[derive(InputObject, Clone)]
pub struct InitiativeInput {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_cents: i64,
    pub sdg_alignment: Sdg,
    pub department_id: ID,
    pub target_beneficiaries: String,
    pub success_metrics: String,
    /// Replaces the linked stakeholders when given. Unknown ids are skipped.
    pub stakeholder_ids: Option<Vec<ID>>,
    pub status: Option<InitiativeStatus>,
    pub actual_spend_cents: Option<i64>,
    pub challenges_faced: Option<String>,
    pub lessons_learned: Option<String>,
}

#[derive(SimpleObject)]
pub struct InitiativePayload {
    pub initiative: Option<InitiativeNode>,
    pub success: bool,
    pub errors: Option<Vec<String>>,
}

impl InitiativePayload {
    fn ok(record: initiative::Model) -> Self {
        Self {
            initiative: Some(record.into()),
            success: true,
            errors: None,
        }
    }

    fn failed(errors: Vec<String>) -> Self {
        Self {
            initiative: None,
            success: false,
            errors: Some(errors),
        }
    }
}

#[derive(SimpleObject)]
pub struct TaskProgressPayload {
    pub task: Option<TaskNode>,
    pub success: bool,
    pub errors: Option<Vec<String>>,
}

impl TaskProgressPayload {
    fn failed(errors: Vec<String>) -> Self {
        Self {
            task: None,
            success: false,
            errors: Some(errors),
        }
    }
}

fn not_found(label: &str) -> Vec<String> {
    vec![format!("{label} not found")]
}

#[derive(Default)]
pub struct InitiativeMutation;

#[Object]
impl InitiativeMutation {
    async fn create_initiative(
        &self,
        ctx: &Context<'_>,
        input: InitiativeInput,
    ) -> async_graphql::Result<InitiativePayload> {
        let viewer = require_viewer(ctx)?;
        let db = database(ctx)?;
        let Some(member_id) = viewer.member_id else {
            return Ok(InitiativePayload::failed(vec![
                "Only members can create initiatives".into(),
            ]));
        };
        let department_id = parse_uuid(&input.department_id)?;
        let stakeholder_ids = input
            .stakeholder_ids
            .as_deref()
            .map(parse_uuids)
            .transpose()?;
        let span = info_span!("initiatives.create", name = %input.name, created_by = %member_id);

        async move {
            if !department_exists(db.as_ref(), department_id).await? {
                return Ok(InitiativePayload::failed(not_found("Department")));
            }
            let active = initiative::ActiveModel {
                name: Set(input.name.trim().to_string()),
                description: Set(input.description),
                start_date: Set(input.start_date),
                end_date: Set(input.end_date),
                budget_cents: Set(input.budget_cents),
                actual_spend_cents: Set(input.actual_spend_cents.unwrap_or(0)),
                status: Set(input
                    .status
                    .map(initiative::Status::from)
                    .unwrap_or(initiative::Status::Planned)),
                sdg_alignment: Set(input.sdg_alignment.into()),
                department_id: Set(department_id),
                created_by: Set(member_id),
                target_beneficiaries: Set(input.target_beneficiaries),
                success_metrics: Set(input.success_metrics),
                challenges_faced: Set(input.challenges_faced),
                lessons_learned: Set(input.lessons_learned),
                attachments: Set(None),
                ..Default::default()
            };

            let txn = db.begin().await.map_err(db_error)?;
            let record = match active.insert(&txn).await {
                Ok(record) => record,
                Err(err) => {
                    txn.rollback().await.map_err(db_error)?;
                    return Ok(InitiativePayload::failed(write_failure(err)?));
                }
            };
            if let Some(ids) = stakeholder_ids {
                replace_stakeholders(&txn, record.id, &ids)
                    .await
                    .map_err(db_error)?;
            }
            txn.commit().await.map_err(db_error)?;
            tracing::info!(initiative_id = %record.id, "initiative created");
            Ok::<_, async_graphql::Error>(InitiativePayload::ok(record))
        }
        .instrument(span)
        .await
    }

    async fn update_initiative(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: InitiativeInput,
    ) -> async_graphql::Result<InitiativePayload> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let initiative_id = parse_uuid(&id)?;
        let department_id = parse_uuid(&input.department_id)?;
        let stakeholder_ids = input
            .stakeholder_ids
            .as_deref()
            .map(parse_uuids)
            .transpose()?;
        let span = info_span!("initiatives.update", initiative_id = %initiative_id);

        async move {
            let existing = initiative::Entity::find_by_id(initiative_id)
                .one(db.as_ref())
                .await
                .map_err(db_error)?;
            let Some(existing) = existing else {
                return Ok(InitiativePayload::failed(not_found("Initiative")));
            };
            if !department_exists(db.as_ref(), department_id).await? {
                return Ok(InitiativePayload::failed(not_found("Department")));
            }

            let mut active: initiative::ActiveModel = existing.into();
            active.name = Set(input.name.trim().to_string());
            active.description = Set(input.description);
            active.start_date = Set(input.start_date);
            active.end_date = Set(input.end_date);
            active.budget_cents = Set(input.budget_cents);
            active.sdg_alignment = Set(input.sdg_alignment.into());
            active.department_id = Set(department_id);
            active.target_beneficiaries = Set(input.target_beneficiaries);
            active.success_metrics = Set(input.success_metrics);
            if let Some(status) = input.status {
                active.status = Set(status.into());
            }
            if let Some(spend) = input.actual_spend_cents {
                active.actual_spend_cents = Set(spend);
            }
            if input.challenges_faced.is_some() {
                active.challenges_faced = Set(input.challenges_faced);
            }
            if input.lessons_learned.is_some() {
                active.lessons_learned = Set(input.lessons_learned);
            }

            let txn = db.begin().await.map_err(db_error)?;
            let record = match active.update(&txn).await {
                Ok(record) => record,
                Err(err) => {
                    txn.rollback().await.map_err(db_error)?;
                    return Ok(InitiativePayload::failed(write_failure(err)?));
                }
            };
            if let Some(ids) = stakeholder_ids {
                replace_stakeholders(&txn, record.id, &ids)
                    .await
                    .map_err(db_error)?;
            }
            txn.commit().await.map_err(db_error)?;
            tracing::info!("initiative updated");
            Ok::<_, async_graphql::Error>(InitiativePayload::ok(record))
        }
        .instrument(span)
        .await
    }

    /// Delete an initiative and everything that cascades from it. The payload
    /// carries the record as it was before deletion.
    async fn delete_initiative(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<InitiativePayload> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let initiative_id = parse_uuid(&id)?;
        let span = info_span!("initiatives.delete", initiative_id = %initiative_id);

        async move {
            let existing = initiative::Entity::find_by_id(initiative_id)
                .one(db.as_ref())
                .await
                .map_err(db_error)?;
            let Some(existing) = existing else {
                return Ok(InitiativePayload::failed(not_found("Initiative")));
            };
            initiative::Entity::delete_by_id(initiative_id)
                .exec(db.as_ref())
                .await
                .map_err(db_error)?;
            tracing::info!("initiative deleted");
            Ok::<_, async_graphql::Error>(InitiativePayload::ok(existing))
        }
        .instrument(span)
        .await
    }

    /// Set a task's progress, clamped to 0..=100. Status and completion date
    /// follow from the new value.
    async fn update_task_progress(
        &self,
        ctx: &Context<'_>,
        id: ID,
        progress: i32,
    ) -> async_graphql::Result<TaskProgressPayload> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let task_id = parse_uuid(&id)?;
        let span = info_span!("tasks.progress", task_id = %task_id, progress);

        async move {
            let existing = task::Entity::find_by_id(task_id)
                .one(db.as_ref())
                .await
                .map_err(db_error)?;
            let Some(existing) = existing else {
                return Ok::<_, async_graphql::Error>(TaskProgressPayload::failed(not_found(
                    "Task",
                )));
            };
            let mut active: task::ActiveModel = existing.into();
            active.progress = Set(task::clamp_progress(progress));
            match active.update(db.as_ref()).await {
                Ok(record) => Ok(TaskProgressPayload {
                    task: Some(record.into()),
                    success: true,
                    errors: None,
                }),
                Err(err) => Ok(TaskProgressPayload::failed(write_failure(err)?)),
            }
        }
        .instrument(span)
        .await
    }
}

async fn department_exists<C>(db: &C, id: Uuid) -> async_graphql::Result<bool>
where
    C: ConnectionTrait,
{
    let found = department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(db_error)?;
    Ok(found.is_some())
}

/// Point the initiative at exactly the stakeholders in `ids` that exist.
async fn replace_stakeholders<C>(db: &C, initiative_id: Uuid, ids: &[Uuid]) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    initiative_stakeholder::Entity::delete_many()
        .filter(initiative_stakeholder::Column::InitiativeId.eq(initiative_id))
        .exec(db)
        .await?;
    if ids.is_empty() {
        return Ok(());
    }
    let known: Vec<Uuid> = stakeholder::Entity::find()
        .select_only()
        .column(stakeholder::Column::Id)
        .filter(stakeholder::Column::Id.is_in(ids.to_vec()))
        .into_tuple()
        .all(db)
        .await?;
    if known.is_empty() {
        return Ok(());
    }
    let links = known
        .into_iter()
        .map(|stakeholder_id| initiative_stakeholder::ActiveModel {
            initiative_id: Set(initiative_id),
            stakeholder_id: Set(stakeholder_id),
        });
    initiative_stakeholder::Entity::insert_many(links)
        .exec_without_returning(db)
        .await?;
    Ok(())
}
