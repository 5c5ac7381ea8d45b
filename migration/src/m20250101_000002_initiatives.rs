use entity::{
    budget, event, event_speaker, event_volunteer, initiative, initiative_stakeholder,
    initiative_volunteer, kpi, milestone, risk, stakeholder, student_volunteer, task,
    task_dependency,
};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, initiative::Entity).await?;
        schema::create(manager, stakeholder::Entity).await?;
        schema::create(manager, initiative_stakeholder::Entity).await?;
        schema::create(manager, event::Entity).await?;
        schema::create(manager, event_speaker::Entity).await?;
        schema::create(manager, student_volunteer::Entity).await?;
        schema::create(manager, initiative_volunteer::Entity).await?;
        schema::create(manager, event_volunteer::Entity).await?;
        schema::create(manager, milestone::Entity).await?;
        schema::create(manager, task::Entity).await?;
        schema::create(manager, task_dependency::Entity).await?;
        schema::create(manager, risk::Entity).await?;
        schema::create(manager, kpi::Entity).await?;
        schema::create(manager, budget::Entity).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, budget::Entity).await?;
        schema::drop(manager, kpi::Entity).await?;
        schema::drop(manager, risk::Entity).await?;
        schema::drop(manager, task_dependency::Entity).await?;
        schema::drop(manager, task::Entity).await?;
        schema::drop(manager, milestone::Entity).await?;
        schema::drop(manager, event_volunteer::Entity).await?;
        schema::drop(manager, initiative_volunteer::Entity).await?;
        schema::drop(manager, student_volunteer::Entity).await?;
        schema::drop(manager, event_speaker::Entity).await?;
        schema::drop(manager, event::Entity).await?;
        schema::drop(manager, initiative_stakeholder::Entity).await?;
        schema::drop(manager, stakeholder::Entity).await?;
        schema::drop(manager, initiative::Entity).await
    }
}
