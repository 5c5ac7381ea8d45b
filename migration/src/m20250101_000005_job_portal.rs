use entity::{company, industry, job, job_application, job_seeker};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, industry::Entity).await?;
        schema::create(manager, company::Entity).await?;
        schema::create(manager, job_seeker::Entity).await?;
        schema::create(manager, job::Entity).await?;
        schema::create(manager, job_application::Entity).await?;
        schema::unique_together(
            manager,
            "ux_job_application_job_applicant",
            job_application::Entity,
            &[
                job_application::Column::JobId,
                job_application::Column::ApplicantId,
            ],
        )
        .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, job_application::Entity).await?;
        schema::drop(manager, job::Entity).await?;
        schema::drop(manager, job_seeker::Entity).await?;
        schema::drop(manager, company::Entity).await?;
        schema::drop(manager, industry::Entity).await
    }
}
