use entity::{csr_proposal, financial_tracking, kpi_metric, risk_assessment};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, risk_assessment::Entity).await?;
        schema::create(manager, csr_proposal::Entity).await?;
        schema::create(manager, kpi_metric::Entity).await?;
        schema::create(manager, financial_tracking::Entity).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, financial_tracking::Entity).await?;
        schema::drop(manager, kpi_metric::Entity).await?;
        schema::drop(manager, csr_proposal::Entity).await?;
        schema::drop(manager, risk_assessment::Entity).await
    }
}
