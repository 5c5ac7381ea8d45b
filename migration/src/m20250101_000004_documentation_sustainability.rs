use entity::{
    annual_budget, budget_tracking, diversity_metric, impact_story, program_logbook, sdg_mapping,
};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, program_logbook::Entity).await?;
        schema::create(manager, impact_story::Entity).await?;
        schema::create(manager, sdg_mapping::Entity).await?;
        schema::unique_together(
            manager,
            "ux_sdg_mapping_initiative_sdg",
            sdg_mapping::Entity,
            &[sdg_mapping::Column::InitiativeId, sdg_mapping::Column::Sdg],
        )
        .await?;
        schema::create(manager, annual_budget::Entity).await?;
        schema::create(manager, budget_tracking::Entity).await?;
        schema::create(manager, diversity_metric::Entity).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, diversity_metric::Entity).await?;
        schema::drop(manager, budget_tracking::Entity).await?;
        schema::drop(manager, annual_budget::Entity).await?;
        schema::drop(manager, sdg_mapping::Entity).await?;
        schema::drop(manager, impact_story::Entity).await?;
        schema::drop(manager, program_logbook::Entity).await
    }
}
