use entity::{core_committee, department, member, user};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, user::Entity).await?;
        schema::create(manager, member::Entity).await?;
        schema::create(manager, department::Entity).await?;
        schema::create(manager, core_committee::Entity).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, core_committee::Entity).await?;
        schema::drop(manager, department::Entity).await?;
        schema::drop(manager, member::Entity).await?;
        schema::drop(manager, user::Entity).await
    }
}
