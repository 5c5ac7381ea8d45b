//! Table builders derived from the entity definitions.
//!
//! Columns, unique constraints, foreign keys (with their delete actions) and
//! `indexed` columns all come from the sea-orm entities, so the generated DDL
//! works unchanged on SQLite and Postgres.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

pub async fn create<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let schema = Schema::new(manager.get_database_backend());
    let mut table = schema.create_table_from_entity(entity);
    manager.create_table(table.if_not_exists().to_owned()).await?;
    for mut index in schema.create_index_from_entity(entity) {
        manager.create_index(index.if_not_exists().to_owned()).await?;
    }
    Ok(())
}

pub async fn drop<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}

/// Composite uniqueness the entity derive cannot express.
pub async fn unique_together<E, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    entity: E,
    columns: &[C],
) -> Result<(), DbErr>
where
    E: EntityTrait,
    C: IntoIden + Copy,
{
    let mut index = Index::create();
    index.if_not_exists().name(name).table(entity).unique();
    for column in columns {
        index.col(*column);
    }
    manager.create_index(index.to_owned()).await
}
