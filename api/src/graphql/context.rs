use std::sync::Arc;

use async_graphql::connection::query;
use async_graphql::{Context, Error, ErrorExtensions, ID, OutputType};
use entity::validation::validation_messages;
use platform_api::pagination::{OffsetConnection, PageArgs, connection};
use platform_api::{ApiError, error_with_code, internal_error};
use platform_authn::JwtService;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select,
    SqlErr,
};
use uuid::Uuid;

use crate::auth::Viewer;

pub(crate) fn database(ctx: &Context<'_>) -> async_graphql::Result<Arc<DatabaseConnection>> {
    ctx.data::<Arc<DatabaseConnection>>()
        .cloned()
        .map_err(|_| error_with_code("INTERNAL", "Missing database connection"))
}

pub(crate) fn jwt(ctx: &Context<'_>) -> async_graphql::Result<Arc<JwtService>> {
    ctx.data::<Arc<JwtService>>()
        .cloned()
        .map_err(|_| error_with_code("INTERNAL", "Missing token service"))
}

pub(crate) fn require_viewer<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Viewer> {
    ctx.data_opt::<Viewer>()
        .ok_or_else(|| ApiError::Unauthenticated.extend())
}

pub(crate) fn parse_uuid(id: &ID) -> async_graphql::Result<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(|_| error_with_code("BAD_REQUEST", "Invalid ID"))
}

pub(crate) fn parse_uuids(ids: &[ID]) -> async_graphql::Result<Vec<Uuid>> {
    ids.iter().map(parse_uuid).collect()
}

pub(crate) fn to_id(id: Uuid) -> ID {
    ID::from(id.to_string())
}

pub(crate) fn db_error(err: DbErr) -> Error {
    internal_error(err)
}

/// Case-insensitive substring match on a text column.
pub(crate) fn icontains<C>(column: C, needle: &str) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    let pattern = format!("%{}%", needle.trim().to_lowercase());
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}

/// Messages for a failed write that callers can act on; anything else is
/// an internal error.
pub(crate) fn write_failure(err: DbErr) -> Result<Vec<String>, Error> {
    if let Some(messages) = validation_messages(&err) {
        return Ok(messages);
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            Ok(vec!["A record with these values already exists".to_string()])
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            Ok(vec!["A referenced record does not exist".to_string()])
        }
        _ => Err(db_error(err)),
    }
}

/// Run `select` as an offset-cursor Relay connection.
pub(crate) async fn paginate<E, N>(
    db: &DatabaseConnection,
    select: Select<E>,
    after: Option<String>,
    before: Option<String>,
    first: Option<i32>,
    last: Option<i32>,
    node: fn(E::Model) -> N,
) -> async_graphql::Result<OffsetConnection<N>>
where
    E: EntityTrait,
    E::Model: Sync,
    N: OutputType,
{
    query(
        after,
        before,
        first,
        last,
        |after, before, first, last| async move {
            let total = select.clone().count(db).await.map_err(db_error)?;
            let window = PageArgs {
                after,
                before,
                first,
                last,
            }
            .window(total as usize);
            let rows = select
                .offset(window.offset as u64)
                .limit(window.limit as u64)
                .all(db)
                .await
                .map_err(db_error)?;
            Ok::<_, Error>(connection(
                window,
                total,
                rows.into_iter().map(node).collect(),
            ))
        },
    )
    .await
}
