//! GraphQL facade over the initiative tables plus JWT session operations.

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};
use platform_authn::JwtService;
use sea_orm::DatabaseConnection;

pub(crate) mod context;
pub mod filters;
pub mod mutation;
pub mod query;
pub mod token;
pub mod types;

#[derive(MergedObject, Default)]
pub struct QueryRoot(query::InitiativeQuery, token::TokenQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(mutation::InitiativeMutation, token::TokenMutation);

pub type GraphqlSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub struct AppSchema(pub GraphqlSchema);

pub fn build_schema(db: Arc<DatabaseConnection>, jwt: Arc<JwtService>) -> AppSchema {
    let schema = Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(jwt)
        .finish();
    AppSchema(schema)
}

/// SDL of the full schema, as served by the GraphQL endpoint.
pub fn sdl() -> String {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .finish()
        .sdl()
}
