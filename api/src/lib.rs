//! Application layer: the GraphQL schema, the staff admin site and upload
//! storage, all backed by the `entity` tables.

pub mod admin;
pub mod auth;
pub mod graphql;
pub mod media;

pub use auth::Viewer;
pub use graphql::{AppSchema, build_schema};
