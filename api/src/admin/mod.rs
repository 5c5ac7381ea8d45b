//! Staff back office: list, detail, edit, bulk actions and CSV export for
//! every table, addressed by resource slug.

use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::Value as Json;
use uuid::Uuid;

use crate::auth::Viewer;

pub mod badge;
mod error;
mod export;
mod params;
mod registry;
mod resource;

pub use badge::{Badge, Color};
pub use error::AdminError;
pub use export::CsvExport;
pub use params::{ListParams, Lookup, parse_ids};
pub use resource::{
    ColumnHeader, DetailPage, Fieldset, Inline, InlineRows, ListColumn, ListPage, ModelAdmin,
    Resource, ResourceMeta,
};

/// Index entry for one resource.
#[derive(Clone, Debug, Serialize)]
pub struct ResourceLink {
    pub slug: &'static str,
    pub name: &'static str,
    pub read_only: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdminGroup {
    pub name: &'static str,
    pub resources: Vec<ResourceLink>,
}

pub struct AdminSite {
    resources: Vec<Box<dyn Resource>>,
}

impl Default for AdminSite {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminSite {
    /// Site with every model registered.
    pub fn new() -> Self {
        Self {
            resources: registry::resources(),
        }
    }

    pub fn empty() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    pub fn register(&mut self, resource: Box<dyn Resource>) {
        self.resources
            .retain(|existing| existing.meta().slug != resource.meta().slug);
        self.resources.push(resource);
    }

    pub fn resource(&self, slug: &str) -> Result<&dyn Resource, AdminError> {
        self.resources
            .iter()
            .find(|resource| resource.meta().slug == slug)
            .map(|resource| resource.as_ref())
            .ok_or_else(|| AdminError::UnknownResource(slug.to_string()))
    }

    pub fn index(&self) -> Vec<AdminGroup> {
        let mut groups: Vec<AdminGroup> = Vec::new();
        for resource in &self.resources {
            let meta = resource.meta();
            let link = ResourceLink {
                slug: meta.slug,
                name: meta.verbose_name_plural,
                read_only: meta.read_only,
            };
            match groups.iter_mut().find(|group| group.name == meta.group) {
                Some(group) => group.resources.push(link),
                None => groups.push(AdminGroup {
                    name: meta.group,
                    resources: vec![link],
                }),
            }
        }
        groups
    }

    pub async fn list(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        params: &ListParams,
    ) -> Result<ListPage, AdminError> {
        self.resource(slug)?.list(db, params).await
    }

    /// Detail page with the first page of every inline child list.
    pub async fn detail(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        id: Uuid,
    ) -> Result<DetailPage, AdminError> {
        let resource = self.resource(slug)?;
        let mut page = resource.detail(db, id).await?;
        for inline in &resource.meta().inlines {
            let child = self.resource(inline.resource)?;
            let rows = child
                .list(db, &ListParams::new().filter(inline.foreign_key, id.to_string()))
                .await?;
            page.inlines.push(InlineRows {
                resource: inline.resource,
                label: child.meta().verbose_name_plural,
                total: rows.total,
                rows: rows.rows,
            });
        }
        Ok(page)
    }

    pub async fn create(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        payload: Json,
    ) -> Result<Json, AdminError> {
        self.resource(slug)?.create(db, payload).await
    }

    pub async fn update(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        id: Uuid,
        payload: Json,
    ) -> Result<Json, AdminError> {
        self.resource(slug)?.update(db, id, payload).await
    }

    pub async fn delete(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        id: Uuid,
    ) -> Result<(), AdminError> {
        self.resource(slug)?.delete(db, id).await
    }

    pub async fn run_action(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        action: &str,
        ids: &[Uuid],
        actor: &Viewer,
    ) -> Result<u64, AdminError> {
        self.resource(slug)?.run_action(db, action, ids, actor).await
    }

    pub async fn export_csv(
        &self,
        db: &DatabaseConnection,
        slug: &str,
        params: &ListParams,
    ) -> Result<CsvExport, AdminError> {
        self.resource(slug)?.export_csv(db, params).await
    }

    /// Configuration problems across all resources, keyed by slug.
    pub fn check(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut problems = BTreeMap::new();
        for resource in &self.resources {
            let meta = resource.meta();
            let mut found = resource.check();
            for inline in &meta.inlines {
                match self.resource(inline.resource) {
                    Ok(child) if !child.has_field(inline.foreign_key) => found.push(format!(
                        "{}: inline '{}' has no field '{}'",
                        meta.slug, inline.resource, inline.foreign_key
                    )),
                    Ok(child) if !child.meta().list_filters.contains(&inline.foreign_key) => {
                        found.push(format!(
                            "{}: inline '{}' cannot filter on '{}'",
                            meta.slug, inline.resource, inline.foreign_key
                        ))
                    }
                    Ok(_) => {}
                    Err(_) => found.push(format!(
                        "{}: inline resource '{}' is not registered",
                        meta.slug, inline.resource
                    )),
                }
            }
            if !found.is_empty() {
                problems.insert(meta.slug, found);
            }
        }
        problems
    }
}
