use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{ColumnType, SimpleExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, Condition,
    DatabaseConnection, DbErr, EntityTrait, IdenStatic, IntoActiveModel, Iterable, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Select, UpdateMany, Value,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json, json};
use uuid::Uuid;

use super::badge::Badge;
use super::error::{AdminError, payload_error};
use super::export::{CsvExport, export_filename, write_csv};
use super::params::{ListParams, Lookup};
use crate::auth::Viewer;
use crate::graphql::context::icontains;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Badge that needs to look at related rows.
pub type QueryBadge<M> =
    for<'a> fn(&'a DatabaseConnection, &'a M, NaiveDate) -> BoxFuture<'a, Result<Badge, DbErr>>;

/// Bulk update applied to the selected rows.
pub type ActionFn<E> = fn(UpdateMany<E>, &Viewer) -> UpdateMany<E>;

/// Bulk update stamped with the acting user's member profile.
pub type MemberActionFn<E> = fn(UpdateMany<E>, Uuid) -> UpdateMany<E>;

/// Columns every table gets for free from its save hook.
const ALWAYS_MANAGED: &[&str] = &["id", "created_at", "updated_at"];

pub enum Render<M> {
    Row(fn(&M, NaiveDate) -> Badge),
    Query(QueryBadge<M>),
}

pub enum ListColumn<M> {
    Field(&'static str),
    Badge {
        name: &'static str,
        label: &'static str,
        render: Render<M>,
    },
}

impl<M> ListColumn<M> {
    pub fn field(name: &'static str) -> Self {
        ListColumn::Field(name)
    }

    pub fn badge(name: &'static str, label: &'static str, render: fn(&M, NaiveDate) -> Badge) -> Self {
        ListColumn::Badge {
            name,
            label,
            render: Render::Row(render),
        }
    }

    pub fn query(name: &'static str, label: &'static str, render: QueryBadge<M>) -> Self {
        ListColumn::Badge {
            name,
            label,
            render: Render::Query(render),
        }
    }

    fn header(&self) -> ColumnHeader {
        match self {
            ListColumn::Field(name) => ColumnHeader {
                name,
                label: name,
                computed: false,
            },
            ListColumn::Badge { name, label, .. } => ColumnHeader {
                name,
                label,
                computed: true,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ColumnHeader {
    pub name: &'static str,
    pub label: &'static str,
    pub computed: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Fieldset {
    pub title: &'static str,
    pub fields: &'static [&'static str],
    pub collapsed: bool,
}

impl Fieldset {
    pub fn new(title: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            title,
            fields,
            collapsed: false,
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.collapsed = true;
        self
    }
}

/// Child rows edited from the parent's detail page.
#[derive(Clone, Debug, Serialize)]
pub struct Inline {
    pub resource: &'static str,
    pub foreign_key: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActionInfo {
    pub name: &'static str,
    pub label: &'static str,
}

enum Apply<E: EntityTrait> {
    Any(ActionFn<E>),
    ByMember(MemberActionFn<E>),
}

pub struct BulkAction<E: EntityTrait> {
    pub name: &'static str,
    pub label: &'static str,
    apply: Apply<E>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ResourceMeta {
    pub slug: &'static str,
    pub group: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub columns: Vec<ColumnHeader>,
    pub search_fields: &'static [&'static str],
    pub list_filters: &'static [&'static str],
    pub ordering: &'static [&'static str],
    pub page_size: u64,
    pub fieldsets: Vec<Fieldset>,
    pub inlines: Vec<Inline>,
    pub actions: Vec<ActionInfo>,
    pub read_only: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListPage {
    pub resource: &'static str,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub page_size: u64,
    pub rows: Vec<Json>,
}

#[derive(Clone, Debug, Serialize)]
pub struct InlineRows {
    pub resource: &'static str,
    pub label: &'static str,
    pub total: u64,
    pub rows: Vec<Json>,
}

#[derive(Clone, Debug, Serialize)]
pub struct DetailPage {
    pub resource: &'static str,
    pub id: Uuid,
    pub record: Json,
    pub computed: Map<String, Json>,
    pub fieldsets: Vec<Fieldset>,
    pub inlines: Vec<InlineRows>,
}

/// One registered admin model, addressed by slug.
#[async_trait]
pub trait Resource: Send + Sync {
    fn meta(&self) -> &ResourceMeta;

    async fn list(&self, db: &DatabaseConnection, params: &ListParams)
    -> Result<ListPage, AdminError>;

    /// Record, computed columns and fieldsets. Inline rows are filled in by
    /// the site.
    async fn detail(&self, db: &DatabaseConnection, id: Uuid) -> Result<DetailPage, AdminError>;

    async fn create(&self, db: &DatabaseConnection, payload: Json) -> Result<Json, AdminError>;

    async fn update(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
        payload: Json,
    ) -> Result<Json, AdminError>;

    async fn delete(&self, db: &DatabaseConnection, id: Uuid) -> Result<(), AdminError>;

    /// Apply a bulk action to `ids`, returning the number of rows changed.
    async fn run_action(
        &self,
        db: &DatabaseConnection,
        action: &str,
        ids: &[Uuid],
        actor: &Viewer,
    ) -> Result<u64, AdminError>;

    async fn export_csv(
        &self,
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<CsvExport, AdminError>;

    fn has_field(&self, name: &str) -> bool;

    /// Configured field names that do not exist on the table.
    fn check(&self) -> Vec<String>;
}

/// Declarative admin configuration for one sea-orm entity.
pub struct ModelAdmin<E: EntityTrait, A> {
    meta: ResourceMeta,
    columns: Vec<ListColumn<E::Model>>,
    actions: Vec<BulkAction<E>>,
    managed: &'static [&'static str],
    hidden: &'static [&'static str],
    _active: PhantomData<fn() -> A>,
}

impl<E, A> ModelAdmin<E, A>
where
    E: EntityTrait,
{
    pub fn new(
        slug: &'static str,
        group: &'static str,
        verbose_name: &'static str,
        verbose_name_plural: &'static str,
    ) -> Self {
        Self {
            meta: ResourceMeta {
                slug,
                group,
                verbose_name,
                verbose_name_plural,
                columns: Vec::new(),
                search_fields: &[],
                list_filters: &[],
                ordering: &["-created_at"],
                page_size: 100,
                fieldsets: Vec::new(),
                inlines: Vec::new(),
                actions: vec![ActionInfo {
                    name: "export_csv",
                    label: "Export selected as CSV",
                }],
                read_only: false,
            },
            columns: Vec::new(),
            actions: Vec::new(),
            managed: &[],
            hidden: &[],
            _active: PhantomData,
        }
    }

    pub fn columns(mut self, columns: Vec<ListColumn<E::Model>>) -> Self {
        self.meta.columns = columns.iter().map(ListColumn::header).collect();
        self.columns = columns;
        self
    }

    pub fn search(mut self, fields: &'static [&'static str]) -> Self {
        self.meta.search_fields = fields;
        self
    }

    pub fn filters(mut self, fields: &'static [&'static str]) -> Self {
        self.meta.list_filters = fields;
        self
    }

    pub fn ordering(mut self, fields: &'static [&'static str]) -> Self {
        self.meta.ordering = fields;
        self
    }

    pub fn page_size(mut self, size: u64) -> Self {
        self.meta.page_size = size.max(1);
        self
    }

    pub fn fieldsets(mut self, fieldsets: Vec<Fieldset>) -> Self {
        self.meta.fieldsets = fieldsets;
        self
    }

    pub fn inline(mut self, resource: &'static str, foreign_key: &'static str) -> Self {
        self.meta.inlines.push(Inline {
            resource,
            foreign_key,
        });
        self
    }

    pub fn action(mut self, name: &'static str, label: &'static str, apply: ActionFn<E>) -> Self {
        self.meta.actions.push(ActionInfo { name, label });
        self.actions.push(BulkAction {
            name,
            label,
            apply: Apply::Any(apply),
        });
        self
    }

    /// Action that records who performed it; refused for users without a
    /// member profile.
    pub fn member_action(
        mut self,
        name: &'static str,
        label: &'static str,
        apply: MemberActionFn<E>,
    ) -> Self {
        self.meta.actions.push(ActionInfo { name, label });
        self.actions.push(BulkAction {
            name,
            label,
            apply: Apply::ByMember(apply),
        });
        self
    }

    /// Columns the save hook fills in when a new record leaves them out.
    pub fn managed(mut self, fields: &'static [&'static str]) -> Self {
        self.managed = fields;
        self
    }

    /// Columns left out of detail pages and exports.
    pub fn hidden(mut self, fields: &'static [&'static str]) -> Self {
        self.hidden = fields;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.meta.read_only = true;
        self
    }
}

fn unknown_field(name: &str) -> AdminError {
    AdminError::BadRequest(format!("Unknown field '{name}'"))
}

fn column_of<E>(name: &str) -> Result<E::Column, AdminError>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    E::Column::from_str(name).map_err(|_| unknown_field(name))
}

fn is_integer(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
    )
}

fn is_decimal(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_)
    )
}

fn is_timestamp(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::DateTime | ColumnType::Timestamp | ColumnType::TimestampWithTimeZone
    )
}

fn parse_timestamp(raw: &str) -> Option<DateTimeWithTimeZone> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at);
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(day.and_time(NaiveTime::MIN).and_utc().into())
}

/// Query-string filter value typed like the column it is compared against.
fn typed_value(column_type: &ColumnType, field: &str, raw: &str) -> Result<Value, AdminError> {
    let invalid = || AdminError::BadRequest(format!("Invalid value '{raw}' for {field}"));
    let value = match column_type {
        ColumnType::Uuid => Value::from(Uuid::parse_str(raw).map_err(|_| invalid())?),
        ColumnType::Boolean => match raw {
            "true" | "1" | "yes" => Value::from(true),
            "false" | "0" | "no" => Value::from(false),
            _ => return Err(invalid()),
        },
        ColumnType::Date => {
            Value::from(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| invalid())?)
        }
        kind if is_integer(kind) => Value::from(raw.parse::<i64>().map_err(|_| invalid())?),
        kind if is_decimal(kind) => Value::from(raw.parse::<f64>().map_err(|_| invalid())?),
        kind if is_timestamp(kind) => Value::from(parse_timestamp(raw).ok_or_else(invalid)?),
        _ => Value::from(raw.to_string()),
    };
    Ok(value)
}

/// Stand-in for a hook-managed column so the payload deserializes; the
/// column is reset to unset before saving.
fn placeholder(column_type: &ColumnType) -> Json {
    match column_type {
        ColumnType::Uuid => json!(Uuid::nil()),
        ColumnType::Boolean => json!(false),
        ColumnType::Date => json!("1970-01-01"),
        kind if is_integer(kind) => json!(0),
        kind if is_decimal(kind) => json!(0.0),
        kind if is_timestamp(kind) => json!("1970-01-01T00:00:00+00:00"),
        _ => json!(""),
    }
}

/// Turn a loaded (`Unchanged`) column into a pending write.
fn mark_set<A: ActiveModelTrait>(active: &mut A, column: <A::Entity as EntityTrait>::Column) {
    if let ActiveValue::Unchanged(value) = active.get(column) {
        active.set(column, value);
    }
}

fn badge_json(badge: &Badge) -> Json {
    json!({
        "label": badge.label,
        "color": badge.color,
        "detail": badge.detail,
        "html": badge.html(),
    })
}

impl<E, A> ModelAdmin<E, A>
where
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: Serialize + DeserializeOwned + IntoActiveModel<A> + Sync,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
{
    fn id_column(&self) -> Result<E::Column, AdminError> {
        column_of::<E>("id")
    }

    fn record(&self, model: &E::Model) -> Result<Map<String, Json>, AdminError> {
        match serde_json::to_value(model) {
            Ok(Json::Object(mut fields)) => {
                for hidden in self.hidden {
                    fields.remove(*hidden);
                }
                Ok(fields)
            }
            Ok(_) => Err(AdminError::Db(DbErr::Json(
                "record did not serialize to an object".into(),
            ))),
            Err(err) => Err(AdminError::Db(DbErr::Json(err.to_string()))),
        }
    }

    async fn render(
        &self,
        db: &DatabaseConnection,
        render: &Render<E::Model>,
        model: &E::Model,
        today: NaiveDate,
    ) -> Result<Badge, AdminError> {
        match render {
            Render::Row(render) => Ok(render(model, today)),
            Render::Query(render) => Ok(render(db, model, today).await?),
        }
    }

    async fn row(
        &self,
        db: &DatabaseConnection,
        model: &E::Model,
        today: NaiveDate,
    ) -> Result<Json, AdminError> {
        let mut fields = self.record(model)?;
        let mut row = Map::new();
        row.insert("id".into(), fields.get("id").cloned().unwrap_or(Json::Null));
        for column in &self.columns {
            match column {
                ListColumn::Field(name) => {
                    row.insert((*name).into(), fields.remove(*name).unwrap_or(Json::Null));
                }
                ListColumn::Badge { name, render, .. } => {
                    let badge = self.render(db, render, model, today).await?;
                    row.insert((*name).into(), badge_json(&badge));
                }
            }
        }
        Ok(Json::Object(row))
    }

    fn condition(&self, key: &str, raw: &str) -> Result<SimpleExpr, AdminError> {
        let (name, lookup) = Lookup::split(key);
        if !self.meta.list_filters.contains(&name) {
            return Err(AdminError::BadRequest(format!(
                "Filtering on '{name}' is not allowed"
            )));
        }
        let column = column_of::<E>(name)?;
        if lookup == Lookup::IsNull {
            return match raw {
                "true" | "1" => Ok(column.is_null()),
                "false" | "0" => Ok(column.is_not_null()),
                _ => Err(AdminError::BadRequest(format!("Invalid value '{raw}' for {key}"))),
            };
        }
        let value = typed_value(column.def().get_column_type(), name, raw)?;
        Ok(match lookup {
            Lookup::Gte => column.gte(value),
            Lookup::Lte => column.lte(value),
            _ => column.eq(value),
        })
    }

    /// Search, filters, selection and ordering; no paging.
    fn query(&self, params: &ListParams) -> Result<Select<E>, AdminError> {
        let mut select = E::find();
        if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
            && !self.meta.search_fields.is_empty()
        {
            let mut any = Condition::any();
            for name in self.meta.search_fields {
                any = any.add(icontains(column_of::<E>(name)?, q));
            }
            select = select.filter(any);
        }
        for (key, raw) in &params.filters {
            select = select.filter(self.condition(key, raw)?);
        }
        if let Some(ids) = &params.ids {
            select = select.filter(self.id_column()?.is_in(ids.clone()));
        }

        let ordering: Vec<&str> = match params.ordering.as_deref() {
            Some(requested) => requested.split(',').map(str::trim).collect(),
            None => self.meta.ordering.to_vec(),
        };
        for field in ordering.into_iter().filter(|f| !f.is_empty()) {
            let (name, order) = match field.strip_prefix('-') {
                Some(name) => (name, Order::Desc),
                None => (field, Order::Asc),
            };
            select = select.order_by(column_of::<E>(name)?, order);
        }
        Ok(select.order_by_asc(self.id_column()?))
    }

    async fn find(&self, db: &DatabaseConnection, id: Uuid) -> Result<E::Model, AdminError> {
        E::find()
            .filter(self.id_column()?.eq(id))
            .one(db)
            .await?
            .ok_or(AdminError::NotFound(self.meta.verbose_name))
    }

    fn writable(&self) -> Result<(), AdminError> {
        if self.meta.read_only {
            return Err(AdminError::ReadOnly(self.meta.verbose_name_plural));
        }
        Ok(())
    }

    fn object(payload: Json) -> Result<Map<String, Json>, AdminError> {
        match payload {
            Json::Object(fields) => Ok(fields),
            _ => Err(AdminError::BadRequest("Expected a JSON object".into())),
        }
    }
}

#[async_trait]
impl<E, A> Resource for ModelAdmin<E, A>
where
    E: EntityTrait,
    E::Column: FromStr,
    E::Model: Serialize + DeserializeOwned + IntoActiveModel<A> + Sync,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
{
    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }

    async fn list(
        &self,
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<ListPage, AdminError> {
        let paginator = self.query(params)?.paginate(db, self.meta.page_size);
        let total = paginator.num_items().await?;
        let pages = total.div_ceil(self.meta.page_size).max(1);
        // past the end shows the last page
        let page = params.page.clamp(1, pages);
        let models = paginator.fetch_page(page - 1).await?;
        let today = entity::today();
        let mut rows = Vec::with_capacity(models.len());
        for model in &models {
            rows.push(self.row(db, model, today).await?);
        }
        Ok(ListPage {
            resource: self.meta.slug,
            total,
            page,
            pages,
            page_size: self.meta.page_size,
            rows,
        })
    }

    async fn detail(&self, db: &DatabaseConnection, id: Uuid) -> Result<DetailPage, AdminError> {
        let model = self.find(db, id).await?;
        let today = entity::today();
        let mut computed = Map::new();
        for column in &self.columns {
            if let ListColumn::Badge { name, render, .. } = column {
                let badge = self.render(db, render, &model, today).await?;
                computed.insert((*name).into(), badge_json(&badge));
            }
        }
        Ok(DetailPage {
            resource: self.meta.slug,
            id,
            record: Json::Object(self.record(&model)?),
            computed,
            fieldsets: self.meta.fieldsets.clone(),
            inlines: Vec::new(),
        })
    }

    async fn create(&self, db: &DatabaseConnection, payload: Json) -> Result<Json, AdminError> {
        self.writable()?;
        let mut fields = Self::object(payload)?;
        let mut generated = Vec::new();
        for name in ALWAYS_MANAGED.iter().chain(self.managed) {
            let Ok(column) = E::Column::from_str(name) else {
                continue;
            };
            if fields.get(*name).is_none_or(Json::is_null) {
                fields.insert((*name).into(), placeholder(column.def().get_column_type()));
                generated.push(column);
            }
        }
        let model: E::Model = serde_json::from_value(Json::Object(fields)).map_err(payload_error)?;
        let mut active: A = model.into_active_model();
        for column in E::Column::iter() {
            mark_set(&mut active, column);
        }
        for column in generated {
            active.not_set(column);
        }
        let saved = active.insert(db).await?;
        tracing::info!(resource = self.meta.slug, "admin record created");
        Ok(Json::Object(self.record(&saved)?))
    }

    async fn update(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
        payload: Json,
    ) -> Result<Json, AdminError> {
        self.writable()?;
        let changes = Self::object(payload)?;
        let existing = self.find(db, id).await?;
        if changes.is_empty() {
            return Ok(Json::Object(self.record(&existing)?));
        }
        let mut merged = self.record(&existing)?;
        let mut touched = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            if key == "id" {
                return Err(AdminError::BadRequest("The id field cannot be changed".into()));
            }
            touched.push(column_of::<E>(&key)?);
            merged.insert(key, value);
        }
        let model: E::Model = serde_json::from_value(Json::Object(merged)).map_err(payload_error)?;
        let mut active: A = model.into_active_model();
        for column in touched {
            mark_set(&mut active, column);
        }
        let saved = active.update(db).await?;
        tracing::info!(resource = self.meta.slug, %id, "admin record updated");
        Ok(Json::Object(self.record(&saved)?))
    }

    async fn delete(&self, db: &DatabaseConnection, id: Uuid) -> Result<(), AdminError> {
        self.writable()?;
        let result = E::delete_many()
            .filter(self.id_column()?.eq(id))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AdminError::NotFound(self.meta.verbose_name));
        }
        tracing::info!(resource = self.meta.slug, %id, "admin record deleted");
        Ok(())
    }

    async fn run_action(
        &self,
        db: &DatabaseConnection,
        action: &str,
        ids: &[Uuid],
        actor: &Viewer,
    ) -> Result<u64, AdminError> {
        let bulk = self
            .actions
            .iter()
            .find(|candidate| candidate.name == action)
            .ok_or_else(|| AdminError::UnknownAction(action.to_string()))?;
        self.writable()?;
        let update = match bulk.apply {
            Apply::Any(apply) => apply(E::update_many(), actor),
            Apply::ByMember(apply) => {
                let member = actor
                    .member_id
                    .ok_or(AdminError::MemberProfileRequired(bulk.label))?;
                apply(E::update_many(), member)
            }
        };
        if ids.is_empty() {
            return Ok(0);
        }
        let result = update
            .filter(self.id_column()?.is_in(ids.to_vec()))
            .exec(db)
            .await?;
        tracing::info!(
            resource = self.meta.slug,
            action = bulk.name,
            affected = result.rows_affected,
            actor = %actor.username,
            "admin action applied"
        );
        Ok(result.rows_affected)
    }

    async fn export_csv(
        &self,
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<CsvExport, AdminError> {
        let models = self.query(params)?.all(db).await?;
        let names: Vec<String> = E::Column::iter()
            .map(|column| column.as_str().to_string())
            .filter(|name| !self.hidden.contains(&name.as_str()))
            .collect();
        let columns: Vec<&str> = names.iter().map(String::as_str).collect();
        let records = models
            .iter()
            .map(|model| self.record(model))
            .collect::<Result<Vec<_>, _>>()?;
        let body = write_csv(&columns, &records)?;
        Ok(CsvExport {
            filename: export_filename(self.meta.slug, entity::today()),
            body,
            rows: records.len(),
        })
    }

    fn has_field(&self, name: &str) -> bool {
        E::Column::from_str(name).is_ok()
    }

    fn check(&self) -> Vec<String> {
        let slug = self.meta.slug;
        let mut problems = Vec::new();
        let mut expect = |context: &str, name: &str| {
            if E::Column::from_str(name).is_err() {
                problems.push(format!("{slug}: unknown field '{name}' in {context}"));
            }
        };
        for name in self.meta.search_fields {
            expect("search", name);
        }
        for name in self.meta.list_filters {
            expect("filters", name);
        }
        for name in self.meta.ordering {
            expect("ordering", name.trim_start_matches('-'));
        }
        for column in &self.columns {
            if let ListColumn::Field(name) = column {
                expect("columns", name);
            }
        }
        for fieldset in &self.meta.fieldsets {
            for name in fieldset.fields {
                expect("fieldsets", name);
            }
        }
        for name in self.managed.iter().chain(self.hidden) {
            expect("managed fields", name);
        }
        expect("primary key", "id");
        problems
    }
}
