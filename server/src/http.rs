use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use api::{
    admin::{
        AdminError, AdminGroup, AdminSite, CsvExport, DetailPage, ListPage, ListParams,
        ResourceMeta,
    },
    auth::{AuthError, Viewer, viewer_from_token},
    graphql::GraphqlSchema,
    media::{MediaError, MediaStore, StoredFile, UploadKind},
};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use platform_authn::{JwtService, extract_token};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::AppConfig;

/// Largest upload cap plus room for the multipart envelope.
const MAX_BODY_BYTES: usize = 11 * 1024 * 1024;
const EXPORT_ACTION: &str = "export_csv";

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub jwt: Arc<JwtService>,
    pub schema: GraphqlSchema,
    pub admin: Arc<AdminSite>,
    pub media: Arc<MediaStore>,
    pub config: Arc<AppConfig>,
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "mcsu server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    let cors = cors_layer(&state.config.cors_allowed_origins);
    Router::new()
        .route("/health", get(health_handler))
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .route("/admin", get(admin_index))
        .route("/admin/{resource}", get(admin_list).post(admin_create))
        .route("/admin/{resource}/export.csv", get(admin_export))
        .route("/admin/{resource}/actions/{action}", post(admin_action))
        .route(
            "/admin/{resource}/{id}",
            get(admin_detail).put(admin_update).delete(admin_delete),
        )
        .route("/media/{kind}/{id}", post(media_upload))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = state.db.ping().await.is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn graphiql_handler() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[instrument(name = "http.graphql", skip_all)]
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> HttpResult<GraphQLResponse> {
    let mut req = request.into_inner();
    if let Some(viewer) = authenticate(&state, &headers).await? {
        req = req.data(viewer);
    }
    Ok(state.schema.execute(req).await.into())
}

/// The viewer behind the `Authorization` header, if one was sent.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> HttpResult<Option<Viewer>> {
    let Some(raw) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let token = raw
        .to_str()
        .ok()
        .and_then(extract_token)
        .ok_or_else(|| HttpError::new(StatusCode::UNAUTHORIZED, "Invalid authorization header"))?;
    match viewer_from_token(&state.db, &state.jwt, token).await {
        Ok(viewer) => Ok(Some(viewer)),
        Err(AuthError::Db(err)) => Err(HttpError::internal(err.into())),
        Err(err) => Err(HttpError::new(StatusCode::UNAUTHORIZED, &err.to_string())),
    }
}

async fn require_staff(state: &AppState, headers: &HeaderMap) -> HttpResult<Viewer> {
    let viewer = authenticate(state, headers).await?.ok_or_else(|| {
        HttpError::new(
            StatusCode::UNAUTHORIZED,
            "Authentication credentials were not provided",
        )
    })?;
    if !viewer.is_staff {
        return Err(HttpError::new(StatusCode::FORBIDDEN, "Staff access required"));
    }
    Ok(viewer)
}

async fn admin_index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HttpResult<Json<Vec<AdminGroup>>> {
    require_staff(&state, &headers).await?;
    Ok(Json(state.admin.index()))
}

#[derive(Serialize)]
struct ListResponse<'a> {
    meta: &'a ResourceMeta,
    #[serde(flatten)]
    page: ListPage,
}

#[instrument(name = "http.admin.list", skip(state, headers, pairs))]
async fn admin_list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HttpResult<Response> {
    require_staff(&state, &headers).await?;
    let params = ListParams::from_pairs(pairs)?;
    let page = state.admin.list(&state.db, &resource, &params).await?;
    let meta = state.admin.resource(&resource)?.meta();
    Ok(Json(ListResponse { meta, page }).into_response())
}

#[instrument(name = "http.admin.create", skip(state, headers, payload))]
async fn admin_create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> HttpResult<(StatusCode, Json<Value>)> {
    require_staff(&state, &headers).await?;
    let record = state.admin.create(&state.db, &resource, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn admin_detail(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> HttpResult<Json<DetailPage>> {
    require_staff(&state, &headers).await?;
    Ok(Json(state.admin.detail(&state.db, &resource, id).await?))
}

#[instrument(name = "http.admin.update", skip(state, headers, payload))]
async fn admin_update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> HttpResult<Json<Value>> {
    require_staff(&state, &headers).await?;
    Ok(Json(state.admin.update(&state.db, &resource, id, payload).await?))
}

#[instrument(name = "http.admin.delete", skip(state, headers))]
async fn admin_delete(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
) -> HttpResult<StatusCode> {
    require_staff(&state, &headers).await?;
    state.admin.delete(&state.db, &resource, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct ActionRequest {
    #[serde(default)]
    ids: Vec<Uuid>,
}

#[instrument(name = "http.admin.action", skip(state, headers, body))]
async fn admin_action(
    State(state): State<AppState>,
    Path((resource, action)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<ActionRequest>,
) -> HttpResult<Response> {
    let viewer = require_staff(&state, &headers).await?;
    if action == EXPORT_ACTION {
        let params = ListParams::new().only(body.ids);
        let export = state.admin.export_csv(&state.db, &resource, &params).await?;
        return Ok(csv_response(export));
    }
    let updated = state
        .admin
        .run_action(&state.db, &resource, &action, &body.ids, &viewer)
        .await?;
    Ok(Json(json!({ "action": action, "updated": updated })).into_response())
}

#[instrument(name = "http.admin.export", skip(state, headers, pairs))]
async fn admin_export(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> HttpResult<Response> {
    require_staff(&state, &headers).await?;
    let params = ListParams::from_pairs(pairs)?;
    let export = state.admin.export_csv(&state.db, &resource, &params).await?;
    Ok(csv_response(export))
}

fn csv_response(export: CsvExport) -> Response {
    let disposition = export.content_disposition();
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    )
        .into_response()
}

#[instrument(name = "http.media.upload", skip(state, headers, multipart))]
async fn media_upload(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> HttpResult<(StatusCode, Json<StoredFile>)> {
    require_staff(&state, &headers).await?;
    let kind: UploadKind = kind.parse()?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::new(err.status(), &err.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|err| HttpError::new(err.status(), &err.body_text()))?;
        let stored = state
            .media
            .upload(&state.db, kind, id, &file_name, &bytes)
            .await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }
    Err(HttpError::new(StatusCode::BAD_REQUEST, "No file was submitted"))
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    errors: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    errors: &'a [String],
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
            errors: Vec::new(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<AdminError> for HttpError {
    fn from(err: AdminError) -> Self {
        let status = match &err {
            AdminError::UnknownResource(_) | AdminError::NotFound(_) => StatusCode::NOT_FOUND,
            AdminError::ReadOnly(_) | AdminError::MemberProfileRequired(_) => {
                StatusCode::FORBIDDEN
            }
            AdminError::UnknownAction(_) | AdminError::BadRequest(_) | AdminError::Invalid(_) => {
                StatusCode::BAD_REQUEST
            }
            AdminError::Db(_) | AdminError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match err {
            AdminError::Invalid(messages) => Self {
                status,
                message: "Please correct the errors below".into(),
                errors: messages,
            },
            other if status.is_server_error() => Self::internal(other.into()),
            other => Self::new(status, &other.to_string()),
        }
    }
}

impl From<MediaError> for HttpError {
    fn from(err: MediaError) -> Self {
        let status = match &err {
            MediaError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            MediaError::ExtensionNotAllowed { .. } | MediaError::EmptyUpload => {
                StatusCode::BAD_REQUEST
            }
            MediaError::UnknownKind(_) | MediaError::NotFound(_) => StatusCode::NOT_FOUND,
            MediaError::Io(_) | MediaError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            return Self::internal(err.into());
        }
        Self::new(status, &err.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: &self.message,
            errors: &self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use entity::user;
    use http_body_util::BodyExt;
    use migration::{Migrator, MigratorTrait};
    use platform_authn::JwtConfig;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database};
    use tower::ServiceExt;

    use super::*;

    const PASSWORD: &str = "correct horse battery";
    const BOUNDARY: &str = "mcsu-test-boundary";

    struct TestApp {
        router: Router,
        staff_token: String,
        user_token: String,
        member_id: Uuid,
        _media: tempfile::TempDir,
    }

    async fn test_app() -> TestApp {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&conn, None).await.unwrap();
        let db = Arc::new(conn);
        let jwt = Arc::new(JwtService::new(JwtConfig::new("http-test-secret", 5, 7)));
        let media = tempfile::tempdir().unwrap();

        let admin = api::auth::create_superuser(db.as_ref(), "admin", "admin@example.org", PASSWORD)
            .await
            .unwrap();
        let member_id = Viewer::load(db.as_ref(), admin.id)
            .await
            .unwrap()
            .unwrap()
            .member_id
            .unwrap();
        let volunteer = user::ActiveModel {
            username: Set("field-worker".into()),
            email: Set("field@example.org".into()),
            password_hash: Set(platform_authn::hash_password(PASSWORD).unwrap()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            is_staff: Set(false),
            is_superuser: Set(false),
            is_active: Set(true),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(db.as_ref())
        .await
        .unwrap();
        let (staff_token, _) = jwt.issue(&admin.id.to_string(), "admin").unwrap();
        let (user_token, _) = jwt
            .issue(&volunteer.id.to_string(), "field-worker")
            .unwrap();

        let mut config = AppConfig::from_lookup(|_| None, true).unwrap();
        config.media_root = media.path().to_path_buf();
        let api::AppSchema(schema) = api::build_schema(db.clone(), jwt.clone());
        let state = AppState {
            db,
            jwt,
            schema,
            admin: Arc::new(AdminSite::new()),
            media: Arc::new(MediaStore::new(media.path())),
            config: Arc::new(config),
        };
        TestApp {
            router: build_router(state),
            staff_token,
            user_token,
            member_id,
            _media: media,
        }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> Response {
            self.router.clone().oneshot(request).await.unwrap()
        }

        async fn json(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("JWT {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = self.send(request).await;
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn graphql(&self, token: Option<&str>, query: &str) -> (StatusCode, Value) {
            self.json(Method::POST, "/graphql", token, Some(json!({ "query": query })))
                .await
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_database_status() {
        let app = test_app().await;
        let (status, body) = app.json(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["db_ok"], true);
    }

    #[tokio::test]
    async fn requests_carry_a_request_id() {
        let app = test_app().await;
        let response = app
            .send(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await;
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn graphql_rejects_bad_tokens_before_executing() {
        let app = test_app().await;
        let (status, body) = app
            .graphql(Some("not-a-token"), "{ allInitiatives { totalCount } }")
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Error decoding signature");
    }

    #[tokio::test]
    async fn graphql_runs_as_the_token_holder() {
        let app = test_app().await;
        let (status, body) = app
            .graphql(Some(&app.staff_token), "{ allInitiatives { totalCount } }")
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["allInitiatives"]["totalCount"], 0);

        let query = format!(
            r#"mutation {{ tokenAuth(username: "admin", password: "{PASSWORD}") {{ token }} }}"#
        );
        let (status, body) = app.graphql(None, &query).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["tokenAuth"]["token"].is_string());
    }

    #[tokio::test]
    async fn graphiql_is_served_on_get() {
        let app = test_app().await;
        let response = app
            .send(Request::builder().uri("/graphql").body(Body::empty()).unwrap())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("/graphql"));
    }

    #[tokio::test]
    async fn admin_is_staff_only() {
        let app = test_app().await;
        let (status, _) = app.json(Method::GET, "/admin", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = app
            .json(Method::GET, "/admin", Some(&app.user_token), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = app
            .json(Method::GET, "/admin", Some(&app.staff_token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "users");
        let (status, _) = app
            .json(Method::GET, "/admin/widgets", Some(&app.staff_token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_round_trip_over_http() {
        let app = test_app().await;
        let token = Some(app.staff_token.as_str());
        let (status, created) = app
            .json(
                Method::POST,
                "/admin/departments",
                token,
                Some(json!({
                    "name": "Outreach",
                    "description": "Community outreach",
                    "established_on": "2021-06-01",
                    "budget_allocation_cents": 250000,
                    "is_active": true,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, page) = app
            .json(Method::GET, "/admin/departments?q=outreach", token, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["meta"]["slug"], "departments");
        assert_eq!(page["total"], 1);

        let uri = format!("/admin/departments/{id}");
        let (status, updated) = app
            .json(Method::PUT, &uri, token, Some(json!({ "is_active": false })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["is_active"], false);

        let response = app
            .send(
                Request::builder()
                    .uri("/admin/departments/export.csv?is_active=false")
                    .header(header::AUTHORIZATION, format!("Bearer {}", app.staff_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"departments_export_"));
        let text = body_text(response).await;
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Outreach"));

        let (status, _) = app.json(Method::DELETE, &uri, token, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = app.json(Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "department not found");
    }

    #[tokio::test]
    async fn admin_form_errors_are_listed() {
        let app = test_app().await;
        let (status, body) = app
            .json(
                Method::POST,
                "/admin/departments",
                Some(&app.staff_token),
                Some(json!({
                    "name": "  ",
                    "description": "Nameless",
                    "established_on": "2021-06-01",
                    "budget_allocation_cents": -5,
                    "is_active": true,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn action_route_exports_or_updates() {
        let app = test_app().await;
        let token = Some(app.staff_token.as_str());
        let (_, created) = app
            .json(
                Method::POST,
                "/admin/departments",
                token,
                Some(json!({
                    "name": "Research",
                    "description": "Field research",
                    "established_on": "2022-01-10",
                    "budget_allocation_cents": 0,
                    "is_active": true,
                })),
            )
            .await;

        let response = app
            .send(
                Request::builder()
                    .method(Method::POST)
                    .uri("/admin/departments/actions/export_csv")
                    .header(header::AUTHORIZATION, format!("JWT {}", app.staff_token))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "ids": [created["id"]] }).to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Research"));

        let (status, _) = app
            .json(
                Method::POST,
                "/admin/departments/actions/archive",
                token,
                Some(json!({ "ids": [created["id"]] })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn multipart(file_name: &str, content: &str) -> Body {
        Body::from(format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        ))
    }

    fn upload(token: &str, uri: &str, file_name: &str) -> Request<Body> {
        upload_content(token, uri, file_name, "%PDF-1.4")
    }

    fn upload_content(token: &str, uri: &str, file_name: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("JWT {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(multipart(file_name, content))
            .unwrap()
    }

    #[tokio::test]
    async fn oversized_bodies_are_refused() {
        let app = test_app().await;
        let content = "x".repeat(MAX_BODY_BYTES + 1);
        let response = app
            .send(upload_content(
                &app.staff_token,
                &format!("/media/initiative-document/{}", Uuid::new_v4()),
                "plan.pdf",
                &content,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn uploads_attach_to_their_record() {
        let app = test_app().await;
        let (_, department) = app
            .json(
                Method::POST,
                "/admin/departments",
                Some(&app.staff_token),
                Some(json!({
                    "name": "Water",
                    "description": "Water and sanitation",
                    "established_on": "2019-03-01",
                    "budget_allocation_cents": 0,
                    "is_active": true,
                })),
            )
            .await;
        let (status, initiative) = app
            .json(
                Method::POST,
                "/admin/initiatives",
                Some(&app.staff_token),
                Some(json!({
                    "name": "Village Wells",
                    "description": "Borewells for three villages",
                    "start_date": "2024-01-01",
                    "end_date": "2024-12-31",
                    "budget_cents": 500000,
                    "actual_spend_cents": 0,
                    "status": "PLANNED",
                    "sdg_alignment": "SDG_6",
                    "department_id": department["id"],
                    "created_by": app.member_id,
                    "target_beneficiaries": "Three villages",
                    "success_metrics": "Wells commissioned",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{initiative}");
        let id = initiative["id"].as_str().unwrap();

        let response = app
            .send(upload(
                &app.staff_token,
                &format!("/media/initiative-document/{id}"),
                "plan.pdf",
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let stored: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(stored["path"].as_str().unwrap().starts_with("initiative_docs/"));

        let response = app
            .send(upload(
                &app.staff_token,
                &format!("/media/avatars/{id}"),
                "plan.pdf",
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .send(upload(
                &app.user_token,
                &format!("/media/initiative-document/{id}"),
                "plan.pdf",
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
