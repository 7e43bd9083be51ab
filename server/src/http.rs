use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use card::{
    ActionId, AnalyticsSink, BuildOptions, LanguageState, SlugResolver, Theme, analytics::track,
    render, vcard,
};
use entity::Directory;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    graphql::{self, GraphqlData, SchemaType},
};

const MAX_SUBJECT_CHARS: usize = 200;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub theme: Arc<Theme>,
    pub build_options: BuildOptions,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub config: Arc<AppConfig>,
    pub schema: SchemaType,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        directory: Directory,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        let directory = Arc::new(directory);
        let theme = Arc::new(config.theme());
        let build_options = config.build_options();
        let schema = graphql::build_schema(GraphqlData {
            directory: directory.clone(),
            theme: theme.clone(),
            build_options,
        });
        Self {
            directory,
            theme,
            build_options,
            analytics,
            config,
            schema,
        }
    }
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
    let employees = state.directory.len();
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, employees, "card server listening");
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
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(landing_handler))
        .route("/id/{slug}", get(card_handler))
        .route("/vcf/{file}", get(vcard_handler))
        .route("/events", post(events_handler))
        .route("/graphql", post(graphql_handler))
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

/// Per-view state carried in the card URL.
#[derive(Debug, Default, Deserialize)]
struct ViewQuery {
    lang: Option<String>,
}

async fn landing_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Response {
    let fallback = state.config.default_slug.as_deref();
    render_page(&state, None, fallback, &query)
}

async fn card_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Response {
    render_page(&state, Some(&slug), None, &query)
}

async fn fallback_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Response {
    render_page(&state, None, None, &query)
}

fn render_page(
    state: &AppState,
    slug: Option<&str>,
    fallback: Option<&str>,
    query: &ViewQuery,
) -> Response {
    let language = LanguageState::from_query(query.lang.as_deref()).current();
    let employee = SlugResolver::new(&state.directory).resolve_or(slug, fallback);
    let view = render(employee, language, &state.theme, &state.build_options);
    let Some(employee) = employee else {
        debug!(?slug, %language, "rendering not-found view");
        return (StatusCode::NOT_FOUND, Html(view.to_html())).into_response();
    };
    // A `lang` parameter means the visitor toggled an already-viewed card.
    if query.lang.is_none() {
        track(state.analytics.as_ref(), ActionId::PageView, &employee.name);
    }
    Html(view.to_html()).into_response()
}

async fn vcard_handler(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<ViewQuery>,
) -> HttpResult<Response> {
    let employee = file
        .strip_suffix(".vcf")
        .and_then(|slug| SlugResolver::new(&state.directory).resolve(Some(slug)))
        .ok_or_else(|| HttpError::new(StatusCode::NOT_FOUND, "contact not found"))?;
    let language = LanguageState::from_query(query.lang.as_deref()).current();
    let body = vcard::generate(employee, language);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        vcard::file_name(&employee.slug)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/vcard; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    action: String,
    subject: String,
}

async fn events_handler(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> HttpResult<StatusCode> {
    let action = payload
        .action
        .parse::<ActionId>()
        .map_err(|err| HttpError::new(StatusCode::BAD_REQUEST, &err.to_string()))?;
    let subject = payload.subject.trim();
    if subject.is_empty() || subject.chars().count() > MAX_SUBJECT_CHARS {
        return Err(HttpError::new(StatusCode::BAD_REQUEST, "invalid subject"));
    }
    track(state.analytics.as_ref(), action, subject);
    Ok(StatusCode::NO_CONTENT)
}

async fn graphql_handler(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(request.into_inner()).await.into()
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: !state.directory.is_empty(),
        employees: state.directory.len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    employees: usize,
    version: &'static str,
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
