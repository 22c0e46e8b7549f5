use crate::error::Result;
use crate::github::{GitHubClient, GitHubConfig};
use crate::render::{Renderer, DEFAULT_TEMPLATES_GLOB};
use crate::types::SearchResult;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 1323;

/// Template the `/elements` page is rendered with
pub const ELEMENTS_TEMPLATE: &str = "elements";

/// Everything the server needs at construction time
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Glob of template files compiled at startup
    pub templates_glob: String,
    pub github: GitHubConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            templates_glob: DEFAULT_TEMPLATES_GLOB.to_string(),
            github: GitHubConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Shared by every request; nothing in here is mutated after startup
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
    pub renderer: Arc<Renderer>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(github: GitHubClient, renderer: Renderer) -> Self {
        Self {
            github,
            renderer: Arc::new(renderer),
            start_time: Instant::now(),
        }
    }
}

/// Build the client and load the template set from `config`
pub fn build_state(config: &ServerConfig) -> Result<AppState> {
    let github = GitHubClient::new(&config.github)?;
    let renderer = Renderer::from_glob(&config.templates_glob)?;
    Ok(AppState::new(github, renderer))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([
        Method::GET,
        Method::HEAD,
        Method::PUT,
        Method::PATCH,
        Method::POST,
        Method::DELETE,
    ]);

    Router::new()
        .route("/elements", get(elements_page))
        .route("/health", get(health_check))
        .route("/livez", get(liveness_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// Render the author's pull requests. Upstream failures degrade to an empty
/// list and still answer 200; only a render failure produces a 500.
async fn elements_page(State(state): State<AppState>) -> Result<Html<String>> {
    let result = match state.github.search_pull_requests().await {
        Ok(result) => result,
        Err(e) => {
            debug!("Error fetching JSON: {}", e);
            SearchResult::default()
        }
    };

    if result.items.is_empty() {
        debug!("No items found");
    }

    let html = state.renderer.render(
        ELEMENTS_TEMPLATE,
        &json!({
            "items": result.items,
        }),
    )?;

    Ok(Html(html))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
