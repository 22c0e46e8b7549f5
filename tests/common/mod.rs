#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use github_prs_server::github::{GitHubClient, GitHubConfig};
use github_prs_server::render::Renderer;
use github_prs_server::server::{create_router, AppState};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tera::Tera;
use tower::ServiceExt;
use tracing::instrument::WithSubscriber;
use tracing::Level;

pub const TEMPLATES_GLOB: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/*.html");

/// Search path plus the query value the client sends for the default author
pub const SEARCH_PATH: &str = "/search/issues";
pub const SEARCH_QUERY: &str = "type:pr author:Glitchyi";

pub const SINGLE_ITEM_BODY: &str = r#"{"total_count":1,"incomplete_results":false,"items":[{"repository_url":"https://api.github.com/repos/x/y","state":"open"}]}"#;

pub fn github_config(api_base_url: &str) -> GitHubConfig {
    GitHubConfig {
        api_base_url: api_base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

pub fn github_client(api_base_url: &str) -> GitHubClient {
    github_client_with_timeout(api_base_url, Duration::from_secs(5))
}

pub fn github_client_with_timeout(api_base_url: &str, timeout: Duration) -> GitHubClient {
    let config = GitHubConfig {
        timeout,
        ..github_config(api_base_url)
    };
    GitHubClient::new(&config).expect("Failed to create client")
}

/// Base URL of a local port nothing listens on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}

pub fn shipped_renderer() -> Renderer {
    Renderer::from_glob(TEMPLATES_GLOB).expect("Failed to load templates")
}

pub fn app(api_base_url: &str) -> Router {
    app_with_renderer(api_base_url, shipped_renderer())
}

pub fn app_with_renderer(api_base_url: &str, renderer: Renderer) -> Router {
    create_router(AppState::new(github_client(api_base_url), renderer))
}

pub fn app_with_timeout(api_base_url: &str, timeout: Duration) -> Router {
    create_router(AppState::new(
        github_client_with_timeout(api_base_url, timeout),
        shipped_renderer(),
    ))
}

/// A renderer whose template set has no `elements` template
pub fn renderer_without_elements() -> Renderer {
    let mut tera = Tera::default();
    tera.add_raw_template("other.html", "<p>other</p>")
        .expect("Failed to add template");
    Renderer::new(tera)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Request failed");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, String::from_utf8(body.to_vec()).expect("Body is not UTF-8"))
}

pub fn count_rows(html: &str) -> usize {
    html.matches(r#"<tr class="item">"#).count()
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Like `get`, but also returns everything logged at debug level or above
/// while the request was handled.
pub async fn get_with_logs(app: Router, uri: &str) -> (StatusCode, String, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let (status, body) = get(app, uri).with_subscriber(subscriber).await;

    (status, body, logs.contents())
}
