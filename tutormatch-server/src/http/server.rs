//! Axum server setup
//!
//! Server skeleton with:
//! - CORS (configured origins, or any origin when none are given)
//! - Tracing middleware and a per-request timeout
//! - Admin gate on `/api/admin/*`
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::admin::{require_admin, ADMIN_EMAIL_HEADER};
use super::routes;
use crate::config::{AdminAllowlist, StorageMode, DEFAULT_PORT};
use crate::db::Storage;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,

    /// Requests running longer than this are cut off and their
    /// in-flight queries dropped
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub storage: Storage,
    pub admins: AdminAllowlist,
}

impl AppState {
    pub fn new(storage: Storage, admins: AdminAllowlist) -> Self {
        Self { storage, admins }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let admin = Router::new()
        .merge(routes::tutors::admin_router())
        .merge(routes::clients::admin_router())
        .merge(routes::stats::admin_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_origins));

    Router::new()
        .merge(routes::health::router())
        .merge(routes::tutors::router())
        .merge(routes::clients::router())
        .merge(admin)
        .layer(middleware)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(ADMIN_EMAIL_HEADER),
        ]);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}

/// Run the HTTP server.
///
/// Storage must already be connected and its schema applied. The pool
/// is closed after in-flight requests have drained.
///
/// # Example
///
/// ```ignore
/// let storage = Storage::connect(&database_url).await?;
/// ensure_schema(&storage).await?;
/// run_server(storage, AdminAllowlist::default(), ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    storage: Storage,
    admins: AdminAllowlist,
    config: ServerConfig,
) -> Result<(), ServerError> {
    if storage.mode() == StorageMode::Sample {
        tracing::warn!(
            "Running in sample mode: reads serve fixed sample data, writes are NOT persisted"
        );
    }
    tracing::info!(
        storage = %storage.mode(),
        admins = admins.len(),
        "Server state ready"
    );

    let state = Arc::new(AppState::new(storage, admins));
    let app = build_router(state.clone(), &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.storage.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    const ADMIN: &str = "admin@example.com";

    fn app() -> Router {
        let state = Arc::new(AppState::new(
            Storage::sample(),
            AdminAllowlist::parse(ADMIN),
        ));
        build_router(state, &ServerConfig::default())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn as_admin(mut request: Request<Body>, email: &str) -> Request<Body> {
        request
            .headers_mut()
            .insert(ADMIN_EMAIL_HEADER, HeaderValue::from_str(email).unwrap());
        request
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.cors_origins.is_empty());
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "sample");
        assert_eq!(body["database"], false);
    }

    #[tokio::test]
    async fn list_tutors_serves_sample_data() {
        let (status, body) = send(get("/api/tutors")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["name"], "John Smith");
    }

    #[tokio::test]
    async fn list_clients_serves_sample_data() {
        let (status, body) = send(get("/api/clients")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn by_email_without_match_is_null() {
        let (status, body) = send(get("/api/tutors/by-email/none@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_null());
        assert_eq!(body["status"], "success");

        let (status, body) = send(get("/api/clients/by-email/none@x.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn by_email_decodes_path() {
        let (status, body) = send(get("/api/tutors/by-email/john.smith%40email.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 1);
    }

    #[tokio::test]
    async fn create_tutor_in_sample_mode_is_not_persisted() {
        let (status, body) = send(json(
            "POST",
            "/api/tutors",
            r#"{"name":"Ann","subjects":["Math"],"pay":40,"bio":"x"}"#,
        ))
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], 0);
        assert_eq!(body["data"]["rating"], 5.0);
        assert!(body["data"]["created_at"].is_null());

        let (_, body) = send(get("/api/tutors")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let (status, body) = send(json("POST", "/api/tutors", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn create_rejects_missing_required_field() {
        let (status, _) = send(json("POST", "/api/clients", r#"{"name":"Mike"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_pay() {
        let (status, body) = send(json("POST", "/api/tutors", r#"{"name":"Ann","pay":0}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("pay"));
    }

    #[tokio::test]
    async fn admin_route_without_header_is_401() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/admin/tutors/1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn admin_route_with_unknown_email_is_403() {
        let request = as_admin(get("/api/admin/stats"), "someone@example.com");
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_email_match_ignores_case() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/admin/tutors/1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(as_admin(request, "ADMIN@Example.com")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn admin_update_with_bad_id_is_400() {
        let request = json(
            "PUT",
            "/api/admin/tutors/abc",
            r#"{"name":"Ann","subjects":["Math"],"pay":40,"bio":"x"}"#,
        );
        let (status, _) = send(as_admin(request, ADMIN)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/admin/clients/1.5")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(as_admin(request, ADMIN)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn admin_update_echoes_id_in_sample_mode() {
        let request = json(
            "PUT",
            "/api/admin/clients/2",
            r#"{"id":9,"name":"Emily W","budget":55}"#,
        );
        let (status, body) = send(as_admin(request, ADMIN)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 2);
        assert_eq!(body["data"]["name"], "Emily W");
    }

    #[tokio::test]
    async fn admin_get_missing_is_404() {
        let (status, body) = send(as_admin(get("/api/admin/tutors/99"), ADMIN)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, body) = send(as_admin(get("/api/admin/clients/1"), ADMIN)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Mike Davis");
    }

    #[tokio::test]
    async fn admin_stats_counts_sample_data() {
        let (status, body) = send(as_admin(get("/api/admin/stats"), ADMIN)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["tutors_count"], 2);
        assert_eq!(body["data"]["clients_count"], 2);
        assert_eq!(body["data"]["total_users"], 4);
    }

    #[test]
    fn invalid_cors_origins_are_skipped() {
        // Must not panic on a bad origin
        let _ = cors_layer(&["http://localhost:3000".to_owned(), "bad\norigin".to_owned()]);
    }
}
