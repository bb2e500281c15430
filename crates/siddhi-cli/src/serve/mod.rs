//! Local web server for the browser resource form.
//!
//! Serves a single page that drives the same form engine as the terminal
//! form. The page asks the server for field visibility and validation
//! rather than repeating those rules in script.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)
//! - `templates` - HTML/CSS/JS template rendering

mod handlers;
mod models;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use siddhi_core::{MemoryStore, ScannerConfig};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Known resources. Submissions hold the write lock while validating
    /// and saving.
    pub store: RwLock<MemoryStore>,
    /// Settings for `/api/scan`.
    pub scanner: ScannerConfig,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the web form server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
    /// Scanner settings.
    pub scanner: ScannerConfig,
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Build the router over a shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Main page
        .route("/", get(handlers::index))
        // API endpoints
        .route(
            "/api/resources",
            get(handlers::api_resources).post(handlers::api_submit),
        )
        .route("/api/resources/{id}", get(handlers::api_resource))
        .route("/api/fields", get(handlers::api_fields))
        .route("/api/parents", get(handlers::api_parents))
        .route("/api/scan", get(handlers::api_scan))
        // CORS for API access
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the web form server.
pub async fn start_server(config: ServeConfig, store: MemoryStore) -> color_eyre::Result<()> {
    let state = Arc::new(AppState {
        store: RwLock::new(store),
        scanner: config.scanner,
    });

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let url = format!("http://localhost:{}", config.port);

    println!("Starting Siddhi resource form...");
    println!("Form: {}", url);
    println!("Press Ctrl+C to stop\n");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Web form listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: RwLock::new(MemoryStore::seeded()),
            scanner: ScannerConfig::default(),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_resource(body: Value) -> Request<Body> {
        Request::post("/api/resources")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_creates_resource() {
        let state = test_state();

        let (status, body) = send(
            router(state.clone()),
            post_resource(json!({
                "id": " RES010 ",
                "name": "X",
                "kind": "object",
                "medium": "physical",
                "location": "stale",
                "parent_id": "RES001"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["was_update"], json!(false));
        assert_eq!(body["message"], json!("Resource created successfully"));
        assert_eq!(body["resource"]["id"], json!("RES010"));
        assert_eq!(body["resource"]["location"], json!(""));

        let (status, body) = send(router(state), get("/api/resources/RES010")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], json!(true));
        assert_eq!(body["submit_label"], json!("Update Resource"));
    }

    #[tokio::test]
    async fn test_submit_without_parent_is_rejected() {
        let state = test_state();

        let (status, body) = send(
            router(state.clone()),
            post_resource(json!({
                "id": "RES003",
                "name": "E-Book",
                "kind": "object",
                "medium": "virtual",
                "parent_id": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["reason"]["reason"], json!("missing_parent"));
        assert_eq!(
            body["error"],
            json!("Parent container is required for objects and non-base containers")
        );

        let (_, body) = send(router(state), get("/api/resources/RES003")).await;
        assert_eq!(body["resource"]["parent_id"], json!("RES002"));
    }

    #[tokio::test]
    async fn test_fields_follow_kind() {
        let (status, body) = send(router(test_state()), get("/api/fields?kind=object")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"base_toggle": false, "location": false, "parent_selector": true})
        );

        let (_, body) = send(
            router(test_state()),
            get("/api/fields?kind=container&base=true"),
        )
        .await;
        assert_eq!(
            body,
            json!({"base_toggle": true, "location": true, "parent_selector": false})
        );

        let (status, _) = send(router(test_state()), get("/api/fields?kind=shelf")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
