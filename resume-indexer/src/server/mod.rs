// Server module - HTTP server setup and routing
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use self::error::ApiError;
pub use self::state::AppState;

/// Create CORS layer for localhost frontends
pub fn create_cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/upload-json-files/", post(handlers::upload_json_file))
        .route("/upload-folder/", post(handlers::upload_folder))
        .route("/check-es-connection/", get(handlers::check_connection))
        .route("/index-data/", post(handlers::index_data))
        .route("/get-all-data/", get(handlers::get_all_data))
        .route("/search-elasticsearch/", get(handlers::search_by_name))
        .route("/search_with_keywords/", get(handlers::search_with_keywords))
        .route("/search_by_context/", get(handlers::search_by_context))
        .route("/delete-all-data/", post(handlers::delete_all_data))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Run the server on the specified address until Ctrl+C
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- Upload endpoint: http://{}/upload-json-files/", addr);
    info!("- Health endpoint: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
