//! HTTP route assembly for the health API.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;

#[derive(Debug, Serialize)]
struct ServiceHealth {
    status: String,
    version: String,
}

async fn service_health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the service router.
pub fn router() -> Router {
    Router::new()
        .route("/bmi", get(health::calculate_bmi))
        .route("/api/health", get(service_health))
        .route("/api/tools", get(health::list_tools))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server.
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("health API listening on {addr}");
    axum::serve(listener, router()).await?;
    Ok(())
}
