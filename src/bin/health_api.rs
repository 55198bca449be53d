//! health-api - standalone server for the BMI demo endpoint.
//!
//! Serves `GET /bmi` plus the tool-discovery listing on `HOST`/`PORT`
//! (defaults: 127.0.0.1:8000). Unrelated to the content pipeline.

use contentflow::api;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contentflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()?;

    api::serve(&host, port).await
}
