//! proctord - proctoring and test-evaluation backend
//!
//! HTTP backend for a certification platform: logs proctoring violations,
//! proxies prompts to the completion provider, and evaluates submitted tests.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

use proctord::services::CompletionClient;
use proctord::{build_router, db, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately for instant startup feedback
    info!(
        "Starting proctord v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = Config::from_env()?;
    info!("Database path: {}", config.db_path.display());

    let pool = match db::connect(&config.db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };
    db::init_schema(&pool).await?;
    info!("✓ Database ready");

    let completion = CompletionClient::new(&config.groq_base_url, &config.groq_api_key, &config.model)
        .map_err(|e| anyhow::anyhow!("Failed to create completion client: {}", e))?;
    info!("✓ Completion client ready (model: {})", config.model);

    let state = AppState::new(pool, Arc::new(completion));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("proctord listening on http://{}", addr);
    info!("Health check: http://localhost:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
