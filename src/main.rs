use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use comments_core::{CommentService, CoreConfig, DEFAULT_DATA_FILE, config::bool_from_env_value};

/// Main entry point for the comments service
///
/// Resolves configuration once, then serves the REST API until the process is stopped.
///
/// # Environment Variables
/// - `COMMENTS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `COMMENTS_DATA_FILE`: JSON file holding the comment collection (default: "mock-comments.json")
/// - `COMMENTS_SIMULATE_SAVE_FAILURE`: report every save as failed after writing (default: false)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("comments_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("comments_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("COMMENTS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file =
        std::env::var("COMMENTS_DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.into());
    let simulate_save_failure =
        bool_from_env_value(std::env::var("COMMENTS_SIMULATE_SAVE_FAILURE").ok())?;

    let cfg = CoreConfig::new(PathBuf::from(data_file), simulate_save_failure)?;
    if !cfg.data_file().is_file() {
        tracing::warn!(
            "Data file {} does not exist; requests will fail until it is created",
            cfg.data_file().display()
        );
    }
    if cfg.simulate_save_failure() {
        tracing::warn!("Save failure simulation is enabled");
    }

    let app = router(AppState::new(CommentService::new(cfg.store())));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "++ Comments API running on {} (data file: {})",
        addr,
        cfg.data_file().display()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
