use std::sync::Arc;

use fitcheck::config::{self, Config};
use fitcheck::logging::init_logging;
use fitcheck::server::{AppState, router};
use fitcheck::{Evaluator, FitcheckError, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = config::load_env_file();
    let (level, level_problem) = config::startup_log_level(|name| std::env::var(name).ok());
    init_logging(level);
    if let Some(problem) = level_problem {
        warn!("{}", problem);
    }
    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;
    let client = config.openai_client()?;
    info!(
        model = client.config().model.as_str(),
        base_url = %client.config().base_url,
        "OpenAI client ready"
    );

    let state = AppState::new(Evaluator::new(Arc::new(client)), config.max_upload_bytes);
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| FitcheckError::ConfigError(format!("Cannot bind {addr}: {e}")))?;

    info!("fitcheck listening on http://{}", addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FitcheckError::ApiError(format!("Server error: {e}")))?;

    info!("fitcheck stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
