// Draft server entry point.
//
// Startup sequence:
// 1. Load config (copying defaults on first run)
// 2. Initialize tracing
// 3. Create the draft service (empty registry)
// 4. Serve HTTP until Ctrl+C

use std::sync::Arc;

use anyhow::Context;
use draftroom_core::DraftService;
use draftroom_server::config::{self, LoggingConfig};
use draftroom_server::server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing is not up yet, so config errors go straight to stderr via anyhow.
    let config = config::load_config().context("failed to load configuration")?;

    init_tracing(&config.logging)?;
    info!("Draft server starting up");
    info!(
        "Config loaded: {}:{}, {} CORS origin(s)",
        config.server.host,
        config.server.port,
        config.cors.origins.len()
    );

    let service = Arc::new(DraftService::new());

    if let Err(e) = server::run(&config, service, shutdown_signal()).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    info!("Draft server shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Initialize tracing. `RUST_LOG` wins over the configured filter. Logs go
/// to stdout unless a log file is configured.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid logging filter")?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    match &logging.file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            }
            let log_file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let subscriber = builder.with_writer(log_file).with_ansi(false).finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set tracing subscriber")?;
        }
        None => {
            tracing::subscriber::set_global_default(builder.finish())
                .context("failed to set tracing subscriber")?;
        }
    }

    Ok(())
}
