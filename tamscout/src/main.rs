use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tamscout::api::{create_router, AppState};
use tamscout::config::Config;
use tamscout::db::{Database, DatabaseBackend, LibSqlBackend};
use tamscout::provider::KeywordsEverywhereClient;

/// Embedded replicas pull remote changes this often.
const REPLICA_SYNC_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "tamscout")]
#[command(about = "Local-search keyword research and HVAC market sizing")]
struct Args {
    /// Bind address
    #[arg(long, env = "TAMSCOUT_HOST")]
    host: Option<String>,

    /// Port
    #[arg(long, env = "TAMSCOUT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tamscout=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.provider.api_key.is_none() {
        tracing::warn!(
            "KEYWORDS_API_KEY is not set - research requires a key stored via /api/v1/settings/api-key"
        );
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let db: Arc<dyn DatabaseBackend> = Arc::new(LibSqlBackend::new(raw_db));

    tracing::info!(
        base_url = %config.provider.base_url,
        batch_size = config.provider.batch_size,
        batch_delay_ms = config.provider.batch_delay_ms,
        "Initializing keyword provider..."
    );
    let provider = Arc::new(KeywordsEverywhereClient::new(&config.provider)?);

    let state = AppState::new(config.clone(), db, provider);

    let cancel_token = CancellationToken::new();

    if config.database.local_path.is_some() {
        tracing::info!("Starting replica sync...");
        let db = state.db.clone();
        let token = cancel_token.child_token();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Replica sync shutting down...");
                        break;
                    }
                    _ = tokio::time::sleep(REPLICA_SYNC_INTERVAL) => {
                        if let Err(e) = db.sync().await {
                            tracing::error!("Replica sync error: {}", e);
                        }
                    }
                }
            }
        });
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Tamscout starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
