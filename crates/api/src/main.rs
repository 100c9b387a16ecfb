use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use projectsync_core::service::ProjectService;
use projectsync_core::store::{MemoryProjectStore, ProjectStore};
use projectsync_db::PgProjectStore;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use projectsync_api::config::{LogFormat, ServerConfig, StoreBackend};
use projectsync_api::router::build_app_router;
use projectsync_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store: Arc<dyn ProjectStore> = match &config.store {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = projectsync_db::create_pool(database_url, *max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!(max_connections, "Database connection pool created");

            projectsync_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            projectsync_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgProjectStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory project store; data will not survive a restart");
            Arc::new(MemoryProjectStore::new())
        }
    };

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        projects: ProjectService::new(store),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let shutdown = Arc::new(Notify::new());
    let signalled = Arc::clone(&shutdown);
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                signalled.notify_one();
            })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => {
            report_server_exit(result);
            return;
        }
        () = shutdown.notified() => {}
    }

    // --- Drain in-flight requests ---
    let grace = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => report_server_exit(result),
        Err(_) => {
            tracing::warn!(grace_secs = grace.as_secs(), "Grace period elapsed, aborting");
            server.abort();
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "projectsync_api=debug,projectsync_core=debug,projectsync_db=debug,tower_http=debug".into()
    });

    let (json, text) = match format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Text => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

fn report_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::info!("Server stopped accepting connections"),
        Ok(Err(err)) => tracing::error!(error = %err, "Server error"),
        Err(err) => tracing::error!(error = %err, "Server task failed"),
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
