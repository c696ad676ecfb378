//! Cart service entry point.

use std::sync::Arc;
use std::time::Duration;

use api::{AppState, Config, Readiness};
use cart_store::PostgresCartStore;
use domain::CartService;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM), then drains.
///
/// Once a signal arrives the readiness probe starts failing, so load
/// balancers pull the instance out of rotation. The drain window lets
/// requests already in flight finish before the listener closes.
async fn shutdown_signal(readiness: Readiness, drain: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }

    readiness.begin_shutdown();
    tracing::info!(
        drain_secs = drain.as_secs(),
        "readiness probe failing, draining in-flight requests"
    );
    tokio::time::sleep(drain).await;
}

#[tokio::main]
async fn main() {
    // 1. Load and validate configuration
    let config = Config::from_env();
    config.validate().expect("invalid configuration");

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 4. Connect to Postgres and run migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to Postgres");
    let store = PostgresCartStore::new(pool.clone());
    store.run_migrations().await.expect("migrations failed");

    // 5. Build application state
    let cart_service = CartService::new(store, config.shipping_fee);
    let state = Arc::new(AppState { cart_service });
    let readiness = Readiness::new();

    // 6. Build the application
    let app = api::create_app(state, readiness.clone(), metrics_handle);

    // 7. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting cart service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(readiness, config.readiness_drain))
        .await
        .expect("server error");

    pool.close().await;
    tracing::info!("server shut down gracefully");
}
