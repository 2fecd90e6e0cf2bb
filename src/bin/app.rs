use std::net::{IpAddr, SocketAddr};

use adapter::database::connect_database_with;
use anyhow::{Context, Result};
use api::route::routes;
use axum::Router;
use registry::AppRegistry;
use shared::config::{AppConfig, StoreConfig};
use shared::env::{which, Environment};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;

    let registry = match &app_config.store {
        StoreConfig::Postgres(database) => {
            let pool = connect_database_with(database);
            pool.migrate()
                .await
                .context("Failed to apply database migrations")?;
            tracing::info!(host = %database.host, "Using PostgreSQL store");
            AppRegistry::new(pool, app_config.admission)
        }
        StoreConfig::InMemory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            AppRegistry::in_memory(app_config.admission)
        }
    };

    // 同時予約時の挙動が変わるため、どちらのモードで動いているかを必ず出力する
    tracing::info!(
        admission_mode = %registry.reservation_admission().mode(),
        "Reservation admission mode"
    );

    let app = Router::new()
        .merge(routes())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let host: IpAddr = app_config
        .server
        .host
        .parse()
        .context("SERVER_HOST must be an IP address")?;
    let addr = SocketAddr::new(host, app_config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}
