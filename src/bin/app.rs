use adapter::{database::connect_database_with, redis::RedisClient};
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use registry::AppRegistry;
use shared::{
    config::AppConfig,
    env::{which, Environment},
    observability,
};
use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
    time::Duration,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{self, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let env = which();
    let log_level = match env {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());
    let registry = tracing_subscriber::registry().with(env_filter);

    match env {
        Environment::Development => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false),
            )
            .try_init()?,
        Environment::Production => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(false))
            .try_init()?,
    }

    Ok(())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_headers(cors::Any)
        .allow_methods(cors::Any)
        .allow_origin(cors::Any)
}

const USAGE_REFRESH_INTERVAL: Duration = Duration::from_secs(15);

async fn publish_usage(registry: AppRegistry) {
    let mut interval = tokio::time::interval(USAGE_REFRESH_INTERVAL);
    loop {
        interval.tick().await;
        match registry.usage_repository().snapshot().await {
            Ok(usage) => {
                metrics::gauge!(observability::STUDENTS_ACTIVE).set(usage.active_students as f64);
                metrics::gauge!(observability::SPACES_TOTAL).set(usage.total_spaces as f64);
                metrics::gauge!(observability::SPACES_AVAILABLE)
                    .set(usage.available_spaces as f64);
                metrics::gauge!(observability::SPACES_OCCUPIED).set(usage.occupied_spaces as f64);
                metrics::gauge!(observability::ACCESS_ACTIVE).set(usage.active_accesses as f64);
                metrics::gauge!(observability::ACCESS_COMPLETED)
                    .set(usage.completed_accesses as f64);
            }
            Err(e) => tracing::warn!(error.message = %e, "failed to refresh usage gauges"),
        }
    }
}

async fn bootstrap() -> Result<()> {
    let mut app_config = AppConfig::new()?;
    let pool = connect_database_with(&app_config.database);
    pool.migrate().await.context("failed to run database migrations")?;
    let kv = Arc::new(RedisClient::new(&app_config.redis)?);

    let metrics_port = app_config.metrics.port;
    observability::init(metrics_port)?;

    let admin = app_config.admin.take();
    let registry = AppRegistry::new(pool, kv, app_config);

    if metrics_port.is_some() {
        tokio::spawn(publish_usage(registry.clone()));
    }

    if let Some(admin) = admin {
        registry
            .user_repository()
            .ensure_admin(&admin.username, &admin.email, &admin.password)
            .await
            .context("failed to provision the administrator account")?;
    }

    let app = Router::new()
        .merge(v1::routes())
        .layer(cors())
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

    let addr = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 8080);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e, error.message = %e, "Unexpected error"
            )
        })
}
