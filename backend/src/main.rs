//! Service entry-point: loads settings, prepares storage, and runs the server.

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use users_service::inbound::http::health::HealthState;
use users_service::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use users_service::server::{ServerConfig, create_server, shutdown_on_signal};
use users_service::settings::ServerSettings;

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn build_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping schema migrations");
        } else {
            let applied = apply_migrations(url.to_owned())
                .await
                .map_err(std::io::Error::other)?;
            info!(applied, "schema is up to date");
        }

        let pool_config = PoolConfig::new(url)
            .with_max_size(settings.db_max_connections())
            .with_min_idle(Some(settings.db_min_idle()))
            .with_connection_timeout(settings.db_connection_timeout());
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(make_metrics());
    }

    Ok(config)
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<actix_web_prom::PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("users")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let config = build_config(&settings).await?;
    let bind_addr = config.bind_addr();

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "listening");

    actix_web::rt::spawn(shutdown_on_signal(health_state, server.handle()));
    server.await
}
