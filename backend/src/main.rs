//! Backend entry-point: loads settings, prepares the database and starts the
//! HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr as _};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fresque::inbound::http::health::HealthState;
use fresque::inbound::http::session_config::{BuildMode, session_settings_from_env};
use fresque::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use fresque::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;

    let mut config = ServerConfig::new(session, settings.bind_addr());
    match settings.database_url() {
        Some(url) => {
            if settings.skip_migrations {
                info!("skipping database migrations");
            } else {
                run_migrations(url).await.wrap_err("database migration failed")?;
            }
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
                .await
                .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("FRESQUE_DATABASE_URL not set; serving fixture data"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting fresque");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
