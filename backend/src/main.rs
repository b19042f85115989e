//! Backend entry-point: loads settings, prepares storage and serves the API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hostel_backend::inbound::http::health::HealthState;
use hostel_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use hostel_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, build_ports, create_server};

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
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %session.key_fingerprint(),
        "session signing key loaded"
    );

    let pool = match settings.database_url.as_deref() {
        Some(url) => {
            let applied = run_migrations(url)
                .await
                .wrap_err("failed to run database migrations")?;
            info!(applied, "database migrations complete");
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await
            .wrap_err("failed to create database pool")?;
            Some(pool)
        }
        None => None,
    };

    let ports = build_ports(pool.as_ref());
    if let Some((email, password)) = settings.bootstrap_superadmin() {
        let created = ports
            .auth_service()
            .ensure_super_admin(email, password)
            .await
            .wrap_err("failed to bootstrap the super-admin account")?;
        if created {
            info!(%email, "super-admin account created");
        }
    }

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    );
    if let Some(pool) = pool {
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %settings.bind_addr(), "starting server");
    create_server(health_state, ports, config)?.await?;
    Ok(())
}
