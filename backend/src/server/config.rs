//! Process settings and the server configuration built from them.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use hostel_backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings read from `HOSTEL_*` environment variables, CLI flags and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTEL")]
pub struct AppSettings {
    /// Listen address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without it the process keeps everything in memory.
    pub database_url: Option<String>,
    /// Upper bound of the connection pool.
    pub db_max_connections: Option<u32>,
    /// Email of the super-admin created on first start.
    pub bootstrap_superadmin_email: Option<String>,
    /// Password of the super-admin created on first start.
    pub bootstrap_superadmin_password: Option<String>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR))
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Bootstrap super-admin credentials, when both halves are set.
    pub fn bootstrap_superadmin(&self) -> Option<(&str, &str)> {
        match (
            self.bootstrap_superadmin_email.as_deref(),
            self.bootstrap_superadmin_password.as_deref(),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
