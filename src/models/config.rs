//! Configuration module for the storefront API
//!
//! Everything is read from the environment once at startup.

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{AppError, AppResult, ErrorCode};
use crate::store::{DocumentStore, MemoryStore};
use crate::utils::constants::{
    DEFAULT_HOST, DEFAULT_PORT, ENV_DATABASE_NAME, ENV_DATABASE_URL, ENV_HOST, ENV_PORT,
    MEMORY_STORE_SCHEME,
};

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from HOST, PORT, DATABASE_URL and DATABASE_NAME
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(ENV_PORT) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid PORT, falling back to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host,
            port,
            store: StoreConfig {
                database_url: lookup(ENV_DATABASE_URL).filter(|v| !v.is_empty()),
                database_name: lookup(ENV_DATABASE_NAME).filter(|v| !v.is_empty()),
            },
        }
    }

    /// Resolve HOST and PORT to the addresses to bind
    ///
    /// HOST may be an IP literal or a hostname such as `localhost`.
    pub fn socket_addrs(&self) -> AppResult<Vec<SocketAddr>> {
        let invalid = |detail: String| {
            AppError::new(
                ErrorCode::ConfigInvalidValue,
                format!("Invalid listen address {}:{}: {}", self.host, self.port, detail),
            )
        };

        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .collect();

        if addrs.is_empty() {
            return Err(invalid("host resolved to no addresses".to_string()));
        }
        Ok(addrs)
    }
}

/// Document store connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl StoreConfig {
    /// Open the configured store
    ///
    /// `Ok(None)` when DATABASE_URL is unset; the API then runs in degraded
    /// mode (orders fail, testimonials fall back to seed data).
    pub fn open(&self) -> AppResult<Option<Arc<dyn DocumentStore>>> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };

        match url.strip_prefix(MEMORY_STORE_SCHEME) {
            Some(path_name) => {
                // DATABASE_NAME wins over the name embedded in the url
                let name = self
                    .database_name
                    .clone()
                    .or_else(|| Some(path_name.trim_matches('/').to_string()))
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "boosting".to_string());
                info!(database = %name, "Using in-process document store");
                Ok(Some(Arc::new(MemoryStore::new(name))))
            }
            None => {
                let scheme = url.split("://").next().unwrap_or(url);
                Err(AppError::unsupported_store(scheme))
            }
        }
    }
}
