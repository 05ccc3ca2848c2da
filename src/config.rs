//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`WORKFORCE_*` prefix, `__` separates sections)
//! 2. `workforce.toml` in the working directory
//! 3. Built-in defaults
//!
//! `WORKFORCE_DATABASE__URL` maps to `database.url`,
//! `WORKFORCE_AUDIT__MODE` to `audit.mode`, and so on.
//!
//! # Example
//!
//! ```no_run
//! use workforce::config::WorkforceConfig;
//!
//! let config = WorkforceConfig::load_with_dotenv().expect("config");
//! if config.database.is_configured() {
//!     let _pool_size = config.database.max_connections;
//! }
//! ```

use crate::task::{domain::UserId, services::AuditMode};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Project-local configuration file name.
pub const CONFIG_FILE: &str = "workforce.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "WORKFORCE_";

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge failed.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A required section has no usable values.
    #[error("configuration section '{section}' is not configured")]
    NotConfigured {
        /// Section name.
        section: &'static str,
    },

    /// A field holds a value the application cannot use.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted field path.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; empty when no database is configured.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 8,
        }
    }
}

impl DatabaseConfig {
    /// Returns `true` when a connection URL is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Returns the connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the URL is empty and
    /// [`ConfigError::InvalidValue`] when the pool size is zero.
    pub fn require_url(&self) -> Result<&str, ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database",
            });
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(self.url.trim())
    }
}

/// Activity recording settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Which state changes append activity records.
    pub mode: AuditMode,
    /// User credited with activities when a request carries no identity.
    pub system_actor_id: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            mode: AuditMode::Complete,
            system_actor_id: 1,
        }
    }
}

impl AuditConfig {
    /// Returns the validated system actor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the identifier is not a
    /// valid user id.
    pub fn system_actor(&self) -> Result<UserId, ConfigError> {
        UserId::new(self.system_actor_id).map_err(|err| ConfigError::InvalidValue {
            field: "audit.system_actor_id",
            reason: err.to_string(),
        })
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `WORKFORCE_LOG` is unset.
    pub log_filter: String,
    /// Whether log lines carry ANSI colours.
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_owned(),
            ansi: true,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceConfig {
    /// Storage settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Activity recording settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Log output settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl WorkforceConfig {
    /// Loads configuration from defaults, `workforce.toml` and the
    /// environment.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source is malformed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment()
            .extract()
            .map_err(|err| ConfigError::from(Box::new(err)))
    }

    /// Loads `.env` from the working directory, then configuration as in
    /// [`Self::load`].
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(error = %err, "no .env file loaded");
        }
        Self::load()
    }

    /// Builds the provider chain.
    ///
    /// Public so tests can extract from it directly or layer extra providers
    /// on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
