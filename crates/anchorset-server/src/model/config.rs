//! Configuration management for the Anchorset server
//!
//! Values are layered: `conf/application.yml` (optional), then environment
//! variables prefixed with `ANCHORSET` (`ANCHORSET_DB.URL`), then command
//! line flags.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::startup::LoggingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
pub const DEFAULT_SERVER_PORT: u16 = 8788;
pub const DEFAULT_FALLBACK_PREFIX: &str = "/assets";

pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";
pub const DB_URL: &str = "db.url";
pub const DB_MAX_CONNECTIONS: &str = "db.pool.max_connections";
pub const DB_MIN_CONNECTIONS: &str = "db.pool.min_connections";
pub const DB_CONNECT_TIMEOUT_SECS: &str = "db.pool.connect_timeout_secs";
pub const DB_SQLX_LOGGING: &str = "db.pool.sqlx_logging";
pub const DB_BOOTSTRAP_SCHEMA: &str = "db.bootstrap_schema";
pub const ADMIN_USERNAME: &str = "admin.username";
pub const ADMIN_PASSWORD: &str = "admin.password";
pub const LOGGING_LEVEL: &str = "logging.level";
pub const LOGGING_DIR: &str = "logging.dir";
pub const LOGGING_CONSOLE_ENABLED: &str = "logging.console.enabled";
pub const LOGGING_FILE_ENABLED: &str = "logging.file.enabled";
pub const LOGGING_FILE_ROTATION: &str = "logging.file.rotation";
pub const ASSETS_FALLBACK_PREFIX: &str = "assets.fallback_prefix";

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "anchorset-server", about = "Anchor calculator configuration server")]
pub struct Cli {
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    #[arg(long = "admin-username", env = "ADMIN_USERNAME", hide_env_values = true)]
    pub admin_username: Option<String>,
    #[arg(long = "admin-password", env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

/// Basic auth credentials guarding the admin API
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// No credentials configured: the admin API is open
    pub fn is_open(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> anyhow::Result<Self> {
        Self::load(Cli::parse())
    }

    pub fn load(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(&args.config_file).required(false))
            .add_source(
                Environment::with_prefix("ANCHORSET")
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(v) = args.database_url {
            config_builder = config_builder.set_override(DB_URL, v)?;
        }
        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT, i64::from(v))?;
        }
        if let Some(v) = args.admin_username {
            config_builder = config_builder.set_override(ADMIN_USERNAME, v)?;
        }
        if let Some(v) = args.admin_password {
            config_builder = config_builder.set_override(ADMIN_PASSWORD, v)?;
        }

        Ok(Configuration {
            config: config_builder.build()?,
        })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn fallback_prefix(&self) -> String {
        let prefix = self
            .config
            .get_string(ASSETS_FALLBACK_PREFIX)
            .unwrap_or(DEFAULT_FALLBACK_PREFIX.to_string());
        prefix.trim_end_matches('/').to_string()
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials::new(
            self.config.get_string(ADMIN_USERNAME).unwrap_or_default(),
            self.config.get_string(ADMIN_PASSWORD).unwrap_or_default(),
        )
    }

    // ========================================================================
    // Logging
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string(LOGGING_DIR).ok(),
            self.config.get_bool(LOGGING_CONSOLE_ENABLED).unwrap_or(true),
            self.config.get_bool(LOGGING_FILE_ENABLED).unwrap_or(false),
            self.config
                .get_string(LOGGING_LEVEL)
                .unwrap_or("info".to_string()),
        )
        .with_rotation(
            self.config
                .get_string(LOGGING_FILE_ROTATION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        )
    }

    // ========================================================================
    // Database
    // ========================================================================

    /// Store URL; unset or blank means the server runs on bundled defaults
    pub fn database_url(&self) -> Option<String> {
        self.config
            .get_string(DB_URL)
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    pub fn bootstrap_schema(&self) -> bool {
        self.config.get_bool(DB_BOOTSTRAP_SCHEMA).unwrap_or(true)
    }

    pub async fn database_connection(&self) -> anyhow::Result<Option<DatabaseConnection>> {
        let Some(url) = self.database_url() else {
            return Ok(None);
        };

        let max_connections = self.config.get_int(DB_MAX_CONNECTIONS).unwrap_or(10) as u32;
        let min_connections = self.config.get_int(DB_MIN_CONNECTIONS).unwrap_or(1) as u32;
        let connect_timeout = self.config.get_int(DB_CONNECT_TIMEOUT_SECS).unwrap_or(30) as u64;
        let sqlx_logging = self.config.get_bool(DB_SQLX_LOGGING).unwrap_or(false);

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .acquire_timeout(Duration::from_secs(connect_timeout))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        Ok(Some(Database::connect(opt).await?))
    }
}
