use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::str::FromStr;

pub use core_config::Environment;

/// Backing store selected with `ITEM_STORE`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store '{}', expected 'postgres' or 'memory'",
                other
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub enum StoreConfig {
    Postgres {
        database: PostgresConfig,
        run_migrations: bool,
    },
    Memory,
}

impl FromEnv for StoreConfig {
    /// `DATABASE_URL` is only read when `ITEM_STORE` selects PostgreSQL
    fn from_env() -> Result<Self, ConfigError> {
        match env_parse::<StoreKind>("ITEM_STORE", "postgres")? {
            StoreKind::Postgres => Ok(Self::Postgres {
                database: PostgresConfig::from_env()?,
                run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
            }),
            StoreKind::Memory => Ok(Self::Memory),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let store = StoreConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            store,
        })
    }
}
