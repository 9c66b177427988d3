use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::connection::ConnectionConfig;

/// Read-only finance reporting API
#[derive(Debug, Clone, Parser)]
#[command(name = "finance-reports", version, about)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "FINANCE_BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string
    #[arg(
        long,
        env = "FINANCE_DATABASE_URL",
        default_value = "postgres://localhost:5432/finanse_test",
        hide_env_values = true
    )]
    pub database_url: String,

    /// Schema holding klienci/transakcje/kategorie (defaults to the server's search_path)
    #[arg(long, env = "FINANCE_DB_SCHEMA")]
    pub db_schema: Option<String>,

    #[arg(long, env = "FINANCE_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    #[arg(long, env = "FINANCE_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub db_min_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, env = "FINANCE_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    pub fn connection_config(&self) -> Result<ConnectionConfig> {
        let mut config = ConnectionConfig::from_url(&self.database_url)
            .context("FINANCE_DATABASE_URL is invalid")?
            .max_connections(self.db_max_connections)
            .min_connections(self.db_min_connections)
            .connect_timeout(Duration::from_secs(self.db_acquire_timeout_secs));

        if let Some(schema) = &self.db_schema {
            config = config.schema(schema);
        }

        config.validate().map_err(|e| anyhow!(e))?;
        Ok(config)
    }
}
