// ============================================================================
// finance-reports
// ============================================================================
//
// Read-only reports over the `klienci` / `transakcje` / `kategorie` finance
// schema, served as JSON over HTTP.

pub mod config;
pub mod connection;
pub mod core;
pub mod interface;
pub mod result;
pub mod service;
pub mod web;

// Re-export main types for convenience
pub use crate::core::{DbError, Result, Value};
pub use config::AppConfig;
pub use connection::{ConnectionConfig, PgClient, ScriptedClient, Statement};
pub use interface::DatabaseClient;
pub use result::{QueryResult, Record};
pub use service::{ReportError, ReportService};
pub use web::{AppState, WebError, build_router};
