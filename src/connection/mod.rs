pub mod config;
pub mod pool;
pub mod scripted;
pub mod statement;

pub use config::ConnectionConfig;
pub use pool::PgClient;
pub use scripted::{ExecutedQuery, ScriptedClient};
pub use statement::Statement;
