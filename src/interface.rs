use async_trait::async_trait;

use crate::connection::Statement;
use crate::core::Result;
use crate::result::QueryResult;

/// A generic trait for the SQL execution capability the reports run on.
///
/// `PgClient` is the production implementation; `ScriptedClient` answers
/// from canned results so the service and router can run without a server.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Execute a read statement and return every row.
    async fn query(&self, statement: Statement) -> Result<QueryResult>;

    /// Check if the database is reachable
    async fn ping(&self) -> Result<()>;
}
