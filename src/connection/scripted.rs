use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::statement::Statement;
use crate::core::{DbError, Result, Value};
use crate::interface::DatabaseClient;
use crate::result::QueryResult;

/// A statement seen by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub sql: String,
    pub binds: Vec<Value>,
}

/// In-process [`DatabaseClient`] that answers from canned results.
///
/// Each response is keyed by a fragment of SQL; the first fragment contained
/// in an incoming statement wins, and unmatched statements return an empty
/// result. Every statement is recorded with its bound values.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    responses: Arc<Mutex<Vec<(String, QueryResult)>>>,
    executed: Arc<Mutex<Vec<ExecutedQuery>>>,
    unavailable: bool,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every call fails like an unreachable server.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn respond(self, sql_fragment: &str, result: QueryResult) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push((sql_fragment.to_string(), result));
        }
        self
    }

    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.executed
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn last_executed(&self) -> Option<ExecutedQuery> {
        self.executed().pop()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(DbError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DatabaseClient for ScriptedClient {
    async fn query(&self, statement: Statement) -> Result<QueryResult> {
        self.check_available()?;

        let sql = statement.sql().to_string();
        self.executed
            .lock()
            .map_err(|e| DbError::Query(e.to_string()))?
            .push(ExecutedQuery {
                sql: sql.clone(),
                binds: statement.binds().to_vec(),
            });

        let responses = self
            .responses
            .lock()
            .map_err(|e| DbError::Query(e.to_string()))?;
        Ok(responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
