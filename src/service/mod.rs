//! Report queries over the `klienci` / `transakcje` / `kategorie` schema.
//!
//! Every operation validates its parameters first, then runs one SQL
//! template and hands the rows back untouched.

pub mod error;
pub mod params;
pub mod queries;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::connection::Statement;
use crate::interface::DatabaseClient;
use crate::result::Record;

pub use error::ReportError;
pub use params::{
    ClientsQuery, MonthlyReportQuery, TopClientsQuery, TransactionStatus, TransactionsQuery,
};

#[derive(Clone)]
pub struct ReportService {
    db: Arc<dyn DatabaseClient>,
}

impl ReportService {
    pub fn new(db: Arc<dyn DatabaseClient>) -> Self {
        Self { db }
    }

    /// Clients ranked by summed gross revenue.
    pub async fn top_clients(&self, query: &TopClientsQuery) -> Result<Vec<Record>, ReportError> {
        query.validate().inspect_err(log_rejected)?;
        self.run("top_clients", queries::top_clients(query.limit))
            .await
    }

    pub async fn list_clients(&self, query: &ClientsQuery) -> Result<Vec<Record>, ReportError> {
        query.validate().inspect_err(log_rejected)?;
        self.run(
            "list_clients",
            queries::clients(query.city_filter(), query.limit),
        )
        .await
    }

    /// The client with `client_id`, as a one-element list.
    pub async fn get_client(&self, client_id: i64) -> Result<Vec<Record>, ReportError> {
        let records = self
            .run("get_client", queries::client_by_id(client_id))
            .await?;

        if records.is_empty() {
            return Err(ReportError::not_found(format!(
                "Client with client_id = {} not exists.",
                client_id
            )));
        }
        Ok(records)
    }

    /// Transactions of a client. An unknown client yields an empty list.
    pub async fn client_transactions(
        &self,
        client_id: i64,
        query: &TransactionsQuery,
    ) -> Result<Vec<Record>, ReportError> {
        let status = query.status_filter().inspect_err(log_rejected)?;
        self.run(
            "client_transactions",
            queries::client_transactions(client_id, status),
        )
        .await
    }

    /// Revenue, cost and gross balance per month of `query.year`.
    pub async fn monthly_report(
        &self,
        query: &MonthlyReportQuery,
    ) -> Result<Vec<Record>, ReportError> {
        query.validate().inspect_err(log_rejected)?;
        self.run("monthly_report", queries::monthly_report(query.year))
            .await
    }

    pub async fn ping(&self) -> Result<(), ReportError> {
        Ok(self.db.ping().await?)
    }

    async fn run(
        &self,
        report: &'static str,
        statement: Statement,
    ) -> Result<Vec<Record>, ReportError> {
        debug!(report, binds = ?statement.binds(), "running report query");
        let result = self.db.query(statement).await?;
        debug!(report, rows = result.row_count(), "report query finished");
        Ok(result.into_records())
    }
}

fn log_rejected(err: &ReportError) {
    warn!(error = %err, "rejected report parameters");
}
