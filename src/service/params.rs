use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Deserialize;

use super::error::ReportError;

pub const TOP_CLIENTS_LIMIT: RangeInclusive<i64> = 1..=100;
pub const CLIENTS_LIMIT: RangeInclusive<i64> = 1..=1000;
pub const REPORT_YEARS: RangeInclusive<i64> = 2020..=2030;

pub const INVALID_STATUS_DETAIL: &str =
    "Wrong status selected. You need to select 'Paid' or 'Unpaid'";

#[derive(Debug, Clone, Deserialize)]
pub struct TopClientsQuery {
    #[serde(default = "default_top_clients_limit")]
    pub limit: i64,
}

impl Default for TopClientsQuery {
    fn default() -> Self {
        Self {
            limit: default_top_clients_limit(),
        }
    }
}

impl TopClientsQuery {
    pub fn validate(&self) -> Result<(), ReportError> {
        check_range("limit", self.limit, &TOP_CLIENTS_LIMIT)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientsQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "default_clients_limit")]
    pub limit: i64,
}

impl Default for ClientsQuery {
    fn default() -> Self {
        Self {
            city: None,
            limit: default_clients_limit(),
        }
    }
}

impl ClientsQuery {
    pub fn validate(&self) -> Result<(), ReportError> {
        check_range("limit", self.limit, &CLIENTS_LIMIT)
    }

    /// The city to filter on. An empty value means no filter.
    pub fn city_filter(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionsQuery {
    /// Parses the optional status. An empty value means no filter.
    pub fn status_filter(&self) -> Result<Option<TransactionStatus>, ReportError> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyReportQuery {
    #[serde(default = "default_report_year")]
    pub year: i64,
}

impl Default for MonthlyReportQuery {
    fn default() -> Self {
        Self {
            year: default_report_year(),
        }
    }
}

impl MonthlyReportQuery {
    pub fn validate(&self) -> Result<(), ReportError> {
        check_range("year", self.year, &REPORT_YEARS)
    }
}

/// Payment status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Paid,
    Unpaid,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paid" => Ok(Self::Paid),
            "Unpaid" => Ok(Self::Unpaid),
            _ => Err(ReportError::InvalidStatus(INVALID_STATUS_DETAIL.to_string())),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_range(name: &str, value: i64, range: &RangeInclusive<i64>) -> Result<(), ReportError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ReportError::validation(format!(
        "{} must be between {} and {}, got {}",
        name,
        range.start(),
        range.end(),
        value
    )))
}

fn default_top_clients_limit() -> i64 {
    10
}

fn default_clients_limit() -> i64 {
    100
}

fn default_report_year() -> i64 {
    2024
}
