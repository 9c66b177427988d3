use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgColumn, PgPool, PgRow};
use sqlx::{Column, Row as _, TypeInfo};
use tracing::{debug, info};

use super::config::ConnectionConfig;
use super::statement::Statement;
use crate::core::{DbError, Result, Row, Value};
use crate::interface::DatabaseClient;
use crate::result::QueryResult;

/// PostgreSQL client backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgClient {
    pool: PgPool,
    config: ConnectionConfig,
}

impl PgClient {
    /// Open the pool and wait for the first connection.
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        config.validate().map_err(DbError::Config)?;

        let pool = config
            .pool_options()
            .connect_with(config.connect_options())
            .await?;

        info!(url = %config.to_url(), max_connections = config.max_connections, "connected to database");

        Ok(Self { pool, config })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DatabaseClient for PgClient {
    async fn query(&self, statement: Statement) -> Result<QueryResult> {
        let mut builder = statement.into_builder();
        let rows = builder.build().fetch_all(&self.pool).await?;
        let result = decode_rows(&rows)?;
        debug!(rows = result.row_count(), "query finished");
        Ok(result)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn decode_rows(rows: &[PgRow]) -> Result<QueryResult> {
    let Some(first) = rows.first() else {
        return Ok(QueryResult::empty());
    };

    let columns = first
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>>>()?;

    Ok(QueryResult::new(columns, rows))
}

fn decode_row(row: &PgRow) -> Result<Row> {
    row.columns()
        .iter()
        .map(|column| decode_column(row, column))
        .collect()
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<Value> {
    let idx = column.ordinal();
    let value = match column.type_info().name() {
        "BOOL" => row.try_get::<Option<bool>, _>(idx)?.map(Value::Boolean),
        "INT2" => row
            .try_get::<Option<i16>, _>(idx)?
            .map(|v| Value::Integer(i64::from(v))),
        "INT4" => row
            .try_get::<Option<i32>, _>(idx)?
            .map(|v| Value::Integer(i64::from(v))),
        "INT8" => row.try_get::<Option<i64>, _>(idx)?.map(Value::Integer),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(idx)?
            .map(|v| Value::Float(f64::from(v))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.map(Value::Float),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(idx)?
            .map(Value::from_decimal),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(idx)?.map(Value::Date),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map(Value::Timestamp),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map(Value::TimestampTz),
        // TEXT, VARCHAR, BPCHAR, NAME and enum labels
        _ => row
            .try_get_unchecked::<Option<String>, _>(idx)?
            .map(Value::Text),
    };
    Ok(value.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_invalid_config() {
        let config = ConnectionConfig::from_url("postgres://reader@localhost/finanse_test")
            .unwrap()
            .max_connections(0);
        let result = PgClient::connect(config).await;
        assert!(matches!(result, Err(DbError::Config(_))));
    }
}
