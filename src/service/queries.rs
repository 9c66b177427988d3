//! SQL statements for the report endpoints.

use crate::connection::Statement;

use super::params::TransactionStatus;

const TOP_CLIENTS: &str = r#"
    SELECT
        c.name,
        c.nip,
        c.city,
        SUM(t.cost_brutto) AS total_amount,
        COUNT(*) AS transactions,
        ROUND(AVG(t.cost_brutto), 2) AS average_transaction_amount
    FROM klienci c
    JOIN transakcje t ON c.client_id = t.client_id
    JOIN kategorie k ON t.category_id = k.category_id
    WHERE k.type = 'REVENUE'
    GROUP BY c.name, c.nip, c.city
    ORDER BY total_amount DESC
    LIMIT "#;

const CLIENTS: &str = "SELECT * FROM klienci";

const CLIENT_BY_ID: &str = "SELECT * FROM klienci WHERE client_id = ";

const CLIENT_TRANSACTIONS: &str = "SELECT * FROM transakcje WHERE client_id = ";

const MONTHLY_REPORT: &str = r#"
    SELECT
        EXTRACT(YEAR FROM t.date) AS year,
        EXTRACT(MONTH FROM t.date) AS month,

        SUM(CASE WHEN k.type = 'REVENUE' THEN t.cost_netto ELSE 0 END) AS total_revenue_netto,
        SUM(CASE WHEN k.type = 'REVENUE' THEN t.cost_brutto ELSE 0 END) AS total_revenue_brutto,
        SUM(CASE WHEN k.type = 'REVENUE' THEN t.cost_vat ELSE 0 END) AS total_revenue_vat,

        SUM(CASE WHEN k.type = 'COST' THEN t.cost_netto ELSE 0 END) AS total_cost_netto,
        SUM(CASE WHEN k.type = 'COST' THEN t.cost_brutto ELSE 0 END) AS total_cost_brutto,
        SUM(CASE WHEN k.type = 'COST' THEN t.cost_vat ELSE 0 END) AS total_cost_vat,

        SUM(CASE WHEN k.type = 'REVENUE' THEN t.cost_brutto ELSE 0 END) -
        SUM(CASE WHEN k.type = 'COST' THEN t.cost_brutto ELSE 0 END) AS balance_brutto

    FROM transakcje t
    JOIN kategorie k ON t.category_id = k.category_id
    WHERE EXTRACT(YEAR FROM t.date) = "#;

const MONTHLY_REPORT_GROUPING: &str = r#"
    GROUP BY EXTRACT(YEAR FROM t.date), EXTRACT(MONTH FROM t.date)
    ORDER BY year, month
"#;

/// Clients ranked by summed gross revenue, at most `limit` rows.
pub fn top_clients(limit: i64) -> Statement {
    let mut stmt = Statement::new(TOP_CLIENTS);
    stmt.push_bind(limit);
    stmt
}

/// Client listing, with the city filter only when one is given.
pub fn clients(city: Option<&str>, limit: i64) -> Statement {
    let mut stmt = Statement::new(CLIENTS);
    let mut has_where = false;

    if let Some(city) = city {
        stmt.push_where_prefix(&mut has_where)
            .push("city = ")
            .push_bind(city);
    }

    stmt.push(" LIMIT ").push_bind(limit);
    stmt
}

pub fn client_by_id(client_id: i64) -> Statement {
    let mut stmt = Statement::new(CLIENT_BY_ID);
    stmt.push_bind(client_id);
    stmt
}

/// Transactions of one client, optionally restricted to a status.
///
/// The column is compared as text so the filter works whether `status` is a
/// text column or a Postgres enum.
pub fn client_transactions(client_id: i64, status: Option<TransactionStatus>) -> Statement {
    let mut stmt = Statement::new(CLIENT_TRANSACTIONS);
    stmt.push_bind(client_id);

    if let Some(status) = status {
        stmt.push(" AND status::text = ").push_bind(status.as_str());
    }
    stmt
}

pub fn monthly_report(year: i64) -> Statement {
    let mut stmt = Statement::new(MONTHLY_REPORT);
    stmt.push_bind(year).push(MONTHLY_REPORT_GROUPING);
    stmt
}
