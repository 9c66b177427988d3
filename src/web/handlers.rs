use axum::Json;
use axum::extract::State;
use serde::Serialize;

use super::extract::{ApiPath, ApiQuery};
use super::{AppState, Result};
use crate::result::Record;
use crate::service::{ClientsQuery, MonthlyReportQuery, TopClientsQuery, TransactionsQuery};

pub const GREETING: &str = "This is test api for gathering finance data";

#[derive(Debug, Serialize)]
pub struct Greeting {
    #[serde(rename = "Hello")]
    pub hello: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn index() -> Json<Greeting> {
    Json(Greeting { hello: GREETING })
}

pub async fn healthcheck(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    state.reports.ping().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}

pub async fn top_clients(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopClientsQuery>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.reports.top_clients(&query).await?))
}

pub async fn list_clients(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ClientsQuery>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.reports.list_clients(&query).await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.reports.get_client(client_id).await?))
}

pub async fn client_transactions(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<TransactionsQuery>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(
        state.reports.client_transactions(client_id, &query).await?,
    ))
}

pub async fn monthly_report(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MonthlyReportQuery>,
) -> Result<Json<Vec<Record>>> {
    Ok(Json(state.reports.monthly_report(&query).await?))
}
