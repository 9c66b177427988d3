use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use finance_reports::{
    AppState, QueryResult, ReportService, ScriptedClient, Value as Cell, build_router,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(client: &ScriptedClient) -> Router {
    let reports = Arc::new(ReportService::new(Arc::new(client.clone())));
    build_router(AppState::new(reports))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("router never fails");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn assert_problem(body: &Value, code: &str) {
    assert_eq!(body.get("code").and_then(Value::as_str), Some(code));
    assert!(body.get("detail").and_then(Value::as_str).is_some());
}

fn acme_top_client() -> QueryResult {
    QueryResult::from_rows(
        [
            "name",
            "nip",
            "city",
            "total_amount",
            "transactions",
            "average_transaction_amount",
        ],
        vec![vec![
            Cell::from("Acme"),
            Cell::from("123"),
            Cell::from("Warsaw"),
            Cell::Float(300.0),
            Cell::Integer(2),
            Cell::Float(150.0),
        ]],
    )
}

#[tokio::test]
async fn test_index_greeting() {
    let client = ScriptedClient::new();
    let (status, body) = get_json(app(&client), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"Hello": "This is test api for gathering finance data"})
    );
    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(app(&ScriptedClient::new()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = get_json(app(&ScriptedClient::unavailable()), "/health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_problem(&body, "database_error");
    assert_eq!(body["detail"], "Internal server error");
}

#[tokio::test]
async fn test_top_clients_example() {
    let client = ScriptedClient::new().respond("k.type = 'REVENUE'", acme_top_client());
    let (status, body) = get_json(app(&client), "/top_clients?limit=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "name": "Acme",
            "nip": "123",
            "city": "Warsaw",
            "total_amount": 300.0,
            "transactions": 2,
            "average_transaction_amount": 150.0
        }])
    );

    let executed = client.last_executed().unwrap();
    assert_eq!(executed.binds, vec![Cell::Integer(10)]);
}

#[tokio::test]
async fn test_top_clients_default_limit() {
    let client = ScriptedClient::new();
    let (status, body) = get_json(app(&client), "/top_clients").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    let executed = client.last_executed().unwrap();
    assert_eq!(executed.binds, vec![Cell::Integer(10)]);
}

#[tokio::test]
async fn test_top_clients_limit_out_of_range() {
    let client = ScriptedClient::new();

    for uri in [
        "/top_clients?limit=0",
        "/top_clients?limit=-5",
        "/top_clients?limit=101",
        "/top_clients?limit=abc",
        "/top_clients?limit=99999999999999999999",
    ] {
        let (status, body) = get_json(app(&client), uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_problem(&body, "input_error");
    }

    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn test_clients_limit_bounds() {
    let client = ScriptedClient::new();

    let (status, _) = get_json(app(&client), "/clients?limit=1000").await;
    assert_eq!(status, StatusCode::OK);

    for uri in ["/clients?limit=0", "/clients?limit=1001"] {
        let (status, body) = get_json(app(&client), uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_problem(&body, "input_error");
    }

    assert_eq!(client.executed().len(), 1);
}

#[tokio::test]
async fn test_clients_city_filter() {
    let client = ScriptedClient::new().respond(
        "FROM klienci",
        QueryResult::from_rows(
            ["client_id", "name", "nip", "city"],
            vec![vec![
                Cell::Integer(1),
                Cell::from("Acme"),
                Cell::from("123"),
                Cell::from("Warsaw"),
            ]],
        ),
    );

    let (status, body) = get_json(app(&client), "/clients?city=Warsaw&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"client_id": 1, "name": "Acme", "nip": "123", "city": "Warsaw"}])
    );

    let executed = client.last_executed().unwrap();
    assert!(executed.sql.contains("WHERE city = $1"));
    assert_eq!(executed.binds, vec![Cell::from("Warsaw"), Cell::Integer(5)]);

    let (status, _) = get_json(app(&client), "/clients").await;
    assert_eq!(status, StatusCode::OK);
    let executed = client.last_executed().unwrap();
    assert!(!executed.sql.contains("city ="));
    assert_eq!(executed.binds, vec![Cell::Integer(100)]);
}

#[tokio::test]
async fn test_client_by_id() {
    let client = ScriptedClient::new().respond(
        "FROM klienci WHERE client_id",
        QueryResult::from_rows(
            ["client_id", "name", "nip", "city"],
            vec![vec![
                Cell::Integer(1),
                Cell::from("Acme"),
                Cell::from("123"),
                Cell::Null,
            ]],
        ),
    );

    let (status, body) = get_json(app(&client), "/clients/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"client_id": 1, "name": "Acme", "nip": "123", "city": null}])
    );
    let executed = client.last_executed().unwrap();
    assert_eq!(executed.binds, vec![Cell::Integer(1)]);
}

#[tokio::test]
async fn test_client_not_found() {
    let (status, body) = get_json(app(&ScriptedClient::new()), "/clients/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body.get("detail").and_then(Value::as_str),
        Some("Client with client_id = 999 not exists.")
    );
    assert_problem(&body, "not_found");
}

#[tokio::test]
async fn test_client_id_must_be_integer() {
    let client = ScriptedClient::new();
    let (status, body) = get_json(app(&client), "/clients/abc").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_problem(&body, "input_error");
    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn test_client_transactions_status_filter() {
    let client = ScriptedClient::new().respond(
        "FROM transakcje",
        QueryResult::from_rows(
            ["transaction_id", "client_id", "status"],
            vec![
                vec![Cell::Integer(10), Cell::Integer(3), Cell::from("Paid")],
                vec![Cell::Integer(11), Cell::Integer(3), Cell::from("Paid")],
            ],
        ),
    );

    let (status, body) = get_json(app(&client), "/clients/3/transactions?status=Paid").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["status"] == "Paid"));

    let executed = client.last_executed().unwrap();
    assert!(executed.sql.contains("AND status::text = $2"));
    assert_eq!(executed.binds, vec![Cell::Integer(3), Cell::from("Paid")]);
}

#[tokio::test]
async fn test_client_transactions_without_status() {
    let client = ScriptedClient::new();
    let (status, body) = get_json(app(&client), "/clients/42/transactions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    let executed = client.last_executed().unwrap();
    assert!(!executed.sql.contains("status"));
    assert_eq!(executed.binds, vec![Cell::Integer(42)]);
}

#[tokio::test]
async fn test_client_transactions_bad_status() {
    let client = ScriptedClient::new();
    let (status, body) = get_json(app(&client), "/clients/3/transactions?status=Overdue").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body.get("detail").and_then(Value::as_str),
        Some("Wrong status selected. You need to select 'Paid' or 'Unpaid'")
    );
    assert!(client.executed().is_empty());
}

#[tokio::test]
async fn test_monthly_report() {
    let client = ScriptedClient::new().respond(
        "EXTRACT(YEAR FROM t.date) = $1",
        QueryResult::from_rows(
            [
                "year",
                "month",
                "total_revenue_netto",
                "total_revenue_brutto",
                "total_revenue_vat",
                "total_cost_netto",
                "total_cost_brutto",
                "total_cost_vat",
                "balance_brutto",
            ],
            vec![vec![
                Cell::Integer(2023),
                Cell::Integer(5),
                Cell::Float(1000.0),
                Cell::Float(1230.0),
                Cell::Float(230.0),
                Cell::Float(200.0),
                Cell::Float(246.0),
                Cell::Float(46.0),
                Cell::Float(984.0),
            ]],
        ),
    );

    let (status, body) = get_json(app(&client), "/reports/monthly?year=2023").await;
    assert_eq!(status, StatusCode::OK);
    let row = &body[0];
    assert_eq!(row["year"], 2023);
    assert_eq!(row["month"], 5);
    assert_eq!(row["balance_brutto"], 984.0);

    let executed = client.last_executed().unwrap();
    assert_eq!(executed.binds, vec![Cell::Integer(2023)]);
}

#[tokio::test]
async fn test_monthly_report_year_bounds() {
    let client = ScriptedClient::new();

    let (status, _) = get_json(app(&client), "/reports/monthly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        client.last_executed().unwrap().binds,
        vec![Cell::Integer(2024)]
    );

    for uri in ["/reports/monthly?year=2019", "/reports/monthly?year=2031"] {
        let (status, body) = get_json(app(&client), uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_problem(&body, "input_error");
    }
    assert_eq!(client.executed().len(), 1);
}

#[tokio::test]
async fn test_request_id_propagated() {
    let response = app(&ScriptedClient::new())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
