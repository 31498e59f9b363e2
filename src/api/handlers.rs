//! HTTP request handlers for the raise simulation API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::run_simulation;
use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::models::SimulationResult;
use crate::roster::{Roster, read_csv};

use super::request::{CsvSimulationQuery, SimulationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/simulate", post(simulate_handler))
        .route("/simulate/csv", post(simulate_csv_handler))
        .with_state(state)
}

/// Handler for POST /simulate endpoint.
///
/// Accepts a JSON roster with optional configuration overrides.
async fn simulate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing simulation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let config = match request.resolve_config(state.config()) {
        Ok(config) => config,
        Err(err) => return engine_error_response(correlation_id, err),
    };
    let roster = Roster::from_employees(&request.employees);

    respond(correlation_id, perform_simulation(&roster, &config))
}

/// Handler for POST /simulate/csv endpoint.
///
/// Accepts a CSV roster as the request body and simulates it with the
/// server's default rate table. The body is taken as raw bytes so encoding
/// problems surface as `PARSE_ERROR`.
async fn simulate_csv_handler(
    State(state): State<AppState>,
    query: Result<Query<CsvSimulationQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing CSV simulation request"
    );

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            );
        }
    };

    let outcome = query
        .resolve_config(state.config())
        .and_then(|config| Ok((read_csv(&body[..])?, config)))
        .and_then(|(roster, config)| perform_simulation(&roster, &config));

    respond(correlation_id, outcome)
}

/// Runs one simulation. Each request gets its own resolver.
fn perform_simulation(
    roster: &Roster,
    config: &SimulationConfig,
) -> Result<SimulationResult, EngineError> {
    run_simulation(roster, config)
}

fn respond(correlation_id: Uuid, outcome: Result<SimulationResult, EngineError>) -> Response {
    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                simulation_id = %result.simulation_id,
                employees = result.employees.len(),
                total_cost = %result.summary.total_cost,
                remaining_budget = %result.summary.remaining_budget,
                warnings = result.audit_trace.warnings.len(),
                duration_us = result.audit_trace.duration_us,
                "Simulation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Simulation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn json_response(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default.yaml").expect("Failed to load config");
        AppState::new(config.into_config())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn send(router: Router, uri: &str, content_type: &str, body: impl Into<Body>) -> Response {
        let body: Body = body.into();
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = r#"{
            "employees": [
                { "name": "A", "salary": 8000000, "rating": "A", "band_position": "mid" }
            ]
        }"#;

        let response = send(router, "/simulate", "application/json", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: SimulationResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.employees.len(), 1);
        assert_eq!(result.employees[0].increase_amount, dec("400000"));
        assert_eq!(result.summary.remaining_budget, dec("600000"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = send(router, "/simulate", "application/json", "{invalid json".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_rating_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{ "employees": [{ "salary": 100 }] }"#;

        let response = send(router, "/simulate", "application/json", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("rating"));
    }

    #[tokio::test]
    async fn test_empty_employee_list_under_matrix_config() {
        let router = create_router(create_test_state());
        let body = r#"{ "employees": [] }"#;

        let response = send(router, "/simulate", "application/json", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: SimulationResult = serde_json::from_slice(&body).unwrap();
        assert!(result.employees.is_empty());
        assert_eq!(result.summary.total_cost, Decimal::ZERO);
        assert_eq!(result.summary.remaining_budget, dec("1000000"));
    }

    #[tokio::test]
    async fn test_matrix_without_band_positions_is_schema_error() {
        let router = create_router(create_test_state());
        let body = r#"{ "employees": [{ "salary": 100, "rating": "S" }] }"#;

        let response = send(router, "/simulate", "application/json", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "SCHEMA_ERROR");
        assert!(error.message.contains("band_position"));
    }

    #[tokio::test]
    async fn test_csv_endpoint_with_budget_override() {
        let router = create_router(create_test_state());
        let csv = "name,salary,rating,band_position\nA,6000000,S,下位\n".to_string();

        let response = send(router, "/simulate/csv?budget=400000", "text/csv", csv).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: SimulationResult = serde_json::from_slice(&body).unwrap();

        // 6,000,000 × 8% = 480,000 against a 400,000 budget
        assert_eq!(result.summary.total_cost, dec("480000"));
        assert_eq!(result.summary.remaining_budget, dec("-80000"));
    }

    #[tokio::test]
    async fn test_csv_endpoint_invalid_utf8_returns_json_parse_error() {
        let router = create_router(create_test_state());
        let csv: Vec<u8> = b"salary,rating,band_position\n100,\xff\xfe,low\n".to_vec();

        let response = send(router, "/simulate/csv", "text/csv", csv).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "PARSE_ERROR");
    }

    #[tokio::test]
    async fn test_csv_endpoint_ragged_rows_return_parse_error() {
        let router = create_router(create_test_state());
        let csv = "salary,rating,band_position\n100,S\n".to_string();

        let response = send(router, "/simulate/csv", "text/csv", csv).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "PARSE_ERROR");
    }
}
