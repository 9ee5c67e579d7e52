use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::AppState;
use crate::models::Report;

/// Run one full aggregation and return the report.
///
/// Partial failures still return 200 with the `failures` list embedded; a
/// total failure (nothing collected, at least one unit failed) returns 502
/// so monitors can tell a broken provider from an empty account. The report
/// body is sent either way.
pub async fn get_inventory(State(state): State<AppState>) -> (StatusCode, Json<Report>) {
    let report = state.engine.collect().await;
    let status = if report.is_total_failure() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (status, Json(report))
}
