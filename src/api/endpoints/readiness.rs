use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::ReadinessView;

/// `GET /api/readiness`: analysis state and readiness summary for the
/// selected hospital. Polled by the frontend while the analysis is pending.
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<ReadinessView>, ApiError> {
    Ok(Json(ctx.core.readiness()?))
}
