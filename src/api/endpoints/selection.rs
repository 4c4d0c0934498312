//! Selection endpoints.
//!
//! - `GET /api/selection`: current selection snapshot
//! - `PUT /api/selection/policy`: choose the insurer
//! - `PUT /api/selection/specialty`: choose the specialty
//! - `PUT /api/selection/hover`: hovered list card (or none)
//! - `POST /api/selection/hospital`: open the summary, start analysis
//! - `DELETE /api/selection/hospital`: close the summary

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::state::SelectionState;

#[derive(Debug, Deserialize)]
pub struct PolicyRequest {
    pub policy: String,
}

#[derive(Debug, Deserialize)]
pub struct SpecialtyRequest {
    pub specialty: String,
}

#[derive(Debug, Deserialize)]
pub struct HoverRequest {
    #[serde(default)]
    pub hospital_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectHospitalRequest {
    pub hospital_id: String,
}

#[derive(Debug, Serialize)]
pub struct SelectHospitalResponse {
    pub selection: SelectionState,
    pub request_id: Uuid,
}

/// Blank values are rejected; anything else passes through verbatim.
fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} is required")));
    }
    Ok(value)
}

/// `GET /api/selection`
pub async fn current(State(ctx): State<ApiContext>) -> Result<Json<SelectionState>, ApiError> {
    Ok(Json(ctx.core.selection()?))
}

/// `PUT /api/selection/policy`
pub async fn set_policy(
    State(ctx): State<ApiContext>,
    Json(body): Json<PolicyRequest>,
) -> Result<Json<SelectionState>, ApiError> {
    let policy = required(&body.policy, "Policy")?;
    Ok(Json(ctx.core.set_policy(policy)?))
}

/// `PUT /api/selection/specialty`
pub async fn set_specialty(
    State(ctx): State<ApiContext>,
    Json(body): Json<SpecialtyRequest>,
) -> Result<Json<SelectionState>, ApiError> {
    let specialty = required(&body.specialty, "Specialty")?;
    Ok(Json(ctx.core.set_specialty(specialty)?))
}

/// `PUT /api/selection/hover`
pub async fn set_hover(
    State(ctx): State<ApiContext>,
    Json(body): Json<HoverRequest>,
) -> Result<Json<SelectionState>, ApiError> {
    let hovered = body.hospital_id.filter(|id| !id.trim().is_empty());
    Ok(Json(ctx.core.set_hovered(hovered)?))
}

/// `POST /api/selection/hospital`
pub async fn select_hospital(
    State(ctx): State<ApiContext>,
    Json(body): Json<SelectHospitalRequest>,
) -> Result<Json<SelectHospitalResponse>, ApiError> {
    let hospital_id = required(&body.hospital_id, "Hospital id")?;
    let (selection, request_id) = ctx.core.select_hospital(hospital_id)?;
    Ok(Json(SelectHospitalResponse {
        selection,
        request_id,
    }))
}

/// `DELETE /api/selection/hospital`
pub async fn close_hospital(
    State(ctx): State<ApiContext>,
) -> Result<Json<SelectionState>, ApiError> {
    Ok(Json(ctx.core.close_selection()?))
}
