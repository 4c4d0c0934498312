//! Ranked hospital list.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::core_state::HospitalListing;
use crate::models::CoverageStatus;

#[derive(Debug, Deserialize)]
pub struct HospitalsQuery {
    /// Optional `CASHLESS` / `REIMBURSEMENT` / `UNAVAILABLE` filter.
    pub status: Option<String>,
}

/// `GET /api/hospitals`: hospitals ranked for the current policy and
/// specialty. The summary always counts the full list, even when a
/// status filter narrows `hospitals`.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<HospitalsQuery>,
) -> Result<Json<HospitalListing>, ApiError> {
    let mut listing = ctx.core.listing()?;

    if let Some(raw) = query.status.as_deref() {
        let status: CoverageStatus = raw.parse()?;
        listing.hospitals.retain(|h| h.status == status);
    }

    Ok(Json(listing))
}
