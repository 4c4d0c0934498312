use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::map::MapView;

/// `GET /api/map`: markers for mappable hospitals plus the active centre.
pub async fn view(State(ctx): State<ApiContext>) -> Result<Json<MapView>, ApiError> {
    Ok(Json(ctx.core.map_view()?))
}
