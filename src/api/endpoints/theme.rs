//! Theme endpoints.
//!
//! - `GET /api/theme`: current theme
//! - `POST /api/theme/toggle`: flip and persist

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Theme;

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub is_dark: bool,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        Self {
            theme,
            is_dark: theme.is_dark(),
        }
    }
}

/// `GET /api/theme`
pub async fn current(State(ctx): State<ApiContext>) -> Json<ThemeResponse> {
    Json(ctx.core.theme().into())
}

/// `POST /api/theme/toggle`
pub async fn toggle(State(ctx): State<ApiContext>) -> Result<Json<ThemeResponse>, ApiError> {
    Ok(Json(ctx.core.toggle_theme()?.into()))
}
