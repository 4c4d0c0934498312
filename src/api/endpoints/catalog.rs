use axum::Json;

use crate::catalog::Catalog;

/// `GET /api/catalog`: insurer and specialty options.
pub async fn options() -> Json<Catalog> {
    Json(Catalog::load())
}
