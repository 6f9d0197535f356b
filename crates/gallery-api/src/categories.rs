use axum::{Json, extract::State};

use gallery_types::api::CategoriesResponse;

use crate::error::AppResult;
use crate::projection;
use crate::state::{AppState, with_db};

/// GET /templates/categories: every category with its direct parent.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let rows = with_db(&state, |s| s.db.list_categories()).await?;

    Ok(Json(CategoriesResponse {
        categories: rows.into_iter().map(projection::category).collect(),
    }))
}
