use axum::extract::State;
use axum::response::Json;

use crate::error::{AppError, AppResult};
use crate::models::NewCategory;
use crate::state::AppState;
use crate::store::queries::categories;

pub async fn index(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.cached_categories()?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewCategory>,
) -> AppResult<Json<Vec<String>>> {
    let name = new
        .name()
        .ok_or_else(|| AppError::Validation("Category name is required".into()))?;
    Ok(Json(categories::add_category(&state.store, name)?))
}
