use axum::extract::State;
use axum::response::Json;

use crate::error::{AppError, AppResult};
use crate::models::{NewSettings, Settings};
use crate::state::AppState;
use crate::store::queries::settings;

pub async fn show(State(state): State<AppState>) -> AppResult<Json<Settings>> {
    Ok(Json(state.load_settings()?))
}

pub async fn update(
    State(state): State<AppState>,
    Json(new): Json<NewSettings>,
) -> AppResult<Json<Settings>> {
    let currency = new
        .currency
        .ok_or_else(|| AppError::Validation("Currency is required".into()))?;
    Ok(Json(settings::set_currency(&state.store, currency.trim())?))
}
