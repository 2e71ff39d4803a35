use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{NewTransaction, Transaction};
use crate::state::AppState;
use crate::store::queries::transactions;

const NOT_FOUND: &str = "Expense not found";

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Full collection in store order.
pub async fn index(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let snapshot = state.cached_transactions()?;
    debug!(count = snapshot.len(), "Listing expenses");
    Ok(Json((*snapshot).clone()))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    state
        .cached_transactions()?
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn create(
    State(state): State<AppState>,
    Json(new): Json<NewTransaction>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let transaction = transactions::create_transaction(&state.store, new)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(new): Json<NewTransaction>,
) -> AppResult<Json<Transaction>> {
    transactions::update_transaction(&state.store, &id, new)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    if !transactions::delete_transaction(&state.store, &id)? {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    }
    Ok(Json(DeleteResponse {
        message: "Expense deleted",
    }))
}
