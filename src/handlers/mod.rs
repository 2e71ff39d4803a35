pub mod categories;
pub mod expenses;
pub mod reports;
pub mod settings;
pub mod transactions;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Expense CRUD
        .route("/api/expenses", get(expenses::index).post(expenses::create))
        .route(
            "/api/expenses/:id",
            get(expenses::show)
                .put(expenses::update)
                .delete(expenses::delete),
        )
        // Derived views
        .route("/api/transactions", get(transactions::index))
        .route("/api/reports", get(reports::index))
        // Catalogue and preferences
        .route(
            "/api/categories",
            get(categories::index).post(categories::create),
        )
        .route("/api/settings", get(settings::show).post(settings::update))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
