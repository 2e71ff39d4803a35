use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::cache_invalidation_middleware;
use crate::config::Config;
use crate::error_log::{error_log_middleware, fallback_handler};
use crate::handlers;
use crate::state::AppState;

/// Assemble the router and middleware stack around an existing state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cache_invalidation_middleware,
        ))
        .layer(middleware::from_fn(error_log_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the application state and Axum router from a [`Config`].
///
/// Opens (creating if needed) the data directory and assembles the full
/// middleware stack. Returns the shared state and a ready-to-serve router.
pub fn build_app(config: &Config) -> Result<(AppState, Router), Box<dyn std::error::Error>> {
    let state = AppState::new(config)?;
    tracing::info!(
        data_dir = %state.store.root().display(),
        "Using data directory"
    );

    let app = build_router(state.clone());
    Ok((state, app))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(
    app: Router,
    host: &str,
    port: u16,
) -> Result<(u16, JoinHandle<()>), Box<dyn std::error::Error>> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {e}");
        }
    });

    Ok((actual_port, handle))
}
