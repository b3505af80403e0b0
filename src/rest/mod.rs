use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::configuration::{SheetLayout, JSON_BODY_LIMIT};
use crate::sheets::SheetsApi;

mod handlers;
mod models;

use handlers::{health, list_cases, not_found, save_location, update_cases};

#[derive(Clone)]
pub struct AppState<S: SheetsApi> {
    pub sheets: S,
    pub layout: SheetLayout,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: SheetsApi + Clone + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::<S>))
        .route("/api/cases", get(list_cases::<S>).put(update_cases::<S>))
        .route("/api/location", post(save_location::<S>))
        .fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve<S: SheetsApi + Clone + 'static>(
    addr: SocketAddr,
    sheets: S,
    layout: SheetLayout,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(AppState {
        sheets,
        layout,
        started_at: std::time::SystemTime::now(),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
