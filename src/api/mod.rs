mod handlers;
pub mod page;
mod web;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::config::LauncherConfig;
use crate::dispatch::SessionDispatcher;

use handlers::*;

/// Query value marking a redirect that follows a failed session.
pub const ALERT_FAILED: &str = "failed";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<SessionDispatcher>,
    pub config: Arc<LauncherConfig>,
}

impl AppState {
    pub fn new(dispatcher: SessionDispatcher, config: LauncherConfig) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/launch", post(launch))
        .route("/health", get(health))
        .route("/static/{*path}", get(web::web_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
