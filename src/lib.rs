pub mod auth;
pub mod config;
pub mod contacts;
pub mod shared;
pub mod subtasks;
pub mod summary;
pub mod tasks;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use shared::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/tasks/", tasks::routes())
        .nest("/api/contacts/", contacts::routes())
        .nest("/api/subtasks/", subtasks::routes())
        .nest("/api/auth", auth::routes())
        .route("/api/summary/", get(summary::summary_handler))
        .route("/api/board/", get(tasks::board_overview_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
