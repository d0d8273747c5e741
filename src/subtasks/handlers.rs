use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::error::SubtasksError;
use super::service::SubtaskService;
use super::types::{CreateSubtaskRequest, UpdateSubtaskRequest};
use crate::auth::policy::Caller;
use crate::shared::models::Subtask;
use crate::shared::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_subtasks_handler).post(create_subtask_handler))
        .route(
            "/:id/",
            get(get_subtask_handler)
                .put(update_subtask_handler)
                .patch(update_subtask_handler)
                .delete(delete_subtask_handler),
        )
}

pub async fn list_subtasks_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Subtask>>, SubtasksError> {
    let service = SubtaskService::new(state.conn.clone());
    let subtasks = service.list_subtasks().await?;
    Ok(Json(subtasks))
}

pub async fn create_subtask_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSubtaskRequest>,
) -> Result<(StatusCode, Json<Subtask>), SubtasksError> {
    let service = SubtaskService::new(state.conn.clone());
    let subtask = service.create_subtask(request).await?;
    Ok((StatusCode::CREATED, Json(subtask)))
}

pub async fn get_subtask_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(subtask_id): Path<i32>,
) -> Result<Json<Subtask>, SubtasksError> {
    let service = SubtaskService::new(state.conn.clone());
    let subtask = service.get_subtask(subtask_id).await?;
    Ok(Json(subtask))
}

pub async fn update_subtask_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(subtask_id): Path<i32>,
    Json(request): Json<UpdateSubtaskRequest>,
) -> Result<Json<Subtask>, SubtasksError> {
    let service = SubtaskService::new(state.conn.clone());
    let subtask = service.update_subtask(subtask_id, request).await?;
    Ok(Json(subtask))
}

pub async fn delete_subtask_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(subtask_id): Path<i32>,
) -> Result<StatusCode, SubtasksError> {
    let service = SubtaskService::new(state.conn.clone());
    service.delete_subtask(subtask_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
