use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::error::TasksError;
use super::service::TaskService;
use super::types::{
    BoardResponse, CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest,
};
use crate::auth::policy::{AuthUser, Caller};
use crate::shared::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/:id/",
            get(get_task_handler)
                .put(update_task_handler)
                .patch(update_task_handler)
                .delete(delete_task_handler),
        )
}

pub async fn list_tasks_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskResponse>>, TasksError> {
    let service = TaskService::new(state.conn.clone());
    let tasks = service.list_tasks(query).await?;
    Ok(Json(tasks))
}

pub async fn create_task_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), TasksError> {
    let service = TaskService::new(state.conn.clone());
    let task = service.create_task(request).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_task_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Json<TaskResponse>, TasksError> {
    let service = TaskService::new(state.conn.clone());
    let task = service.get_task(task_id).await?;
    Ok(Json(task))
}

pub async fn update_task_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, TasksError> {
    let service = TaskService::new(state.conn.clone());
    let task = service.update_task(task_id, request).await?;
    Ok(Json(task))
}

pub async fn delete_task_handler(
    _caller: Caller,
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<StatusCode, TasksError> {
    let service = TaskService::new(state.conn.clone());
    service.delete_task(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn board_overview_handler(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<BoardResponse>, TasksError> {
    let service = TaskService::new(state.conn.clone());
    let board = service.board_overview().await?;
    Ok(Json(board))
}
