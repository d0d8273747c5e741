use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[derive(Debug, Clone)]
pub enum TasksError {
    DatabaseConnection,
    NotFound,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    Validation(&'static str, String),
}

impl std::fmt::Display for TasksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnection => write!(f, "Database connection failed"),
            Self::NotFound => write!(f, "Task not found"),
            Self::CreateFailed => write!(f, "Failed to create task"),
            Self::UpdateFailed => write!(f, "Failed to update task"),
            Self::DeleteFailed => write!(f, "Failed to delete task"),
            Self::Validation(field, msg) => write!(f, "Invalid {field}: {msg}"),
        }
    }
}

impl std::error::Error for TasksError {}

impl IntoResponse for TasksError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            Self::Validation(field, msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ field: [msg] })),
            )
                .into_response(),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response(),
        }
    }
}
