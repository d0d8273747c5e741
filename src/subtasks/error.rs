use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[derive(Debug, Clone)]
pub enum SubtasksError {
    DatabaseConnection,
    NotFound,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    Validation(&'static str, String),
}

impl std::fmt::Display for SubtasksError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnection => write!(f, "Database connection failed"),
            Self::NotFound => write!(f, "Subtask not found"),
            Self::CreateFailed => write!(f, "Failed to create subtask"),
            Self::UpdateFailed => write!(f, "Failed to update subtask"),
            Self::DeleteFailed => write!(f, "Failed to delete subtask"),
            Self::Validation(field, msg) => write!(f, "Invalid {field}: {msg}"),
        }
    }
}

impl std::error::Error for SubtasksError {}

impl IntoResponse for SubtasksError {
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
