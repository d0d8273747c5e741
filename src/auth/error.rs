use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[derive(Debug, Clone)]
pub enum AuthError {
    DatabaseConnection,
    Unauthorized,
    InvalidToken,
    InvalidCredentials,
    RegistrationFailed,
    ProfileUpdateFailed,
    Validation(&'static str, String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseConnection => write!(f, "Database connection failed"),
            Self::Unauthorized => write!(f, "Authentication credentials were not provided"),
            Self::InvalidToken => write!(f, "Invalid token"),
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
            Self::RegistrationFailed => write!(f, "Failed to register user"),
            Self::ProfileUpdateFailed => write!(f, "Failed to update profile"),
            Self::Validation(field, msg) => write!(f, "Invalid {field}: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // No field detail on credential failures: a caller cannot use
            // the response to probe which accounts exist.
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "Invalid credentials"})),
            )
                .into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "detail": "Authentication credentials were not provided."
                })),
            )
                .into_response(),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"detail": "Invalid token."})),
            )
                .into_response(),
            Self::Validation(field, msg) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ field: [msg] })),
            )
                .into_response(),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response(),
        }
    }
}
