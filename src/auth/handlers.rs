use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::error::AuthError;
use super::policy::AuthUser;
use super::service::AuthService;
use super::types::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
};
use crate::shared::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/registration/", post(register_handler))
        .route("/login/", post(login_handler))
        .route(
            "/profile/",
            get(get_profile_handler).patch(update_profile_handler),
        )
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AuthError> {
    let service = AuthService::new(state.conn.clone());
    let response = service.register(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let service = AuthService::new(state.conn.clone());
    let response = service.login(&request.email, &request.password).await?;
    Ok(Json(response))
}

pub async fn get_profile_handler(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProfileResponse>, AuthError> {
    let service = AuthService::new(state.conn.clone());
    let profile = service.get_profile(user.id).await?;
    Ok(Json(profile))
}

pub async fn update_profile_handler(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AuthError> {
    let service = AuthService::new(state.conn.clone());
    let profile = service.update_profile(user.id, request).await?;
    Ok(Json(profile))
}
