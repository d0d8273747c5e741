use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::error::ContactsError;
use super::service::ContactService;
use super::types::{CreateContactRequest, UpdateContactRequest};
use crate::shared::models::Contact;
use crate::shared::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_contacts_handler).post(create_contact_handler))
        .route(
            "/:id/",
            get(get_contact_handler)
                .put(update_contact_handler)
                .patch(update_contact_handler)
                .delete(delete_contact_handler),
        )
}

pub async fn list_contacts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ContactsError> {
    let service = ContactService::new(state.conn.clone());
    let contacts = service.list_contacts().await?;
    Ok(Json(contacts))
}

pub async fn create_contact_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Contact>), ContactsError> {
    let service = ContactService::new(state.conn.clone());
    let contact = service.create_contact(request).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get_contact_handler(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<i32>,
) -> Result<Json<Contact>, ContactsError> {
    let service = ContactService::new(state.conn.clone());
    let contact = service.get_contact(contact_id).await?;
    Ok(Json(contact))
}

pub async fn update_contact_handler(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<i32>,
    Json(request): Json<UpdateContactRequest>,
) -> Result<Json<Contact>, ContactsError> {
    let service = ContactService::new(state.conn.clone());
    let contact = service.update_contact(contact_id, request).await?;
    Ok(Json(contact))
}

pub async fn delete_contact_handler(
    State(state): State<Arc<AppState>>,
    Path(contact_id): Path<i32>,
) -> Result<StatusCode, ContactsError> {
    let service = ContactService::new(state.conn.clone());
    service.delete_contact(contact_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
