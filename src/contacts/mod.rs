mod error;
mod handlers;
mod service;
mod types;

pub use error::*;
pub use handlers::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_defaults_color() {
        let request: CreateContactRequest = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 123"
        }))
        .unwrap();
        assert_eq!(request.color, DEFAULT_CONTACT_COLOR);
    }

    #[test]
    fn test_create_request_keeps_explicit_color() {
        let request: CreateContactRequest = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 123",
            "color": "#ff7a00"
        }))
        .unwrap();
        assert_eq!(request.color, "#ff7a00");
    }

    #[test]
    fn test_create_request_requires_core_fields() {
        assert!(serde_json::from_value::<CreateContactRequest>(json!({
            "name": "Ada Lovelace"
        }))
        .is_err());
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let request: UpdateContactRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.name.is_none());
        assert!(request.color.is_none());
    }

    #[test]
    fn test_contacts_error_display() {
        assert_eq!(ContactsError::NotFound.to_string(), "Contact not found");
        assert_eq!(
            ContactsError::Validation("email", "Email already exists".to_string()).to_string(),
            "Invalid email: Email already exists"
        );
    }
}
