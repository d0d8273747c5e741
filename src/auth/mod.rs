mod error;
mod handlers;
pub mod policy;
mod service;
mod types;

pub use error::*;
pub use handlers::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::policy::{guest_id_from_query, token_from_header};
    use super::service::{generate_token, hash_password, validate_passwords, verify_password};
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn test_generated_tokens_are_40_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }

    #[test]
    fn test_validate_passwords_mismatch() {
        assert!(validate_passwords("abc", "abc").is_ok());
        match validate_passwords("abc", "abd") {
            Err(AuthError::Validation(field, _)) => assert_eq!(field, "password"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_token_from_header() {
        assert_eq!(
            token_from_header(Some("Token abc123")),
            Some("abc123")
        );
        assert_eq!(token_from_header(Some("Bearer abc123")), None);
        assert_eq!(token_from_header(Some("Token ")), None);
        assert_eq!(token_from_header(None), None);
    }

    #[test]
    fn test_guest_id_from_query() {
        assert_eq!(
            guest_id_from_query(Some("guest_id=abc&x=1")),
            Some("abc".to_string())
        );
        assert_eq!(
            guest_id_from_query(Some("x=1&guest_id=g42")),
            Some("g42".to_string())
        );
        assert_eq!(guest_id_from_query(Some("guest_id=")), None);
        assert_eq!(guest_id_from_query(Some("other=1")), None);
        assert_eq!(guest_id_from_query(None), None);
    }

    #[test]
    fn test_profile_patch_distinguishes_absent_and_null() {
        let absent: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(absent.bio.is_none());
        assert!(absent.location.is_none());

        let cleared: UpdateProfileRequest =
            serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(cleared.bio, Some(None));
        assert!(cleared.location.is_none());

        let set: UpdateProfileRequest =
            serde_json::from_str(r#"{"bio": "rustacean", "location": null}"#).unwrap();
        assert_eq!(set.bio, Some(Some("rustacean".to_string())));
        assert_eq!(set.location, Some(None));
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            AuthError::Validation("email", "Email already exists".to_string()).to_string(),
            "Invalid email: Email already exists"
        );
    }
}
