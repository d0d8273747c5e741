use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub repeated_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: i32,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub location: Option<String>,
}

/// Patch payload for the profile. The outer `Option` distinguishes an
/// absent key (leave the field) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "patch_field")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub location: Option<Option<String>>,
}

fn patch_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
