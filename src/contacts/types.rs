use serde::Deserialize;

pub const DEFAULT_CONTACT_COLOR: &str = "#000000";

fn default_color() -> String {
    DEFAULT_CONTACT_COLOR.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub color: Option<String>,
}
