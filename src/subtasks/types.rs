use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubtaskRequest {
    pub task_id: i32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSubtaskRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}
