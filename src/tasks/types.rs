use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::models::{Contact, Subtask, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ToDo => write!(f, "to-do"),
            Self::InProgress => write!(f, "in-progress"),
            Self::AwaitFeedback => write!(f, "await-feedback"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::ToDo
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    Urgent,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "Technical Task")]
    TechnicalTask,
    #[serde(rename = "User Story")]
    UserStory,
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TechnicalTask => write!(f, "Technical Task"),
            Self::UserStory => write!(f, "User Story"),
        }
    }
}

/// A requested subtask. Either a bare title or an object form; `completed`
/// defaults to false when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubtaskDescriptor {
    Title(String),
    Detailed {
        title: String,
        #[serde(default)]
        completed: bool,
    },
}

impl SubtaskDescriptor {
    pub fn into_spec(self) -> SubtaskSpec {
        match self {
            Self::Title(title) => SubtaskSpec {
                title,
                completed: false,
            },
            Self::Detailed { title, completed } => SubtaskSpec { title, completed },
        }
    }
}

/// Normalized form of a [`SubtaskDescriptor`], ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskSpec {
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub task_category: Option<TaskCategory>,
    #[serde(default)]
    pub board_category: Option<TaskStatus>,
    pub icon: Option<String>,
    #[serde(default)]
    pub contact_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub subtasks: Option<Vec<SubtaskDescriptor>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub task_category: Option<TaskCategory>,
    pub board_category: Option<TaskStatus>,
    pub icon: Option<String>,
    #[serde(default)]
    pub contact_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub subtasks: Option<Vec<SubtaskDescriptor>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskListQuery {
    pub board_category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: String,
    pub status: String,
    pub task_category: Option<String>,
    pub board_category: String,
    pub icon: Option<String>,
    pub assigned_members: Vec<Contact>,
    pub task_components: Vec<Subtask>,
}

impl TaskResponse {
    pub fn from_parts(task: Task, assigned: Vec<Contact>, components: Vec<Subtask>) -> Self {
        TaskResponse {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
            task_category: task.task_category,
            board_category: task.board_category,
            icon: task.icon,
            assigned_members: assigned,
            task_components: components,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardResponse {
    pub board: Vec<Task>,
}

pub const DEFAULT_TASK_ICON: &str = "/static/default.svg";
