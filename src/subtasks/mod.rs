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
    fn test_create_request_defaults_completed() {
        let request: CreateSubtaskRequest = serde_json::from_value(json!({
            "task_id": 7,
            "title": "Write docs"
        }))
        .unwrap();
        assert!(!request.completed);
    }

    #[test]
    fn test_create_request_requires_task_id() {
        assert!(
            serde_json::from_value::<CreateSubtaskRequest>(json!({"title": "Write docs"})).is_err()
        );
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let request: UpdateSubtaskRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.title.is_none());
        assert!(request.completed.is_none());
    }

    #[test]
    fn test_subtasks_error_display() {
        assert_eq!(SubtasksError::NotFound.to_string(), "Subtask not found");
        assert_eq!(
            SubtasksError::Validation("task_id", "Task 9 does not exist".to_string()).to_string(),
            "Invalid task_id: Task 9 does not exist"
        );
    }
}
