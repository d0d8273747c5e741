mod error;
mod handlers;
pub mod reconcile;
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
    fn test_task_status_display() {
        assert_eq!(TaskStatus::ToDo.to_string(), "to-do");
        assert_eq!(TaskStatus::InProgress.to_string(), "in-progress");
        assert_eq!(TaskStatus::AwaitFeedback.to_string(), "await-feedback");
        assert_eq!(TaskStatus::Done.to_string(), "done");
    }

    #[test]
    fn test_task_status_default() {
        assert_eq!(TaskStatus::default(), TaskStatus::ToDo);
    }

    #[test]
    fn test_task_priority_wire_values() {
        assert_eq!(
            serde_json::to_value(TaskPriority::Urgent).unwrap(),
            json!("urgent")
        );
        let parsed: TaskPriority = serde_json::from_value(json!("low")).unwrap();
        assert_eq!(parsed, TaskPriority::Low);
        assert!(serde_json::from_value::<TaskPriority>(json!("critical")).is_err());
    }

    #[test]
    fn test_task_category_wire_values() {
        assert_eq!(
            serde_json::to_value(TaskCategory::TechnicalTask).unwrap(),
            json!("Technical Task")
        );
        let parsed: TaskCategory = serde_json::from_value(json!("User Story")).unwrap();
        assert_eq!(parsed, TaskCategory::UserStory);
    }

    #[test]
    fn test_subtask_descriptor_bare_string() {
        let descriptor: SubtaskDescriptor = serde_json::from_value(json!("Write docs")).unwrap();
        let spec = descriptor.into_spec();
        assert_eq!(spec.title, "Write docs");
        assert!(!spec.completed);
    }

    #[test]
    fn test_subtask_descriptor_object_defaults_completed() {
        let descriptor: SubtaskDescriptor =
            serde_json::from_value(json!({"title": "Review"})).unwrap();
        assert_eq!(descriptor.into_spec().completed, false);

        let descriptor: SubtaskDescriptor =
            serde_json::from_value(json!({"title": "Review", "completed": true})).unwrap();
        assert!(descriptor.into_spec().completed);
    }

    #[test]
    fn test_subtask_descriptor_rejects_missing_title() {
        assert!(serde_json::from_value::<SubtaskDescriptor>(json!({"completed": true})).is_err());
    }

    #[test]
    fn test_create_request_distinguishes_absent_and_empty_contact_ids() {
        let absent: CreateTaskRequest = serde_json::from_value(json!({
            "title": "T1",
            "due_date": "2025-01-01",
            "priority": "urgent"
        }))
        .unwrap();
        assert!(absent.contact_ids.is_none());

        let empty: CreateTaskRequest = serde_json::from_value(json!({
            "title": "T1",
            "due_date": "2025-01-01",
            "priority": "urgent",
            "contact_ids": []
        }))
        .unwrap();
        assert_eq!(empty.contact_ids, Some(vec![]));
    }

    #[test]
    fn test_create_request_rejects_non_numeric_contact_ids() {
        let result = serde_json::from_value::<CreateTaskRequest>(json!({
            "title": "T1",
            "due_date": "2025-01-01",
            "priority": "urgent",
            "contact_ids": ["abc"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_all_fields_optional() {
        let request: UpdateTaskRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.title.is_none());
        assert!(request.contact_ids.is_none());
        assert!(request.subtasks.is_none());
    }

    #[test]
    fn test_board_response_wire_shape() {
        let value = serde_json::to_value(BoardResponse { board: vec![] }).unwrap();
        assert_eq!(value, json!({"board": []}));
    }

    #[test]
    fn test_tasks_error_display() {
        assert_eq!(TasksError::NotFound.to_string(), "Task not found");
        assert_eq!(TasksError::CreateFailed.to_string(), "Failed to create task");
    }
}
