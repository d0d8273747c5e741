#[cfg(test)]
mod store_invariants_tests {
    use chrono::NaiveDate;
    use diesel::prelude::*;
    use diesel::r2d2::{ConnectionManager, Pool};
    use std::collections::HashSet;

    use boardserver::contacts::{ContactService, CreateContactRequest};
    use boardserver::shared::schema::tasks;
    use boardserver::shared::utils::DbPool;
    use boardserver::tasks::{
        CreateTaskRequest, SubtaskDescriptor, TaskPriority, TaskService, TasksError,
        UpdateTaskRequest,
    };

    // Session-local tables shadow any permanent ones with the same name
    // and vanish with the connection, so each test gets an isolated
    // store. max_size 1 keeps every query on that one session.
    fn test_pool() -> Option<DbPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let manager = ConnectionManager::<PgConnection>::new(url);
        let pool = Pool::builder().max_size(1).build(manager).ok()?;
        {
            let mut conn = pool.get().ok()?;
            let ddl = [
                "CREATE TEMPORARY TABLE tasks (
                    id SERIAL PRIMARY KEY,
                    title VARCHAR NOT NULL,
                    description TEXT,
                    due_date DATE NOT NULL,
                    priority VARCHAR NOT NULL,
                    status VARCHAR NOT NULL,
                    task_category VARCHAR,
                    board_category VARCHAR NOT NULL,
                    icon VARCHAR
                )",
                "CREATE TEMPORARY TABLE subtasks (
                    id SERIAL PRIMARY KEY,
                    task_id INTEGER NOT NULL,
                    title VARCHAR NOT NULL,
                    completed BOOLEAN NOT NULL
                )",
                "CREATE TEMPORARY TABLE contacts (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR NOT NULL,
                    email VARCHAR NOT NULL UNIQUE,
                    phone VARCHAR NOT NULL,
                    color VARCHAR NOT NULL
                )",
                "CREATE TEMPORARY TABLE task_assignments (
                    id SERIAL PRIMARY KEY,
                    task_id INTEGER NOT NULL,
                    contact_id INTEGER NOT NULL
                )",
            ];
            for statement in ddl {
                diesel::sql_query(statement).execute(&mut conn).ok()?;
            }
        }
        Some(pool)
    }

    async fn make_contact(pool: &DbPool, email: &str) -> i32 {
        let service = ContactService::new(pool.clone());
        service
            .create_contact(CreateContactRequest {
                name: "Ada Lovelace".to_string(),
                email: email.to_string(),
                phone: "+44 123".to_string(),
                color: "#000000".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn task_request(
        contact_ids: Option<Vec<i32>>,
        subtasks: Option<Vec<SubtaskDescriptor>>,
    ) -> CreateTaskRequest {
        CreateTaskRequest {
            title: "T1".to_string(),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            priority: TaskPriority::Urgent,
            status: None,
            task_category: None,
            board_category: None,
            icon: None,
            contact_ids,
            subtasks,
        }
    }

    fn count_tasks(pool: &DbPool) -> i64 {
        let mut conn = pool.get().unwrap();
        tasks::table.count().get_result(&mut conn).unwrap()
    }

    #[tokio::test]
    async fn created_task_assignment_count_equals_requested() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let c1 = make_contact(&pool, "c1@example.com").await;
        let c2 = make_contact(&pool, "c2@example.com").await;

        let service = TaskService::new(pool.clone());
        let task = service
            .create_task(task_request(Some(vec![c1, c2]), None))
            .await
            .unwrap();
        assert_eq!(task.assigned_members.len(), 2);
    }

    #[tokio::test]
    async fn rejected_create_persists_no_task() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let service = TaskService::new(pool.clone());
        let result = service
            .create_task(task_request(Some(vec![9999]), None))
            .await;
        match result {
            Err(TasksError::Validation(field, _)) => assert_eq!(field, "contact_ids"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(count_tasks(&pool), 0);
    }

    #[tokio::test]
    async fn rejected_update_changes_nothing() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let c1 = make_contact(&pool, "c1@example.com").await;
        let service = TaskService::new(pool.clone());
        let task = service
            .create_task(task_request(Some(vec![c1]), None))
            .await
            .unwrap();

        let result = service
            .update_task(
                task.id,
                UpdateTaskRequest {
                    title: Some("renamed".to_string()),
                    contact_ids: Some(vec![9999]),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(TasksError::Validation("contact_ids", _))));

        let reloaded = service.get_task(task.id).await.unwrap();
        assert_eq!(reloaded.title, "T1");
        assert_eq!(reloaded.assigned_members.len(), 1);
    }

    #[tokio::test]
    async fn update_without_contact_ids_leaves_assignments() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let c1 = make_contact(&pool, "c1@example.com").await;
        let service = TaskService::new(pool.clone());
        let task = service
            .create_task(task_request(Some(vec![c1]), None))
            .await
            .unwrap();

        let updated = service
            .update_task(
                task.id,
                UpdateTaskRequest {
                    title: Some("renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.assigned_members.len(), 1);
    }

    #[tokio::test]
    async fn subtask_replacement_never_reuses_ids() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let service = TaskService::new(pool.clone());
        let task = service
            .create_task(task_request(
                None,
                Some(vec![
                    SubtaskDescriptor::Title("a".to_string()),
                    SubtaskDescriptor::Title("b".to_string()),
                ]),
            ))
            .await
            .unwrap();
        let before: HashSet<i32> = task.task_components.iter().map(|s| s.id).collect();
        assert_eq!(before.len(), 2);

        let replacement = || UpdateTaskRequest {
            subtasks: Some(vec![
                SubtaskDescriptor::Title("c".to_string()),
                SubtaskDescriptor::Title("d".to_string()),
                SubtaskDescriptor::Title("e".to_string()),
            ]),
            ..Default::default()
        };

        let first = service.update_task(task.id, replacement()).await.unwrap();
        let first_ids: HashSet<i32> = first.task_components.iter().map(|s| s.id).collect();
        assert_eq!(first_ids.len(), 3);
        assert!(first_ids.is_disjoint(&before));

        // Applying the same list again keeps the count but mints new rows.
        let second = service.update_task(task.id, replacement()).await.unwrap();
        let second_ids: HashSet<i32> = second.task_components.iter().map(|s| s.id).collect();
        assert_eq!(second_ids.len(), 3);
        assert!(second_ids.is_disjoint(&first_ids));
    }

    #[tokio::test]
    async fn deleting_task_removes_subtasks_and_assignments() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let c1 = make_contact(&pool, "c1@example.com").await;
        let service = TaskService::new(pool.clone());
        let task = service
            .create_task(task_request(
                Some(vec![c1]),
                Some(vec![
                    SubtaskDescriptor::Title("a".to_string()),
                    SubtaskDescriptor::Title("b".to_string()),
                    SubtaskDescriptor::Title("c".to_string()),
                ]),
            ))
            .await
            .unwrap();
        service.delete_task(task.id).await.unwrap();

        let mut conn = pool.get().unwrap();
        let remaining_subtasks: i64 = boardserver::shared::schema::subtasks::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        let remaining_assignments: i64 = boardserver::shared::schema::task_assignments::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(remaining_subtasks, 0);
        assert_eq!(remaining_assignments, 0);
    }

    #[tokio::test]
    async fn deleting_contact_removes_only_the_association() {
        let Some(pool) = test_pool() else {
            println!("Skipping test - TEST_DATABASE_URL not available");
            return;
        };
        let c1 = make_contact(&pool, "c1@example.com").await;
        let task_service = TaskService::new(pool.clone());
        let task = task_service
            .create_task(task_request(Some(vec![c1]), None))
            .await
            .unwrap();

        let contact_service = ContactService::new(pool.clone());
        contact_service.delete_contact(c1).await.unwrap();

        let reloaded = task_service.get_task(task.id).await.unwrap();
        assert!(reloaded.assigned_members.is_empty());
    }
}
