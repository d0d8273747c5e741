use diesel::prelude::*;
use log::error;

use super::error::TasksError;
use super::reconcile::{assignment_target, subtask_replacement, AssignmentReconciler};
use super::types::{
    BoardResponse, CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest,
    DEFAULT_TASK_ICON,
};
use crate::shared::models::{Contact, NewTask, Subtask, Task};
use crate::shared::schema::{contacts, subtasks, task_assignments, tasks};
use crate::shared::utils::{DbConn, DbPool};

#[derive(AsChangeset)]
#[diesel(table_name = tasks)]
struct TaskChangeset {
    title: Option<String>,
    description: Option<String>,
    due_date: Option<chrono::NaiveDate>,
    priority: Option<String>,
    status: Option<String>,
    task_category: Option<String>,
    board_category: Option<String>,
    icon: Option<String>,
}

impl TaskChangeset {
    fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.due_date.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.task_category.is_some()
            || self.board_category.is_some()
            || self.icon.is_some()
    }
}

pub struct TaskService {
    pool: DbPool,
}

impl TaskService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<DbConn, TasksError> {
        self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            TasksError::DatabaseConnection
        })
    }

    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<TaskResponse, TasksError> {
        let mut conn = self.get_conn()?;

        // On create an absent or empty field both mean zero assignments.
        // Validated up front so a rejected request creates no task row.
        let target = assignment_target(request.contact_ids).unwrap_or_default();
        AssignmentReconciler::validate_contacts(&mut conn, &target)?;

        let row = NewTask {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority.to_string(),
            status: request.status.unwrap_or_default().to_string(),
            task_category: request.task_category.map(|c| c.to_string()),
            board_category: request.board_category.unwrap_or_default().to_string(),
            icon: Some(
                request
                    .icon
                    .unwrap_or_else(|| DEFAULT_TASK_ICON.to_string()),
            ),
        };
        let task: Task = diesel::insert_into(tasks::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| {
                error!("Failed to create task: {e}");
                TasksError::CreateFailed
            })?;

        AssignmentReconciler::apply_assignments(&mut conn, task.id, &target)?;
        if let Some(specs) = subtask_replacement(request.subtasks) {
            AssignmentReconciler::replace_subtasks(&mut conn, task.id, &specs)?;
        }

        self.load_response(&mut conn, task)
    }

    pub async fn list_tasks(&self, query: TaskListQuery) -> Result<Vec<TaskResponse>, TasksError> {
        let mut conn = self.get_conn()?;

        let mut stmt = tasks::table.into_boxed();
        if let Some(category) = query.board_category {
            stmt = stmt.filter(tasks::board_category.eq(category));
        }
        let rows: Vec<Task> = stmt.order(tasks::id.asc()).load(&mut conn).map_err(|e| {
            error!("Failed to list tasks: {e}");
            TasksError::DatabaseConnection
        })?;

        rows.into_iter()
            .map(|task| self.load_response(&mut conn, task))
            .collect()
    }

    pub async fn get_task(&self, task_id: i32) -> Result<TaskResponse, TasksError> {
        let mut conn = self.get_conn()?;
        let task = self.find_task(&mut conn, task_id)?;
        self.load_response(&mut conn, task)
    }

    pub async fn update_task(
        &self,
        task_id: i32,
        request: UpdateTaskRequest,
    ) -> Result<TaskResponse, TasksError> {
        let mut conn = self.get_conn()?;
        self.find_task(&mut conn, task_id)?;

        // Absent field: leave the assignment set alone. Present (even
        // empty): converge to exactly the requested set. Validated before
        // the changeset runs so a rejected request changes nothing.
        let target = assignment_target(request.contact_ids);
        if let Some(target) = &target {
            AssignmentReconciler::validate_contacts(&mut conn, target)?;
        }

        let changeset = TaskChangeset {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority.map(|p| p.to_string()),
            status: request.status.map(|s| s.to_string()),
            task_category: request.task_category.map(|c| c.to_string()),
            board_category: request.board_category.map(|c| c.to_string()),
            icon: request.icon,
        };
        if changeset.has_changes() {
            diesel::update(tasks::table.find(task_id))
                .set(&changeset)
                .execute(&mut conn)
                .map_err(|e| {
                    error!("Failed to update task {task_id}: {e}");
                    TasksError::UpdateFailed
                })?;
        }

        if let Some(target) = target {
            AssignmentReconciler::apply_assignments(&mut conn, task_id, &target)?;
        }
        if let Some(specs) = subtask_replacement(request.subtasks) {
            AssignmentReconciler::replace_subtasks(&mut conn, task_id, &specs)?;
        }

        let task = self.find_task(&mut conn, task_id)?;
        self.load_response(&mut conn, task)
    }

    pub async fn delete_task(&self, task_id: i32) -> Result<(), TasksError> {
        let mut conn = self.get_conn()?;
        self.find_task(&mut conn, task_id)?;

        diesel::delete(task_assignments::table.filter(task_assignments::task_id.eq(task_id)))
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to delete assignments of task {task_id}: {e}");
                TasksError::DeleteFailed
            })?;
        diesel::delete(subtasks::table.filter(subtasks::task_id.eq(task_id)))
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to delete subtasks of task {task_id}: {e}");
                TasksError::DeleteFailed
            })?;
        diesel::delete(tasks::table.find(task_id))
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to delete task {task_id}: {e}");
                TasksError::DeleteFailed
            })?;
        Ok(())
    }

    pub async fn board_overview(&self) -> Result<BoardResponse, TasksError> {
        let mut conn = self.get_conn()?;
        let board: Vec<Task> = tasks::table
            .order(tasks::id.asc())
            .load(&mut conn)
            .map_err(|e| {
                error!("Failed to load board overview: {e}");
                TasksError::DatabaseConnection
            })?;
        Ok(BoardResponse { board })
    }

    fn find_task(&self, conn: &mut DbConn, task_id: i32) -> Result<Task, TasksError> {
        tasks::table
            .find(task_id)
            .first::<Task>(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get task {task_id}: {e}");
                TasksError::DatabaseConnection
            })?
            .ok_or(TasksError::NotFound)
    }

    fn load_response(&self, conn: &mut DbConn, task: Task) -> Result<TaskResponse, TasksError> {
        let assigned: Vec<Contact> = task_assignments::table
            .inner_join(contacts::table)
            .filter(task_assignments::task_id.eq(task.id))
            .select(contacts::all_columns)
            .load(conn)
            .map_err(|e| {
                error!("Failed to load assignments of task {}: {e}", task.id);
                TasksError::DatabaseConnection
            })?;
        let components: Vec<Subtask> = subtasks::table
            .filter(subtasks::task_id.eq(task.id))
            .order(subtasks::id.asc())
            .load(conn)
            .map_err(|e| {
                error!("Failed to load subtasks of task {}: {e}", task.id);
                TasksError::DatabaseConnection
            })?;
        Ok(TaskResponse::from_parts(task, assigned, components))
    }
}
