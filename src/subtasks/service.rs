use diesel::prelude::*;
use log::error;

use super::error::SubtasksError;
use super::types::{CreateSubtaskRequest, UpdateSubtaskRequest};
use crate::shared::models::{NewSubtask, Subtask};
use crate::shared::schema::{subtasks, tasks};
use crate::shared::utils::{DbConn, DbPool};

#[derive(AsChangeset)]
#[diesel(table_name = subtasks)]
struct SubtaskChangeset {
    title: Option<String>,
    completed: Option<bool>,
}

pub struct SubtaskService {
    pool: DbPool,
}

impl SubtaskService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<DbConn, SubtasksError> {
        self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            SubtasksError::DatabaseConnection
        })
    }

    pub async fn create_subtask(
        &self,
        request: CreateSubtaskRequest,
    ) -> Result<Subtask, SubtasksError> {
        let mut conn = self.get_conn()?;
        let task_exists: Option<i32> = tasks::table
            .find(request.task_id)
            .select(tasks::id)
            .first(&mut conn)
            .optional()
            .map_err(|e| {
                error!("Failed to check task {}: {e}", request.task_id);
                SubtasksError::DatabaseConnection
            })?;
        if task_exists.is_none() {
            return Err(SubtasksError::Validation(
                "task_id",
                format!("Task {} does not exist", request.task_id),
            ));
        }

        let row = NewSubtask {
            task_id: request.task_id,
            title: request.title,
            completed: request.completed,
        };
        diesel::insert_into(subtasks::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| {
                error!("Failed to create subtask: {e}");
                SubtasksError::CreateFailed
            })
    }

    pub async fn list_subtasks(&self) -> Result<Vec<Subtask>, SubtasksError> {
        let mut conn = self.get_conn()?;
        subtasks::table
            .order(subtasks::id.asc())
            .load(&mut conn)
            .map_err(|e| {
                error!("Failed to list subtasks: {e}");
                SubtasksError::DatabaseConnection
            })
    }

    pub async fn get_subtask(&self, subtask_id: i32) -> Result<Subtask, SubtasksError> {
        let mut conn = self.get_conn()?;
        self.find_subtask(&mut conn, subtask_id)
    }

    pub async fn update_subtask(
        &self,
        subtask_id: i32,
        request: UpdateSubtaskRequest,
    ) -> Result<Subtask, SubtasksError> {
        let mut conn = self.get_conn()?;
        self.find_subtask(&mut conn, subtask_id)?;

        let changeset = SubtaskChangeset {
            title: request.title,
            completed: request.completed,
        };
        if changeset.title.is_some() || changeset.completed.is_some() {
            diesel::update(subtasks::table.find(subtask_id))
                .set(&changeset)
                .execute(&mut conn)
                .map_err(|e| {
                    error!("Failed to update subtask {subtask_id}: {e}");
                    SubtasksError::UpdateFailed
                })?;
        }
        self.find_subtask(&mut conn, subtask_id)
    }

    pub async fn delete_subtask(&self, subtask_id: i32) -> Result<(), SubtasksError> {
        let mut conn = self.get_conn()?;
        self.find_subtask(&mut conn, subtask_id)?;
        diesel::delete(subtasks::table.find(subtask_id))
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to delete subtask {subtask_id}: {e}");
                SubtasksError::DeleteFailed
            })?;
        Ok(())
    }

    fn find_subtask(&self, conn: &mut DbConn, subtask_id: i32) -> Result<Subtask, SubtasksError> {
        subtasks::table
            .find(subtask_id)
            .first::<Subtask>(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get subtask {subtask_id}: {e}");
                SubtasksError::DatabaseConnection
            })?
            .ok_or(SubtasksError::NotFound)
    }
}
