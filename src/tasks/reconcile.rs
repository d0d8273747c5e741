//! Converges a task's persisted contact-assignment set and subtask list to
//! match a request payload.
//!
//! Assignment semantics: a missing `contact_ids` key leaves the assignment
//! set untouched on update (and means zero assignments on create); an empty
//! list clears it; a non-empty list replaces it. Subtasks are a full
//! replacement, never a merge: a non-empty `subtasks` list deletes every
//! existing subtask before inserting the new ones, so subtask ids are not
//! stable across updates.

use diesel::prelude::*;
use log::warn;

use super::error::TasksError;
use super::types::{SubtaskDescriptor, SubtaskSpec};
use crate::shared::models::{NewSubtask, NewTaskAssignment};
use crate::shared::schema::{contacts, subtasks, task_assignments};

/// Target assignment set for a request. `None` means the field was absent
/// and the existing set stays as it is; `Some` is the set to converge to,
/// de-duplicated with first-occurrence order kept.
pub fn assignment_target(requested: Option<Vec<i32>>) -> Option<Vec<i32>> {
    requested.map(|ids| {
        let mut seen = std::collections::HashSet::new();
        ids.into_iter().filter(|id| seen.insert(*id)).collect()
    })
}

/// Normalized replacement list for a request's `subtasks` field. An absent
/// or empty list never triggers replacement.
pub fn subtask_replacement(
    descriptors: Option<Vec<SubtaskDescriptor>>,
) -> Option<Vec<SubtaskSpec>> {
    match descriptors {
        Some(list) if !list.is_empty() => {
            Some(list.into_iter().map(SubtaskDescriptor::into_spec).collect())
        }
        _ => None,
    }
}

pub struct AssignmentReconciler;

impl AssignmentReconciler {
    /// Checks that every id names an existing contact. Unknown ids are a
    /// validation error rather than a silent drop. Runs before any row is
    /// written so a rejected request leaves the store untouched.
    pub fn validate_contacts(conn: &mut PgConnection, ids: &[i32]) -> Result<(), TasksError> {
        if ids.is_empty() {
            return Ok(());
        }
        let known: Vec<i32> = contacts::table
            .filter(contacts::id.eq_any(ids))
            .select(contacts::id)
            .load(conn)
            .map_err(|e| {
                log::error!("Failed to resolve contact ids: {e}");
                TasksError::DatabaseConnection
            })?;
        let missing: Vec<i32> = ids
            .iter()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(TasksError::Validation(
                "contact_ids",
                format!("Unknown contact ids: {missing:?}"),
            ));
        }
        Ok(())
    }

    /// Replaces the task's assignment rows with `target`. `target` must
    /// already have passed [`Self::validate_contacts`].
    pub fn apply_assignments(
        conn: &mut PgConnection,
        task_id: i32,
        target: &[i32],
    ) -> Result<(), TasksError> {
        diesel::delete(task_assignments::table.filter(task_assignments::task_id.eq(task_id)))
            .execute(conn)
            .map_err(|e| {
                log::error!("Failed to clear assignments for task {task_id}: {e}");
                TasksError::UpdateFailed
            })?;

        let rows: Vec<NewTaskAssignment> = target
            .iter()
            .map(|&contact_id| NewTaskAssignment {
                task_id,
                contact_id,
            })
            .collect();
        if !rows.is_empty() {
            diesel::insert_into(task_assignments::table)
                .values(&rows)
                .execute(conn)
                .map_err(|e| {
                    log::error!("Failed to assign contacts to task {task_id}: {e}");
                    TasksError::UpdateFailed
                })?;
        }
        Ok(())
    }

    /// Deletes all existing subtasks of the task and creates one per spec,
    /// in input order. A spec whose insert fails is skipped and logged;
    /// the rest of the batch is still applied.
    pub fn replace_subtasks(
        conn: &mut PgConnection,
        task_id: i32,
        specs: &[SubtaskSpec],
    ) -> Result<(), TasksError> {
        diesel::delete(subtasks::table.filter(subtasks::task_id.eq(task_id)))
            .execute(conn)
            .map_err(|e| {
                log::error!("Failed to delete subtasks of task {task_id}: {e}");
                TasksError::UpdateFailed
            })?;

        for spec in specs {
            let row = NewSubtask {
                task_id,
                title: spec.title.clone(),
                completed: spec.completed,
            };
            if let Err(e) = diesel::insert_into(subtasks::table)
                .values(&row)
                .execute(conn)
            {
                warn!(
                    "Skipping subtask {:?} of task {task_id}: {e}",
                    spec.title
                );
            }
        }
        Ok(())
    }
}
