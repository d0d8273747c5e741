//! Aggregate counts over the task board, keyed the way board clients
//! expect them on the wire.

use axum::extract::State;
use axum::Json;
use diesel::prelude::*;
use log::error;
use serde::Serialize;
use std::sync::Arc;

use crate::shared::schema::tasks;
use crate::shared::state::AppState;
use crate::tasks::TasksError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    #[serde(rename = "to-do")]
    pub to_do: i64,
    #[serde(rename = "in-progress")]
    pub in_progress: i64,
    #[serde(rename = "await-feedback")]
    pub await_feedback: i64,
    pub done: i64,
    #[serde(rename = "total-tasks")]
    pub total_tasks: i64,
    pub urgent: i64,
    #[serde(rename = "completed-percentage")]
    pub completed_percentage: f64,
}

/// Tallies (status, priority) pairs into board counts. The completed
/// percentage is done over total, rounded to two decimals, and 0 when
/// there are no tasks.
pub fn summarize(rows: &[(String, String)]) -> TaskSummary {
    let mut summary = TaskSummary {
        to_do: 0,
        in_progress: 0,
        await_feedback: 0,
        done: 0,
        total_tasks: rows.len() as i64,
        urgent: 0,
        completed_percentage: 0.0,
    };

    for (status, priority) in rows {
        match status.as_str() {
            "to-do" => summary.to_do += 1,
            "in-progress" => summary.in_progress += 1,
            "await-feedback" => summary.await_feedback += 1,
            "done" => summary.done += 1,
            _ => {}
        }
        if priority == "urgent" {
            summary.urgent += 1;
        }
    }

    if summary.total_tasks > 0 {
        let pct = summary.done as f64 / summary.total_tasks as f64 * 100.0;
        summary.completed_percentage = (pct * 100.0).round() / 100.0;
    }
    summary
}

pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaskSummary>, TasksError> {
    let mut conn = state.conn.get().map_err(|e| {
        error!("Failed to get database connection: {e}");
        TasksError::DatabaseConnection
    })?;
    let rows: Vec<(String, String)> = tasks::table
        .select((tasks::status, tasks::priority))
        .load(&mut conn)
        .map_err(|e| {
            error!("Failed to load task summary rows: {e}");
            TasksError::DatabaseConnection
        })?;
    Ok(Json(summarize(&rows)))
}
