//! Database row structs. Field order matches the `table!` declarations in
//! `shared::schema` exactly.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::schema::{
    auth_tokens, boards, contacts, profiles, subtasks, task_assignments, tasks, users,
};

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: String,
    pub status: String,
    pub task_category: Option<String>,
    pub board_category: String,
    pub icon: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub priority: String,
    pub status: String,
    pub task_category: Option<String>,
    pub board_category: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct Subtask {
    pub id: i32,
    pub task_id: i32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = subtasks)]
pub struct NewSubtask {
    pub task_id: i32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub color: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = contacts)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub color: String,
}

#[derive(Debug, Queryable)]
pub struct TaskAssignment {
    pub id: i32,
    pub task_id: i32,
    pub contact_id: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = task_assignments)]
pub struct NewTaskAssignment {
    pub task_id: i32,
    pub contact_id: i32,
}

#[derive(Debug, Clone, Serialize, Queryable)]
pub struct Board {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoard {
    pub name: String,
}

#[derive(Debug, Clone, Queryable)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
pub struct NewProfile {
    pub user_id: i32,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable)]
pub struct AuthToken {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = auth_tokens)]
pub struct NewAuthToken {
    pub user_id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
}
