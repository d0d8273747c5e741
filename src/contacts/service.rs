use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use log::error;

use super::error::ContactsError;
use super::types::{CreateContactRequest, UpdateContactRequest};
use crate::shared::models::{Contact, NewContact};
use crate::shared::schema::{contacts, task_assignments};
use crate::shared::utils::{DbConn, DbPool};

#[derive(AsChangeset)]
#[diesel(table_name = contacts)]
struct ContactChangeset {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    color: Option<String>,
}

impl ContactChangeset {
    fn has_changes(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.phone.is_some() || self.color.is_some()
    }
}

fn map_unique_email(e: DieselError, fallback: ContactsError) -> ContactsError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ContactsError::Validation("email", "Email already exists".to_string())
        }
        other => {
            error!("Contact write failed: {other}");
            fallback
        }
    }
}

pub struct ContactService {
    pool: DbPool,
}

impl ContactService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<DbConn, ContactsError> {
        self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            ContactsError::DatabaseConnection
        })
    }

    pub async fn create_contact(
        &self,
        request: CreateContactRequest,
    ) -> Result<Contact, ContactsError> {
        let mut conn = self.get_conn()?;
        let row = NewContact {
            name: request.name,
            email: request.email,
            phone: request.phone,
            color: request.color,
        };
        diesel::insert_into(contacts::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| map_unique_email(e, ContactsError::CreateFailed))
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ContactsError> {
        let mut conn = self.get_conn()?;
        contacts::table
            .order(contacts::name.asc())
            .load(&mut conn)
            .map_err(|e| {
                error!("Failed to list contacts: {e}");
                ContactsError::DatabaseConnection
            })
    }

    pub async fn get_contact(&self, contact_id: i32) -> Result<Contact, ContactsError> {
        let mut conn = self.get_conn()?;
        self.find_contact(&mut conn, contact_id)
    }

    pub async fn update_contact(
        &self,
        contact_id: i32,
        request: UpdateContactRequest,
    ) -> Result<Contact, ContactsError> {
        let mut conn = self.get_conn()?;
        self.find_contact(&mut conn, contact_id)?;

        let changeset = ContactChangeset {
            name: request.name,
            email: request.email,
            phone: request.phone,
            color: request.color,
        };
        if changeset.has_changes() {
            diesel::update(contacts::table.find(contact_id))
                .set(&changeset)
                .execute(&mut conn)
                .map_err(|e| map_unique_email(e, ContactsError::UpdateFailed))?;
        }
        self.find_contact(&mut conn, contact_id)
    }

    /// Deletes the contact and its task assignments. Tasks themselves
    /// are untouched.
    pub async fn delete_contact(&self, contact_id: i32) -> Result<(), ContactsError> {
        let mut conn = self.get_conn()?;
        self.find_contact(&mut conn, contact_id)?;

        diesel::delete(
            task_assignments::table.filter(task_assignments::contact_id.eq(contact_id)),
        )
        .execute(&mut conn)
        .map_err(|e| {
            error!("Failed to delete assignments of contact {contact_id}: {e}");
            ContactsError::DeleteFailed
        })?;

        diesel::delete(contacts::table.find(contact_id))
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to delete contact {contact_id}: {e}");
                ContactsError::DeleteFailed
            })?;
        Ok(())
    }

    fn find_contact(&self, conn: &mut DbConn, contact_id: i32) -> Result<Contact, ContactsError> {
        contacts::table
            .find(contact_id)
            .first::<Contact>(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get contact {contact_id}: {e}");
                ContactsError::DatabaseConnection
            })?
            .ok_or(ContactsError::NotFound)
    }
}
