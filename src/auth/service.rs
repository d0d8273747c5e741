use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::result::Error as DieselError;
use log::error;
use rand::RngCore;

use super::error::AuthError;
use super::types::{AuthResponse, ProfileResponse, RegisterRequest, UpdateProfileRequest};
use crate::shared::models::{NewAuthToken, NewProfile, NewUser, Profile, User};
use crate::shared::schema::{auth_tokens, profiles, users};
use crate::shared::utils::{DbConn, DbPool};

// Double-Option per nullable column: outer None skips the column,
// Some(None) writes NULL, Some(Some) writes the value.
#[derive(AsChangeset)]
#[diesel(table_name = profiles)]
struct ProfileChangeset {
    bio: Option<Option<String>>,
    location: Option<Option<String>>,
}

pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Failed to hash password: {e}");
            AuthError::RegistrationFailed
        })
}

pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Opaque 40-hex-char API key, the same shape the tokens table stores.
pub(crate) fn generate_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub(crate) fn validate_passwords(password: &str, repeated: &str) -> Result<(), AuthError> {
    if password != repeated {
        return Err(AuthError::Validation(
            "password",
            "Passwords do not match".to_string(),
        ));
    }
    Ok(())
}

pub struct AuthService {
    pool: DbPool,
}

impl AuthService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> Result<DbConn, AuthError> {
        self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            AuthError::DatabaseConnection
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthError> {
        validate_passwords(&request.password, &request.repeated_password)?;

        let mut conn = self.get_conn()?;
        let existing: Option<i32> = users::table
            .filter(users::email.eq(&request.email))
            .select(users::id)
            .first(&mut conn)
            .optional()
            .map_err(|e| {
                error!("Failed to check email uniqueness: {e}");
                AuthError::DatabaseConnection
            })?;
        if existing.is_some() {
            return Err(AuthError::Validation(
                "email",
                "Email already exists".to_string(),
            ));
        }

        let row = NewUser {
            email: request.email,
            username: request.username,
            password_hash: hash_password(&request.password)?,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now(),
        };
        let user: User = diesel::insert_into(users::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    AuthError::Validation("email", "Email already exists".to_string())
                }
                other => {
                    error!("Failed to create user: {other}");
                    AuthError::RegistrationFailed
                }
            })?;

        let profile = NewProfile {
            user_id: user.id,
            bio: None,
            location: None,
            created_at: Utc::now(),
        };
        diesel::insert_into(profiles::table)
            .values(&profile)
            .execute(&mut conn)
            .map_err(|e| {
                error!("Failed to create profile for user {}: {e}", user.id);
                AuthError::RegistrationFailed
            })?;

        let token = self.get_or_create_token(&mut conn, user.id)?;
        Ok(AuthResponse {
            token,
            user_id: user.id,
            email: user.email,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let mut conn = self.get_conn()?;
        let user: Option<User> = users::table
            .filter(users::email.eq(email))
            .first(&mut conn)
            .optional()
            .map_err(|e| {
                error!("Failed to look up user: {e}");
                AuthError::DatabaseConnection
            })?;

        // Same error for unknown email and wrong password.
        let user = user.ok_or(AuthError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.get_or_create_token(&mut conn, user.id)?;
        Ok(AuthResponse {
            token,
            user_id: user.id,
            email: user.email,
        })
    }

    pub fn user_for_token(&self, key: &str) -> Result<User, AuthError> {
        let mut conn = self.get_conn()?;
        auth_tokens::table
            .inner_join(users::table)
            .filter(auth_tokens::token.eq(key))
            .select(users::all_columns)
            .first::<User>(&mut conn)
            .optional()
            .map_err(|e| {
                error!("Failed to resolve token: {e}");
                AuthError::DatabaseConnection
            })?
            .ok_or(AuthError::InvalidToken)
    }

    pub async fn get_profile(&self, user_id: i32) -> Result<ProfileResponse, AuthError> {
        let mut conn = self.get_conn()?;
        let user = self.find_user(&mut conn, user_id)?;
        let profile = self.get_or_create_profile(&mut conn, user_id)?;
        Ok(ProfileResponse {
            user: user.id,
            username: user.username,
            email: user.email,
            bio: profile.bio,
            location: profile.location,
        })
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, AuthError> {
        let mut conn = self.get_conn()?;
        self.get_or_create_profile(&mut conn, user_id)?;

        let changeset = ProfileChangeset {
            bio: request.bio,
            location: request.location,
        };
        if changeset.bio.is_some() || changeset.location.is_some() {
            diesel::update(profiles::table.filter(profiles::user_id.eq(user_id)))
                .set(&changeset)
                .execute(&mut conn)
                .map_err(|e| {
                    error!("Failed to update profile of user {user_id}: {e}");
                    AuthError::ProfileUpdateFailed
                })?;
        }

        let user = self.find_user(&mut conn, user_id)?;
        let profile = self.get_or_create_profile(&mut conn, user_id)?;
        Ok(ProfileResponse {
            user: user.id,
            username: user.username,
            email: user.email,
            bio: profile.bio,
            location: profile.location,
        })
    }

    fn find_user(&self, conn: &mut DbConn, user_id: i32) -> Result<User, AuthError> {
        users::table
            .find(user_id)
            .first::<User>(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get user {user_id}: {e}");
                AuthError::DatabaseConnection
            })?
            .ok_or(AuthError::Unauthorized)
    }

    fn get_or_create_profile(
        &self,
        conn: &mut DbConn,
        user_id: i32,
    ) -> Result<Profile, AuthError> {
        let existing: Option<Profile> = profiles::table
            .filter(profiles::user_id.eq(user_id))
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get profile of user {user_id}: {e}");
                AuthError::DatabaseConnection
            })?;
        if let Some(profile) = existing {
            return Ok(profile);
        }
        let row = NewProfile {
            user_id,
            bio: None,
            location: None,
            created_at: Utc::now(),
        };
        diesel::insert_into(profiles::table)
            .values(&row)
            .get_result(conn)
            .map_err(|e| {
                error!("Failed to create profile for user {user_id}: {e}");
                AuthError::ProfileUpdateFailed
            })
    }

    fn get_or_create_token(&self, conn: &mut DbConn, user_id: i32) -> Result<String, AuthError> {
        let existing: Option<String> = auth_tokens::table
            .filter(auth_tokens::user_id.eq(user_id))
            .select(auth_tokens::token)
            .first(conn)
            .optional()
            .map_err(|e| {
                error!("Failed to get token of user {user_id}: {e}");
                AuthError::DatabaseConnection
            })?;
        if let Some(token) = existing {
            return Ok(token);
        }
        let row = NewAuthToken {
            user_id,
            token: generate_token(),
            created_at: Utc::now(),
        };
        diesel::insert_into(auth_tokens::table)
            .values(&row)
            .get_result::<crate::shared::models::AuthToken>(conn)
            .map(|t| t.token)
            .map_err(|e| {
                error!("Failed to create token for user {user_id}: {e}");
                AuthError::DatabaseConnection
            })
    }
}
