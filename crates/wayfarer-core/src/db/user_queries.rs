//! User account queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{id_at, timestamp_at};
use crate::{
    error::{DatabaseResultExt, LookupResultExt, Result, TravelError},
    models::{ProfileChanges, User},
};

const USER_COLUMNS: &str =
    "id, email, name, photo_url, language_preference, created_at, updated_at";
const INSERT_USER_SQL: &str = "INSERT INTO users (email, password_hash, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const EMAIL_TAKEN_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)";
const UPDATE_PROFILE_SQL: &str = "UPDATE users SET name = COALESCE(?1, name), photo_url = COALESCE(?2, photo_url), language_preference = COALESCE(?3, language_preference), updated_at = ?4 WHERE id = ?5";
const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = ?1";

impl super::Database {
    fn build_user_from_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: id_at(row, 0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            photo_url: row.get(3)?,
            language_preference: row.get(4)?,
            created_at: timestamp_at(row, 5)?,
            updated_at: timestamp_at(row, 6)?,
        })
    }

    /// Creates an account. The password must already be hashed.
    ///
    /// # Errors
    ///
    /// `TravelError::Conflict` when the email is already registered.
    pub fn create_user(&mut self, email: &str, password_hash: &str, name: &str) -> Result<User> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let taken: bool = tx
            .query_row(EMAIL_TAKEN_SQL, params![email], |row| row.get(0))
            .db_context("Failed to check email")?;
        if taken {
            return Err(TravelError::Conflict("Email already registered".to_string()));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_USER_SQL,
            params![email, password_hash, name, &now_str, &now_str],
        )
        .db_context("Failed to insert user")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            photo_url: None,
            language_preference: "en".to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Looks a user up by email, returning the stored password hash with it.
    pub fn find_credentials(&self, email: &str) -> Result<Option<(User, String)>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ?1");
        self.connection
            .query_row(&sql, params![email], |row| {
                Ok((Self::build_user_from_row(row)?, row.get::<_, String>(7)?))
            })
            .optional()
            .db_context("Failed to query user credentials")
    }

    pub fn get_user(&self, user_id: u64) -> Result<User> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        self.connection
            .query_row(&sql, params![user_id as i64], Self::build_user_from_row)
            .or_not_found("User", user_id, "Failed to query user")
    }

    /// Applies a partial profile update and returns the stored result.
    pub fn update_profile(&mut self, user_id: u64, changes: &ProfileChanges) -> Result<User> {
        let updated = self
            .connection
            .execute(
                UPDATE_PROFILE_SQL,
                params![
                    changes.name.as_deref(),
                    changes.photo_url.as_deref(),
                    changes.language_preference.as_deref(),
                    Timestamp::now().to_string(),
                    user_id as i64
                ],
            )
            .db_context("Failed to update profile")?;
        if updated == 0 {
            return Err(TravelError::not_found("User", user_id));
        }
        self.get_user(user_id)
    }

    /// Deletes an account together with its trips and saved destinations.
    pub fn delete_user(&mut self, user_id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_USER_SQL, params![user_id as i64])
            .db_context("Failed to delete user")?;
        if deleted == 0 {
            return Err(TravelError::not_found("User", user_id));
        }
        Ok(())
    }
}
