//! Repository for the `contacts` table.
//!
//! Every query is scoped by `user_id`; a contact owned by someone else is
//! indistinguishable from one that does not exist.

use contactbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact, UpdateContact};

const COLUMNS: &str = "id, user_id, name, phone, created_at, updated_at";

pub struct ContactRepo;

impl ContactRepo {
    /// Insert a contact owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (user_id, name, phone)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// List a user's contacts, oldest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Contact>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Replace name and phone. Returns `None` if the user owns no such contact.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!(
            "UPDATE contacts SET
                name = $3,
                phone = $4,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a contact. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
