//! Contact entity model and DTOs.

use contactbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contacts` table. Every contact belongs to one user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a contact. The owner comes from the authenticated user.
#[derive(Debug, Deserialize)]
pub struct CreateContact {
    pub name: String,
    pub phone: String,
}

/// DTO for replacing a contact's editable fields.
#[derive(Debug, Deserialize)]
pub struct UpdateContact {
    pub name: String,
    pub phone: String,
}
