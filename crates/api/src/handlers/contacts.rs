//! Handlers for the `/contacts` resource.
//!
//! Every handler requires [`AuthUser`] and scopes its query to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contactbook_core::error::CoreError;
use contactbook_core::types::DbId;
use contactbook_core::validation::validate_contact_name;
use contactbook_db::models::contact::{Contact, CreateContact, UpdateContact};
use contactbook_db::repositories::ContactRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageData};
use crate::state::AppState;

/// Request body for creating or replacing a contact.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = "contactbook_core::validation::validate_phone"))]
    pub phone: String,
}

/// Payload for `POST /contacts`.
#[derive(Debug, Serialize)]
pub struct CreatedContact {
    pub contact: Contact,
}

impl ContactRequest {
    fn into_parts(self) -> AppResult<(String, String)> {
        validate_contact_name(&self.name)?;
        Ok((self.name.trim().to_string(), self.phone))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contact",
        id,
    })
}

/// POST /contacts
pub async fn create_contact(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<ContactRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedContact>>)> {
    let (name, phone) = input.into_parts()?;
    let create = CreateContact { name, phone };
    let contact = ContactRepo::create(&state.pool, user.user_id, &create).await?;
    tracing::info!(user_id = user.user_id, contact_id = contact.id, "Contact created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(CreatedContact { contact })),
    ))
}

/// GET /contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    let contacts = ContactRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse::new(contacts)))
}

/// PUT /contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<ContactRequest>,
) -> AppResult<Json<DataResponse<Contact>>> {
    let (name, phone) = input.into_parts()?;
    let update = UpdateContact { name, phone };
    let contact = ContactRepo::update(&state.pool, id, user.user_id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse::new(contact)))
}

/// DELETE /contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<MessageData>>> {
    if !ContactRepo::delete(&state.pool, id, user.user_id).await? {
        return Err(not_found(id));
    }
    tracing::info!(user_id = user.user_id, contact_id = id, "Contact deleted");
    Ok(Json(DataResponse::message("Contact deleted successfully.")))
}
