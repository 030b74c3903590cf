//! Route definitions for the `/contacts` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::contacts;
use crate::state::AppState;

/// Routes mounted at `/contacts`. All require auth.
///
/// ```text
/// GET    /      -> list_contacts
/// POST   /      -> create_contact
/// PUT    /{id}  -> update_contact
/// DELETE /{id}  -> delete_contact
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/{id}",
            put(contacts::update_contact).delete(contacts::delete_contact),
        )
}
