//! Route tables, one module per resource.

use axum::Router;

use crate::state::AppState;

pub mod contacts;
pub mod health;
pub mod users;

/// All resource routes, mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/contacts", contacts::router())
}
