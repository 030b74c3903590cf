use std::sync::Arc;

use crate::auth::session::SessionService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Store handles are built once in `main` and released there on shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (contacts).
    pub pool: contactbook_db::DbPool,
    /// Registration, login, logout and the token gate.
    pub sessions: Arc<SessionService>,
}
