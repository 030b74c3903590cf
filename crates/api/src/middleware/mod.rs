//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Verifies the Bearer token and yields the caller's identity.
//! - [`auth::BearerToken`] -- The raw Bearer token, unverified.

pub mod auth;
