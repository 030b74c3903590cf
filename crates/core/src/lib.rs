//! Domain types shared by the database and API crates.
//!
//! - [`types`] -- id and timestamp aliases.
//! - [`error`] -- the domain-level [`error::CoreError`].
//! - [`validation`] -- input rules for credentials and contacts.

pub mod error;
pub mod types;
pub mod validation;
