//! Authentication core: credentials, session tokens and revocation.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token issuing, decoding and fingerprinting.
//! - [`verifier`] -- the per-request token gate (signature, expiry, revocation).
//! - [`credentials`] -- the durable user store behind registration and login.
//! - [`revocation`] -- the negative list of logged-out tokens.
//! - [`session`] -- register / login / logout orchestration.

pub mod credentials;
pub mod error;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;
pub mod verifier;

pub use error::AuthError;
