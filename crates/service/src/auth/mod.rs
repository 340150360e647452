//! Auth module: domain types, errors and the login service.
//!
//! Credentials are checked against the plaintext `password` stored on user
//! records; a successful login yields a signed, time-limited token. No route
//! requires that token.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::{AuthConfig, AuthService};
