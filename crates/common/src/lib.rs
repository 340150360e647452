//! Shared building blocks for the rental API crates: response types,
//! logging setup and startup environment checks.

pub mod types;
pub mod utils;
pub mod env;
