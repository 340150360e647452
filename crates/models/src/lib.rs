//! Relational view of the rental entities, used by the seed tool.
//!
//! Field names serialize in camelCase so the same JSON documents the server
//! keeps on disk deserialize straight into these models.

pub mod errors;
pub mod db;
pub mod user;
pub mod host;
pub mod property;
pub mod amenity;
pub mod booking;
pub mod review;
