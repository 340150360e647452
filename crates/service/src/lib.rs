//! Service layer: storage boundary, resource table, generic repository,
//! login and the relational seed.
//! - Handlers depend on [`repository::ResourceRepository`], never on a store.
//! - Per-resource differences are data in [`resources`].

pub mod errors;
pub mod auth;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod resources;
pub mod repository;
pub mod seed;
