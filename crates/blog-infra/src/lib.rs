//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM
//!
//! Without `postgres` only the in-memory store is available.

pub mod database;

pub use database::{BlogRepositories, DatabaseConfig, InMemoryBlogStore};
