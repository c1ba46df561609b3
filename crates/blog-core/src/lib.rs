//! # Blog Core
//!
//! The domain layer of the blog.
//! Entities, repository ports and the aggregation service live here; this crate
//! has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::Aggregator;
