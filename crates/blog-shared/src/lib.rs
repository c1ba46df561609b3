//! # Blog Shared
//!
//! Render-ready types shared between the server and whatever renders its pages.
//! Field names match the template contexts.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
