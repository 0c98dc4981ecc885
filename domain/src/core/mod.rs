//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: a completion model identifier and its declared strength
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers (log previews, degenerate-output detection)

pub mod error;
pub mod model;
pub mod string;
