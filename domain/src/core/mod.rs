//! Core domain concepts shared across subdomains.
//!
//! - [`error::DomainError`]: invalid project-wide options

pub mod error;
