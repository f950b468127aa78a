//! Use cases (application services)

pub mod create_spec;
pub mod generate_project;
pub mod validate_spec;
