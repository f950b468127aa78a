//! Infrastructure layer for agentgen
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and file I/O.

pub mod config;
pub mod spec_file;
pub mod templates;
pub mod writer;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileGenerationConfig, FileOutputConfig};
pub use spec_file::{SpecFileError, SpecFileReader};
pub use templates::{TemplateOrigin, TemplateResolver, TeraTemplateRenderer};
pub use writer::{ArtifactWriter, WriteError};
