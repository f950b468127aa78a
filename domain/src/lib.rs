//! Domain layer for agentgen
//!
//! This crate contains the specification model and the generation value
//! objects. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Specification
//!
//! A specification is a batch of tool signatures such as
//! `ReadBlogPost(url: str, read_latest_n_posts: int = 3)`, stored in one of
//! three document formats (bare list, `tools:` object, one call per line).
//!
//! - **Parsing**: signature text becomes a [`ToolSpec`]
//! - **Validation**: a whole batch is checked at once into a [`ValidationReport`]
//!
//! ## Generation
//!
//! [`GenerationOptions`] carry the agent name, model and layout. Rendering
//! produces [`RenderedArtifact`]s; writing them is someone else's job.

pub mod config;
pub mod core;
pub mod generation;
pub mod spec;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat};
pub use core::error::DomainError;
pub use generation::{
    ArtifactLayout, DEFAULT_AGENT_NAME, DEFAULT_MODEL, GenerationOptions, GenerationResult,
    RenderedArtifact, TemplateName, TemplateSource,
};
pub use generation::{FileStatus, PlannedFile, WritePlan};
pub use spec::{
    DocumentSyntax, IssueCode, Literal, ParameterSpec, ParseError, Position, Provenance,
    RawSignature, Severity, SpecValidator, SpecificationDocument, SpecificationFormat,
    SpecificationFormatError, ToolSpec, TypeToken, ValidationIssue, ValidationReport,
    parse_signature,
};
