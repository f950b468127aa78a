//! Tool specification module
//!
//! Everything between a user's specification file and a validated list of
//! [`ToolSpec`]s:
//!
//! ```text
//! ┌──────────────────────┐   load   ┌──────────────┐  validate  ┌──────────────────┐
//! │ SpecificationDocument│─────────▶│ RawSignature │───────────▶│ ValidationReport │
//! │ List/Object/Source   │          │ + Provenance │  (parse)   │ issues + tools   │
//! └──────────────────────┘          └──────────────┘            └──────────────────┘
//! ```
//!
//! - [`registry`]: closed set of parameter types and their default grammars
//! - [`literal`]: default-value literals in Python syntax
//! - [`parser`]: one signature string → [`ToolSpec`]
//! - [`document`]: the three document formats and the loader
//! - [`validation`]: two-pass, collect-all validation
//!
//! All of it is pure: no I/O, no shared state.

pub mod document;
pub mod entities;
pub mod literal;
pub mod parser;
pub mod registry;
pub mod validation;

pub use document::{
    DocumentSyntax, RawSignature, SpecificationDocument, SpecificationFormat,
    SpecificationFormatError,
};
pub use entities::{ParameterSpec, Position, Provenance, ToolSpec};
pub use literal::{Literal, LiteralKind};
pub use parser::{EXPECTED_FORMAT, ParseError, parse_signature};
pub use registry::{LiteralGrammar, TypeToken, UnknownType};
pub use validation::{IssueCode, Severity, SpecValidator, ValidationIssue, ValidationReport};
