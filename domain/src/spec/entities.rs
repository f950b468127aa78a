//! Tool specification entities
//!
//! [`ToolSpec`] and [`ParameterSpec`] are immutable value objects built by the
//! signature parser. Normalization never mutates: it returns a new spec.

use super::literal::Literal;
use super::registry::TypeToken;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a raw signature inside its source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// 1-based entry index (list and object formats)
    Entry(usize),
    /// 1-based line number (source-call format)
    Line(usize),
}

/// Where a piece of input came from, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    /// File name, or `<input>` for in-memory documents
    pub source: String,
    pub position: Position,
}

impl Provenance {
    pub const INLINE_SOURCE: &'static str = "<input>";

    pub fn entry(source: impl Into<String>, index: usize) -> Self {
        Self {
            source: source.into(),
            position: Position::Entry(index),
        }
    }

    pub fn line(source: impl Into<String>, line: usize) -> Self {
        Self {
            source: source.into(),
            position: Position::Line(line),
        }
    }

    /// Provenance for a signature that was not read from a document.
    pub fn inline(index: usize) -> Self {
        Self::entry(Self::INLINE_SOURCE, index)
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Position::Entry(index) => write!(f, "{} (entry {})", self.source, index),
            Position::Line(line) => write!(f, "{}:{}", self.source, line),
        }
    }
}

/// One parameter of a tool.
///
/// A parameter is required exactly when it has no default.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    name: String,
    type_token: TypeToken,
    default: Option<Literal>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, type_token: TypeToken) -> Self {
        Self {
            name: name.into(),
            type_token,
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, type_token: TypeToken, default: Literal) -> Self {
        Self {
            name: name.into(),
            type_token,
            default: Some(default),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_token(&self) -> TypeToken {
        self.type_token
    }

    pub fn default(&self) -> Option<&Literal> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Display for ParameterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_token)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// Structured form of one tool signature.
///
/// `Display` renders the canonical signature string, which re-parses to an
/// equal spec.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    name: String,
    parameters: Vec<ParameterSpec>,
    provenance: Provenance,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        provenance: Provenance,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            provenance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// True when no required parameter follows a defaulted one.
    pub fn is_calling_convention_ordered(&self) -> bool {
        let mut seen_default = false;
        for param in &self.parameters {
            if param.is_required() && seen_default {
                return false;
            }
            seen_default |= !param.is_required();
        }
        true
    }

    /// Copy of this spec with required parameters first.
    ///
    /// The partition is stable: relative order inside each group is kept.
    pub fn normalized(&self) -> ToolSpec {
        let (required, defaulted): (Vec<_>, Vec<_>) = self
            .parameters
            .iter()
            .cloned()
            .partition(ParameterSpec::is_required);
        ToolSpec {
            name: self.name.clone(),
            parameters: required.into_iter().chain(defaulted).collect(),
            provenance: self.provenance.clone(),
        }
    }

    /// Class name of the generated tool (`SearchLinkedIn` → `SearchLinkedInTool`).
    pub fn class_name(&self) -> String {
        format!("{}Tool", self.name)
    }

    /// Module (file stem) of the generated tool, also its registered tool name.
    pub fn module_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Description derived from the name (`ReadBlogPost` → `read blog post`).
    pub fn generated_description(&self) -> String {
        split_words(&self.name).join(" ").to_lowercase()
    }
}

impl fmt::Display for ToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

/// Split a PascalCase / camelCase / snake_case name into words.
///
/// A capital starts a new word; digits stay attached to the preceding word.
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// True for a valid identifier: letter or `_` first, then letters, digits, `_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// True for `PascalCase`: ASCII uppercase first, then ASCII letters and digits.
pub fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(params: Vec<ParameterSpec>) -> ToolSpec {
        ToolSpec::new("ReadBlogPost", params, Provenance::inline(1))
    }

    #[test]
    fn test_required_matches_absent_default() {
        let required = ParameterSpec::required("url", TypeToken::String);
        let optional = ParameterSpec::with_default("n", TypeToken::Integer, Literal::Int(3));
        assert!(required.is_required());
        assert!(!optional.is_required());
        assert_eq!(optional.default(), Some(&Literal::Int(3)));
    }

    #[test]
    fn test_display_signature() {
        let spec = tool(vec![
            ParameterSpec::required("url", TypeToken::String),
            ParameterSpec::with_default("read_latest_n_posts", TypeToken::Integer, Literal::Int(3)),
        ]);
        assert_eq!(
            spec.to_string(),
            "ReadBlogPost(url: str, read_latest_n_posts: int = 3)"
        );
    }

    #[test]
    fn test_normalized_moves_required_first_stably() {
        let spec = tool(vec![
            ParameterSpec::with_default("a", TypeToken::Integer, Literal::Int(1)),
            ParameterSpec::required("b", TypeToken::String),
            ParameterSpec::with_default("c", TypeToken::Boolean, Literal::Bool(false)),
            ParameterSpec::required("d", TypeToken::Any),
        ]);
        assert!(!spec.is_calling_convention_ordered());

        let normalized = spec.normalized();
        let names: Vec<_> = normalized.parameters().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
        assert!(normalized.is_calling_convention_ordered());
        // Original untouched
        assert_eq!(spec.parameters()[0].name(), "a");
    }

    #[test]
    fn test_derived_names() {
        let spec = tool(vec![]);
        assert_eq!(spec.class_name(), "ReadBlogPostTool");
        assert_eq!(spec.module_name(), "readblogpost");
        assert_eq!(spec.generated_description(), "read blog post");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("SearchLinkedIn"), vec!["Search", "Linked", "In"]);
        assert_eq!(split_words("Fetch2Pages"), vec!["Fetch2", "Pages"]);
        assert_eq!(split_words("read_file"), vec!["read", "file"]);
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("url"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("n2"));
        assert!(!is_identifier("2n"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));

        assert!(is_pascal_case("SearchLinkedIn"));
        assert!(!is_pascal_case("search_linkedin"));
        assert!(!is_pascal_case("Search_LinkedIn"));
    }

    #[test]
    fn test_provenance_display() {
        assert_eq!(Provenance::entry("tools.yml", 2).to_string(), "tools.yml (entry 2)");
        assert_eq!(Provenance::line("tools.py", 7).to_string(), "tools.py:7");
    }
}
