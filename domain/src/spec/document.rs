//! Specification documents and the loader
//!
//! A specification document lists tool signatures in one of three formats.
//! Whatever the format, [`SpecificationDocument::load`] reduces it to the same
//! ordered list of [`RawSignature`]s with provenance, so the parser and the
//! validator never need to know where a signature came from.
//!
//! | Format | Example | Provenance |
//! |--------|---------|------------|
//! | List | `["SearchWeb(query: str)"]` | entry index |
//! | Object | `tools:\n  - "SearchWeb(query: str)"` | entry index |
//! | SourceCall | `SearchWeb(query: str)` one per line | line number |
//!
//! Structured documents (List and Object) are YAML; JSON is read through the
//! same YAML reader.
//!
//! Only problems with the document as a whole fail here. A malformed
//! signature is still returned and reported later by the validator, so one
//! bad line never hides the others.

use super::entities::Provenance;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

/// Fatal problems with the top-level structure of a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecificationFormatError {
    #[error("{document}: document is not valid UTF-8 text")]
    InvalidEncoding { document: String },

    #[error("{document}: invalid YAML/JSON: {message}")]
    Syntax { document: String, message: String },

    #[error("{document}: expected a top-level list of signature strings, found {found}")]
    ExpectedList { document: String, found: &'static str },

    #[error("{document}: expected a mapping with a `tools` key, found {found}")]
    ExpectedObject { document: String, found: &'static str },

    #[error(
        "{document}: missing top-level `tools` key. Expected:\ntools:\n  - \"ToolName(param: type)\""
    )]
    MissingToolsKey { document: String },

    #[error("{document}: `tools` must be a list or mapping of signature strings, found {found}")]
    InvalidToolsValue { document: String, found: &'static str },

    #[error("{document} (entry {index}): expected a signature string, found {found}")]
    NonStringEntry {
        document: String,
        index: usize,
        found: &'static str,
    },
}

/// One signature string as it appeared in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSignature {
    pub text: String,
    pub provenance: Provenance,
}

impl RawSignature {
    pub fn new(text: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            provenance,
        }
    }
}

/// Declared format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecificationFormat {
    List,
    Object,
    SourceCall,
}

impl SpecificationFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificationFormat::List => "list",
            SpecificationFormat::Object => "object",
            SpecificationFormat::SourceCall => "source-call",
        }
    }
}

impl std::fmt::Display for SpecificationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text syntax of a specification file.
///
/// YAML and JSON are structured (List or Object is decided by the shape);
/// Source is the one-call-per-line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSyntax {
    Yaml,
    Json,
    Source,
}

impl DocumentSyntax {
    /// Infer the syntax from a file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yml" | "yaml" => Some(DocumentSyntax::Yaml),
            "json" => Some(DocumentSyntax::Json),
            "py" | "txt" | "sig" => Some(DocumentSyntax::Source),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentSyntax::Yaml => "yml",
            DocumentSyntax::Json => "json",
            DocumentSyntax::Source => "py",
        }
    }

    /// Write a new specification document containing `signatures`.
    ///
    /// Structured syntaxes produce the Object format with a `tools` key.
    pub fn render(&self, signatures: &[String]) -> String {
        match self {
            DocumentSyntax::Yaml => {
                let mut out = String::from("tools:\n");
                for signature in signatures {
                    // A JSON string is a valid double-quoted YAML scalar
                    out.push_str(&format!(
                        "  - {}\n",
                        serde_json::Value::String(signature.clone())
                    ));
                }
                out
            }
            DocumentSyntax::Json => {
                let value = serde_json::json!({ "tools": signatures });
                format!("{:#}\n", value)
            }
            DocumentSyntax::Source => {
                let mut out = String::from("# Tool specifications\n\n");
                for signature in signatures {
                    out.push_str(signature);
                    out.push('\n');
                }
                out
            }
        }
    }
}

/// A specification document tagged with its format.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecificationDocument {
    List { source: String, text: String },
    Object { source: String, text: String },
    SourceCall { source: String, text: String },
}

impl SpecificationDocument {
    pub fn new(
        format: SpecificationFormat,
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let text = text.into();
        match format {
            SpecificationFormat::List => SpecificationDocument::List { source, text },
            SpecificationFormat::Object => SpecificationDocument::Object { source, text },
            SpecificationFormat::SourceCall => SpecificationDocument::SourceCall { source, text },
        }
    }

    /// Build a document from text in a known syntax, or detect it when `None`.
    pub fn parse(
        syntax: Option<DocumentSyntax>,
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, SpecificationFormatError> {
        let source = source.into();
        let text = text.into();
        match syntax {
            Some(DocumentSyntax::Yaml) | Some(DocumentSyntax::Json) => {
                Self::structured(source, text)
            }
            Some(DocumentSyntax::Source) => Ok(SpecificationDocument::SourceCall { source, text }),
            None => Ok(Self::detect(source, text)),
        }
    }

    /// Structured text: a top-level sequence is the List format, a mapping
    /// the Object format.
    pub fn structured(
        source: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, SpecificationFormatError> {
        let source = source.into();
        let text = text.into();
        let value = parse_structured(&source, &text)?;
        match value {
            Value::Sequence(_) => Ok(SpecificationDocument::List { source, text }),
            Value::Mapping(_) => Ok(SpecificationDocument::Object { source, text }),
            other => Err(SpecificationFormatError::ExpectedObject {
                document: source,
                found: value_kind(&other),
            }),
        }
    }

    /// Detect the format of unlabelled text.
    ///
    /// A YAML/JSON sequence, or a mapping with a `tools` key, is structured;
    /// anything else is read as source calls.
    pub fn detect(source: impl Into<String>, text: impl Into<String>) -> Self {
        let source = source.into();
        let text = text.into();
        match serde_yaml::from_str::<Value>(&text) {
            Ok(Value::Sequence(_)) => SpecificationDocument::List { source, text },
            Ok(Value::Mapping(map)) if map.contains_key("tools") => {
                SpecificationDocument::Object { source, text }
            }
            _ => SpecificationDocument::SourceCall { source, text },
        }
    }

    pub fn format(&self) -> SpecificationFormat {
        match self {
            SpecificationDocument::List { .. } => SpecificationFormat::List,
            SpecificationDocument::Object { .. } => SpecificationFormat::Object,
            SpecificationDocument::SourceCall { .. } => SpecificationFormat::SourceCall,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            SpecificationDocument::List { source, .. }
            | SpecificationDocument::Object { source, .. }
            | SpecificationDocument::SourceCall { source, .. } => source,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SpecificationDocument::List { text, .. }
            | SpecificationDocument::Object { text, .. }
            | SpecificationDocument::SourceCall { text, .. } => text,
        }
    }

    /// Reduce the document to its ordered raw signatures.
    pub fn load(&self) -> Result<Vec<RawSignature>, SpecificationFormatError> {
        match self {
            SpecificationDocument::List { source, text } => load_list(source, text),
            SpecificationDocument::Object { source, text } => load_object(source, text),
            SpecificationDocument::SourceCall { source, text } => Ok(load_source_calls(source, text)),
        }
    }
}

fn parse_structured(source: &str, text: &str) -> Result<Value, SpecificationFormatError> {
    serde_yaml::from_str(text).map_err(|e| SpecificationFormatError::Syntax {
        document: source.to_string(),
        message: e.to_string(),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn collect_entries<'a>(
    source: &str,
    values: impl Iterator<Item = &'a Value>,
) -> Result<Vec<RawSignature>, SpecificationFormatError> {
    values
        .enumerate()
        .map(|(i, value)| match value {
            Value::String(text) => Ok(RawSignature::new(text.clone(), Provenance::entry(source, i + 1))),
            other => Err(SpecificationFormatError::NonStringEntry {
                document: source.to_string(),
                index: i + 1,
                found: value_kind(other),
            }),
        })
        .collect()
}

fn load_list(source: &str, text: &str) -> Result<Vec<RawSignature>, SpecificationFormatError> {
    match parse_structured(source, text)? {
        Value::Sequence(items) => collect_entries(source, items.iter()),
        other => Err(SpecificationFormatError::ExpectedList {
            document: source.to_string(),
            found: value_kind(&other),
        }),
    }
}

fn load_object(source: &str, text: &str) -> Result<Vec<RawSignature>, SpecificationFormatError> {
    let value = parse_structured(source, text)?;
    let Value::Mapping(map) = value else {
        return Err(SpecificationFormatError::ExpectedObject {
            document: source.to_string(),
            found: value_kind(&value),
        });
    };
    let Some(tools) = map.get("tools") else {
        return Err(SpecificationFormatError::MissingToolsKey {
            document: source.to_string(),
        });
    };
    match tools {
        Value::Sequence(items) => collect_entries(source, items.iter()),
        Value::Mapping(named) => collect_entries(source, named.values()),
        // `tools:` with nothing under it
        Value::Null => Ok(Vec::new()),
        other => Err(SpecificationFormatError::InvalidToolsValue {
            document: source.to_string(),
            found: value_kind(other),
        }),
    }
}

fn load_source_calls(source: &str, text: &str) -> Vec<RawSignature> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = strip_comment(line).trim();
            let line = line.trim_end_matches([',', ';']).trim_end();
            if line.is_empty() {
                None
            } else {
                Some(RawSignature::new(line, Provenance::line(source, i + 1)))
            }
        })
        .collect()
}

/// Drop a `#` comment that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '#' => return &line[..i],
                _ => {}
            },
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::entities::Position;

    fn texts(signatures: &[RawSignature]) -> Vec<&str> {
        signatures.iter().map(|s| s.text.as_str()).collect()
    }

    // ==================== List format ====================

    #[test]
    fn test_load_yaml_list() {
        let doc = SpecificationDocument::new(
            SpecificationFormat::List,
            "tools.yml",
            "- \"SearchLinkedIn(url: str)\"\n- \"ReadBlogPost(url: str, n: int = 3)\"\n",
        );
        let signatures = doc.load().unwrap();
        assert_eq!(
            texts(&signatures),
            vec!["SearchLinkedIn(url: str)", "ReadBlogPost(url: str, n: int = 3)"]
        );
        assert_eq!(signatures[1].provenance, Provenance::entry("tools.yml", 2));
    }

    #[test]
    fn test_load_json_list() {
        let doc = SpecificationDocument::structured(
            "tools.json",
            r#"["A(x: str)", "B(y: int = 1)"]"#,
        )
        .unwrap();
        assert_eq!(doc.format(), SpecificationFormat::List);
        assert_eq!(texts(&doc.load().unwrap()), vec!["A(x: str)", "B(y: int = 1)"]);
    }

    #[test]
    fn test_list_with_non_string_entry_fails() {
        let doc = SpecificationDocument::new(SpecificationFormat::List, "t.yml", "- \"A()\"\n- 42\n");
        assert_eq!(
            doc.load().unwrap_err(),
            SpecificationFormatError::NonStringEntry {
                document: "t.yml".to_string(),
                index: 2,
                found: "a number",
            }
        );
    }

    #[test]
    fn test_list_format_rejects_mapping() {
        let doc = SpecificationDocument::new(SpecificationFormat::List, "t.yml", "tools: []\n");
        assert!(matches!(
            doc.load(),
            Err(SpecificationFormatError::ExpectedList { .. })
        ));
    }

    // ==================== Object format ====================

    #[test]
    fn test_load_object_with_tools_list() {
        let doc = SpecificationDocument::structured(
            "tools.yml",
            "tools:\n  - \"SearchWeb(query: str)\"\n  - \"ReadFile(path: str)\"\n",
        )
        .unwrap();
        assert_eq!(doc.format(), SpecificationFormat::Object);
        assert_eq!(
            texts(&doc.load().unwrap()),
            vec!["SearchWeb(query: str)", "ReadFile(path: str)"]
        );
    }

    #[test]
    fn test_load_object_with_named_tools_keeps_order() {
        let doc = SpecificationDocument::new(
            SpecificationFormat::Object,
            "tools.yml",
            "tools:\n  zeta: \"Zeta(a: str)\"\n  alpha: \"Alpha(b: int)\"\n",
        );
        assert_eq!(texts(&doc.load().unwrap()), vec!["Zeta(a: str)", "Alpha(b: int)"]);
    }

    #[test]
    fn test_load_json_object() {
        let doc = SpecificationDocument::parse(
            Some(DocumentSyntax::Json),
            "tools.json",
            r#"{"tools": ["A(x: str)"]}"#,
        )
        .unwrap();
        assert_eq!(doc.format(), SpecificationFormat::Object);
        assert_eq!(doc.load().unwrap().len(), 1);
    }

    #[test]
    fn test_object_missing_tools_key() {
        let doc = SpecificationDocument::new(SpecificationFormat::Object, "t.yml", "functions: []\n");
        assert_eq!(
            doc.load().unwrap_err(),
            SpecificationFormatError::MissingToolsKey {
                document: "t.yml".to_string()
            }
        );
    }

    #[test]
    fn test_object_with_scalar_tools_value() {
        let doc = SpecificationDocument::new(SpecificationFormat::Object, "t.yml", "tools: 3\n");
        assert!(matches!(
            doc.load(),
            Err(SpecificationFormatError::InvalidToolsValue { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml_is_syntax_error() {
        let err = SpecificationDocument::structured("t.yml", "tools: [\"A()\"").unwrap_err();
        assert!(matches!(err, SpecificationFormatError::Syntax { .. }));
    }

    #[test]
    fn test_structured_scalar_is_rejected() {
        let err = SpecificationDocument::structured("t.json", "\"A()\"").unwrap_err();
        assert!(matches!(err, SpecificationFormatError::ExpectedObject { .. }));
    }

    // ==================== Source-call format ====================

    #[test]
    fn test_load_source_calls_with_line_numbers() {
        let text = "# Tool specifications\n\nSearchLinkedIn(url: str),\nReadBlogPost(url: str)  # reads posts\n   \nBadTool;\n";
        let doc = SpecificationDocument::new(SpecificationFormat::SourceCall, "tools.py", text);
        let signatures = doc.load().unwrap();
        assert_eq!(
            texts(&signatures),
            vec!["SearchLinkedIn(url: str)", "ReadBlogPost(url: str)", "BadTool"]
        );
        assert_eq!(signatures[0].provenance.position, Position::Line(3));
        assert_eq!(signatures[2].provenance.position, Position::Line(6));
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let doc = SpecificationDocument::new(
            SpecificationFormat::SourceCall,
            "t.py",
            "Tag(label: str = \"#1\")\n",
        );
        assert_eq!(texts(&doc.load().unwrap()), vec!["Tag(label: str = \"#1\")"]);
    }

    // ==================== Detection ====================

    #[test]
    fn test_detect_formats() {
        assert_eq!(
            SpecificationDocument::detect("-", "tools:\n  - \"A()\"\n").format(),
            SpecificationFormat::Object
        );
        assert_eq!(
            SpecificationDocument::detect("-", "[\"A()\"]").format(),
            SpecificationFormat::List
        );
        assert_eq!(
            SpecificationDocument::detect("-", "A(x: int = 3)\nB()\n").format(),
            SpecificationFormat::SourceCall
        );
    }

    #[test]
    fn test_syntax_from_extension() {
        assert_eq!(DocumentSyntax::from_extension("YAML"), Some(DocumentSyntax::Yaml));
        assert_eq!(DocumentSyntax::from_extension("json"), Some(DocumentSyntax::Json));
        assert_eq!(DocumentSyntax::from_extension("py"), Some(DocumentSyntax::Source));
        assert_eq!(DocumentSyntax::from_extension("toml"), None);
    }

    // ==================== Rendering new documents ====================

    #[test]
    fn test_rendered_documents_load_back() {
        let signatures = vec![
            "SearchTool(query: str)".to_string(),
            "Tool2(b: str = \"x\")".to_string(),
        ];
        for syntax in [DocumentSyntax::Yaml, DocumentSyntax::Json, DocumentSyntax::Source] {
            let text = syntax.render(&signatures);
            let doc = SpecificationDocument::parse(Some(syntax), "new", text).unwrap();
            let loaded: Vec<String> = doc.load().unwrap().into_iter().map(|s| s.text).collect();
            assert_eq!(loaded, signatures, "syntax {:?}", syntax);
        }
    }
}
