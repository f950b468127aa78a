//! Specification file reader

use agentgen_domain::{DocumentSyntax, SpecificationDocument, SpecificationFormatError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading a specification file
#[derive(Error, Debug)]
pub enum SpecFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] SpecificationFormatError),
}

/// Reads specification documents from disk
pub struct SpecFileReader;

impl SpecFileReader {
    /// Read `path` as a specification document.
    ///
    /// `syntax` overrides the one inferred from the file extension; with
    /// neither, the format is detected from the content. The file name is
    /// recorded as the provenance source of every signature.
    pub fn read(
        path: &Path,
        syntax: Option<DocumentSyntax>,
    ) -> Result<SpecificationDocument, SpecFileError> {
        let bytes = std::fs::read(path).map_err(|source| SpecFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let source = path.display().to_string();
        let text = String::from_utf8(bytes).map_err(|_| {
            SpecificationFormatError::InvalidEncoding {
                document: source.clone(),
            }
        })?;

        let syntax = syntax.or_else(|| Self::infer_syntax(path));
        debug!("Reading {} as {:?}", source, syntax);
        Ok(SpecificationDocument::parse(syntax, source, text)?)
    }

    pub fn infer_syntax(path: &Path) -> Option<DocumentSyntax> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentSyntax::from_extension)
    }
}
