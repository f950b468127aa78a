//! Artifact writer
//!
//! Compares rendered artifacts with what is already on disk and writes the
//! ones that differ. Rendering is deterministic, so an unchanged file means
//! the same inputs produced it.

use agentgen_domain::{FileStatus, PlannedFile, RenderedArtifact, WritePlan};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while writing artifacts
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Output directory '{}' is not empty. Use --force to overwrite.", .0.display())]
    NotEmpty(PathBuf),

    #[error("Output path '{}' exists and is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct ArtifactWriter {
    output_dir: PathBuf,
    force: bool,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            force: false,
        }
    }

    /// Allow writing into a non-empty directory (builder pattern)
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Compare artifacts with the files on disk without writing anything.
    pub fn plan(&self, artifacts: &[RenderedArtifact]) -> Result<WritePlan, WriteError> {
        let target_not_empty = self.target_not_empty()?;
        let files = artifacts
            .iter()
            .map(|artifact| {
                let path = self.output_dir.join(&artifact.relative_path);
                let status = match std::fs::read(&path) {
                    Ok(existing) if existing == artifact.content.as_bytes() => FileStatus::Unchanged,
                    Ok(_) => FileStatus::Changed,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileStatus::New,
                    Err(source) => return Err(WriteError::Io { path, source }),
                };
                Ok(PlannedFile {
                    relative_path: artifact.relative_path.clone(),
                    path,
                    status,
                    bytes: artifact.content.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WritePlan {
            output_dir: self.output_dir.clone(),
            files,
            target_not_empty,
        })
    }

    /// Write every new or changed artifact, creating directories as needed.
    ///
    /// Refuses a non-empty output directory unless forced.
    pub fn write(&self, artifacts: &[RenderedArtifact]) -> Result<WritePlan, WriteError> {
        let plan = self.plan(artifacts)?;
        if plan.target_not_empty && !self.force {
            return Err(WriteError::NotEmpty(self.output_dir.clone()));
        }

        for (artifact, file) in artifacts.iter().zip(&plan.files) {
            if file.status == FileStatus::Unchanged {
                debug!("Unchanged: {}", file.path.display());
                continue;
            }
            if let Some(parent) = file.path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(&file.path, &artifact.content).map_err(|source| WriteError::Io {
                path: file.path.clone(),
                source,
            })?;
            debug!("Wrote {} ({})", file.path.display(), file.status.as_str());
        }

        info!(
            "Wrote {} file(s) to {}",
            plan.pending().count(),
            self.output_dir.display()
        );
        Ok(plan)
    }

    fn target_not_empty(&self) -> Result<bool, WriteError> {
        if !self.output_dir.exists() {
            return Ok(false);
        }
        if !self.output_dir.is_dir() {
            return Err(WriteError::NotADirectory(self.output_dir.clone()));
        }
        let mut entries = std::fs::read_dir(&self.output_dir).map_err(|source| WriteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        Ok(entries.next().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn artifacts() -> Vec<RenderedArtifact> {
        vec![
            RenderedArtifact::new("tools/search.py", "class SearchTool: ...\n"),
            RenderedArtifact::new("agent.py", "main()\n"),
        ]
    }

    #[test]
    fn test_write_creates_tools_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("agent");
        let plan = ArtifactWriter::new(&out).write(&artifacts()).unwrap();

        assert_eq!(plan.count(FileStatus::New), 2);
        assert_eq!(
            fs::read_to_string(out.join("tools/search.py")).unwrap(),
            "class SearchTool: ...\n"
        );
        assert!(out.join("agent.py").is_file());
    }

    #[test]
    fn test_non_empty_directory_requires_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        let err = ArtifactWriter::new(dir.path()).write(&artifacts()).unwrap_err();
        assert!(matches!(err, WriteError::NotEmpty(_)));
        assert!(!dir.path().join("agent.py").exists());

        ArtifactWriter::new(dir.path())
            .with_force(true)
            .write(&artifacts())
            .unwrap();
        assert!(dir.path().join("agent.py").exists());
        assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_plan_reports_changes_without_writing() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path()).with_force(true);
        writer.write(&artifacts()).unwrap();

        let mut next = artifacts();
        next[1].content = "main(stream=True)\n".to_string();
        next.push(RenderedArtifact::new("README.md", "# Agent\n"));

        let plan = writer.plan(&next).unwrap();
        let statuses: Vec<_> = plan.files.iter().map(|f| f.status).collect();
        assert_eq!(
            statuses,
            vec![FileStatus::Unchanged, FileStatus::Changed, FileStatus::New]
        );
        assert!(plan.target_not_empty);
        let pending: Vec<_> = plan.pending().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(pending, vec!["agent.py", "README.md"]);
        assert_eq!(fs::read_to_string(dir.path().join("agent.py")).unwrap(), "main()\n");
    }

    #[test]
    fn test_output_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("agent.py");
        fs::write(&file, "").unwrap();
        let err = ArtifactWriter::new(&file).plan(&artifacts()).unwrap_err();
        assert!(matches!(err, WriteError::NotADirectory(_)));
    }
}
