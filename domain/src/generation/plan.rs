//! Write plans
//!
//! The outcome of comparing rendered artifacts with an output directory.

use serde::Serialize;
use std::path::PathBuf;

/// What writing an artifact would do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    New,
    Changed,
    Unchanged,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::New => "new",
            FileStatus::Changed => "changed",
            FileStatus::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub relative_path: String,
    pub path: PathBuf,
    pub status: FileStatus,
    pub bytes: usize,
}

/// Per-file outcome of writing (or previewing) a set of artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WritePlan {
    pub output_dir: PathBuf,
    pub files: Vec<PlannedFile>,
    /// The directory already has entries, so writing needs `--force`
    pub target_not_empty: bool,
}

impl WritePlan {
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Files a write would touch
    pub fn pending(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.status != FileStatus::Unchanged)
    }
}
