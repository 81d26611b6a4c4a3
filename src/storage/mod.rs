use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

const CSS_DIR: &str = "dist/css";
const SASS_DIR: &str = "dist/scss";
const VALUES_DIR: &str = "build";
const CSS_FILE: &str = "styles.css";
const SASS_FILE: &str = "styles.scss";
const VALUES_FILE: &str = "index.ts";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create output directory: {path}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write artifact: {path}")]
    WriteArtifact { path: PathBuf, source: io::Error },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Fixed artifact locations relative to the build scripts root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn css_dir(&self) -> PathBuf {
        self.root.join(CSS_DIR)
    }

    pub fn sass_dir(&self) -> PathBuf {
        self.root.join(SASS_DIR)
    }

    pub fn values_dir(&self) -> PathBuf {
        self.root.join(VALUES_DIR)
    }

    pub fn css_path(&self) -> PathBuf {
        self.css_dir().join(CSS_FILE)
    }

    pub fn sass_path(&self) -> PathBuf {
        self.sass_dir().join(SASS_FILE)
    }

    pub fn values_path(&self) -> PathBuf {
        self.values_dir().join(VALUES_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> StorageResult<()> {
    fs::create_dir_all(path).map_err(|source| StorageError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// A fully written artifact waiting in its target directory to be renamed into place.
#[derive(Debug)]
pub struct StagedArtifact {
    path: PathBuf,
    bytes: usize,
    file: tempfile::NamedTempFile,
}

impl StagedArtifact {
    /// Renames the staged file over the target. Dropping instead discards it.
    pub fn commit(self) -> StorageResult<PathBuf> {
        let Self { path, bytes, file } = self;
        if let Err(err) = file.persist(&path) {
            return Err(StorageError::WriteArtifact {
                path,
                source: err.error,
            });
        }
        tracing::info!(path = %path.display(), bytes, "wrote artifact");
        Ok(path)
    }
}

/// Writes `contents` next to `path` without touching the target.
pub fn stage_artifact(path: &Path, contents: &str) -> StorageResult<StagedArtifact> {
    let write_error = |source| StorageError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
    file.write_all(contents.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    Ok(StagedArtifact {
        path: path.to_path_buf(),
        bytes: contents.len(),
        file,
    })
}

/// Replaces `path` with `contents` in one rename; the target is never left half-written.
pub fn write_artifact(path: &Path, contents: &str) -> StorageResult<()> {
    stage_artifact(path, contents)?.commit()?;
    Ok(())
}

/// Creates the artifact's directory, then writes it.
pub fn write_artifact_in(dir: &Path, path: &Path, contents: &str) -> StorageResult<()> {
    ensure_dir(dir)?;
    write_artifact(path, contents)
}
