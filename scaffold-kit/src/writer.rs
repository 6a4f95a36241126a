//! Idempotent file emission
//!
//! An output that already exists is never read, truncated or rewritten;
//! regenerating is always safe for hand-edited files.

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// What happened to one output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written
    Created(PathBuf),
    /// The file already existed and was left untouched
    Skipped(PathBuf),
}

impl WriteOutcome {
    /// Target path
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Skipped(path) => path,
        }
    }

    /// Whether the file was written by this call
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "Creating {}", path.display()),
            Self::Skipped(path) => write!(f, "Skipping {}: already exists", path.display()),
        }
    }
}

/// Report a skip for an output that is already on disk
pub(crate) fn skip(path: &Path) -> WriteOutcome {
    let outcome = WriteOutcome::Skipped(path.to_path_buf());
    tracing::info!(path = %path.display(), "output exists, skipping");
    println!("{outcome}");
    outcome
}

/// Write `content` to `path` unless the file already exists
///
/// Missing ancestor directories are created first. The existence check and
/// the write are not atomic as a pair; a file that appears in between is
/// reported as skipped rather than overwritten.
///
/// # Errors
///
/// Returns [`ScaffoldError::Filesystem`] if a directory cannot be created or
/// the file cannot be written.
pub fn write_if_absent(path: &Path, content: &str) -> Result<WriteOutcome> {
    if path.exists() {
        return Ok(skip(path));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::filesystem(parent, e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(skip(path)),
        Err(e) => return Err(ScaffoldError::filesystem(path, e)),
    };

    let outcome = WriteOutcome::Created(path.to_path_buf());
    println!("{outcome}");

    if let Err(e) = file.write_all(content.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        // The file was created by this call, so nothing hand-edited is lost
        discard_partial(path);
        return Err(ScaffoldError::filesystem(path, e));
    }

    tracing::info!(path = %path.display(), bytes = content.len(), "created output");
    Ok(outcome)
}

/// Remove an output this run created but could not finish
///
/// Returns whether the file is gone.
fn discard_partial(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to remove partially written output"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Invoice.src");

        let outcome = write_if_absent(&path, "class Invoice {}\n").unwrap();
        assert_eq!(outcome, WriteOutcome::Created(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "class Invoice {}\n");
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ca/example/dao/InvoiceDao.java");

        let outcome = write_if_absent(&path, "x").unwrap();
        assert!(outcome.is_created());
        assert!(dir.path().join("ca/example/dao").is_dir());
    }

    #[test]
    fn test_existing_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Invoice.src");
        fs::write(&path, "hand edited").unwrap();

        let outcome = write_if_absent(&path, "generated").unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blocker"), "").unwrap();

        let result = write_if_absent(&dir.path().join("blocker/Invoice.src"), "x");
        assert!(matches!(result, Err(ScaffoldError::Filesystem { .. })));
    }

    #[test]
    fn test_discard_partial() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Invoice.src");
        fs::write(&path, "half").unwrap();

        assert!(discard_partial(&path));
        assert!(!path.exists());
        // Nothing left to remove: reported, not raised
        assert!(!discard_partial(&path));
    }

    #[test]
    fn test_display() {
        let created = WriteOutcome::Created(PathBuf::from("out/Invoice.src"));
        let skipped = WriteOutcome::Skipped(PathBuf::from("out/Invoice.src"));
        assert_eq!(created.to_string(), "Creating out/Invoice.src");
        assert_eq!(skipped.to_string(), "Skipping out/Invoice.src: already exists");
    }
}
