//! Build-convention directory discovery
//!
//! Finds the source directory that belongs to an entity's namespace by
//! starting from the compiled-output tree and swapping a build-output path
//! segment for a source path segment, e.g. for a Maven layout:
//!
//! ```text
//! /work/app/target/classes/ca/example     (package dir, must exist)
//! /work/app/src/main/java/ca/example      (source dir)
//! ```
//!
//! This is an optional helper. [`crate::Scaffold::new`] always takes explicit
//! roots; only [`crate::Scaffold::from_config`] consults a convention, and
//! only when no output root is configured.

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A build-output segment and the source segment that replaces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConvention {
    /// Segment found in compiled-output paths (e.g. `target/classes`)
    pub build_segment: String,
    /// Segment that replaces it (e.g. `src/main/java`)
    pub source_segment: String,
}

impl SourceConvention {
    /// Custom convention
    pub fn new(build_segment: impl Into<String>, source_segment: impl Into<String>) -> Self {
        Self {
            build_segment: build_segment.into(),
            source_segment: source_segment.into(),
        }
    }

    /// Maven sources: `target/classes` → `src/main/java`
    #[must_use]
    pub fn maven_java() -> Self {
        Self::new("target/classes", "src/main/java")
    }

    /// Maven resources: `target/classes` → `src/main/resources`
    #[must_use]
    pub fn maven_resources() -> Self {
        Self::new("target/classes", "src/main/resources")
    }

    /// Directory holding the compiled artifacts of `namespace`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if the location is not a
    /// directory on disk, for example when the artifacts are packaged in an
    /// archive.
    pub fn package_dir(&self, artifact_root: &Path, namespace: &str) -> Result<PathBuf> {
        let mut dir = artifact_root.to_path_buf();
        for segment in namespace.split('.').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }

        if dir.is_dir() {
            return Ok(dir);
        }

        let reason = if artifact_root.is_file() {
            "the artifacts are packaged in an archive"
        } else {
            "no such directory"
        };
        Err(ScaffoldError::Configuration(format!(
            "Cannot find package directory for '{namespace}' at {}: {reason}",
            dir.display()
        )))
    }

    /// Conventional source directory for `namespace`
    ///
    /// The source directory itself does not have to exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if the package directory
    /// cannot be resolved or its path does not contain the build segment.
    pub fn source_dir(&self, artifact_root: &Path, namespace: &str) -> Result<PathBuf> {
        let package_dir = self.package_dir(artifact_root, namespace)?;
        let package_str = package_dir.to_string_lossy();

        if self.build_segment.is_empty() || !package_str.contains(self.build_segment.as_str()) {
            return Err(ScaffoldError::Configuration(format!(
                "Package directory {} does not contain build segment '{}'",
                package_dir.display(),
                self.build_segment
            )));
        }

        let source_dir = PathBuf::from(package_str.replacen(
            self.build_segment.as_str(),
            &self.source_segment,
            1,
        ));
        tracing::debug!(
            from = %package_dir.display(),
            to = %source_dir.display(),
            "resolved conventional source directory"
        );
        Ok(source_dir)
    }
}
