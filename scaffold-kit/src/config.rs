//! Configuration management for scaffold-kit
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SCAFFOLD_` prefix, `__` for nesting)
//! 2. `./scaffold.toml` (project)
//! 3. `~/.config/scaffold-kit/config.toml` (user config, XDG)
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffold.toml
//! template_root = "./templates"
//! strict = true
//!
//! [convention]
//! artifact_root = "./target/classes"
//! build_segment = "target/classes"
//! source_segment = "src/main/java"
//! ```

use crate::layout::SourceConvention;
use crate::render::RenderMode;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project-local configuration
pub const PROJECT_CONFIG_FILE: &str = "scaffold.toml";

/// Scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Directory templates are read from
    pub template_root: PathBuf,

    /// Directory outputs are written into; derived from `convention` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_root: Option<PathBuf>,

    /// Build convention used to derive the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convention: Option<ConventionSettings>,

    /// Fail on unresolved template references
    pub strict: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_root: PathBuf::from("./templates"),
            output_root: None,
            convention: None,
            strict: false,
        }
    }
}

/// Where compiled artifacts live and how to map them back to sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionSettings {
    /// Root of the compiled-output tree (e.g. `./target/classes`)
    pub artifact_root: PathBuf,

    /// Segment replaced in compiled-output paths
    #[serde(default = "default_build_segment")]
    pub build_segment: String,

    /// Replacement source segment
    #[serde(default = "default_source_segment")]
    pub source_segment: String,
}

fn default_build_segment() -> String {
    SourceConvention::maven_java().build_segment
}

fn default_source_segment() -> String {
    SourceConvention::maven_java().source_segment
}

impl ConventionSettings {
    /// The convention these settings describe
    #[must_use]
    pub fn convention(&self) -> SourceConvention {
        SourceConvention::new(self.build_segment.clone(), self.source_segment.clone())
    }
}

impl ScaffoldConfig {
    /// Load configuration from the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file exists but cannot be parsed
    /// - Configuration values fail type conversion
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Self::defaults()?;

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let project_config = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            figment = figment.merge(Toml::file(&project_config));
        }

        figment = figment.merge(Self::env());
        let config = figment.extract()?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override values from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The file contains invalid TOML
    /// - Configuration values fail type conversion
    pub fn load_from(path: &Path) -> Result<Self, figment::Error> {
        let config = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Self::env())
            .extract()?;
        tracing::debug!(?config, "loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/scaffold-kit/config.toml` on Linux.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(PROJECT_CONFIG_FILE),
            |config_dir| config_dir.join("scaffold-kit").join("config.toml"),
        )
    }

    /// Render mode selected by `strict`
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        RenderMode::from_strict(self.strict)
    }

    fn defaults() -> Result<Figment, figment::Error> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn env() -> Env {
        Env::prefixed("SCAFFOLD_").split("__").lowercase(true)
    }
}
