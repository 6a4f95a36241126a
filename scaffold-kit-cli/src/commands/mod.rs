//! CLI command implementations

pub mod entity;
pub mod inspect;
pub mod render;
pub mod run;

pub use entity::EntityArgs;
pub use inspect::{ContextCommand, FieldsCommand};
pub use render::RenderCommand;
pub use run::RunCommand;

use anyhow::{Context, Result};
use console::style;
use scaffold_kit::{ScaffoldConfig, WriteOutcome};
use std::path::Path;

/// Load `path` if given, otherwise the standard configuration locations
pub fn load_config(path: Option<&Path>) -> Result<ScaffoldConfig> {
    match path {
        Some(path) => ScaffoldConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => ScaffoldConfig::load().context("Failed to load configuration"),
    }
}

/// Print the created/skipped totals after a run
pub fn print_summary(outcomes: &[WriteOutcome]) {
    let created = outcomes.iter().filter(|o| o.is_created()).count();
    let skipped = outcomes.len() - created;

    println!(
        "\n{} {} created, {} skipped",
        style("Done:").green().bold(),
        style(created).green(),
        style(skipped).yellow()
    );
}
