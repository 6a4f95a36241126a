//! `scaffold render`: render one template for one entity

use super::{load_config, print_summary, EntityArgs};
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use scaffold_kit::{RenderUnit, Scaffold, ScaffoldConfig};
use std::path::{Path, PathBuf};

/// Render a single template
#[derive(Debug, Clone, Args)]
pub struct RenderCommand {
    /// Template name, relative to the template root
    pub template: String,

    /// Output name template, relative to the output root (e.g. `${Entity}Dao.java`)
    pub output: String,

    #[command(flatten)]
    pub entity: EntityArgs,

    /// Directory templates are read from
    #[arg(long)]
    pub template_root: Option<PathBuf>,

    /// Directory outputs are written into
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    /// Fail on unresolved template references
    #[arg(long)]
    pub strict: bool,
}

impl RenderCommand {
    /// Apply command-line overrides on top of the loaded configuration
    fn configure(&self, mut config: ScaffoldConfig) -> ScaffoldConfig {
        if let Some(template_root) = &self.template_root {
            config.template_root.clone_from(template_root);
        }
        if let Some(output_root) = &self.output_root {
            config.output_root = Some(output_root.clone());
        }
        if self.strict {
            config.strict = true;
        }
        config
    }

    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let config = self.configure(load_config(config_path)?);
        let entity = self.entity.resolve()?;

        println!(
            "\n{} {} {}",
            style("Scaffolding").cyan().bold(),
            style(entity.qualified_name()).green().bold(),
            style("...").cyan().bold()
        );

        let scaffold = Scaffold::from_config(entity, &config)
            .context("Failed to create scaffold generator")?;

        let outcome = scaffold
            .render_unit(&RenderUnit::new(&self.template, &self.output))
            .with_context(|| format!("Failed to render template '{}'", self.template))?;

        print_summary(&[outcome]);
        Ok(())
    }
}
