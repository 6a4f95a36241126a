//! `scaffold run`: execute a recipe

use super::{load_config, print_summary};
use anyhow::{Context, Result};
use console::style;
use scaffold_kit::Recipe;
use std::path::{Path, PathBuf};

/// Render every unit of a recipe file
#[derive(Debug, Clone)]
pub struct RunCommand {
    recipe: PathBuf,
}

impl RunCommand {
    #[must_use]
    pub const fn new(recipe: PathBuf) -> Self {
        Self { recipe }
    }

    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let recipe = Recipe::load(&self.recipe)
            .with_context(|| format!("Failed to load recipe {}", self.recipe.display()))?;
        let entity = recipe.entity()?;

        println!(
            "\n{} {} {} {}",
            style("Running").cyan().bold(),
            style(self.recipe.display()).dim(),
            style("for").cyan().bold(),
            style(entity.qualified_name()).green().bold()
        );

        let outcomes = recipe
            .run(&config)
            .with_context(|| format!("Recipe {} failed", self.recipe.display()))?;

        print_summary(&outcomes);
        Ok(())
    }
}
