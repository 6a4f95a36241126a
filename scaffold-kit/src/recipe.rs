//! Recipes: one entity, many render units, in a single TOML file
//!
//! ```toml
//! template_root = "templates"
//! output_root = "src/main/java/ca/example"
//!
//! [entity]
//! schema = "invoice.toml"
//!
//! [[render]]
//! template = "dao.java"
//! output = "dao/${Entity}Dao.java"
//!
//! [[render]]
//! template = "service.java"
//! output = "service/${Entity}Service.java"
//! ```
//!
//! The entity can also be given inline (`namespace`, `name`, `[[entity.fields]]`).
//! Relative paths are resolved against the directory holding the recipe.
//! Values set in the recipe override the loaded [`ScaffoldConfig`].

use crate::config::ScaffoldConfig;
use crate::entity::EntityDescriptor;
use crate::error::{Result, ScaffoldError};
use crate::generator::{RenderUnit, Scaffold};
use crate::render::RenderMode;
use crate::writer::WriteOutcome;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A batch of render units for one entity
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    /// Template root override
    #[serde(default)]
    pub template_root: Option<PathBuf>,
    /// Output root override
    #[serde(default)]
    pub output_root: Option<PathBuf>,
    /// Strict-mode override
    #[serde(default)]
    pub strict: Option<bool>,
    /// Entity to scaffold
    pub entity: EntitySource,
    /// Units, rendered in file order
    #[serde(default, rename = "render")]
    pub units: Vec<RenderUnit>,
}

/// Where a recipe's entity comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EntitySource {
    /// Separate schema file
    Schema {
        /// Path to a TOML or JSON entity schema
        schema: PathBuf,
    },
    /// Entity described inline
    Inline(EntityDescriptor),
}

impl Recipe {
    /// Load a recipe and resolve its relative paths
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Schema`] if the recipe cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ScaffoldError::schema(path, e))?;
        let mut recipe: Self = toml::from_str(&raw).map_err(|e| ScaffoldError::schema(path, e))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        recipe.template_root = recipe.template_root.map(|p| base.join(p));
        recipe.output_root = recipe.output_root.map(|p| base.join(p));
        if let EntitySource::Schema { schema } = &mut recipe.entity {
            *schema = base.join(&*schema);
        }

        tracing::debug!(units = recipe.units.len(), "loaded recipe from {}", path.display());
        Ok(recipe)
    }

    /// Resolve the recipe's entity
    ///
    /// # Errors
    ///
    /// Returns an error if the schema file cannot be loaded, or
    /// [`ScaffoldError::Configuration`] if an inline entity has no name.
    pub fn entity(&self) -> Result<EntityDescriptor> {
        match &self.entity {
            EntitySource::Schema { schema } => EntityDescriptor::load(schema),
            EntitySource::Inline(entity) => {
                entity.validate()?;
                Ok(entity.clone())
            }
        }
    }

    /// Build the scaffold generator this recipe describes
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be resolved or no output root
    /// can be determined.
    pub fn scaffold(&self, config: &ScaffoldConfig) -> Result<Scaffold> {
        let mut config = config.clone();
        if let Some(template_root) = &self.template_root {
            config.template_root.clone_from(template_root);
        }
        if let Some(output_root) = &self.output_root {
            config.output_root = Some(output_root.clone());
        }

        let scaffold = Scaffold::from_config(self.entity()?, &config)?;
        Ok(match self.strict {
            Some(strict) => scaffold.with_mode(RenderMode::from_strict(strict)),
            None => scaffold,
        })
    }

    /// Render every unit in order
    ///
    /// # Errors
    ///
    /// Returns the first error; outputs written before it are kept.
    pub fn run(&self, config: &ScaffoldConfig) -> Result<Vec<WriteOutcome>> {
        self.scaffold(config)?.render_all(&self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_inline_recipe() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(dir.path().join("templates/model.txt"), "model ${Entity}").unwrap();
        fs::write(dir.path().join("templates/repo.txt"), "repo ${entity}").unwrap();
        fs::write(
            dir.path().join("recipe.toml"),
            r#"
template_root = "templates"
output_root = "out"

[entity]
namespace = "ca.example"
name = "Invoice"

[[entity.fields]]
name = "id"
type = "Long"

[[render]]
template = "model.txt"
output = "${Entity}.txt"

[[render]]
template = "repo.txt"
output = "repo/${Entity}Repo.txt"
"#,
        )
        .unwrap();

        let recipe = Recipe::load(&dir.path().join("recipe.toml")).unwrap();
        assert_eq!(recipe.units.len(), 2);

        let outcomes = recipe.run(&ScaffoldConfig::default()).unwrap();
        assert!(outcomes.iter().all(WriteOutcome::is_created));
        assert_eq!(
            fs::read_to_string(dir.path().join("out/repo/InvoiceRepo.txt")).unwrap(),
            "repo invoice"
        );

        let again = recipe.run(&ScaffoldConfig::default()).unwrap();
        assert!(again.iter().all(|o| !o.is_created()));
    }

    #[test]
    fn test_schema_recipe_and_strict_override() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("invoice.toml"),
            "namespace = \"ca.example\"\nname = \"Invoice\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("recipe.toml"),
            "output_root = \"out\"\nstrict = true\n\n[entity]\nschema = \"invoice.toml\"\n",
        )
        .unwrap();

        let recipe = Recipe::load(&dir.path().join("recipe.toml")).unwrap();
        assert_eq!(recipe.entity().unwrap().name, "Invoice");

        let scaffold = recipe.scaffold(&ScaffoldConfig::default()).unwrap();
        assert_eq!(scaffold.mode(), RenderMode::Strict);
        assert_eq!(scaffold.output_root(), dir.path().join("out"));
    }

    #[test]
    fn test_inline_entity_without_name() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("recipe.toml"),
            "output_root = \"out\"\n\n[entity]\nnamespace = \"ca.example\"\nname = \"\"\n",
        )
        .unwrap();

        let recipe = Recipe::load(&dir.path().join("recipe.toml")).unwrap();
        assert!(matches!(recipe.entity(), Err(ScaffoldError::Configuration(_))));
        assert!(matches!(
            recipe.run(&ScaffoldConfig::default()),
            Err(ScaffoldError::Configuration(_))
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_malformed_recipe() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("recipe.toml"), "[[render]]\ntemplate = 1\n").unwrap();
        assert!(matches!(
            Recipe::load(&dir.path().join("recipe.toml")),
            Err(ScaffoldError::Schema { .. })
        ));
    }
}
