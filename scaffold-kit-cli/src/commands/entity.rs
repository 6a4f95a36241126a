//! Entity selection shared by every command

use anyhow::{bail, Context, Result};
use clap::Args;
use scaffold_kit::{EntityDescriptor, FieldSpec};
use std::path::PathBuf;

/// Where the entity comes from: a schema file or inline flags
#[derive(Debug, Clone, Args)]
pub struct EntityArgs {
    /// Entity schema file (TOML, or JSON with a `.json` extension)
    #[arg(long, conflicts_with_all = ["namespace", "name", "field"])]
    pub schema: Option<PathBuf>,

    /// Entity namespace (e.g. `ca.example`)
    #[arg(long, default_value = "")]
    pub namespace: String,

    /// Entity type name (`PascalCase`, e.g. `Invoice`)
    #[arg(long)]
    pub name: Option<String>,

    /// Field definitions (e.g. `id:Long`, `INSTANCE:Invoice:static`)
    #[arg(long = "field", value_name = "NAME:TYPE")]
    pub field: Vec<String>,
}

impl EntityArgs {
    /// Resolve the entity descriptor
    pub fn resolve(&self) -> Result<EntityDescriptor> {
        if let Some(schema) = &self.schema {
            return EntityDescriptor::load(schema)
                .with_context(|| format!("Failed to load entity schema {}", schema.display()));
        }

        let Some(name) = &self.name else {
            bail!("Either --schema or --name is required");
        };

        let fields = self
            .field
            .iter()
            .map(|spec| FieldSpec::parse(spec))
            .collect::<scaffold_kit::Result<Vec<_>>>()
            .context("Invalid field definition")?;

        Ok(EntityDescriptor::new(self.namespace.clone(), name.clone())?.with_fields(fields))
    }
}
