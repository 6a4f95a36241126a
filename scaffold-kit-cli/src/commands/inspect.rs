//! `scaffold context` and `scaffold fields`: show what templates will see

use super::EntityArgs;
use anyhow::Result;
use chrono::Local;
use console::style;
use scaffold_kit::MergeContext;

/// Print the merge context of an entity as JSON
#[derive(Debug, Clone)]
pub struct ContextCommand {
    entity: EntityArgs,
}

impl ContextCommand {
    #[must_use]
    pub const fn new(entity: EntityArgs) -> Self {
        Self { entity }
    }

    pub fn execute(&self) -> Result<()> {
        let entity = self.entity.resolve()?;
        let context = MergeContext::build(&entity, Local::now().date_naive());
        println!("{}", serde_json::to_string_pretty(&context.to_json())?);
        Ok(())
    }
}

/// List the fields templates iterate over
#[derive(Debug, Clone)]
pub struct FieldsCommand {
    entity: EntityArgs,
}

impl FieldsCommand {
    #[must_use]
    pub const fn new(entity: EntityArgs) -> Self {
        Self { entity }
    }

    pub fn execute(&self) -> Result<()> {
        let entity = self.entity.resolve()?;
        let declared = entity.declared_fields();

        println!(
            "{} {} ({} of {} fields)",
            style("Fields of").cyan().bold(),
            style(entity.qualified_name()).green().bold(),
            declared.len(),
            entity.fields.len()
        );
        for field in &declared {
            println!("  {}", style(field).dim());
        }
        for skipped in entity.fields.iter().filter(|f| !f.is_declared()) {
            println!("  {} {}", style("-").yellow(), style(skipped).dim());
        }
        Ok(())
    }
}
