//! Entity descriptors and field extraction
//!
//! An entity is described explicitly by the caller: its namespace, its simple
//! type name and the members it declares. Templates only ever see the
//! members declared directly on the entity, in declaration order.
//!
//! # Field specifications
//!
//! Fields can be given on the command line as `name:Type[:modifier]*`:
//!
//! ```text
//! id:Long                       → instance field
//! total:java.math.BigDecimal    → instance field (type kept verbatim)
//! created:chrono::NaiveDate     → `::` in the type is preserved
//! INSTANCE:Invoice:static       → shared member, never scaffolded
//! version:int:inherited=Base    → declared on a supertype, never scaffolded
//! ```
//!
//! # Schema files
//!
//! ```toml
//! namespace = "ca.example"
//! name = "Invoice"
//!
//! [[fields]]
//! name = "id"
//! type = "Long"
//!
//! [[fields]]
//! name = "SERIAL_VERSION"
//! type = "long"
//! shared = true
//! ```

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Identity and declared shape of the type being scaffolded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Namespace or package (e.g. `ca.example`)
    #[serde(alias = "package")]
    pub namespace: String,
    /// Simple type name (e.g. `Invoice`)
    pub name: String,
    /// Members in declaration order, including shared and inherited ones
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// One member of an entity as declared in its schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Member name
    pub name: String,
    /// Declared type, verbatim
    #[serde(rename = "type")]
    pub type_name: String,
    /// Shared (static, type-level) member
    #[serde(default, alias = "static", skip_serializing_if = "is_false")]
    pub shared: bool,
    /// Supertype that declares this member, if it is inherited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

/// Field as exposed to templates: name plus declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl EntityDescriptor {
    /// Create a descriptor with no fields
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if the name is empty.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let descriptor = Self {
            namespace: namespace.into(),
            name: name.into(),
            fields: Vec::new(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Append a field, keeping declaration order
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields, keeping declaration order
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Load a descriptor from a TOML or JSON schema file
    ///
    /// The format is chosen by extension (`.json` is JSON, anything else is
    /// read as TOML).
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Schema`] if the file cannot be read or
    /// parsed, or [`ScaffoldError::Configuration`] if the entity name is
    /// empty.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ScaffoldError::schema(path, e))?;

        let descriptor: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&raw).map_err(|e| ScaffoldError::schema(path, e))?,
            _ => toml::from_str(&raw).map_err(|e| ScaffoldError::schema(path, e))?,
        };

        descriptor.validate()?;
        tracing::debug!(
            entity = %descriptor.qualified_name(),
            fields = descriptor.fields.len(),
            "loaded entity schema from {}",
            path.display()
        );
        Ok(descriptor)
    }

    /// Fields declared directly on this entity, in declaration order
    ///
    /// Shared members and members inherited from a supertype are left out.
    #[must_use]
    pub fn declared_fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| f.is_declared())
            .map(|f| FieldDescriptor {
                name: f.name.clone(),
                type_name: f.type_name.clone(),
            })
            .collect()
    }

    /// `namespace.Name`, or just `Name` in the root namespace
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Reject descriptors without a type name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if the name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ScaffoldError::Configuration(format!(
                "Entity name must not be empty (namespace '{}')",
                self.namespace
            )));
        }
        Ok(())
    }
}

impl FieldSpec {
    /// Instance field declared on the entity itself
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            shared: false,
            inherited_from: None,
        }
    }

    /// Mark as a shared (static) member
    #[must_use]
    pub const fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// Mark as inherited from the given supertype
    #[must_use]
    pub fn inherited_from(mut self, supertype: impl Into<String>) -> Self {
        self.inherited_from = Some(supertype.into());
        self
    }

    /// Whether this member belongs in the scaffolded field list
    #[must_use]
    pub const fn is_declared(&self) -> bool {
        !self.shared && self.inherited_from.is_none()
    }

    /// Parse a field specification
    ///
    /// Format: `name:Type[:modifier]*` where modifiers are `static` (or
    /// `shared`) and `inherited=Supertype`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scaffold_kit::entity::FieldSpec;
    /// let field = FieldSpec::parse("total:java.math.BigDecimal").unwrap();
    /// assert_eq!(field.type_name, "java.math.BigDecimal");
    ///
    /// let field = FieldSpec::parse("INSTANCE:Invoice:static").unwrap();
    /// assert!(field.shared);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidField`] if:
    /// - The name or the type is missing
    /// - The name is not an identifier
    /// - An `inherited=` modifier names no supertype
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(':').collect();

        if parts.len() < 2 {
            return Err(ScaffoldError::InvalidField(format!(
                "'{input}'. Expected format: name:Type[:modifiers]"
            )));
        }

        let name = parts[0].trim();
        if !name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
            || !name.chars().all(|c| c.is_alphanumeric() || c == '_')
        {
            return Err(ScaffoldError::InvalidField(format!(
                "'{input}'. Field name must be an identifier (alphanumeric + underscore)"
            )));
        }

        // Types may contain `::`, so the type runs up to the first modifier
        let type_end = parts
            .iter()
            .enumerate()
            .skip(2)
            .find(|(_, part)| is_modifier(part))
            .map_or(parts.len(), |(idx, _)| idx);

        let type_name = parts[1..type_end].join(":");
        let type_name = type_name.trim();
        if type_name.is_empty() {
            return Err(ScaffoldError::InvalidField(format!("'{input}'. Missing type")));
        }

        let mut field = Self::new(name, type_name);
        for modifier in &parts[type_end..] {
            let modifier = modifier.trim();
            if let Some(supertype) = modifier.strip_prefix("inherited=") {
                if supertype.is_empty() {
                    return Err(ScaffoldError::InvalidField(format!(
                        "'{input}'. inherited= needs a supertype name"
                    )));
                }
                field.inherited_from = Some(supertype.to_string());
            } else if matches!(modifier, "static" | "shared") {
                field.shared = true;
            } else {
                return Err(ScaffoldError::InvalidField(format!(
                    "'{input}'. Unknown modifier '{modifier}'. Valid modifiers: static, shared, inherited=Type"
                )));
            }
        }

        Ok(field)
    }
}

fn is_modifier(part: &str) -> bool {
    let part = part.trim();
    matches!(part, "static" | "shared") || part.starts_with("inherited=")
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.type_name)?;
        if self.shared {
            write!(f, ":static")?;
        }
        if let Some(supertype) = &self.inherited_from {
            write!(f, ":inherited={supertype}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}
