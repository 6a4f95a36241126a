//! Merge context: the substitution mapping handed to every render
//!
//! The key set is fixed and total. Every template, body or output path, sees
//! all six keys whether it needs them or not:
//!
//! | key        | value                                             |
//! |------------|---------------------------------------------------|
//! | `package`  | entity namespace, verbatim                        |
//! | `Entity`   | simple type name, verbatim                        |
//! | `entity`   | simple type name with the first character lowered |
//! | `fields`   | declared fields in order, each with `name`/`type` |
//! | `date`     | local calendar date, `YYYY-MM-DD`                 |
//! | `scaffold` | [`ScaffoldHelpers`] callback handle               |
//!
//! Specialized generators add keys of their own through a
//! [`ContextExtension`]; the fixed keys can never be replaced.

use crate::entity::{EntityDescriptor, FieldDescriptor};
use crate::error::{Result, ScaffoldError};
use crate::helpers::ScaffoldHelpers;
use crate::naming::EntityNames;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// The fixed merge keys, in documentation order
pub const MERGE_KEYS: [&str; 6] = ["package", "Entity", "entity", "fields", "date", "scaffold"];

/// Substitution mapping for one render call
#[derive(Debug, Clone)]
pub struct MergeContext {
    names: EntityNames,
    fields: Vec<FieldDescriptor>,
    date: NaiveDate,
    scaffold: ScaffoldHelpers,
    extra: BTreeMap<String, serde_json::Value>,
}

impl MergeContext {
    /// Build the base context for an entity on the given date
    #[must_use]
    pub fn build(entity: &EntityDescriptor, date: NaiveDate) -> Self {
        Self {
            names: EntityNames::derive(entity),
            fields: entity.declared_fields(),
            date,
            scaffold: ScaffoldHelpers::for_entity(entity),
            extra: BTreeMap::new(),
        }
    }

    /// `package`
    #[must_use]
    pub fn package(&self) -> &str {
        &self.names.package
    }

    /// `Entity`
    #[must_use]
    pub fn entity_pascal(&self) -> &str {
        &self.names.pascal
    }

    /// `entity`
    #[must_use]
    pub fn entity_camel(&self) -> &str {
        &self.names.camel
    }

    /// `fields`
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Generation date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// `date`, formatted `YYYY-MM-DD`
    #[must_use]
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `scaffold`
    #[must_use]
    pub const fn scaffold(&self) -> &ScaffoldHelpers {
        &self.scaffold
    }

    /// Keys added by extensions
    #[must_use]
    pub const fn extras(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }

    /// Add an extension key
    ///
    /// Inserting an existing extension key replaces its value.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ReservedKey`] for any of [`MERGE_KEYS`], or
    /// [`ScaffoldError::Configuration`] if the value cannot be serialized.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<()> {
        let key = key.into();
        if MERGE_KEYS.contains(&key.as_str()) {
            return Err(ScaffoldError::ReservedKey(key));
        }

        let value = serde_json::to_value(value).map_err(|e| {
            ScaffoldError::Configuration(format!("Cannot serialize merge value '{key}': {e}"))
        })?;
        self.extra.insert(key, value);
        Ok(())
    }

    /// Whether `key` resolves in this context
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        MERGE_KEYS.contains(&key) || self.extra.contains_key(key)
    }

    /// JSON view of the context, for inspection
    ///
    /// `scaffold` is shown as the qualified entity name it is bound to.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map.insert("package".into(), self.package().into());
        map.insert("Entity".into(), self.entity_pascal().into());
        map.insert("entity".into(), self.entity_camel().into());
        map.insert(
            "fields".into(),
            serde_json::to_value(&self.fields).unwrap_or_default(),
        );
        map.insert("date".into(), self.date_string().into());
        let qualified = if self.package().is_empty() {
            self.entity_pascal().to_string()
        } else {
            format!("{}.{}", self.package(), self.entity_pascal())
        };
        map.insert("scaffold".into(), qualified.into());
        serde_json::Value::Object(map)
    }
}

/// Hook for generators that need more keys than the fixed set
///
/// Implemented for any `Fn(&EntityDescriptor, &mut MergeContext) -> Result<()>`.
pub trait ContextExtension: Send + Sync {
    /// Add keys to a freshly built context
    ///
    /// # Errors
    ///
    /// Any error aborts the render call that built the context.
    fn extend(&self, entity: &EntityDescriptor, context: &mut MergeContext) -> Result<()>;
}

impl<F> ContextExtension for F
where
    F: Fn(&EntityDescriptor, &mut MergeContext) -> Result<()> + Send + Sync,
{
    fn extend(&self, entity: &EntityDescriptor, context: &mut MergeContext) -> Result<()> {
        self(entity, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FieldSpec;

    fn invoice() -> EntityDescriptor {
        EntityDescriptor::new("ca.example", "Invoice")
            .unwrap()
            .with_fields([
                FieldSpec::new("id", "Long"),
                FieldSpec::new("COUNT", "int").shared(),
                FieldSpec::new("total", "BigDecimal"),
            ])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 3, 9).unwrap()
    }

    #[test]
    fn test_build_base_keys() {
        let context = MergeContext::build(&invoice(), date());
        assert_eq!(context.package(), "ca.example");
        assert_eq!(context.entity_pascal(), "Invoice");
        assert_eq!(context.entity_camel(), "invoice");
        assert_eq!(context.fields().len(), 2);
        assert_eq!(context.date_string(), "2015-03-09");
        assert_eq!(context.scaffold().entity(), "Invoice");
    }

    #[test]
    fn test_key_set_is_total() {
        let context = MergeContext::build(&invoice(), date());
        let json = context.to_json();
        for key in MERGE_KEYS {
            assert!(json.get(key).is_some(), "missing key {key}");
            assert!(context.contains_key(key));
        }
        assert_eq!(json["fields"][1]["name"], "total");
        assert_eq!(json["fields"][1]["type"], "BigDecimal");
        assert_eq!(json["scaffold"], "ca.example.Invoice");
    }

    #[test]
    fn test_insert_extension_key() {
        let mut context = MergeContext::build(&invoice(), date());
        context.insert("table", "invoices").unwrap();
        assert!(context.contains_key("table"));
        assert_eq!(context.to_json()["table"], "invoices");
    }

    #[test]
    fn test_reserved_keys_rejected() {
        let mut context = MergeContext::build(&invoice(), date());
        for key in MERGE_KEYS {
            assert!(matches!(
                context.insert(key, "x"),
                Err(ScaffoldError::ReservedKey(_))
            ));
        }
        assert_eq!(context.entity_pascal(), "Invoice");
    }

    #[test]
    fn test_closure_extension() {
        let extension = |entity: &EntityDescriptor, context: &mut MergeContext| {
            context.insert("qualified", entity.qualified_name())
        };
        let entity = invoice();
        let mut context = MergeContext::build(&entity, date());
        extension.extend(&entity, &mut context).unwrap();
        assert_eq!(context.to_json()["qualified"], "ca.example.Invoice");
    }
}
