//! Conventional name variants derived from an entity

use crate::entity::EntityDescriptor;

/// Names substituted for `package`, `Entity` and `entity`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// Namespace, verbatim
    pub package: String,
    /// Simple type name, verbatim (`Entity`)
    pub pascal: String,
    /// Simple type name with its first character lower-cased (`entity`)
    pub camel: String,
}

impl EntityNames {
    /// Derive the name variants of an entity
    #[must_use]
    pub fn derive(entity: &EntityDescriptor) -> Self {
        Self {
            package: entity.namespace.clone(),
            pascal: entity.name.clone(),
            camel: lower_first(&entity.name),
        }
    }
}

/// Lower-case the first character and leave the rest untouched
///
/// # Examples
///
/// ```
/// # use scaffold_kit::naming::lower_first;
/// assert_eq!(lower_first("Invoice"), "invoice");
/// assert_eq!(lower_first("URLMapping"), "uRLMapping");
/// assert_eq!(lower_first(""), "");
/// ```
#[must_use]
pub fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Upper-case the first character and leave the rest untouched
#[must_use]
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
