//! Template helper functions for code generation
//!
//! [`ScaffoldHelpers`] is what templates reach through the `scaffold` merge
//! key. It deliberately exposes naming utilities and the entity identity
//! only, never the orchestrator itself:
//!
//! ```text
//! ${ scaffold.snake_case(Entity) }        → invoice_line
//! ${ scaffold.plural(entity) }            → invoiceLines
//! ${ scaffold.package_path() }/${Entity}  → ca/example/InvoiceLine
//! ${ scaffold.namespace }                 → ca.example
//! ```

use crate::entity::EntityDescriptor;
use crate::naming;
use inflector::Inflector;
use minijinja::value::{from_args, Object, ObjectRepr, Value};
use minijinja::{Error, ErrorKind, State};
use std::fmt;
use std::sync::Arc;

/// Callback handle exposed to templates as `scaffold`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldHelpers {
    entity: String,
    namespace: String,
}

impl ScaffoldHelpers {
    /// Helpers bound to one entity
    #[must_use]
    pub fn for_entity(entity: &EntityDescriptor) -> Self {
        Self {
            entity: entity.name.clone(),
            namespace: entity.namespace.clone(),
        }
    }

    /// Simple name of the bound entity
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Namespace of the bound entity
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespace as a relative directory path (`ca.example` → `ca/example`)
    #[must_use]
    pub fn package_path(&self) -> String {
        self.namespace.replace('.', "/")
    }

    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use scaffold_kit::helpers::ScaffoldHelpers;
    /// assert_eq!(ScaffoldHelpers::to_snake_case("InvoiceLine"), "invoice_line");
    /// assert_eq!(ScaffoldHelpers::to_snake_case("HTTPRequest"), "http_request");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Convert string to `PascalCase`
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    ///
    /// Unlike the `entity` merge key this re-cases every word boundary.
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Convert string to kebab-case
    #[must_use]
    pub fn to_kebab_case(input: &str) -> String {
        input.to_kebab_case()
    }

    /// Pluralize a word
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Singularize a word
    #[must_use]
    pub fn singularize(input: &str) -> String {
        input.to_singular()
    }

    /// Apply a named string helper, if `name` is one
    ///
    /// Shared by the `scaffold.<name>(s)` methods and the template filters.
    #[must_use]
    pub fn apply(name: &str, input: &str) -> Option<String> {
        let converted = match name {
            "lower_first" => naming::lower_first(input),
            "upper_first" => naming::upper_first(input),
            "snake_case" => Self::to_snake_case(input),
            "pascal_case" => Self::to_pascal_case(input),
            "camel_case" => Self::to_camel_case(input),
            "kebab_case" => Self::to_kebab_case(input),
            "plural" => Self::pluralize(input),
            "singular" => Self::singularize(input),
            _ => return None,
        };
        Some(converted)
    }
}

/// Names accepted by [`ScaffoldHelpers::apply`]
pub const STRING_HELPERS: &[&str] = &[
    "lower_first",
    "upper_first",
    "snake_case",
    "pascal_case",
    "camel_case",
    "kebab_case",
    "plural",
    "singular",
];

impl Object for ScaffoldHelpers {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        match key.as_str()? {
            "entity" => Some(Value::from(self.entity.clone())),
            "namespace" => Some(Value::from(self.namespace.clone())),
            _ => None,
        }
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        if method == "package_path" {
            if !args.is_empty() {
                return Err(Error::new(
                    ErrorKind::TooManyArguments,
                    "package_path takes no arguments",
                ));
            }
            return Ok(Value::from(self.package_path()));
        }

        if STRING_HELPERS.contains(&method) {
            let (input,): (String,) = from_args(args)?;
            return Ok(Value::from(Self::apply(method, &input).unwrap_or(input)));
        }

        Err(Error::new(
            ErrorKind::UnknownMethod,
            format!("scaffold has no method named {method}"),
        ))
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.entity)
        } else {
            write!(f, "{}.{}", self.namespace, self.entity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helpers() -> ScaffoldHelpers {
        let entity = EntityDescriptor::new("ca.example", "InvoiceLine").unwrap();
        ScaffoldHelpers::for_entity(&entity)
    }

    #[test]
    fn test_package_path() {
        assert_eq!(helpers().package_path(), "ca/example");
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(ScaffoldHelpers::to_snake_case("InvoiceLine"), "invoice_line");
        assert_eq!(ScaffoldHelpers::to_pascal_case("invoice_line"), "InvoiceLine");
        assert_eq!(ScaffoldHelpers::to_camel_case("invoice_line"), "invoiceLine");
        assert_eq!(ScaffoldHelpers::to_kebab_case("InvoiceLine"), "invoice-line");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(ScaffoldHelpers::pluralize("invoice"), "invoices");
        assert_eq!(ScaffoldHelpers::pluralize("category"), "categories");
        assert_eq!(ScaffoldHelpers::singularize("categories"), "category");
    }

    #[test]
    fn test_apply() {
        assert_eq!(
            ScaffoldHelpers::apply("lower_first", "InvoiceLine").as_deref(),
            Some("invoiceLine")
        );
        assert_eq!(ScaffoldHelpers::apply("shout", "x"), None);
        for name in STRING_HELPERS {
            assert!(ScaffoldHelpers::apply(name, "Invoice").is_some());
        }
    }

    #[test]
    fn test_template_access() {
        let mut env = minijinja::Environment::new();
        env.add_template("t", "{{ s }}|{{ s.namespace }}|{{ s.snake_case(s.entity) }}|{{ s.package_path() }}")
            .unwrap();
        let rendered = env
            .get_template("t")
            .unwrap()
            .render(minijinja::context! { s => Value::from_object(helpers()) })
            .unwrap();
        assert_eq!(rendered, "ca.example.InvoiceLine|ca.example|invoice_line|ca/example");
    }

    #[test]
    fn test_unknown_method() {
        let env = minijinja::Environment::new();
        let result = env.render_str(
            "{{ s.delete_everything() }}",
            minijinja::context! { s => Value::from_object(helpers()) },
        );
        assert!(result.is_err());
    }
}
