//! Template rendering
//!
//! The engine depends on a single capability, [`TemplateRenderer`]: render a
//! template string against a [`MergeContext`]. It is used the same way for
//! output-name templates, template-name templates and file bodies, so any
//! engine that implements it can be swapped in.
//!
//! [`MiniJinjaRenderer`] is the default. It uses `${ expr }` for
//! substitutions so generated source full of `{{`/`}}` stays literal:
//!
//! ```text
//! package ${package};
//!
//! public class ${Entity}Dao {
//! {% for field in fields %}    // ${field.type} ${field.name}
//! {% endfor %}}
//! ```

use crate::context::MergeContext;
use crate::error::{Result, ScaffoldError};
use crate::helpers::{ScaffoldHelpers, STRING_HELPERS};
use minijinja::syntax::SyntaxConfig;
use minijinja::value::Value;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How unresolved references are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Unresolved references fail the render
    Strict,
    /// Unresolved references render as empty
    #[default]
    Lenient,
}

impl RenderMode {
    /// Strict when `strict` is set, lenient otherwise
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Render a template string against a merge context
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with every key of `context` in scope
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Substitution`] if the template is malformed,
    /// or if it references an unresolved key under [`RenderMode::Strict`].
    fn render(&self, template: &str, context: &MergeContext, mode: RenderMode) -> Result<String>;
}

/// MiniJinja-backed renderer with `${ }` substitutions
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniJinjaRenderer;

impl MiniJinjaRenderer {
    /// Create the renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn environment(mode: RenderMode) -> Result<Environment<'static>> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("{%", "%}")
            .variable_delimiters("${", "}")
            .comment_delimiters("{#", "#}")
            .build()
            .map_err(|e| ScaffoldError::Configuration(format!("Invalid template syntax: {e}")))?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        // Generated code, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(match mode {
            RenderMode::Strict => UndefinedBehavior::Strict,
            RenderMode::Lenient => UndefinedBehavior::Chainable,
        });

        for &name in STRING_HELPERS {
            env.add_filter(name, move |input: String| {
                ScaffoldHelpers::apply(name, &input).unwrap_or(input)
            });
        }

        Ok(env)
    }

    fn context_value(context: &MergeContext) -> Value {
        let mut map: BTreeMap<String, Value> = context
            .extras()
            .iter()
            .map(|(key, value)| (key.clone(), Value::from_serialize(value)))
            .collect();

        map.insert("package".into(), Value::from(context.package()));
        map.insert("Entity".into(), Value::from(context.entity_pascal()));
        map.insert("entity".into(), Value::from(context.entity_camel()));
        map.insert("fields".into(), Value::from_serialize(context.fields()));
        map.insert("date".into(), Value::from(context.date_string()));
        map.insert(
            "scaffold".into(),
            Value::from_object(context.scaffold().clone()),
        );

        Value::from(map)
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &MergeContext, mode: RenderMode) -> Result<String> {
        let env = Self::environment(mode)?;
        env.render_str(template, Self::context_value(context))
            .map_err(|e| ScaffoldError::Substitution {
                template: label(template),
                message: format!("{e:#}"),
            })
    }
}

/// First line of a template, shortened for error messages
fn label(template: &str) -> String {
    let first_line = template.lines().next().unwrap_or_default();
    if first_line.chars().count() > 60 {
        let short: String = first_line.chars().take(57).collect();
        format!("{short}...")
    } else {
        first_line.to_string()
    }
}
