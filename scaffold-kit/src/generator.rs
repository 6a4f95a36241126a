//! Scaffold orchestrator
//!
//! A [`Scaffold`] binds one entity to a template root and an output root.
//! Each render is a complete unit of work: build a fresh merge context,
//! resolve the output path, and write the rendered body unless the output
//! already exists.

use crate::config::ScaffoldConfig;
use crate::context::{ContextExtension, MergeContext};
use crate::entity::EntityDescriptor;
use crate::error::{Result, ScaffoldError};
use crate::render::{MiniJinjaRenderer, RenderMode, TemplateRenderer};
use crate::writer::{self, WriteOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// One template and the output-name template it renders to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderUnit {
    /// Template name, relative to the template root (may itself be a template)
    pub template: String,
    /// Output name, relative to the output root (e.g. `${Entity}Dao.java`)
    pub output: String,
}

impl RenderUnit {
    /// Create a render unit
    pub fn new(template: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

/// Scaffold generator bound to one entity
pub struct Scaffold {
    /// Entity being scaffolded
    entity: EntityDescriptor,
    /// Directory templates are read from
    template_root: PathBuf,
    /// Directory outputs are written into
    output_root: PathBuf,
    renderer: Box<dyn TemplateRenderer>,
    mode: RenderMode,
    extensions: Vec<Box<dyn ContextExtension>>,
    clock: fn() -> NaiveDate,
}

impl Scaffold {
    /// Create a scaffold generator with explicit roots
    ///
    /// Uses the [`MiniJinjaRenderer`] in lenient mode.
    pub fn new(
        entity: EntityDescriptor,
        template_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            entity,
            template_root: template_root.into(),
            output_root: output_root.into(),
            renderer: Box::new(MiniJinjaRenderer::new()),
            mode: RenderMode::default(),
            extensions: Vec::new(),
            clock: today,
        }
    }

    /// Create a scaffold generator from configuration
    ///
    /// The output root is `output_root` when set, otherwise the source
    /// directory the configured build convention derives for the entity's
    /// namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Configuration`] if neither an output root nor
    /// a convention is configured, or if the convention cannot resolve the
    /// entity's package to a directory.
    pub fn from_config(entity: EntityDescriptor, config: &ScaffoldConfig) -> Result<Self> {
        let output_root = match (&config.output_root, &config.convention) {
            (Some(root), _) => root.clone(),
            (None, Some(settings)) => settings
                .convention()
                .source_dir(&settings.artifact_root, &entity.namespace)?,
            (None, None) => {
                return Err(ScaffoldError::Configuration(
                    "No output root configured: set output_root or a [convention]".to_string(),
                ))
            }
        };

        Ok(Self::new(entity, config.template_root.clone(), output_root).with_mode(config.mode()))
    }

    /// Override the output root
    #[must_use]
    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    /// Use a different template engine
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Set how unresolved references are treated
    #[must_use]
    pub const fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Register a hook that adds keys to every merge context
    #[must_use]
    pub fn with_extension(mut self, extension: impl ContextExtension + 'static) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Replace the source of the `date` key
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Entity being scaffolded
    #[must_use]
    pub const fn entity(&self) -> &EntityDescriptor {
        &self.entity
    }

    /// Directory templates are read from
    #[must_use]
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Directory outputs are written into
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Render mode in effect
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Build the merge context for a render
    ///
    /// A new context is built on every call, so `date` always reflects the
    /// clock at the time of the render.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a registered extension.
    pub fn merge_fields(&self) -> Result<MergeContext> {
        let mut context = MergeContext::build(&self.entity, (self.clock)());
        for extension in &self.extensions {
            extension.extend(&self.entity, &mut context)?;
        }
        tracing::debug!(
            entity = %self.entity.qualified_name(),
            fields = context.fields().len(),
            date = %context.date_string(),
            "built merge context"
        );
        Ok(context)
    }

    /// Render one template to one output file, chainably
    ///
    /// `out_file_name` is itself a template, so `"${Entity}Dao.java"` works.
    ///
    /// # Errors
    ///
    /// See [`Scaffold::render_unit`].
    pub fn render(&self, template_name: &str, out_file_name: &str) -> Result<&Self> {
        self.render_unit(&RenderUnit::new(template_name, out_file_name))?;
        Ok(self)
    }

    /// Render one unit and report what happened to its output
    ///
    /// An existing output is skipped without loading the template. Otherwise
    /// the template is loaded and rendered completely before anything is
    /// written, so a failure leaves no output behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A context extension fails
    /// - The output or template name does not render, or renders empty
    /// - The template cannot be read ([`ScaffoldError::TemplateNotFound`])
    /// - The body does not render ([`ScaffoldError::Substitution`])
    /// - The output cannot be written ([`ScaffoldError::Filesystem`])
    pub fn render_unit(&self, unit: &RenderUnit) -> Result<WriteOutcome> {
        let _span = tracing::debug_span!(
            "render",
            entity = %self.entity.name,
            template = %unit.template
        )
        .entered();

        let context = self.merge_fields()?;

        let relative = self.resolve_name(&unit.output, &context)?;
        let target = self.output_root.join(relative);
        if target.exists() {
            return Ok(writer::skip(&target));
        }

        let template_name = self.resolve_name(&unit.template, &context)?;
        let template_path = self.template_root.join(template_name);
        let template = fs::read_to_string(&template_path).map_err(|source| {
            ScaffoldError::TemplateNotFound {
                path: template_path.clone(),
                source,
            }
        })?;
        tracing::debug!(template = %template_path.display(), target = %target.display(), "rendering");

        let body = self.renderer.render(&template, &context, self.mode)?;
        writer::write_if_absent(&target, &body)
    }

    /// Render units in order, stopping at the first error
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Scaffold::render_unit`]; outputs
    /// written before it are kept.
    pub fn render_all<'a>(
        &self,
        units: impl IntoIterator<Item = &'a RenderUnit>,
    ) -> Result<Vec<WriteOutcome>> {
        units.into_iter().map(|unit| self.render_unit(unit)).collect()
    }

    fn resolve_name(&self, name_template: &str, context: &MergeContext) -> Result<String> {
        let resolved = self.renderer.render(name_template, context, self.mode)?;
        let resolved = resolved.trim();
        if resolved.is_empty() {
            return Err(ScaffoldError::Configuration(format!(
                "Name template '{name_template}' resolved to an empty path"
            )));
        }
        Ok(resolved.to_string())
    }
}

impl fmt::Debug for Scaffold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scaffold")
            .field("entity", &self.entity)
            .field("template_root", &self.template_root)
            .field("output_root", &self.output_root)
            .field("mode", &self.mode)
            .field("extensions", &self.extensions.len())
            .finish_non_exhaustive()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
