//! scaffold-kit: idempotent source scaffolding
//!
//! Renders `${...}` templates against an entity's merge context and writes
//! each result only if the target file does not exist yet. Hand-edited
//! outputs survive any number of reruns.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scaffold_kit::{EntityDescriptor, FieldSpec, Scaffold};
//!
//! # fn main() -> scaffold_kit::Result<()> {
//! let invoice = EntityDescriptor::new("ca.example", "Invoice")?
//!     .with_field(FieldSpec::new("id", "Long"))
//!     .with_field(FieldSpec::new("total", "BigDecimal"));
//!
//! Scaffold::new(invoice, "templates", "src/main/java/ca/example")
//!     .render("model.java", "${Entity}.java")?
//!     .render("dao.java", "dao/${Entity}Dao.java")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Merge Context
//!
//! | Key        | Value                                        |
//! |------------|----------------------------------------------|
//! | `package`  | entity namespace (`ca.example`)              |
//! | `Entity`   | entity simple name (`Invoice`)               |
//! | `entity`   | simple name, first letter lowered (`invoice`)|
//! | `fields`   | declared fields, `${f.type} ${f.name}`       |
//! | `date`     | today's local date, ISO format               |
//! | `scaffold` | naming helpers, see [`ScaffoldHelpers`]      |
//!
//! Extra keys can be added with a [`ContextExtension`].

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod layout;
pub mod naming;
pub mod observability;
pub mod recipe;
pub mod render;
pub mod writer;

pub use config::ScaffoldConfig;
pub use context::{ContextExtension, MergeContext, MERGE_KEYS};
pub use entity::{EntityDescriptor, FieldDescriptor, FieldSpec};
pub use error::{Result, ScaffoldError};
pub use generator::{RenderUnit, Scaffold};
pub use helpers::ScaffoldHelpers;
pub use layout::SourceConvention;
pub use recipe::Recipe;
pub use render::{MiniJinjaRenderer, RenderMode, TemplateRenderer};
pub use writer::WriteOutcome;
