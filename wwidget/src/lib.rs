//! Validation, rendering, and persistence of Übersicht widget scripts.
//!
//! The pipeline is `validate -> render -> persist`: a raw JSON payload is
//! checked against the active [`SchemaVariant`], turned into a
//! [`RenderedScript`], and written to a [`TargetFile`] by a
//! [`PersistenceSink`]. A [`Linter`] may be consulted on the render function
//! in between.
//!
//! ```rust
//! use wwidget::{SchemaVariant, render};
//!
//! let args = SchemaVariant::Freeform
//!     .validate(r#"{"jsxContent":"export const refreshFrequency = 1000"}"#)
//!     .expect("payload should validate");
//! assert_eq!(render(&args).as_str(), "export const refreshFrequency = 1000");
//! ```

mod datasource;
mod error;
mod lint;
mod persist;
mod render;
mod schema;

pub mod prelude {
    pub use crate::{
        ArgumentSet, FilesystemSink, Linter, PersistResult, PersistenceSink, RenderedScript,
        SchemaVariant, TargetFile, ValidationError, render,
    };
}

pub use datasource::{DataSource, DataSourceTable};
pub use error::{LintError, LintErrorKind, ValidationError, Violation};
pub use lint::{
    CommandLinter, DEFAULT_LINT_TIMEOUT, LINT_PRELUDE, Linter, NoopLinter, lint_render_function,
};
pub use persist::{FilesystemSink, PersistResult, PersistenceSink, TARGET_FILE_NAME, TargetFile};
pub use render::{RenderedScript, escape_command_literal, render};
pub use schema::{
    ArgumentSet, BASH_COMMAND, CSS_POSITIONING, FreeformArguments, JSX_CONTENT, REFRESH_FREQUENCY,
    RENDER_FUNCTION, SchemaVariant, StructuredArguments,
};
