//! Tool-calling contract between the widgetsmith tools and the session that
//! hosts the model.
//!
//! The session sees a list of [`ToolDefinition`]s, emits [`ToolCall`]s, and
//! hands them to a [`ToolRuntime`], which resolves the tool in a
//! [`ToolRegistry`] and returns the tool's text output.

mod error;
mod hooks;
mod model;
mod registry;
mod runtime;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, Tool, ToolCall, ToolDefinition, ToolError, ToolErrorKind,
        ToolExecutionContext, ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime,
        ToolRuntimeHooks,
    };
}

pub use error::{ToolError, ToolErrorKind};
pub use hooks::{FanoutToolRuntimeHooks, NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use model::{ToolCall, ToolDefinition};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use tool::{Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
