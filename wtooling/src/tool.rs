//! The contract every tool exposed to the session implements.

use wcommon::BoxFuture;

use crate::{ToolDefinition, ToolError, ToolExecutionContext};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Whether the runtime may drop an in-flight invocation when its deadline
    /// passes. Tools whose effects outlive the future (a write handed to a
    /// blocking thread) return `false` and always run to completion.
    fn interruptible(&self) -> bool {
        true
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}
