//! Tracing-based observability hooks for tool runtime and widget invocation stages.
//!
//! ```rust
//! use wobserve::TracingObservabilityHooks;
//! use wagent::InvocationObserver;
//!
//! fn accepts_observer(_observer: &dyn InvocationObserver) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_observer(&hooks);
//! ```

use std::path::Path;
use std::time::Duration;

use wagent::{InvocationObserver, InvocationStage};
use wcommon::CallId;
use wtooling::{ToolCall, ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};
use wwidget::{ArgumentSet, RenderedScript, SchemaVariant};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            call_id = context.call_id.as_ref().map(|id| id.as_str()),
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            call_id = context.call_id.as_ref().map(|id| id.as_str()),
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            output_bytes = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            session_id = %context.session_id,
            call_id = context.call_id.as_ref().map(|id| id.as_str()),
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            caller_error = error.is_caller_error(),
            error = %error
        );
    }
}

impl InvocationObserver for TracingObservabilityHooks {
    fn on_invocation_start(&self, call_id: &CallId, variant: SchemaVariant) {
        tracing::info!(
            phase = "widget",
            event = "invocation_start",
            call_id = %call_id,
            variant = %variant
        );
    }

    fn on_validated(&self, call_id: &CallId, args: &ArgumentSet) {
        tracing::debug!(
            phase = "widget",
            event = "validated",
            call_id = %call_id,
            variant = %args.variant()
        );
    }

    fn on_rendered(&self, call_id: &CallId, script: &RenderedScript) {
        tracing::debug!(
            phase = "widget",
            event = "rendered",
            call_id = %call_id,
            bytes = script.len()
        );
    }

    fn on_persisted(&self, call_id: &CallId, path: &Path, elapsed: Duration) {
        tracing::info!(
            phase = "widget",
            event = "persisted",
            call_id = %call_id,
            path = %path.display(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_invocation_failure(
        &self,
        call_id: &CallId,
        stage: InvocationStage,
        reason: &str,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "widget",
            event = "invocation_failure",
            call_id = %call_id,
            stage = stage.as_str(),
            elapsed_ms = elapsed.as_millis() as u64,
            reason
        );
    }
}
