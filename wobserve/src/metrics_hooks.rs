//! Metrics-based observability hooks for tool runtime and widget invocation stages.
//!
//! ```rust
//! use wobserve::MetricsObservabilityHooks;
//! use wtooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::path::Path;
use std::time::Duration;

use wagent::{InvocationObserver, InvocationStage};
use wcommon::CallId;
use wtooling::{ToolCall, ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};
use wwidget::{RenderedScript, SchemaVariant};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "widgetsmith_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "widgetsmith_tool_execution_success_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "widgetsmith_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "widgetsmith_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "widgetsmith_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl InvocationObserver for MetricsObservabilityHooks {
    fn on_invocation_start(&self, _call_id: &CallId, variant: SchemaVariant) {
        metrics::counter!(
            "widgetsmith_invocation_start_total",
            "variant" => variant.as_str()
        )
        .increment(1);
    }

    fn on_rendered(&self, _call_id: &CallId, script: &RenderedScript) {
        metrics::histogram!("widgetsmith_rendered_script_bytes").record(script.len() as f64);
    }

    fn on_persisted(&self, _call_id: &CallId, _path: &Path, elapsed: Duration) {
        metrics::counter!("widgetsmith_invocation_written_total").increment(1);
        metrics::histogram!(
            "widgetsmith_invocation_duration_seconds",
            "status" => "written"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_invocation_failure(
        &self,
        _call_id: &CallId,
        stage: InvocationStage,
        _reason: &str,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "widgetsmith_invocation_failure_total",
            "stage" => stage.as_str()
        )
        .increment(1);
        metrics::histogram!(
            "widgetsmith_invocation_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
