//! Unified facade over the widgetsmith workspace crates.
//!
//! This crate is designed to be the single dependency for a host that lets a
//! model write Übersicht widgets. It re-exports the workspace crates and adds
//! wiring helpers and macros for building agents and tool calls.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use wagent;
pub use wcommon;
pub use wobserve;
pub use wtooling;
pub use wwidget;

pub use wagent::{
    AgentDirective, ConfigError, ConfigErrorKind, FanoutInvocationObserver, InvocationObserver,
    InvocationOutcome, InvocationReport, InvocationStage, InvocationTrace,
    LIST_DATA_SOURCES_TOOL_NAME, LintConfig, LintStatus, ListDataSourcesTool,
    NoopInvocationObserver, WRITE_WIDGET_TOOL_NAME, WidgetAgent, WidgetAgentBuilder,
    WidgetToolConfig, WriteWidgetTool,
};
pub use wcommon::{BoxFuture, CallId, SessionId, TraceId};
pub use wobserve::{
    MetricsObservabilityHooks, SafeInvocationObserver, SafeToolHooks, TracingObservabilityHooks,
};
pub use wtooling::{
    DefaultToolRuntime, FanoutToolRuntimeHooks, NoopToolRuntimeHooks, Tool, ToolCall,
    ToolDefinition, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolFuture, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
};
pub use wwidget::{
    ArgumentSet, CommandLinter, DataSource, DataSourceTable, FilesystemSink, FreeformArguments,
    LintError, Linter, PersistResult, PersistenceSink, RenderedScript, SchemaVariant,
    StructuredArguments, TargetFile, ValidationError, render,
};

pub use runtime::{
    build_agent, build_agent_from_env, build_observed_agent, observability_hooks,
    observed_agent_builder,
};
pub use util::{
    freeform_arguments_json, list_data_sources_call, parse_variant, structured_arguments_json,
    tool_context, write_widget_call,
};

#[cfg(test)]
mod tests {
    use crate::{SchemaVariant, WRITE_WIDGET_TOOL_NAME};

    #[test]
    fn ws_args_macro_builds_a_valid_structured_payload() {
        let payload = crate::ws_args!(
            command: "whoami",
            refresh: 1000,
            render: "({output}) => <span>{output}</span>",
            css: "top: 1px;",
        );

        let args = SchemaVariant::Structured
            .validate(&payload)
            .expect("payload should validate");
        assert_eq!(args.variant(), SchemaVariant::Structured);
    }

    #[test]
    fn ws_call_macro_targets_the_write_tool() {
        let call = crate::ws_call!("call-7", jsx: "export const className = \"top: 0;\"");

        assert_eq!(call.id, "call-7");
        assert_eq!(call.name, WRITE_WIDGET_TOOL_NAME);
        assert!(SchemaVariant::Freeform.validate(&call.arguments).is_ok());
    }
}
