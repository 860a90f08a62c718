//! Common imports for most widgetsmith applications.

pub use crate::{
    ArgumentSet, InvocationOutcome, InvocationReport, SchemaVariant, TargetFile, ToolCall,
    ToolDefinition, ToolExecutionContext, ToolExecutionResult, ToolRuntime, WidgetAgent,
    WidgetToolConfig, WriteWidgetTool, build_agent, build_observed_agent, parse_variant,
    tool_context, write_widget_call, ws_args, ws_call,
};
