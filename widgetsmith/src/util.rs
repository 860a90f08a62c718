//! Small convenience constructors for common types.

use serde_json::json;

use crate::{
    FreeformArguments, LIST_DATA_SOURCES_TOOL_NAME, SchemaVariant, SessionId,
    StructuredArguments, ToolCall, ToolExecutionContext, WRITE_WIDGET_TOOL_NAME,
};

/// Argument payload a model would send for the structured variant.
pub fn structured_arguments_json(args: &StructuredArguments) -> String {
    json!({
        "bashCommand": args.bash_command,
        "refreshFrequency": args.refresh_frequency,
        "renderFunction": args.render_function,
        "cssPositioning": args.css_positioning,
    })
    .to_string()
}

pub fn freeform_arguments_json(args: &FreeformArguments) -> String {
    json!({ "jsxContent": args.jsx_content }).to_string()
}

pub fn write_widget_call(id: impl Into<String>, arguments_json: impl Into<String>) -> ToolCall {
    ToolCall::new(id, WRITE_WIDGET_TOOL_NAME, arguments_json)
}

pub fn list_data_sources_call(id: impl Into<String>) -> ToolCall {
    ToolCall::new(id, LIST_DATA_SOURCES_TOOL_NAME, "{}")
}

pub fn tool_context(session_id: impl Into<SessionId>) -> ToolExecutionContext {
    ToolExecutionContext::new(session_id)
}

/// Same names `WIDGETSMITH_VARIANT` accepts.
pub fn parse_variant(value: &str) -> Option<SchemaVariant> {
    SchemaVariant::parse(value)
}

#[cfg(test)]
mod tests {
    use crate::{ArgumentSet, SchemaVariant, StructuredArguments};

    use super::{parse_variant, structured_arguments_json, write_widget_call};

    #[test]
    fn parse_variant_accepts_what_the_environment_accepts() {
        assert_eq!(parse_variant("Structured"), Some(SchemaVariant::Structured));
        assert_eq!(parse_variant(" jsx "), Some(SchemaVariant::Freeform));
        for name in ["fields", "freeform", "free-form", "template", "raw", "hybrid"] {
            assert_eq!(parse_variant(name), SchemaVariant::parse(name), "{name}");
        }
        assert_eq!(parse_variant("raw"), None);
    }

    #[test]
    fn structured_payload_validates_back_to_the_same_arguments() {
        let args = StructuredArguments::new(
            "echo \"hi\"",
            30000,
            "({output}) => <b>{output}</b>",
            "top: 0; left: 0;",
        );
        let call = write_widget_call("call-1", structured_arguments_json(&args));

        let parsed = SchemaVariant::Structured
            .validate(&call.arguments)
            .expect("payload should validate");
        assert_eq!(parsed, ArgumentSet::from(args));
    }
}
