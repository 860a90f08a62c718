use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use wtooling::prelude::*;

/// Counts the keys of an object payload; anything else is a caller error.
struct KeyCount;

impl Tool for KeyCount {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "KeyCount",
            "Counts the keys of the argument object",
            r#"{"type":"object","additionalProperties":true}"#,
        )
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let call_id = context
                .call_id
                .clone()
                .ok_or_else(|| ToolError::execution("call id was not stamped"))?;
            match serde_json::from_str::<Value>(args_json) {
                Ok(Value::Object(map)) => Ok(format!("{} keys ({call_id})", map.len())),
                _ => Err(ToolError::invalid_arguments("expected a JSON object")),
            }
        })
    }
}

fn runtime() -> DefaultToolRuntime {
    DefaultToolRuntime::new(Arc::new(ToolRegistry::new().with(KeyCount)))
        .with_timeout(Duration::from_secs(1))
}

#[tokio::test]
async fn runtime_hands_the_tool_a_stamped_context() {
    let result = runtime()
        .execute(
            ToolCall::new("call_1", "KeyCount", r#"{"a":1,"b":2}"#),
            ToolExecutionContext::new("session-1").with_trace_id("trace-1"),
        )
        .await
        .expect("tool should run");

    assert_eq!(result.tool_call_id, "call_1");
    assert!(result.output.starts_with("2 keys ("));
}

#[tokio::test]
async fn argument_errors_carry_the_tool_and_call() {
    let error = runtime()
        .execute(
            ToolCall::new("call_2", "KeyCount", "[1, 2]"),
            ToolExecutionContext::new("session-1"),
        )
        .await
        .expect_err("array payload should fail");

    assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    assert_eq!(error.tool_name.as_deref(), Some("KeyCount"));
    assert_eq!(error.tool_call_id.as_deref(), Some("call_2"));
    assert_eq!(
        error.to_result_text(),
        "Tool call rejected, invalid arguments: expected a JSON object"
    );
}

#[test]
fn registered_definitions_keep_their_schema_parseable() {
    let registry = ToolRegistry::new().with(KeyCount);
    let schema = registry
        .definition("KeyCount")
        .and_then(ToolDefinition::schema_value)
        .expect("schema should be JSON");
    assert_eq!(schema["type"], "object");
}
