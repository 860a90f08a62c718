//! Wire-level shapes exchanged with the session that hosts the model.
//!
//! ```rust
//! use serde_json::json;
//! use wtooling::{ToolCall, ToolDefinition};
//!
//! let definition = ToolDefinition::with_schema(
//!     "ListDataSources",
//!     "Lists available data sources",
//!     &json!({"type": "object", "properties": {}}),
//! );
//! let call = ToolCall::new("call_1", "ListDataSources", "{}");
//!
//! assert_eq!(definition.name, call.name);
//! assert!(definition.input_schema.contains("\"object\""));
//! ```

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the argument payload, serialized.
    pub input_schema: String,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: input_schema.into(),
        }
    }

    pub fn with_schema(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: &Value,
    ) -> Self {
        Self::new(name, description, input_schema.to_string())
    }

    /// Parses the stored schema back into a JSON value.
    pub fn schema_value(&self) -> Option<Value> {
        serde_json::from_str(&self.input_schema).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw JSON argument payload as emitted by the model.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}
