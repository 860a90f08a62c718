//! Name-keyed set of the tools offered to one session.
//!
//! Definitions are captured once at registration, so listing them for the
//! model never re-serializes a schema.
//!
//! ```rust
//! use wtooling::{Tool, ToolDefinition, ToolError, ToolExecutionContext, ToolFuture, ToolRegistry};
//!
//! struct Ping;
//!
//! impl Tool for Ping {
//!     fn definition(&self) -> ToolDefinition {
//!         ToolDefinition::new("Ping", "Answers pong", r#"{"type":"object"}"#)
//!     }
//!
//!     fn invoke<'a>(
//!         &'a self,
//!         _args_json: &'a str,
//!         _context: &'a ToolExecutionContext,
//!     ) -> ToolFuture<'a, Result<String, ToolError>> {
//!         Box::pin(async { Ok("pong".to_string()) })
//!     }
//! }
//!
//! let registry = ToolRegistry::new().with(Ping);
//! assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Ping"]);
//! ```

use std::sync::Arc;

use wcommon::Registry;

use crate::{Tool, ToolDefinition};

struct Entry {
    definition: ToolDefinition,
    tool: Arc<dyn Tool>,
}

#[derive(Default)]
pub struct ToolRegistry {
    entries: Registry<String, Entry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tool` under its definition name. Returns `true` when an entry
    /// with the same name was replaced.
    pub fn register<T>(&mut self, tool: T) -> bool
    where
        T: Tool + 'static,
    {
        let definition = tool.definition();
        let name = definition.name.clone();
        self.entries
            .insert(
                name,
                Entry {
                    definition,
                    tool: Arc::new(tool),
                },
            )
            .is_some()
    }

    pub fn with<T>(mut self, tool: T) -> Self
    where
        T: Tool + 'static,
    {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.entries.get(name).map(|entry| Arc::clone(&entry.tool))
    }

    pub fn definition(&self, name: &str) -> Option<&ToolDefinition> {
        self.entries.get(name).map(|entry| &entry.definition)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Definitions ordered by tool name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.entries
            .values()
            .map(|entry| entry.definition.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
