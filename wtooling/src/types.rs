//! Per-invocation context handed to a tool, and the text it returns.

use wcommon::{CallId, MetadataMap, SessionId, TraceId};

use crate::ToolCall;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    pub trace_id: Option<TraceId>,
    /// Stamped by the runtime before the tool runs when the caller left it
    /// empty; tools use it to correlate their own events.
    pub call_id: Option<CallId>,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            trace_id: None,
            call_id: None,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_call_id(mut self, call_id: impl Into<CallId>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The stamped call id, or a fresh one when none was assigned.
    pub fn call_id_or_next(&self) -> CallId {
        self.call_id.clone().unwrap_or_else(CallId::next)
    }
}

/// Text output of one call, keyed by the id the model gave the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionResult {
    pub tool_call_id: String,
    pub output: String,
}

impl ToolExecutionResult {
    pub fn new(tool_call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            output: output.into(),
        }
    }

    pub fn from_call(call: &ToolCall, output: impl Into<String>) -> Self {
        Self::new(call.id.clone(), output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_call_id_is_kept() {
        let context = ToolExecutionContext::new("session-1").with_call_id("0000beef");
        assert_eq!(context.call_id_or_next().as_str(), "0000beef");
    }

    #[test]
    fn missing_call_id_is_generated() {
        let context = ToolExecutionContext::new("session-1");
        assert_eq!(context.call_id_or_next().as_str().len(), 8);
        assert!(context.call_id.is_none());
    }
}
