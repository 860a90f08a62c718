//! Tool execution errors and classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidArguments,
    Execution,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, message)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<String>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    /// Errors caused by what the model asked for rather than by the host.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::InvalidArguments | ToolErrorKind::NotFound
        )
    }

    /// Text suitable for handing back to the model as a tool result.
    pub fn to_result_text(&self) -> String {
        match self.kind {
            ToolErrorKind::NotFound => format!("Tool call failed: {}", self.message),
            ToolErrorKind::InvalidArguments => {
                format!("Tool call rejected, invalid arguments: {}", self.message)
            }
            ToolErrorKind::Execution => format!("Tool call failed: {}", self.message),
            ToolErrorKind::Timeout => format!("Tool call timed out: {}", self.message),
        }
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_are_classified() {
        assert!(ToolError::invalid_arguments("bad args").is_caller_error());
        assert!(ToolError::not_found("missing").is_caller_error());
        assert!(!ToolError::timeout("slow").is_caller_error());
    }

    #[test]
    fn context_fields_are_included_in_display() {
        let error = ToolError::not_found("missing")
            .with_tool_name("WriteUbersichtWidgetToFileSystem")
            .with_tool_call_id("call_1");

        let rendered = error.to_string();
        assert!(rendered.contains("WriteUbersichtWidgetToFileSystem"));
        assert!(rendered.contains("call_1"));
    }

    #[test]
    fn result_text_names_the_failure() {
        let text = ToolError::timeout("exceeded 5000ms").to_result_text();
        assert_eq!(text, "Tool call timed out: exceeded 5000ms");
    }
}
