//! Widget-writing tools, their configuration, and the session directive.
//!
//! ```rust
//! use wagent::{WidgetAgent, WidgetToolConfig, WRITE_WIDGET_TOOL_NAME};
//!
//! let agent = WidgetAgent::from_config(WidgetToolConfig::new("/tmp/widgets"))
//!     .expect("agent should build");
//!
//! assert_eq!(agent.tool_definitions()[0].name, WRITE_WIDGET_TOOL_NAME);
//! assert!(agent.instructions().contains("Übersicht"));
//! ```

mod agent;
mod config;
mod directive;
mod list_tool;
mod observer;
mod types;
mod write_tool;

pub mod prelude {
    pub use crate::{
        AgentDirective, InvocationObserver, InvocationOutcome, InvocationReport,
        ListDataSourcesTool, WidgetAgent, WidgetAgentBuilder, WidgetToolConfig, WriteWidgetTool,
    };
}

pub use agent::{WidgetAgent, WidgetAgentBuilder};
pub use config::{
    ConfigError, ConfigErrorKind, DEFAULT_SUBFOLDER, ENV_SUBFOLDER, ENV_VARIANT,
    ENV_WIDGETS_ROOT, LintConfig, WidgetToolConfig,
};
pub use directive::AgentDirective;
pub use list_tool::{
    LIST_DATA_SOURCES_TOOL_DESCRIPTION, LIST_DATA_SOURCES_TOOL_NAME, ListDataSourcesTool,
};
pub use observer::{FanoutInvocationObserver, InvocationObserver, NoopInvocationObserver};
pub use types::{
    InvocationOutcome, InvocationReport, InvocationStage, InvocationTrace, LintStatus,
    StageTiming,
};
pub use write_tool::{WRITE_WIDGET_TOOL_DESCRIPTION, WRITE_WIDGET_TOOL_NAME, WriteWidgetTool};
