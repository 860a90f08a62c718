//! Assembles the widget tools into a registry, a runtime, and a directive
//! that a chat session can be handed in one piece.

use std::sync::Arc;

use wtooling::{
    DefaultToolRuntime, NoopToolRuntimeHooks, ToolCall, ToolDefinition, ToolExecutionContext,
    ToolExecutionResult, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
};
use wwidget::{DataSourceTable, Linter, PersistenceSink};

use crate::{
    AgentDirective, ConfigError, InvocationObserver, ListDataSourcesTool, WRITE_WIDGET_TOOL_NAME,
    WidgetToolConfig, WriteWidgetTool,
};

pub struct WidgetAgentBuilder {
    config: WidgetToolConfig,
    sink: Option<Arc<dyn PersistenceSink>>,
    linter: Option<Arc<dyn Linter>>,
    observer: Option<Arc<dyn InvocationObserver>>,
    runtime_hooks: Arc<dyn ToolRuntimeHooks>,
    data_sources: DataSourceTable,
}

impl WidgetAgentBuilder {
    pub fn new(config: WidgetToolConfig) -> Self {
        Self {
            config,
            sink: None,
            linter: None,
            observer: None,
            runtime_hooks: Arc::new(NoopToolRuntimeHooks),
            data_sources: DataSourceTable::builtin(),
        }
    }

    pub fn sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Overrides the linter the config would otherwise build.
    pub fn linter(mut self, linter: Arc<dyn Linter>) -> Self {
        self.linter = Some(linter);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn InvocationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn runtime_hooks(mut self, runtime_hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.runtime_hooks = runtime_hooks;
        self
    }

    pub fn data_sources(mut self, data_sources: DataSourceTable) -> Self {
        self.data_sources = data_sources;
        self
    }

    pub fn build(self) -> Result<WidgetAgent, ConfigError> {
        self.config.validate()?;

        let mut write_tool = WriteWidgetTool::from_config(&self.config);
        if let Some(sink) = self.sink {
            write_tool = write_tool.with_sink(sink);
        }
        if let Some(linter) = self.linter {
            write_tool = write_tool.with_linter(linter);
        }
        if let Some(observer) = self.observer {
            write_tool = write_tool.with_observer(observer);
        }

        let mut registry = ToolRegistry::new();
        registry.register(write_tool);
        if self.config.list_data_sources {
            registry.register(ListDataSourcesTool::new(self.data_sources));
        }
        let registry = Arc::new(registry);

        let mut runtime = DefaultToolRuntime::new(Arc::clone(&registry)).with_hooks(self.runtime_hooks);
        if let Some(timeout) = self.config.tool_timeout() {
            runtime = runtime.with_timeout(timeout);
        }

        tracing::debug!(
            phase = "agent",
            event = "built",
            variant = %self.config.variant,
            widget_path = %self.config.target().path().display(),
            tools = registry.len(),
            lint = self.config.lint.enabled
        );

        Ok(WidgetAgent {
            directive: AgentDirective::for_variant(self.config.variant, WRITE_WIDGET_TOOL_NAME),
            config: self.config,
            registry,
            runtime: Arc::new(runtime),
        })
    }
}

#[derive(Clone)]
pub struct WidgetAgent {
    config: WidgetToolConfig,
    directive: AgentDirective,
    registry: Arc<ToolRegistry>,
    runtime: Arc<dyn ToolRuntime>,
}

impl WidgetAgent {
    pub fn builder(config: WidgetToolConfig) -> WidgetAgentBuilder {
        WidgetAgentBuilder::new(config)
    }

    pub fn from_config(config: WidgetToolConfig) -> Result<Self, ConfigError> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &WidgetToolConfig {
        &self.config
    }

    pub fn directive(&self) -> &AgentDirective {
        &self.directive
    }

    /// Instruction text for the session.
    pub fn instructions(&self) -> &str {
        self.directive.as_str()
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn runtime(&self) -> Arc<dyn ToolRuntime> {
        Arc::clone(&self.runtime)
    }

    /// Executes `call`; runtime errors come back as result text.
    pub async fn handle_tool_call(
        &self,
        call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolExecutionResult {
        let call_id = call.id.clone();
        match self.runtime.execute(call, context).await {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(
                    phase = "agent",
                    event = "tool_call_failed",
                    error = %error,
                    caller_error = error.is_caller_error()
                );
                ToolExecutionResult::new(call_id, error.to_result_text())
            }
        }
    }
}
