//! Runtime wiring helpers for hosting the widget tools in a session.

use std::sync::Arc;

use crate::{
    ConfigError, FanoutInvocationObserver, FanoutToolRuntimeHooks, InvocationObserver,
    MetricsObservabilityHooks, SafeInvocationObserver, SafeToolHooks, ToolRuntimeHooks,
    TracingObservabilityHooks, WidgetAgent, WidgetAgentBuilder, WidgetToolConfig,
};

pub fn build_agent(config: WidgetToolConfig) -> Result<WidgetAgent, ConfigError> {
    WidgetAgent::from_config(config)
}

/// Agent configured from defaults plus `WIDGETSMITH_*` environment overrides.
pub fn build_agent_from_env() -> Result<WidgetAgent, ConfigError> {
    build_agent(WidgetToolConfig::from_env()?)
}

/// Tracing and metrics hooks, each wrapped so a panicking hook cannot break a call.
pub fn observability_hooks() -> (Arc<dyn ToolRuntimeHooks>, Arc<dyn InvocationObserver>) {
    let runtime_hooks = FanoutToolRuntimeHooks::new()
        .with(Arc::new(SafeToolHooks::new(TracingObservabilityHooks)))
        .with(Arc::new(SafeToolHooks::new(MetricsObservabilityHooks)));
    let observer = FanoutInvocationObserver::new()
        .with(Arc::new(SafeInvocationObserver::new(TracingObservabilityHooks)))
        .with(Arc::new(SafeInvocationObserver::new(MetricsObservabilityHooks)));

    (Arc::new(runtime_hooks), Arc::new(observer))
}

pub fn observed_agent_builder(config: WidgetToolConfig) -> WidgetAgentBuilder {
    let (runtime_hooks, observer) = observability_hooks();
    WidgetAgent::builder(config)
        .runtime_hooks(runtime_hooks)
        .observer(observer)
}

pub fn build_observed_agent(config: WidgetToolConfig) -> Result<WidgetAgent, ConfigError> {
    observed_agent_builder(config).build()
}
