//! Observability hooks for tool runtime and widget invocation stages.
//!
//! ```rust
//! use wobserve::{MetricsObservabilityHooks, SafeInvocationObserver, TracingObservabilityHooks};
//!
//! let _observer = SafeInvocationObserver::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeInvocationObserver, SafeToolHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeInvocationObserver, SafeToolHooks,
        TracingObservabilityHooks,
    };
}
