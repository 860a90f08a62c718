//! Stage-level hooks for widget tool invocations.
//!
//! ```rust
//! use wagent::{InvocationObserver, NoopInvocationObserver};
//!
//! fn accepts_observer(_observer: &dyn InvocationObserver) {}
//!
//! accepts_observer(&NoopInvocationObserver);
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use wcommon::CallId;
use wwidget::{ArgumentSet, RenderedScript, SchemaVariant};

use crate::InvocationStage;

pub trait InvocationObserver: Send + Sync {
    fn on_invocation_start(&self, _call_id: &CallId, _variant: SchemaVariant) {}

    fn on_validated(&self, _call_id: &CallId, _args: &ArgumentSet) {}

    fn on_rendered(&self, _call_id: &CallId, _script: &RenderedScript) {}

    fn on_persisted(&self, _call_id: &CallId, _path: &Path, _elapsed: Duration) {}

    fn on_invocation_failure(
        &self,
        _call_id: &CallId,
        _stage: InvocationStage,
        _reason: &str,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvocationObserver;

impl InvocationObserver for NoopInvocationObserver {}

/// Forwards every event to each observer in registration order.
#[derive(Clone, Default)]
pub struct FanoutInvocationObserver {
    observers: Vec<Arc<dyn InvocationObserver>>,
}

impl FanoutInvocationObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn InvocationObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl InvocationObserver for FanoutInvocationObserver {
    fn on_invocation_start(&self, call_id: &CallId, variant: SchemaVariant) {
        for observer in &self.observers {
            observer.on_invocation_start(call_id, variant);
        }
    }

    fn on_validated(&self, call_id: &CallId, args: &ArgumentSet) {
        for observer in &self.observers {
            observer.on_validated(call_id, args);
        }
    }

    fn on_rendered(&self, call_id: &CallId, script: &RenderedScript) {
        for observer in &self.observers {
            observer.on_rendered(call_id, script);
        }
    }

    fn on_persisted(&self, call_id: &CallId, path: &Path, elapsed: Duration) {
        for observer in &self.observers {
            observer.on_persisted(call_id, path, elapsed);
        }
    }

    fn on_invocation_failure(
        &self,
        call_id: &CallId,
        stage: InvocationStage,
        reason: &str,
        elapsed: Duration,
    ) {
        for observer in &self.observers {
            observer.on_invocation_failure(call_id, stage, reason, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct CountingObserver(Mutex<usize>);

    impl InvocationObserver for CountingObserver {
        fn on_invocation_start(&self, _call_id: &CallId, _variant: SchemaVariant) {
            *self.0.lock().expect("count lock") += 1;
        }
    }

    #[test]
    fn fanout_reaches_every_observer() {
        let first = Arc::new(CountingObserver::default());
        let second = Arc::new(CountingObserver::default());
        let fanout = FanoutInvocationObserver::new()
            .with(Arc::clone(&first) as Arc<dyn InvocationObserver>)
            .with(Arc::clone(&second) as Arc<dyn InvocationObserver>)
            .with(Arc::new(NoopInvocationObserver));

        fanout.on_invocation_start(&CallId::new("00000001"), SchemaVariant::Freeform);

        assert_eq!(fanout.len(), 3);
        assert_eq!(*first.0.lock().expect("count lock"), 1);
        assert_eq!(*second.0.lock().expect("count lock"), 1);
    }
}
