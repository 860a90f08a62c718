use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::time::Duration;

use wagent::{InvocationObserver, InvocationStage};
use wcommon::CallId;
use wtooling::{ToolCall, ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};
use wwidget::{ArgumentSet, RenderedScript, SchemaVariant};

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_start(tool_call, context)
        }));
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        }));
    }
}

pub struct SafeInvocationObserver<O> {
    inner: O,
}

impl<O> SafeInvocationObserver<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }
}

impl<O> InvocationObserver for SafeInvocationObserver<O>
where
    O: InvocationObserver,
{
    fn on_invocation_start(&self, call_id: &CallId, variant: SchemaVariant) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invocation_start(call_id, variant)
        }));
    }

    fn on_validated(&self, call_id: &CallId, args: &ArgumentSet) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_validated(call_id, args)));
    }

    fn on_rendered(&self, call_id: &CallId, script: &RenderedScript) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_rendered(call_id, script)));
    }

    fn on_persisted(&self, call_id: &CallId, path: &Path, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_persisted(call_id, path, elapsed)
        }));
    }

    fn on_invocation_failure(
        &self,
        call_id: &CallId,
        stage: InvocationStage,
        reason: &str,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_invocation_failure(call_id, stage, reason, elapsed)
        }));
    }
}
