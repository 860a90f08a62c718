//! The widget-writing tool exposed to the session.
//!
//! Every invocation ends in text. Validation, lint, and persistence failures
//! are described in the returned string instead of being raised, so the
//! session can relay them like any other tool result.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use wcommon::CallId;
use wtooling::{Tool, ToolDefinition, ToolError, ToolExecutionContext, ToolFuture};
use wwidget::{
    ArgumentSet, FilesystemSink, Linter, PersistResult, PersistenceSink, SchemaVariant,
    TargetFile, lint_render_function, render,
};

use crate::{
    InvocationObserver, InvocationOutcome, InvocationReport, InvocationStage, InvocationTrace,
    LintStatus, NoopInvocationObserver, WidgetToolConfig,
};

pub const WRITE_WIDGET_TOOL_NAME: &str = "WriteUbersichtWidgetToFileSystem";
pub const WRITE_WIDGET_TOOL_DESCRIPTION: &str = "Writes an Übersicht Widget to the file system. \
     Call this tool as the last step in processing a prompt that generates a widget.";

pub struct WriteWidgetTool {
    variant: SchemaVariant,
    target: TargetFile,
    sink: Arc<dyn PersistenceSink>,
    linter: Option<Arc<dyn Linter>>,
    observer: Arc<dyn InvocationObserver>,
    trace: bool,
}

impl WriteWidgetTool {
    pub fn new(variant: SchemaVariant, target: TargetFile) -> Self {
        Self {
            variant,
            target,
            sink: Arc::new(FilesystemSink::new()),
            linter: None,
            observer: Arc::new(NoopInvocationObserver),
            trace: false,
        }
    }

    /// Variant, target, trace flag, and (when enabled) the command linter
    /// from `config`.
    pub fn from_config(config: &WidgetToolConfig) -> Self {
        let tool = Self::new(config.variant, config.target()).with_trace(config.trace);
        if config.lint.enabled {
            tool.with_linter(Arc::new(config.lint.linter()))
        } else {
            tool
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_linter(mut self, linter: Arc<dyn Linter>) -> Self {
        self.linter = Some(linter);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn InvocationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    pub fn target(&self) -> &TargetFile {
        &self.target
    }

    pub fn definition_for(variant: SchemaVariant) -> ToolDefinition {
        ToolDefinition::with_schema(
            WRITE_WIDGET_TOOL_NAME,
            WRITE_WIDGET_TOOL_DESCRIPTION,
            &variant.input_schema(),
        )
    }

    /// Runs validate, lint, render, and persist for one raw argument payload.
    pub async fn invoke_detailed(&self, raw_arguments: &str) -> InvocationReport {
        self.invoke_as(CallId::next(), raw_arguments).await
    }

    async fn invoke_as(&self, call_id: CallId, raw_arguments: &str) -> InvocationReport {
        let started = Instant::now();
        let mut trace = InvocationTrace::new(call_id.clone(), self.variant);
        self.observer.on_invocation_start(&call_id, self.variant);

        let stage_started = Instant::now();
        let validated = self.variant.validate(raw_arguments);
        trace.record(InvocationStage::Validate, stage_started.elapsed());
        let args = match validated {
            Ok(args) => args,
            Err(error) => {
                let reason = error.to_string();
                self.observer.on_invocation_failure(
                    &call_id,
                    InvocationStage::Validate,
                    &reason,
                    started.elapsed(),
                );
                return self.finish(
                    format!("Error creating widget. Invalid arguments: {reason}"),
                    InvocationOutcome::Rejected(error),
                    trace,
                );
            }
        };
        self.observer.on_validated(&call_id, &args);

        if let (Some(linter), ArgumentSet::Structured(structured)) = (&self.linter, &args) {
            let stage_started = Instant::now();
            let linted = lint_render_function(linter.as_ref(), &structured.render_function).await;
            trace.record(InvocationStage::Lint, stage_started.elapsed());
            match linted {
                Ok(None) => trace.lint = LintStatus::Clean,
                Ok(Some(diagnostics)) => {
                    trace.lint = LintStatus::Diagnostics;
                    self.observer.on_invocation_failure(
                        &call_id,
                        InvocationStage::Lint,
                        &diagnostics,
                        started.elapsed(),
                    );
                    return self.finish(
                        format!(
                            "Error creating widget. {} is an invalid render function: {diagnostics}",
                            structured.render_function
                        ),
                        InvocationOutcome::LintFailed { diagnostics },
                        trace,
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        phase = "lint",
                        event = "unavailable",
                        call_id = %call_id,
                        error = %error
                    );
                    trace.lint = LintStatus::Unavailable(error.to_string());
                }
            }
        }

        let stage_started = Instant::now();
        let script = render(&args);
        trace.record(InvocationStage::Render, stage_started.elapsed());
        trace.rendered_bytes = Some(script.len());
        self.observer.on_rendered(&call_id, &script);

        let stage_started = Instant::now();
        let persisted = self.sink.persist(&script, &self.target).await;
        trace.record(InvocationStage::Persist, stage_started.elapsed());

        match persisted {
            PersistResult::Written { path, bytes } => {
                self.observer
                    .on_persisted(&call_id, &path, started.elapsed());
                self.finish(
                    success_text(&path),
                    InvocationOutcome::Written { path, bytes },
                    trace,
                )
            }
            PersistResult::Failure { reason } => {
                self.observer.on_invocation_failure(
                    &call_id,
                    InvocationStage::Persist,
                    &reason,
                    started.elapsed(),
                );
                self.finish(
                    format!("Widget JSX script generated but failed to save: {reason}"),
                    InvocationOutcome::PersistFailed { reason },
                    trace,
                )
            }
        }
    }

    fn finish(
        &self,
        result_text: String,
        outcome: InvocationOutcome,
        trace: InvocationTrace,
    ) -> InvocationReport {
        tracing::debug!(
            phase = "widget",
            event = "invocation_complete",
            call_id = %trace.call_id,
            variant = %trace.variant,
            written = outcome.is_written(),
            failed_stage = outcome.failed_stage().map(InvocationStage::as_str),
            elapsed_ms = trace.total_elapsed().as_millis() as u64
        );

        InvocationReport {
            result_text,
            outcome,
            trace: self.trace.then_some(trace),
        }
    }
}

fn success_text(path: &Path) -> String {
    format!("Widget JSX script generated and saved to: {}", path.display())
}

impl Tool for WriteWidgetTool {
    fn definition(&self) -> ToolDefinition {
        Self::definition_for(self.variant)
    }

    /// A write handed to the sink finishes even if the caller stops waiting,
    /// so the result text must come from the completed invocation.
    fn interruptible(&self) -> bool {
        false
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move {
            let report = self.invoke_as(context.call_id_or_next(), args_json).await;
            Ok(report.result_text)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use wcommon::BoxFuture;
    use wwidget::{LintError, RenderedScript};

    use super::*;

    struct RecordingSink {
        writes: Mutex<Vec<(String, TargetFile)>>,
        fail_with: Option<String>,
    }

    impl RecordingSink {
        fn ok() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_with: Some(reason.to_string()),
            }
        }

        fn writes(&self) -> Vec<(String, TargetFile)> {
            self.writes.lock().expect("writes lock").clone()
        }
    }

    impl PersistenceSink for RecordingSink {
        fn persist<'a>(
            &'a self,
            script: &'a RenderedScript,
            target: &'a TargetFile,
        ) -> BoxFuture<'a, PersistResult> {
            Box::pin(async move {
                if let Some(reason) = &self.fail_with {
                    return PersistResult::failure(reason.clone());
                }
                self.writes
                    .lock()
                    .expect("writes lock")
                    .push((script.as_str().to_string(), target.clone()));
                PersistResult::Written {
                    path: target.path(),
                    bytes: script.len(),
                }
            })
        }
    }

    struct FixedLinter(Result<Option<String>, LintError>);

    impl Linter for FixedLinter {
        fn lint<'a>(
            &'a self,
            _source: &'a str,
        ) -> BoxFuture<'a, Result<Option<String>, LintError>> {
            Box::pin(async move { self.0.clone() })
        }
    }

    #[derive(Default)]
    struct StageLog(Mutex<Vec<String>>);

    impl InvocationObserver for StageLog {
        fn on_invocation_start(&self, _call_id: &CallId, variant: SchemaVariant) {
            self.0.lock().expect("log lock").push(format!("start:{variant}"));
        }

        fn on_validated(&self, _call_id: &CallId, _args: &ArgumentSet) {
            self.0.lock().expect("log lock").push("validated".to_string());
        }

        fn on_rendered(&self, _call_id: &CallId, script: &RenderedScript) {
            self.0
                .lock()
                .expect("log lock")
                .push(format!("rendered:{}", script.len()));
        }

        fn on_persisted(&self, _call_id: &CallId, _path: &Path, _elapsed: Duration) {
            self.0.lock().expect("log lock").push("persisted".to_string());
        }

        fn on_invocation_failure(
            &self,
            _call_id: &CallId,
            stage: InvocationStage,
            _reason: &str,
            _elapsed: Duration,
        ) {
            self.0
                .lock()
                .expect("log lock")
                .push(format!("failed:{}", stage.as_str()));
        }
    }

    const VALID: &str = r#"{
        "bashCommand": "echo hi",
        "refreshFrequency": 1000,
        "renderFunction": "({output}) => <div>{output}</div>",
        "cssPositioning": "top: 20px; left: 20px;"
    }"#;

    fn tool_with(sink: Arc<RecordingSink>) -> WriteWidgetTool {
        WriteWidgetTool::new(SchemaVariant::Structured, TargetFile::new("/widgets/hwta"))
            .with_sink(sink)
    }

    #[tokio::test]
    async fn valid_arguments_are_rendered_and_persisted() {
        let sink = Arc::new(RecordingSink::ok());
        let log = Arc::new(StageLog::default());
        let tool = tool_with(Arc::clone(&sink))
            .with_observer(Arc::clone(&log) as Arc<dyn InvocationObserver>);

        let report = tool.invoke_detailed(VALID).await;

        assert!(report.is_success());
        assert_eq!(
            report.result_text,
            format!(
                "Widget JSX script generated and saved to: {}",
                Path::new("/widgets/hwta/index.jsx").display()
            )
        );
        let writes = sink.writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].0.contains("export const command = \"echo hi\""));
        assert!(writes[0].0.contains("export const refreshFrequency = 1000"));
        assert!(report.trace.is_none());

        let events = log.0.lock().expect("log lock").clone();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], "start:structured");
        assert_eq!(events[1], "validated");
        assert!(events[2].starts_with("rendered:"));
        assert_eq!(events[3], "persisted");
    }

    #[tokio::test]
    async fn zero_refresh_frequency_is_reported_without_writing() {
        let sink = Arc::new(RecordingSink::ok());
        let tool = tool_with(Arc::clone(&sink));

        let report = tool
            .invoke_detailed(&VALID.replace("1000", "0"))
            .await;

        assert_eq!(
            report.result_text,
            "Error creating widget. Invalid arguments: Refresh frequency must be greater than 0"
        );
        assert!(matches!(report.outcome, InvocationOutcome::Rejected(_)));
        assert!(sink.writes().is_empty());
    }

    #[tokio::test]
    async fn persistence_failures_become_result_text() {
        let tool = tool_with(Arc::new(RecordingSink::failing("disk full")));

        let output = tool
            .invoke(VALID, &ToolExecutionContext::new("session-1"))
            .await
            .expect("tool never raises");

        assert_eq!(
            output,
            "Widget JSX script generated but failed to save: disk full"
        );
    }

    #[tokio::test]
    async fn lint_diagnostics_stop_the_write() {
        let sink = Arc::new(RecordingSink::ok());
        let tool = tool_with(Arc::clone(&sink))
            .with_linter(Arc::new(FixedLinter(Ok(Some(
                "1:30 Parsing error: Unexpected token".to_string(),
            )))))
            .with_trace(true);

        let report = tool.invoke_detailed(VALID).await;

        assert_eq!(
            report.result_text,
            "Error creating widget. ({output}) => <div>{output}</div> is an invalid render function: 1:30 Parsing error: Unexpected token"
        );
        assert_eq!(report.outcome.failed_stage(), Some(InvocationStage::Lint));
        let trace = report.trace.expect("trace enabled");
        assert_eq!(trace.lint, LintStatus::Diagnostics);
        assert_eq!(trace.stage_names(), vec!["validate", "lint"]);
        assert!(sink.writes().is_empty());
    }

    #[tokio::test]
    async fn unavailable_linter_fails_open() {
        let sink = Arc::new(RecordingSink::ok());
        let tool = tool_with(Arc::clone(&sink))
            .with_linter(Arc::new(FixedLinter(Err(LintError::timeout("too slow")))))
            .with_trace(true);

        let report = tool.invoke_detailed(VALID).await;

        assert!(report.is_success());
        assert_eq!(sink.writes().len(), 1);
        let trace = report.trace.expect("trace enabled");
        assert!(matches!(trace.lint, LintStatus::Unavailable(_)));
        assert_eq!(
            trace.stage_names(),
            vec!["validate", "lint", "render", "persist"]
        );
        assert_eq!(trace.rendered_bytes, Some(sink.writes()[0].0.len()));
    }

    #[tokio::test]
    async fn freeform_variant_writes_content_verbatim_and_skips_lint() {
        let sink = Arc::new(RecordingSink::ok());
        let tool = WriteWidgetTool::new(SchemaVariant::Freeform, TargetFile::new("/widgets/x"))
            .with_sink(Arc::clone(&sink) as Arc<dyn PersistenceSink>)
            .with_linter(Arc::new(FixedLinter(Ok(Some("never consulted".to_string())))))
            .with_trace(true);

        let report = tool
            .invoke_detailed(r#"{"jsxContent":"export const refreshFrequency = 5"}"#)
            .await;

        assert!(report.is_success());
        assert_eq!(sink.writes()[0].0, "export const refreshFrequency = 5");
        assert_eq!(report.trace.expect("trace enabled").lint, LintStatus::Skipped);
    }

    #[derive(Default)]
    struct SeenCallIds(Mutex<Vec<CallId>>);

    impl InvocationObserver for SeenCallIds {
        fn on_invocation_start(&self, call_id: &CallId, _variant: SchemaVariant) {
            self.0.lock().expect("ids lock").push(call_id.clone());
        }
    }

    #[tokio::test]
    async fn session_invocations_reuse_the_context_call_id() {
        let seen = Arc::new(SeenCallIds::default());
        let tool = tool_with(Arc::new(RecordingSink::ok()))
            .with_observer(Arc::clone(&seen) as Arc<dyn InvocationObserver>);

        tool.invoke(
            VALID,
            &ToolExecutionContext::new("session-1").with_call_id("0000f00d"),
        )
        .await
        .expect("tool never raises");

        assert!(!tool.interruptible());
        assert_eq!(
            seen.0.lock().expect("ids lock").clone(),
            vec![CallId::new("0000f00d")]
        );
    }

    #[test]
    fn definition_advertises_the_active_schema() {
        let tool = WriteWidgetTool::new(SchemaVariant::Freeform, TargetFile::new("/w"));
        let definition = tool.definition();

        assert_eq!(definition.name, WRITE_WIDGET_TOOL_NAME);
        assert!(definition.description.starts_with("Writes an Übersicht Widget"));
        let schema = definition.schema_value().expect("schema should be JSON");
        assert_eq!(schema["required"][0], "jsxContent");
    }
}
