//! What a widget tool invocation reports back.

use std::path::PathBuf;
use std::time::Duration;

use wcommon::CallId;
use wwidget::{SchemaVariant, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationStage {
    Validate,
    Lint,
    Render,
    Persist,
}

impl InvocationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Lint => "lint",
            Self::Render => "render",
            Self::Persist => "persist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    Written { path: PathBuf, bytes: usize },
    Rejected(ValidationError),
    LintFailed { diagnostics: String },
    PersistFailed { reason: String },
}

impl InvocationOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    /// Stage that stopped the invocation, if any.
    pub fn failed_stage(&self) -> Option<InvocationStage> {
        match self {
            Self::Written { .. } => None,
            Self::Rejected(_) => Some(InvocationStage::Validate),
            Self::LintFailed { .. } => Some(InvocationStage::Lint),
            Self::PersistFailed { .. } => Some(InvocationStage::Persist),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LintStatus {
    /// No linter configured, or the variant has no render function.
    Skipped,
    Clean,
    Diagnostics,
    /// The linter failed; the invocation carried on.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: InvocationStage,
    pub elapsed: Duration,
}

/// Structured replacement for step-by-step console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationTrace {
    pub call_id: CallId,
    pub variant: SchemaVariant,
    pub stages: Vec<StageTiming>,
    pub rendered_bytes: Option<usize>,
    pub lint: LintStatus,
}

impl InvocationTrace {
    pub fn new(call_id: CallId, variant: SchemaVariant) -> Self {
        Self {
            call_id,
            variant,
            stages: Vec::new(),
            rendered_bytes: None,
            lint: LintStatus::Skipped,
        }
    }

    pub fn record(&mut self, stage: InvocationStage, elapsed: Duration) {
        self.stages.push(StageTiming { stage, elapsed });
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|timing| timing.stage.as_str()).collect()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.stages.iter().map(|timing| timing.elapsed).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationReport {
    /// Text the session relays to the user, for success and failure alike.
    pub result_text: String,
    pub outcome: InvocationOutcome,
    pub trace: Option<InvocationTrace>,
}

impl InvocationReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_written()
    }
}
