//! Deployment configuration for the widget tools.
//!
//! Values come from [`Default`], a JSON document, and `WIDGETSMITH_*`
//! environment overrides, in that order.
//!
//! ```rust
//! use wagent::WidgetToolConfig;
//! use wwidget::SchemaVariant;
//!
//! let config = WidgetToolConfig::from_json_str(
//!     r#"{"widgetsRoot": "/tmp/widgets", "subfolder": "clock", "variant": "freeform"}"#,
//! )
//! .expect("config should parse");
//!
//! assert_eq!(config.variant, SchemaVariant::Freeform);
//! assert_eq!(config.target().path().to_str(), Some("/tmp/widgets/clock/index.jsx"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use wwidget::{CommandLinter, DEFAULT_LINT_TIMEOUT, SchemaVariant, TargetFile};

pub const ENV_WIDGETS_ROOT: &str = "WIDGETSMITH_WIDGETS_ROOT";
pub const ENV_SUBFOLDER: &str = "WIDGETSMITH_SUBFOLDER";
pub const ENV_VARIANT: &str = "WIDGETSMITH_VARIANT";

pub const DEFAULT_SUBFOLDER: &str = "hwta";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Parse,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub message: String,
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Parse, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid, message)
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LintConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for LintConfig {
    fn default() -> Self {
        let eslint = CommandLinter::eslint("eslint.config.mjs");
        Self {
            enabled: false,
            program: eslint.program().to_string(),
            args: eslint.args().to_vec(),
            timeout_ms: DEFAULT_LINT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl LintConfig {
    pub fn linter(&self) -> CommandLinter {
        CommandLinter::new(self.program.clone(), self.args.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WidgetToolConfig {
    /// Übersicht's widgets directory.
    pub widgets_root: PathBuf,
    /// Directory under `widgets_root` that receives `index.jsx`.
    pub subfolder: String,
    pub variant: SchemaVariant,
    pub lint: LintConfig,
    /// Also expose the data-source listing tool.
    pub list_data_sources: bool,
    /// Attach a per-stage trace to each invocation report.
    pub trace: bool,
    /// Deadline for tools the runtime may abandon; the write tool always
    /// runs to completion.
    pub tool_timeout_ms: Option<u64>,
}

impl Default for WidgetToolConfig {
    fn default() -> Self {
        Self {
            widgets_root: default_widgets_root(),
            subfolder: DEFAULT_SUBFOLDER.to_string(),
            variant: SchemaVariant::default(),
            lint: LintConfig::default(),
            list_data_sources: false,
            trace: false,
            tool_timeout_ms: None,
        }
    }
}

impl WidgetToolConfig {
    pub fn new(widgets_root: impl Into<PathBuf>) -> Self {
        Self::default().with_widgets_root(widgets_root)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|error| ConfigError::parse(format!("invalid widget tool config: {error}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `WIDGETSMITH_*` environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(root) = lookup(ENV_WIDGETS_ROOT).filter(|value| !value.trim().is_empty()) {
            self.widgets_root = PathBuf::from(root);
        }
        if let Some(subfolder) = lookup(ENV_SUBFOLDER) {
            self.subfolder = subfolder.trim().to_string();
        }
        if let Some(variant) = lookup(ENV_VARIANT) {
            self.variant = SchemaVariant::parse(&variant).ok_or_else(|| {
                ConfigError::invalid(format!("{ENV_VARIANT} has unknown variant '{variant}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_widgets_root(mut self, widgets_root: impl Into<PathBuf>) -> Self {
        self.widgets_root = widgets_root.into();
        self
    }

    pub fn with_subfolder(mut self, subfolder: impl Into<String>) -> Self {
        self.subfolder = subfolder.into().trim().to_string();
        self
    }

    pub fn with_variant(mut self, variant: SchemaVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_lint(mut self, lint: LintConfig) -> Self {
        self.lint = lint;
        self
    }

    pub fn with_data_sources_tool(mut self, enabled: bool) -> Self {
        self.list_data_sources = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_ms.map(Duration::from_millis)
    }

    pub fn target(&self) -> TargetFile {
        TargetFile::in_widgets_root(&self.widgets_root, &self.subfolder)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let subfolder = self.subfolder.trim();
        if subfolder.is_empty() {
            return Err(ConfigError::invalid("subfolder cannot be empty"));
        }
        if subfolder != self.subfolder {
            return Err(ConfigError::invalid(format!(
                "subfolder '{}' has surrounding whitespace",
                self.subfolder
            )));
        }
        if subfolder.contains(['/', '\\']) || subfolder == "." || subfolder == ".." {
            return Err(ConfigError::invalid(format!(
                "subfolder '{}' must be a single directory name",
                self.subfolder
            )));
        }
        if self.widgets_root.as_os_str().is_empty() {
            return Err(ConfigError::invalid("widgets root cannot be empty"));
        }
        if self.lint.enabled && self.lint.timeout_ms == 0 {
            return Err(ConfigError::invalid("lint timeout must be greater than 0"));
        }
        if self.lint.enabled && self.lint.program.trim().is_empty() {
            return Err(ConfigError::invalid("lint program cannot be empty"));
        }
        if self.tool_timeout_ms == Some(0) {
            return Err(ConfigError::invalid("tool timeout must be greater than 0"));
        }
        Ok(())
    }
}

fn default_widgets_root() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("Library")
        .join("Application Support")
        .join("Übersicht")
        .join("widgets")
}
