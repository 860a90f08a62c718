//! Optional syntax check of a render function through an external linter.
//!
//! The linter is a collaborator, not a gate the tool depends on: if it cannot
//! be started or does not answer in time the caller gets a [`LintError`] and
//! is expected to carry on as if the source were clean.

use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wcommon::BoxFuture;

use crate::LintError;

/// Prepended to a bare render function so the linter sees JSX in scope.
pub const LINT_PRELUDE: &str = "import React from 'react'; ";

pub const DEFAULT_LINT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait Linter: Send + Sync {
    /// `Ok(None)` means clean; `Ok(Some(text))` carries diagnostics.
    fn lint<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<Option<String>, LintError>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLinter;

impl Linter for NoopLinter {
    fn lint<'a>(&'a self, _source: &'a str) -> BoxFuture<'a, Result<Option<String>, LintError>> {
        Box::pin(async { Ok(None) })
    }
}

/// Lints `render_function` with [`LINT_PRELUDE`] in front of it.
pub async fn lint_render_function(
    linter: &dyn Linter,
    render_function: &str,
) -> Result<Option<String>, LintError> {
    let source = format!("{LINT_PRELUDE}{render_function}");
    linter.lint(&source).await
}

/// Runs a program that reads source on stdin and prints diagnostics.
///
/// Anything written to stdout or stderr counts as a diagnostic; silence is
/// clean. The exit status is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLinter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandLinter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_LINT_TIMEOUT,
        }
    }

    /// `npx eslint --quiet --stdin -c <config>` through a login zsh, so the
    /// user's node toolchain is on `PATH`.
    pub fn eslint(config_path: &str) -> Self {
        Self::new(
            "/bin/zsh",
            vec![
                "-lc".to_string(),
                format!("npx eslint --quiet --stdin -c {}", shell_quote(config_path)),
            ],
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run(&self, source: &str) -> Result<Option<String>, LintError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                LintError::unavailable(format!("failed to start '{}': {error}", self.program))
            })?;

        // Feed stdin on its own task so a linter that echoes its input cannot
        // fill the output pipe while we are still writing.
        let writer = child.stdin.take().map(|mut stdin| {
            let source = source.to_owned();
            tokio::spawn(async move { stdin.write_all(source.as_bytes()).await })
        });

        let output = child.wait_with_output().await.map_err(|error| {
            LintError::unavailable(format!("failed to read '{}' output: {error}", self.program))
        })?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                // A linter may exit before reading all input; its output still counts.
                Ok(Err(error)) if error.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(error)) => {
                    return Err(LintError::unavailable(format!(
                        "failed to send source to '{}': {error}",
                        self.program
                    )));
                }
                Err(error) => {
                    return Err(LintError::unavailable(format!(
                        "stdin writer for '{}' failed: {error}",
                        self.program
                    )));
                }
            }
        }

        let mut diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&output.stderr));
        let diagnostics = diagnostics.trim();
        Ok((!diagnostics.is_empty()).then(|| diagnostics.to_string()))
    }
}

impl Linter for CommandLinter {
    fn lint<'a>(&'a self, source: &'a str) -> BoxFuture<'a, Result<Option<String>, LintError>> {
        Box::pin(async move {
            match tokio::time::timeout(self.timeout, self.run(source)).await {
                Ok(result) => result,
                Err(_) => Err(LintError::timeout(format!(
                    "'{}' did not finish within {}ms",
                    self.program,
                    self.timeout.as_millis()
                ))),
            }
        })
    }
}

/// Single-quotes `value` for a POSIX shell, closing and reopening the quote
/// around each embedded `'`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::LintErrorKind;

    fn shell(script: &str) -> CommandLinter {
        CommandLinter::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn silent_linter_means_clean() {
        let result = shell("cat > /dev/null").lint("const x = 1;").await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn output_is_returned_as_diagnostics() {
        let linter = shell("cat; echo 'parsing error' >&2");

        let diagnostics = lint_render_function(&linter, "({output}) => <div>")
            .await
            .expect("linter should run")
            .expect("diagnostics expected");

        assert!(diagnostics.starts_with(LINT_PRELUDE.trim_end()));
        assert!(diagnostics.contains("({output}) => <div>"));
        assert!(diagnostics.ends_with("parsing error"));
    }

    #[tokio::test]
    async fn slow_linter_times_out() {
        let linter = shell("sleep 5").with_timeout(Duration::from_millis(50));

        let error = linter.lint("x").await.expect_err("linter should time out");
        assert_eq!(error.kind, LintErrorKind::Timeout);
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let linter = CommandLinter::new("/nonexistent/widgetsmith-linter", Vec::new());

        let error = linter.lint("x").await.expect_err("spawn should fail");
        assert_eq!(error.kind, LintErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn noop_linter_is_always_clean() {
        assert_eq!(
            lint_render_function(&NoopLinter, "anything").await,
            Ok(None)
        );
    }

    #[tokio::test]
    async fn echoed_input_larger_than_a_pipe_buffer_is_collected() {
        let source = "x".repeat(1 << 20);
        let linter = shell("cat").with_timeout(Duration::from_secs(5));

        let diagnostics = linter
            .lint(&source)
            .await
            .expect("linter should finish")
            .expect("echo is a diagnostic");
        assert_eq!(diagnostics.len(), source.len());
    }

    #[tokio::test]
    async fn quoted_paths_survive_the_shell() {
        let path = "/tmp/it's here/eslint.config.mjs";
        let linter = shell(&format!("cat > /dev/null; printf %s {}", shell_quote(path)));

        let echoed = linter.lint("x").await.expect("linter should run");
        assert_eq!(echoed.as_deref(), Some(path));
    }

    #[test]
    fn eslint_preset_quotes_the_config_path() {
        let linter = CommandLinter::eslint("/tmp/it's/eslint.config.mjs");
        assert_eq!(
            linter.args()[1],
            r"npx eslint --quiet --stdin -c '/tmp/it'\''s/eslint.config.mjs'"
        );
    }

    #[test]
    fn eslint_preset_runs_through_login_shell() {
        let linter = CommandLinter::eslint("/tmp/eslint.config.mjs");
        assert_eq!(linter.program(), "/bin/zsh");
        assert_eq!(
            linter.args(),
            ["-lc", "npx eslint --quiet --stdin -c '/tmp/eslint.config.mjs'"]
        );
        assert_eq!(linter.timeout(), DEFAULT_LINT_TIMEOUT);
    }
}
