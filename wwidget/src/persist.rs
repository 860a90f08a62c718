//! Writing rendered scripts to the widgets directory.
//!
//! A write goes to a hidden temporary file next to the target, is flushed to
//! disk, and is then renamed over `index.jsx`. Readers see either the old
//! script or the new one. Concurrent writers are not coordinated; the last
//! rename wins.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use wcommon::BoxFuture;

use crate::RenderedScript;

pub const TARGET_FILE_NAME: &str = "index.jsx";

/// The single output file of a widget directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    directory: PathBuf,
}

impl TargetFile {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// `<widgets_root>/<subfolder>`
    pub fn in_widgets_root(widgets_root: impl AsRef<Path>, subfolder: &str) -> Self {
        Self::new(widgets_root.as_ref().join(subfolder))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(TARGET_FILE_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistResult {
    Written { path: PathBuf, bytes: usize },
    Failure { reason: String },
}

impl PersistResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written { path, .. } => Some(path),
            Self::Failure { .. } => None,
        }
    }
}

pub trait PersistenceSink: Send + Sync {
    fn persist<'a>(
        &'a self,
        script: &'a RenderedScript,
        target: &'a TargetFile,
    ) -> BoxFuture<'a, PersistResult>;
}

/// Atomic replace on the local filesystem. Blocking I/O runs on tokio's
/// blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemSink;

impl FilesystemSink {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`PersistenceSink::persist`].
    pub fn persist_blocking(script: &RenderedScript, target: &TargetFile) -> PersistResult {
        let path = match std::path::absolute(target.path()) {
            Ok(path) => path,
            Err(error) => {
                return PersistResult::failure(format!(
                    "failed to resolve target path '{}': {error}",
                    target.path().display()
                ));
            }
        };

        match write_atomic(&path, script.as_bytes()) {
            Ok(()) => {
                tracing::debug!(
                    phase = "persist",
                    event = "written",
                    path = %path.display(),
                    bytes = script.len()
                );
                PersistResult::Written {
                    path,
                    bytes: script.len(),
                }
            }
            Err(reason) => {
                tracing::warn!(
                    phase = "persist",
                    event = "failure",
                    path = %path.display(),
                    reason = %reason
                );
                PersistResult::Failure { reason }
            }
        }
    }
}

impl PersistenceSink for FilesystemSink {
    fn persist<'a>(
        &'a self,
        script: &'a RenderedScript,
        target: &'a TargetFile,
    ) -> BoxFuture<'a, PersistResult> {
        let script = script.clone();
        let target = target.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || Self::persist_blocking(&script, &target))
                .await
                .unwrap_or_else(|error| {
                    PersistResult::failure(format!("persistence task did not complete: {error}"))
                })
        })
    }
}

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn temp_path_for(path: &Path) -> Result<PathBuf, String> {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Err(format!("target path '{}' has no file name", path.display()));
    };
    let sequence = TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    Ok(path.with_file_name(format!(
        ".{file_name}.{}.{sequence}.tmp",
        std::process::id()
    )))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let Some(parent) = path.parent() else {
        return Err(format!(
            "target path '{}' has no parent directory",
            path.display()
        ));
    };
    fs::create_dir_all(parent).map_err(|error| {
        format!(
            "failed to create directory '{}': {error}",
            parent.display()
        )
    })?;

    let tmp = temp_path_for(path)?;
    let written = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
    if let Err(error) = written {
        let _ = fs::remove_file(&tmp);
        return Err(format!(
            "failed to write temporary file '{}': {error}",
            tmp.display()
        ));
    }

    fs::rename(&tmp, path).map_err(|error| {
        let _ = fs::remove_file(&tmp);
        format!("failed to replace '{}': {error}", path.display())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgumentSet, FreeformArguments, render};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("wwidget-{prefix}-{unique}"))
    }

    fn script(text: &str) -> RenderedScript {
        render(&ArgumentSet::Freeform(FreeformArguments::new(text)))
    }

    #[test]
    fn target_file_is_index_jsx_under_subfolder() {
        let target = TargetFile::in_widgets_root("/widgets", "clock");
        assert_eq!(target.directory(), Path::new("/widgets/clock"));
        assert_eq!(target.path(), PathBuf::from("/widgets/clock/index.jsx"));
    }

    #[tokio::test]
    async fn creates_missing_directories_and_writes_file() {
        let root = temp_dir("create");
        let target = TargetFile::new(root.join("nested").join("deeper"));
        assert!(!target.directory().exists());

        let result = FilesystemSink::new()
            .persist(&script("export const command = \"date\""), &target)
            .await;

        let path = result.path().expect("write should succeed").to_path_buf();
        assert!(path.is_absolute());
        assert_eq!(path, target.path());
        assert_eq!(
            fs::read_to_string(&path).expect("file should exist"),
            "export const command = \"date\""
        );
        let _ = fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn second_write_replaces_first_and_leaves_no_temp_files() {
        let root = temp_dir("replace");
        let target = TargetFile::new(&root);
        let sink = FilesystemSink::new();

        let first = script("a much longer first script body");
        let second = script("short");
        assert!(sink.persist(&first, &target).await.is_written());
        let result = sink.persist(&second, &target).await;

        assert_eq!(
            result,
            PersistResult::Written {
                path: target.path(),
                bytes: second.len()
            }
        );
        let contents = fs::read(target.path()).expect("file should exist");
        assert_eq!(contents.len(), second.len());
        let entries: Vec<_> = fs::read_dir(&root)
            .expect("dir should list")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(TARGET_FILE_NAME)]);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn directory_blocked_by_a_file_reports_failure() {
        let root = temp_dir("blocked");
        fs::create_dir_all(&root).expect("root should be created");
        let blocker = root.join("not-a-dir");
        fs::write(&blocker, b"occupied").expect("blocker should be written");

        let result = FilesystemSink::persist_blocking(
            &script("content"),
            &TargetFile::new(blocker.join("widget")),
        );

        match result {
            PersistResult::Failure { reason } => {
                assert!(reason.starts_with("failed to create directory"), "{reason}");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn relative_targets_are_reported_as_absolute_paths() {
        let relative = PathBuf::from(format!("wwidget-relative-{}", std::process::id()));
        let result = FilesystemSink::persist_blocking(&script("x"), &TargetFile::new(&relative));

        let path = result.path().expect("write should succeed");
        assert!(path.is_absolute());
        assert!(path.ends_with(relative.join(TARGET_FILE_NAME)));
        let _ = fs::remove_dir_all(relative);
    }
}
