//! Read-only table of shell commands a widget can use as its data source.
//!
//! ```rust
//! use wwidget::DataSourceTable;
//!
//! let table = DataSourceTable::builtin();
//! let time = table.lookup("currentTime").expect("built-in source");
//! assert_eq!(time.command, "date '+%H:%M:%S'");
//! assert!(table.lookup("currenttime").is_none());
//! ```

use wcommon::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub key: String,
    pub command: String,
    pub description: String,
}

impl DataSource {
    pub fn new(
        key: impl Into<String>,
        command: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Keys are unique and case-sensitive; iteration is ordered by key.
#[derive(Debug, Clone, Default)]
pub struct DataSourceTable {
    sources: Registry<String, DataSource>,
}

impl DataSourceTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty().with_source(DataSource::new(
            "currentTime",
            "date '+%H:%M:%S'",
            "Returns the current time in HH:MM:SS format",
        ))
    }

    /// Adds `source`, replacing any entry with the same key.
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.sources.insert(source.key.clone(), source);
        self
    }

    pub fn lookup(&self, key: &str) -> Option<&DataSource> {
        self.sources.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataSource> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// `key: description` entries separated by blank lines.
    pub fn listing(&self) -> String {
        self.iter()
            .map(|source| format!("{}: {}", source.key, source.description))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
