use serde_json::json;
use wtooling::{Tool, ToolDefinition, ToolError, ToolExecutionContext, ToolFuture};
use wwidget::DataSourceTable;

pub const LIST_DATA_SOURCES_TOOL_NAME: &str = "ListDataSources";
pub const LIST_DATA_SOURCES_TOOL_DESCRIPTION: &str =
    "Lists available data sources that can be used for widgets";

/// Lists the keys and descriptions of known data sources. Takes no arguments.
#[derive(Debug, Clone)]
pub struct ListDataSourcesTool {
    sources: DataSourceTable,
}

impl ListDataSourcesTool {
    pub fn new(sources: DataSourceTable) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &DataSourceTable {
        &self.sources
    }

    pub fn listing(&self) -> String {
        if self.sources.is_empty() {
            return "No data sources are configured.".to_string();
        }
        self.sources.listing()
    }
}

impl Default for ListDataSourcesTool {
    fn default() -> Self {
        Self::new(DataSourceTable::builtin())
    }
}

impl Tool for ListDataSourcesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::with_schema(
            LIST_DATA_SOURCES_TOOL_NAME,
            LIST_DATA_SOURCES_TOOL_DESCRIPTION,
            &json!({"type": "object", "properties": {}}),
        )
    }

    fn invoke<'a>(
        &'a self,
        _args_json: &'a str,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        Box::pin(async move { Ok(self.listing()) })
    }
}

#[cfg(test)]
mod tests {
    use wwidget::DataSource;

    use super::*;

    #[tokio::test]
    async fn builtin_listing_names_current_time() {
        let tool = ListDataSourcesTool::default();
        let output = tool
            .invoke("{}", &ToolExecutionContext::new("session-1"))
            .await
            .expect("listing should succeed");

        assert_eq!(
            output,
            "currentTime: Returns the current time in HH:MM:SS format"
        );
    }

    #[tokio::test]
    async fn arguments_are_ignored() {
        let tool = ListDataSourcesTool::new(DataSourceTable::empty().with_source(
            DataSource::new("uptime", "uptime", "System uptime"),
        ));
        let output = tool
            .invoke("not even json", &ToolExecutionContext::new("session-1"))
            .await
            .expect("listing should succeed");

        assert_eq!(output, "uptime: System uptime");
    }

    #[test]
    fn empty_table_says_so() {
        let tool = ListDataSourcesTool::new(DataSourceTable::empty());
        assert_eq!(tool.listing(), "No data sources are configured.");
        assert_eq!(tool.definition().name, LIST_DATA_SOURCES_TOOL_NAME);
    }
}
