/// Builds the JSON argument payload for the write tool.
///
/// ```rust
/// use widgetsmith::{SchemaVariant, ws_args};
///
/// let payload = ws_args!(
///     command: "date '+%H:%M'",
///     refresh: 60_000,
///     render: "({output}) => <h1>{output}</h1>",
///     css: "top: 20px; left: 20px;",
/// );
/// assert!(SchemaVariant::Structured.validate(&payload).is_ok());
///
/// let payload = ws_args!(jsx: "export const refreshFrequency = 1000");
/// assert!(SchemaVariant::Freeform.validate(&payload).is_ok());
/// ```
#[macro_export]
macro_rules! ws_args {
    (command: $command:expr, refresh: $refresh:expr, render: $render:expr, css: $css:expr $(,)?) => {
        $crate::util::structured_arguments_json(&$crate::StructuredArguments::new(
            $command, $refresh, $render, $css,
        ))
    };
    (jsx: $content:expr $(,)?) => {
        $crate::util::freeform_arguments_json(&$crate::FreeformArguments::new($content))
    };
}

/// Creates a [`ToolCall`](crate::ToolCall) addressed to the write tool.
///
/// ```rust
/// use widgetsmith::{WRITE_WIDGET_TOOL_NAME, ws_call};
///
/// let call = ws_call!("call-1", jsx: "export const command = \"uptime\"");
/// assert_eq!(call.name, WRITE_WIDGET_TOOL_NAME);
/// assert!(call.arguments.contains("jsxContent"));
/// ```
#[macro_export]
macro_rules! ws_call {
    ($id:expr, $($args:tt)+) => {
        $crate::util::write_widget_call($id, $crate::ws_args!($($args)+))
    };
}
