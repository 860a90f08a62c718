//! Instruction text handed to the session when it is created.
//!
//! The directive tells the model to turn every widget request into exactly
//! one call of the write tool, shaped for the active argument variant, and
//! to relay what the tool returns.
//!
//! ```rust
//! use wagent::{AgentDirective, WRITE_WIDGET_TOOL_NAME};
//! use wwidget::SchemaVariant;
//!
//! let directive = AgentDirective::for_variant(SchemaVariant::Structured, WRITE_WIDGET_TOOL_NAME);
//! assert!(directive.as_str().contains("you MUST call this tool"));
//! assert!(directive.as_str().contains("refreshFrequency: 1000"));
//! ```

use std::fmt::{Display, Formatter};

use wwidget::SchemaVariant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDirective {
    text: String,
}

impl AgentDirective {
    pub fn for_variant(variant: SchemaVariant, tool_name: &str) -> Self {
        let call_example = match variant {
            SchemaVariant::Structured => format!(
                "{tool_name}({{bashCommand: \"echo hello\", refreshFrequency: 1000, \
                 renderFunction: \"({{output}}) => {{ return <div>{{output}}</div>; }}\", \
                 cssPositioning: \"top: 20px; left: 20px;\"}})"
            ),
            SchemaVariant::Freeform => format!(
                "{tool_name}({{jsxContent: `export const command = \"echo hello\"; \
                 export const refreshFrequency = 1000; \
                 export const render = ({{output}}) => {{ return <div>{{output}}</div>; }}; \
                 export const className = \"top: 20px; left: 20px;\"`}})"
            ),
        };
        let argument_rule = match variant {
            SchemaVariant::Structured => {
                "Fill in every argument: bashCommand, refreshFrequency (milliseconds, greater than 0), \
                 renderFunction (an arrow function receiving {output}) and cssPositioning (absolute positioning only)."
            }
            SchemaVariant::Freeform => {
                "Pass the complete JSX source of the widget as jsxContent. Generate custom JSX based on the \
                 user's specific request - do not copy the example."
            }
        };

        let text = format!(
            "You are an Übersicht widget designer. Create Übersicht widgets when requested by the user.\n\
             \n\
             IMPORTANT: You have access to a tool called {tool_name}. When asked to create a widget, you MUST call this tool.\n\
             \n\
             ### Tool Usage:\n\
             Call {tool_name} exactly once per widget request. {argument_rule}\n\
             \n\
             ### Übersicht Widget API (REQUIRED):\n\
             Every Übersicht widget MUST export these 4 items:\n\
             - export const command: The bash command to execute (string)\n\
             - export const refreshFrequency: Refresh rate in milliseconds (number)\n\
             - export const render: React component function that receives {{output}} prop (function)\n\
             - export const className: CSS positioning for absolute placement (string)\n\
             \n\
             Example call (customize for each request):\n\
             {call_example}\n\
             \n\
             ### Rules:\n\
             - The terms \"ubersicht widget\", \"widget\", \"a widget\", \"the widget\" must all be interpreted as \"Übersicht widget\"\n\
             - When you generate a widget, don't just show JSON or code - you MUST call the {tool_name} tool\n\
             - Report the result returned by the tool to the user after calling it\n\
             \n\
             ### Examples:\n\
             - \"Generate a Übersicht widget\" → Use {tool_name} tool\n\
             - \"Can you add a widget that shows the time\" → Use {tool_name} tool\n\
             - \"Create a widget with a button\" → Use {tool_name} tool"
        );

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl Display for AgentDirective {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for AgentDirective {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_names_the_tool_and_the_synonym_rule() {
        let directive = AgentDirective::for_variant(SchemaVariant::Structured, "WriteWidget");
        let text = directive.as_str();

        assert!(text.contains("You have access to a tool called WriteWidget."));
        assert!(text.contains("Call WriteWidget exactly once per widget request."));
        assert!(text.contains(
            "\"ubersicht widget\", \"widget\", \"a widget\", \"the widget\" must all be interpreted as \"Übersicht widget\""
        ));
        assert!(text.contains("don't just show JSON or code"));
        assert!(text.contains("Report the result returned by the tool"));
    }

    #[test]
    fn example_call_matches_the_variant() {
        let structured = AgentDirective::for_variant(SchemaVariant::Structured, "W");
        assert!(structured.as_str().contains(
            "W({bashCommand: \"echo hello\", refreshFrequency: 1000, renderFunction: \"({output}) => { return <div>{output}</div>; }\", cssPositioning: \"top: 20px; left: 20px;\"})"
        ));
        assert!(!structured.as_str().contains("jsxContent"));

        let freeform = AgentDirective::for_variant(SchemaVariant::Freeform, "W");
        assert!(freeform.as_str().contains("W({jsxContent: `export const command = \"echo hello\";"));
        assert!(!freeform.as_str().contains("bashCommand"));
    }

    #[test]
    fn directive_lists_the_four_exports() {
        let text = AgentDirective::for_variant(SchemaVariant::Freeform, "W").into_string();
        for export in ["command", "refreshFrequency", "render", "className"] {
            assert!(text.contains(&format!("- export const {export}:")));
        }
    }
}
