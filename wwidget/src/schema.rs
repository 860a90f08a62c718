//! Argument payloads accepted by the widget tool and their validation.
//!
//! A deployment exposes exactly one [`SchemaVariant`]. The variant decides the
//! JSON schema advertised to the model and how a raw payload is turned into an
//! [`ArgumentSet`].
//!
//! ```rust
//! use wwidget::{ArgumentSet, SchemaVariant};
//!
//! let args = SchemaVariant::Structured
//!     .validate(
//!         r#"{
//!             "bashCommand": "date '+%H:%M'",
//!             "refreshFrequency": 1000,
//!             "renderFunction": "({output}) => <div>{output}</div>",
//!             "cssPositioning": "top: 20px; left: 20px;"
//!         }"#,
//!     )
//!     .expect("payload should validate");
//!
//! let ArgumentSet::Structured(structured) = args else {
//!     unreachable!("structured variant");
//! };
//! assert_eq!(structured.refresh_frequency, 1000);
//!
//! let error = SchemaVariant::Freeform
//!     .validate(r#"{"jsxContent": "   "}"#)
//!     .expect_err("blank content should fail");
//! assert_eq!(error.first().reason, "JSX content cannot be empty");
//! ```

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{ValidationError, Violation};

pub const BASH_COMMAND: &str = "bashCommand";
pub const REFRESH_FREQUENCY: &str = "refreshFrequency";
pub const RENDER_FUNCTION: &str = "renderFunction";
pub const CSS_POSITIONING: &str = "cssPositioning";
pub const JSX_CONTENT: &str = "jsxContent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    /// Four fields rendered through the widget template.
    #[default]
    Structured,
    /// The caller supplies the whole script.
    Freeform,
}

impl SchemaVariant {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "structured" | "fields" => Some(Self::Structured),
            "freeform" | "jsx" => Some(Self::Freeform),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Freeform => "freeform",
        }
    }

    /// Wire names of the required fields, in declaration order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Structured => &[
                BASH_COMMAND,
                REFRESH_FREQUENCY,
                RENDER_FUNCTION,
                CSS_POSITIONING,
            ],
            Self::Freeform => &[JSX_CONTENT],
        }
    }

    /// JSON Schema advertised to the model for this variant.
    pub fn input_schema(self) -> Value {
        match self {
            Self::Structured => json!({
                "type": "object",
                "properties": {
                    BASH_COMMAND: {
                        "type": "string",
                        "description": "A bash command line string. This will be executed by Übersicht and the output will be passed to the JSX body as {output}."
                    },
                    REFRESH_FREQUENCY: {
                        "type": "integer",
                        "minimum": 1,
                        "description": "The widget's refresh frequency in milliseconds."
                    },
                    RENDER_FUNCTION: {
                        "type": "string",
                        "description": "A React functional component as a JavaScript arrow function that renders the widget body. It receives a single \"output\" prop. Example: ({output}) => { return <h1>{output}</h1> }"
                    },
                    CSS_POSITIONING: {
                        "type": "string",
                        "description": "The widget's absolute positioning in Standard CSS format. Example: top: 20px; left: 20px; Only absolute positioning works."
                    }
                },
                "required": self.fields(),
                "additionalProperties": false
            }),
            Self::Freeform => json!({
                "type": "object",
                "properties": {
                    JSX_CONTENT: {
                        "type": "string",
                        "description": "Complete JSX source of an Übersicht widget exporting command, refreshFrequency, render and className."
                    }
                },
                "required": self.fields(),
                "additionalProperties": false
            }),
        }
    }

    pub fn validate(self, raw_json: &str) -> Result<ArgumentSet, ValidationError> {
        let value: Value = serde_json::from_str(raw_json).map_err(|err| {
            ValidationError::single("arguments", format!("Arguments are not valid JSON: {err}"))
        })?;
        self.validate_value(&value)
    }

    /// Checks every field and reports all violations at once. Extra fields
    /// are ignored.
    pub fn validate_value(self, raw: &Value) -> Result<ArgumentSet, ValidationError> {
        let Value::Object(object) = raw else {
            return Err(ValidationError::single(
                "arguments",
                "Arguments must be a JSON object",
            ));
        };

        let mut violations = Vec::new();
        let args = match self {
            Self::Structured => {
                let bash_command =
                    non_blank(object, BASH_COMMAND, "Bash command", &mut violations);
                let refresh_frequency = positive_integer(object, &mut violations);
                let render_function =
                    non_blank(object, RENDER_FUNCTION, "Render function", &mut violations);
                let css_positioning =
                    non_blank(object, CSS_POSITIONING, "CSS positioning", &mut violations);

                match (
                    bash_command,
                    refresh_frequency,
                    render_function,
                    css_positioning,
                ) {
                    (Some(bash_command), Some(refresh_frequency), Some(render_function), Some(css_positioning)) => {
                        Some(ArgumentSet::Structured(StructuredArguments {
                            bash_command,
                            refresh_frequency,
                            render_function,
                            css_positioning,
                        }))
                    }
                    _ => None,
                }
            }
            Self::Freeform => non_blank(object, JSX_CONTENT, "JSX content", &mut violations)
                .map(|jsx_content| ArgumentSet::Freeform(FreeformArguments { jsx_content })),
        };

        match (args, ValidationError::from_violations(violations)) {
            (_, Some(error)) => Err(error),
            (Some(args), None) => Ok(args),
            (None, None) => Err(ValidationError::single(
                "arguments",
                "Arguments could not be validated",
            )),
        }
    }
}

impl Display for SchemaVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_blank(
    object: &Map<String, Value>,
    field: &str,
    label: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(field, format!("{label} is required")));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            violations.push(Violation::new(field, format!("{label} cannot be empty")));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            violations.push(Violation::new(field, format!("{label} must be a string")));
            None
        }
    }
}

fn positive_integer(object: &Map<String, Value>, violations: &mut Vec<Violation>) -> Option<u64> {
    let too_small = || {
        Violation::new(
            REFRESH_FREQUENCY,
            "Refresh frequency must be greater than 0",
        )
    };

    match object.get(REFRESH_FREQUENCY) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(
                REFRESH_FREQUENCY,
                "Refresh frequency is required",
            ));
            None
        }
        Some(Value::Number(number)) => match (number.as_u64(), number.as_i64()) {
            (Some(0), _) | (None, Some(_)) => {
                violations.push(too_small());
                None
            }
            (Some(milliseconds), _) => Some(milliseconds),
            (None, None) => {
                violations.push(Violation::new(
                    REFRESH_FREQUENCY,
                    "Refresh frequency must be a whole number of milliseconds",
                ));
                None
            }
        },
        Some(_) => {
            violations.push(Violation::new(
                REFRESH_FREQUENCY,
                "Refresh frequency must be a whole number of milliseconds",
            ));
            None
        }
    }
}

/// Arguments for the templated variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredArguments {
    pub bash_command: String,
    /// Milliseconds, always > 0 after validation.
    pub refresh_frequency: u64,
    /// Arrow-function source, embedded verbatim.
    pub render_function: String,
    /// CSS declarations, embedded verbatim.
    pub css_positioning: String,
}

impl StructuredArguments {
    pub fn new(
        bash_command: impl Into<String>,
        refresh_frequency: u64,
        render_function: impl Into<String>,
        css_positioning: impl Into<String>,
    ) -> Self {
        Self {
            bash_command: bash_command.into(),
            refresh_frequency,
            render_function: render_function.into(),
            css_positioning: css_positioning.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeformArguments {
    pub jsx_content: String,
}

impl FreeformArguments {
    pub fn new(jsx_content: impl Into<String>) -> Self {
        Self {
            jsx_content: jsx_content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSet {
    Structured(StructuredArguments),
    Freeform(FreeformArguments),
}

impl ArgumentSet {
    pub fn variant(&self) -> SchemaVariant {
        match self {
            Self::Structured(_) => SchemaVariant::Structured,
            Self::Freeform(_) => SchemaVariant::Freeform,
        }
    }
}

impl From<StructuredArguments> for ArgumentSet {
    fn from(value: StructuredArguments) -> Self {
        Self::Structured(value)
    }
}

impl From<FreeformArguments> for ArgumentSet {
    fn from(value: FreeformArguments) -> Self {
        Self::Freeform(value)
    }
}
