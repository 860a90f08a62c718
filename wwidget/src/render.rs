//! Text rendering of validated arguments into an Übersicht widget script.
//!
//! Rendering is plain substitution. Only the command literal is escaped, and
//! only its double quotes: backslashes, newlines and shell metacharacters pass
//! through untouched. The render function and the CSS are embedded exactly as
//! given, so a caller that puts the template's own delimiters into them can
//! break the generated script.
//!
//! ```rust
//! use wwidget::{ArgumentSet, StructuredArguments, render};
//!
//! let script = render(&ArgumentSet::Structured(StructuredArguments::new(
//!     "echo \"hi\"",
//!     1000,
//!     "({output}) => <div>{output}</div>",
//!     "top: 20px; left: 20px;",
//! )));
//!
//! assert!(script.as_str().contains(r#"export const command = "echo \"hi\"""#));
//! assert!(script.as_str().contains("export const refreshFrequency = 1000\n"));
//! ```

use std::fmt::{Display, Formatter};

use crate::{ArgumentSet, FreeformArguments, StructuredArguments};

/// Generated widget source. Immutable once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderedScript(String);

impl RenderedScript {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length in bytes of the UTF-8 text.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for RenderedScript {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderedScript {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn render(args: &ArgumentSet) -> RenderedScript {
    match args {
        ArgumentSet::Structured(structured) => RenderedScript(render_structured(structured)),
        ArgumentSet::Freeform(FreeformArguments { jsx_content }) => {
            RenderedScript(jsx_content.clone())
        }
    }
}

/// Escapes `"` as `\"`. Nothing else is touched.
pub fn escape_command_literal(command: &str) -> String {
    command.replace('"', "\\\"")
}

fn render_structured(args: &StructuredArguments) -> String {
    let command = escape_command_literal(&args.bash_command);

    format!(
        "import {{ css, React }} from 'uebersicht';\n\
         import {{ styled }} from 'uebersicht'; // Optional, use when Emotion styled functions are needed.\n\
         \n\
         /* ----- Übersicht exports ---- */\n\
         \n\
         export const command = \"{command}\"\n\
         export const refreshFrequency = {refresh}\n\
         \n\
         export const render = {render}\n\
         \n\
         export const className = \"{class_name}\";\n",
        refresh = args.refresh_frequency,
        render = args.render_function,
        class_name = args.css_positioning,
    )
}
