//! Error types for template compilation
//!
//! Two layers of errors exist. [`LineError`] is raised while a single logical
//! line is being classified or attached and knows nothing about where that
//! line lives in the source. The tree builder wraps it into a
//! [`TemplateError`], which carries the 0-based logical line number the
//! problem was detected on.

use std::fmt;

/// Errors about one logical line, independent of its position in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// The line did not match the grammar selected by its prefix character
    NoMatch { grammar: &'static str, text: String },
    /// An attribute other than `class` was assigned twice
    DuplicateAttribute { key: String, tag: String },
    /// The parenthesized attribute list could not be split into `key="value"` pairs
    MalformedAttributes(String),
    /// A `.class` / `#id` chunk had no value
    MalformedShorthand(String),
    /// Inline content was given to a tag that cannot hold it
    InlineContentNotAllowed { tag: String },
    /// A child was attached to a node that forbids children
    ChildrenNotAllowed { node_type: &'static str },
    /// A node that already has a parent was attached again
    AlreadyParented,
    /// Leading whitespace contains both tabs and spaces
    MixedIndentation,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::NoMatch { grammar, text } => {
                write!(f, "Text did not match the {} grammar: {:?}", grammar, text)
            }
            LineError::DuplicateAttribute { key, tag } => {
                write!(f, "Attribute {} already defined on <{}>", key, tag)
            }
            LineError::MalformedAttributes(attrs) => write!(
                f,
                "Mismatched quotes (or missing comma) in attributes: {}",
                attrs
            ),
            LineError::MalformedShorthand(shorthand) => {
                write!(f, "Empty class or id in shorthand: {}", shorthand)
            }
            LineError::InlineContentNotAllowed { tag } => {
                write!(f, "Inline content not permitted on <{}>", tag)
            }
            LineError::ChildrenNotAllowed { node_type } => {
                write!(f, "Node of type {} cannot have children", node_type)
            }
            LineError::AlreadyParented => write!(f, "Child already has a parent"),
            LineError::MixedIndentation => write!(f, "You cannot mix tabs and spaces"),
        }
    }
}

impl std::error::Error for LineError {}

/// Errors surfaced to callers of the compiler.
///
/// Both variants are fatal: a template that produces one of these yields no
/// output at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Mixed tabs and spaces, or an unindent that matches no outer level
    Indentation { line: usize, message: String },
    /// Grammar mismatch, bad attributes, children on a childless node, or an
    /// unterminated line continuation
    Syntax { line: usize, message: String },
}

impl TemplateError {
    pub fn indentation(line: usize, message: impl Into<String>) -> Self {
        TemplateError::Indentation {
            line,
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        TemplateError::Syntax {
            line,
            message: message.into(),
        }
    }

    /// Wrap a line-level error, routing indentation problems to the right variant.
    pub fn from_line_error(line: usize, error: LineError) -> Self {
        match error {
            LineError::MixedIndentation => TemplateError::indentation(line, error.to_string()),
            other => TemplateError::syntax(line, other.to_string()),
        }
    }

    /// 0-based logical line number the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            TemplateError::Indentation { line, .. } | TemplateError::Syntax { line, .. } => *line,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TemplateError::Indentation { message, .. } | TemplateError::Syntax { message, .. } => {
                message
            }
        }
    }

    pub fn is_indentation(&self) -> bool {
        matches!(self, TemplateError::Indentation { .. })
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Indentation { line, message } => {
                write!(f, "Indentation error on line {}: {}", line, message)
            }
            TemplateError::Syntax { line, message } => {
                write!(f, "Syntax error on line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
