//! Errors raised while building a workbook.
//!
//! Every variant is fatal to the build that raised it: the builder stops at the
//! first error and hands it back to the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A data-driven definition contained an unknown key, a value of the wrong
    /// type or an unparseable value. `path` is the breadcrumb from the document
    /// root, e.g. `sheets[0].rows[2].cells[1].styles`.
    #[error("{message} (at '{path}', value: {value})")]
    InvalidProperty {
        message: String,
        path: String,
        value: String,
    },

    #[error(
        "Cannot call cell '{name}' as this is invalid identifier in Excel. Suggestion: {suggestion}"
    )]
    InvalidIdentifier { name: String, suggestion: String },

    #[error("Named cell '{name}' cannot be found!")]
    UnresolvedReference { name: String },

    #[error("Name '{name}' is already defined")]
    DuplicateName { name: String },

    #[error("Style '{name}' is not defined")]
    UndefinedStyle { name: String },

    #[error("Style '{name}' has already been applied and cannot be redefined")]
    StyleSealed { name: String },

    #[error("Style '{name}' inherits from itself")]
    CyclicStyle { name: String },

    #[error("Comment text has not been set!")]
    MissingCommentText,

    #[error("Invalid color '{0}', expected #rrggbb or a preset color name")]
    InvalidColor(String),

    #[error("Invalid column '{0}'")]
    InvalidColumn(String),

    #[error("{kind} {value} does not exist")]
    UnknownKeyword { kind: &'static str, value: String },

    #[error("{0}")]
    InvalidArgument(String),
}

impl BuildError {
    pub fn invalid_property(
        message: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        BuildError::InvalidProperty {
            message: message.into(),
            path: path.into(),
            value: value.into(),
        }
    }

    /// Wrap this error as an invalid property at `path`. An error that already
    /// is an invalid property is returned unchanged.
    pub fn at_path(self, path: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            err @ BuildError::InvalidProperty { .. } => err,
            other => BuildError::InvalidProperty {
                message: other.to_string(),
                path: path.into(),
                value: value.into(),
            },
        }
    }

    pub fn is_invalid_property(&self) -> bool {
        matches!(self, BuildError::InvalidProperty { .. })
    }
}
