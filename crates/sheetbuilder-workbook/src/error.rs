use sheetbuilder_common::BuildError;
use thiserror::Error;

/// Errors raised when reading or writing a workbook through a backend.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Backend error in {backend}: {message}")]
    Backend { backend: String, message: String },
}

impl IoError {
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        IoError::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// The build error behind this failure, if any.
    pub fn as_build_error(&self) -> Option<&BuildError> {
        match self {
            IoError::Build(err) => Some(err),
            _ => None,
        }
    }
}
