//! Harness error type.

use std::path::PathBuf;

/// Errors raised while loading or executing fixtures.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("bad input for {function}: {message}")]
    BadInput {
        function: String,
        message: String,
    },
    #[error("no fixture JSON files found in {0}")]
    NoFixtures(PathBuf),
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn bad_input(function: &str, message: impl Into<String>) -> Self {
        Self::BadInput {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
