use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a project analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Project path does not exist or is not a directory: {}", .0.display())]
    InvalidProject(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {}: {message}", path.display())]
    Xml { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AnalyzerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn xml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Xml {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when the failure is caused by the caller's input rather than the analyzer
    pub fn is_client_error(&self) -> bool {
        matches!(self, AnalyzerError::InvalidProject(_) | AnalyzerError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
