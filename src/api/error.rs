use crate::error::AnalyzerError;
use serde::Serialize;
use thiserror::Error;

/// Whether a failure was caused by the request or by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiErrorKind {
    Client,
    Server,
}

/// Error surfaced by the facade, carrying an HTTP-style status class
#[derive(Error, Debug, Clone, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Client,
            message: message.into(),
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Server,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind {
            ApiErrorKind::Client => 400,
            ApiErrorKind::Server => 500,
        }
    }
}

impl From<AnalyzerError> for ApiError {
    fn from(err: AnalyzerError) -> Self {
        if err.is_client_error() {
            Self::client(format!("Error loading project: {}", err))
        } else {
            Self::server(err.to_string())
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
