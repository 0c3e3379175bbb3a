use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Fatal faults of one analysis run.
///
/// Only these cross the session boundary to the caller. Per-frame decode
/// faults are contained inside the stream loop and never appear here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Response is not an event stream: {message}")]
    StreamingUnsupported { message: String },

    #[error("Analysis cancelled")]
    Cancelled,
}

impl AnalysisError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Status { status, .. } => Some(*status),
            AnalysisError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
