//! Request-level error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// Bad or missing upload fields; message is shown to the caller
    #[error("{0}")]
    InvalidUpload(String),

    /// Workbook could not be read or lacks an expected sheet
    #[error("{0}")]
    Workbook(String),

    #[error("Candidate not found in the uploaded file.")]
    CandidateNotFound(String),

    #[error("embedding provider failed: {0:#}")]
    Provider(anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// Whether the message is safe and useful to return verbatim
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidUpload(_) | MatchError::Workbook(_) | MatchError::CandidateNotFound(_)
        )
    }
}
