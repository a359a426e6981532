use std::time::Duration;

use serde::Serialize;

pub mod http_upload;

pub use http_upload::HttpUploadGateway;

pub const DEFAULT_FILE_NAME: &str = "upload.csv";

/// Network-class failures of the backend upload.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl UploadError {
    /// Message shown next to the upload control.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Status { status, body } => format!("Upload failed: {status} - {body}"),
            other => format!("Connection error: {other}"),
        }
    }
}

/// Forwards raw uploaded bytes to a remote backend.
#[async_trait::async_trait]
pub trait UploadGateway: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), UploadError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub status: Option<u16>,
    pub message: String,
}

impl From<&Result<(), UploadError>> for UploadOutcome {
    fn from(res: &Result<(), UploadError>) -> Self {
        match res {
            Ok(()) => UploadOutcome {
                success: true,
                status: Some(200),
                message: "Upload successful!".to_string(),
            },
            Err(e) => UploadOutcome {
                success: false,
                status: match e {
                    UploadError::Status { status, .. } => Some(*status),
                    _ => None,
                },
                message: e.user_message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_failure_shows_code_and_body() {
        let outcome = UploadOutcome::from(&Err(UploadError::Status {
            status: 500,
            body: "database unavailable".to_string(),
        }));
        assert!(!outcome.success);
        assert_eq!(outcome.status, Some(500));
        assert_eq!(outcome.message, "Upload failed: 500 - database unavailable");
    }

    #[test]
    fn transport_failure_is_a_connection_error() {
        let outcome = UploadOutcome::from(&Err(UploadError::Timeout(Duration::from_secs(30))));
        assert_eq!(outcome.status, None);
        assert_eq!(outcome.message, "Connection error: request timed out after 30s");
    }

    #[test]
    fn success_outcome() {
        let outcome = UploadOutcome::from(&Ok(()));
        assert!(outcome.success);
        assert_eq!(outcome.message, "Upload successful!");
    }
}
