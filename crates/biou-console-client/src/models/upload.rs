// crates/biou-console-client/src/models/upload.rs
// ============================================================================
// Module: Upload Models
// Description: Upload results and progress reports.
// Purpose: Type the `/upload` endpoints and multipart progress callbacks.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

/// Result of `/upload/avatar`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarUpload {
    /// Public URL of the stored image.
    pub url: String,
}

/// Result of `/upload/file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpload {
    /// Public URL of the stored file.
    pub url: String,
    /// Stored file name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
}

/// Progress of a single multipart upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// File being uploaded.
    pub file_name: String,
    /// Bytes handed to the transport so far.
    pub bytes_sent: u64,
    /// Total bytes of the file.
    pub total_bytes: u64,
    /// Percent complete (0-100).
    pub percent: f64,
}

impl UploadProgress {
    /// Builds a report, computing the percentage.
    #[must_use]
    pub fn new(file_name: &str, bytes_sent: u64, total_bytes: u64) -> Self {
        #[allow(clippy::cast_precision_loss, reason = "Progress display tolerates rounding.")]
        let percent = if total_bytes == 0 {
            100.0
        } else {
            (bytes_sent as f64 / total_bytes as f64) * 100.0
        };
        Self {
            file_name: file_name.to_string(),
            bytes_sent,
            total_bytes,
            percent,
        }
    }
}
