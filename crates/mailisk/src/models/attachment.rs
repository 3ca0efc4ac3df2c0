//! Attachment models

use serde::{Deserialize, Serialize};

/// Metadata for an email attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment ID
    pub id: Option<String>,
    /// Original filename
    pub filename: Option<String>,
    /// MIME type of the content
    pub content_type: Option<String>,
    /// Size in bytes
    pub size: Option<u64>,
    /// URL the attachment content can be downloaded from
    pub download_url: String,
}

/// Response from fetching attachment metadata
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentResponse {
    pub data: Attachment,
}
