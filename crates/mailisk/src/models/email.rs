//! Email models returned by inbox search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::{SearchInboxParams, SearchPage};

/// An email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Email address (e.g., "john@example.com")
    pub address: String,
    /// Display name, if one was specified
    pub name: Option<String>,
}

/// A single email in a namespace inbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Namespace scoped ID
    pub id: String,
    /// Sender of the email
    pub from: EmailAddress,
    /// Recipients of the email
    pub to: Vec<EmailAddress>,
    /// Carbon-copied recipients
    #[serde(default)]
    pub cc: Vec<EmailAddress>,
    /// Blind carbon-copied recipients
    #[serde(default)]
    pub bcc: Vec<EmailAddress>,
    /// Subject line
    pub subject: Option<String>,
    /// HTML body, if one was sent
    pub html: Option<String>,
    /// Plain text body, if one was sent
    pub text: Option<String>,
    /// When the email was received
    pub received_date: DateTime<Utc>,
    /// Unix timestamp (seconds) when the email was received
    pub received_timestamp: i64,
    /// Unix timestamp (seconds) when the email will be deleted
    pub expires_timestamp: Option<i64>,
    /// Spam score as reported by SpamAssassin
    pub spam_score: Option<f64>,
}

/// Response from an inbox search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchInboxResponse {
    /// Total number of emails matching the query
    pub total_count: u64,
    /// Parameters the server used for the query
    #[serde(default)]
    pub params: Option<SearchInboxParams>,
    /// Matching emails
    #[serde(default)]
    pub data: Vec<Email>,
}

impl SearchPage for SearchInboxResponse {
    fn total_count(&self) -> u64 {
        self.total_count
    }
}
