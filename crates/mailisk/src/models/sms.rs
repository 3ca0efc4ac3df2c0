//! SMS models returned by message search and number listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::{SearchPage, SearchSmsParams};

/// A single SMS message received by a virtual number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Message ID
    pub id: Option<String>,
    /// Sending phone number
    pub from: String,
    /// Receiving phone number
    pub to: String,
    /// Message body
    pub body: String,
    /// When the message was received
    pub received_date: Option<DateTime<Utc>>,
    /// Unix timestamp (seconds) when the message was received
    pub received_timestamp: Option<i64>,
    /// Unix timestamp (seconds) when the message will be deleted
    pub expires_timestamp: Option<i64>,
}

/// Response from an SMS message search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSmsResponse {
    /// Total number of messages matching the query
    pub total_count: u64,
    /// Parameters the server used for the query
    #[serde(default)]
    pub params: Option<SearchSmsParams>,
    /// Matching messages
    #[serde(default)]
    pub data: Vec<SmsMessage>,
}

impl SearchPage for SearchSmsResponse {
    fn total_count(&self) -> u64 {
        self.total_count
    }
}

/// A virtual phone number available to the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsNumber {
    /// Phone number in E.164 format
    pub number: String,
    /// ISO country code of the number
    pub country: Option<String>,
}

/// Response from listing SMS numbers
#[derive(Debug, Clone, Deserialize)]
pub struct ListSmsNumbersResponse {
    pub total_count: u64,
    #[serde(default)]
    pub data: Vec<SmsNumber>,
}
