//! Mailisk API client
//!
//! A synchronous client for the Mailisk email and SMS testing API,
//! providing:
//! - Inbox and SMS search with a bounded, time-budgeted polling loop that
//!   waits for an eventually-delivered message to appear
//! - Typed filter parameters with sensible defaults (15-minute lookback,
//!   wait-for-match enabled)
//! - Namespace and SMS number listing, attachment retrieval
//! - A typed error taxonomy for configuration, parameter, auth, and
//!   transport failures
//!
//! ```no_run
//! use mailisk::{MailiskClient, SearchInboxParams};
//!
//! # fn main() -> mailisk::Result<()> {
//! let client = MailiskClient::from_env()?;
//! let response = client.search_inbox(
//!     "my-namespace",
//!     SearchInboxParams {
//!         to_addr_prefix: Some("signup.test".to_string()),
//!         ..Default::default()
//!     },
//! )?;
//! println!("found {} email(s)", response.total_count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod search;

pub use client::MailiskClient;
pub use config::{DEFAULT_API_URL, MailiskCredentials};
pub use error::{Error, Result};
pub use http::RequestOptions;
pub use models::{
    Attachment, AttachmentResponse, Email, EmailAddress, ListNamespacesResponse,
    ListSmsNumbersResponse, Namespace, SearchInboxResponse, SearchSmsResponse, SmsMessage,
    SmsNumber,
};
pub use search::{SearchInboxParams, SearchPage, SearchSmsParams};
