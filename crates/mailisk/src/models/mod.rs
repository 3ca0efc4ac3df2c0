//! API response models

mod attachment;
mod email;
mod namespace;
mod sms;

pub use attachment::{Attachment, AttachmentResponse};
pub use email::{Email, EmailAddress, SearchInboxResponse};
pub use namespace::{ListNamespacesResponse, Namespace};
pub use sms::{ListSmsNumbersResponse, SearchSmsResponse, SmsMessage, SmsNumber};
