//! Search parameter handling and the bounded polling loop

mod params;
mod poll;

pub use params::{SearchInboxParams, SearchSmsParams};
pub use poll::SearchPage;

pub(crate) use params::QueryParams;
pub(crate) use poll::{DEFAULT_WAIT_TIMEOUT, SystemClock, poll_until_found};
