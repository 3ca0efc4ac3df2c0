//! Search parameter normalization and query serialization
//!
//! Both search endpoints accept a filter parameter set that is normalized
//! before transmission: a missing time lower bound defaults to fifteen
//! minutes before the request was started, and `wait` defaults to `true`
//! unless the caller explicitly disabled it. Serialization keeps the
//! declared field order, skips unset fields, and writes present-but-falsy
//! values (`0`, `false`) literally.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Default lookback applied when no time lower bound is given
const DEFAULT_LOOKBACK_SECS: i64 = 15 * 60;

/// Filter parameters for searching a namespace inbox
///
/// All fields are optional. `from_timestamp`/`to_timestamp` are unix
/// timestamps in seconds; an explicit `Some(0)` means "from the epoch" and
/// is never replaced by the default lookback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchInboxParams {
    /// Maximum number of emails returned, used with `offset` for pagination
    pub limit: Option<u32>,
    /// Number of emails to skip, used with `limit` for pagination
    pub offset: Option<u32>,
    /// Only match emails received at or after this unix timestamp (seconds)
    pub from_timestamp: Option<i64>,
    /// Only match emails received at or before this unix timestamp (seconds)
    pub to_timestamp: Option<i64>,
    /// Match emails whose 'to' address starts with this prefix
    pub to_addr_prefix: Option<String>,
    /// Match emails whose 'from' address contains this substring
    pub from_addr_includes: Option<String>,
    /// Match emails whose subject contains this substring
    pub subject_includes: Option<String>,
    /// Keep the request going until at least one email matches (default true)
    pub wait: Option<bool>,
}

impl SearchInboxParams {
    /// Fill defaults relative to the capture instant
    pub(crate) fn normalized(mut self, now: DateTime<Utc>) -> Self {
        if self.from_timestamp.is_none() {
            self.from_timestamp = Some(now.timestamp() - DEFAULT_LOOKBACK_SECS);
        }
        if self.wait != Some(false) {
            self.wait = Some(true);
        }
        self
    }
}

impl QueryParams for SearchInboxParams {
    fn wait_enabled(&self) -> bool {
        self.wait != Some(false)
    }

    fn to_query(&self, include_wait: bool) -> String {
        let mut query = QueryBuilder::new();
        query.number("limit", self.limit);
        query.number("offset", self.offset);
        query.number("from_timestamp", self.from_timestamp);
        query.number("to_timestamp", self.to_timestamp);
        query.text("to_addr_prefix", self.to_addr_prefix.as_deref());
        query.text("from_addr_includes", self.from_addr_includes.as_deref());
        query.text("subject_includes", self.subject_includes.as_deref());
        if include_wait {
            query.flag("wait", self.wait);
        }
        query.finish()
    }
}

/// Filter parameters for searching SMS messages of a phone number
///
/// `from_date`/`to_date` are serialized as ISO-8601 instants with
/// millisecond precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSmsParams {
    /// Maximum number of messages returned, used with `offset` for pagination
    pub limit: Option<u32>,
    /// Number of messages to skip, used with `limit` for pagination
    pub offset: Option<u32>,
    /// Match messages whose body contains this substring
    pub body: Option<String>,
    /// Match messages sent from this number
    pub from_number: Option<String>,
    /// Only match messages received at or after this instant
    pub from_date: Option<DateTime<Utc>>,
    /// Only match messages received at or before this instant
    pub to_date: Option<DateTime<Utc>>,
    /// Keep the request going until at least one message matches (default true)
    pub wait: Option<bool>,
}

impl SearchSmsParams {
    /// Fill defaults relative to the capture instant
    pub(crate) fn normalized(mut self, now: DateTime<Utc>) -> Self {
        if self.from_date.is_none() {
            self.from_date = Some(now - chrono::Duration::seconds(DEFAULT_LOOKBACK_SECS));
        }
        if self.wait != Some(false) {
            self.wait = Some(true);
        }
        self
    }
}

impl QueryParams for SearchSmsParams {
    fn wait_enabled(&self) -> bool {
        self.wait != Some(false)
    }

    fn to_query(&self, include_wait: bool) -> String {
        let mut query = QueryBuilder::new();
        query.number("limit", self.limit);
        query.number("offset", self.offset);
        query.text("body", self.body.as_deref());
        query.text("from_number", self.from_number.as_deref());
        query.instant("from_date", self.from_date);
        query.instant("to_date", self.to_date);
        if include_wait {
            query.flag("wait", self.wait);
        }
        query.finish()
    }
}

/// Serialized query parameters for a search request
pub(crate) trait QueryParams {
    /// Whether the local polling loop is engaged for these parameters
    fn wait_enabled(&self) -> bool;

    /// Serialize to an ordered query string
    ///
    /// When polling is engaged the `wait` flag controls local behavior only
    /// and callers pass `include_wait = false` to keep it off the wire.
    fn to_query(&self, include_wait: bool) -> String;
}

/// Ordered query string builder that skips unset values
struct QueryBuilder {
    serializer: form_urlencoded::Serializer<'static, String>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self {
            serializer: form_urlencoded::Serializer::new(String::new()),
        }
    }

    fn number<N: ToString>(&mut self, key: &str, value: Option<N>) {
        if let Some(value) = value {
            self.serializer.append_pair(key, &value.to_string());
        }
    }

    fn text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.serializer.append_pair(key, value);
        }
    }

    fn flag(&mut self, key: &str, value: Option<bool>) {
        if let Some(value) = value {
            self.serializer.append_pair(key, if value { "true" } else { "false" });
        }
    }

    fn instant(&mut self, key: &str, value: Option<DateTime<Utc>>) {
        if let Some(value) = value {
            self.serializer
                .append_pair(key, &value.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
    }

    fn finish(mut self) -> String {
        self.serializer.finish()
    }
}
