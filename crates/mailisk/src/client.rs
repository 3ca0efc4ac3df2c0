//! Mailisk API client
//!
//! Provides methods for searching namespace inboxes and SMS messages,
//! listing namespaces and numbers, and fetching attachments.

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::config::MailiskCredentials;
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::models::{
    AttachmentResponse, ListNamespacesResponse, ListSmsNumbersResponse, SearchInboxResponse,
    SearchSmsResponse,
};
use crate::search::{
    DEFAULT_WAIT_TIMEOUT, QueryParams, SearchInboxParams, SearchPage, SearchSmsParams,
    SystemClock, poll_until_found,
};

/// Client for the Mailisk email and SMS testing API
pub struct MailiskClient {
    http: HttpClient,
}

impl MailiskClient {
    /// Create a client from explicit credentials
    pub fn new(credentials: MailiskCredentials) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(credentials)?,
        })
    }

    /// Create a client from the `MAILISK_API_KEY` / `MAILISK_API_URL`
    /// environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(MailiskCredentials::from_env()?)
    }

    /// List the namespaces owned by this account
    pub fn list_namespaces(&self) -> Result<ListNamespacesResponse> {
        self.http.get_json("api/namespaces", &RequestOptions::default())
    }

    /// Search a namespace inbox, waiting for a match by default
    ///
    /// Unless `params.wait` is `Some(false)`, the search polls the inbox
    /// until at least one email matches or the deadline (5 minutes by
    /// default) runs out. Use [`search_inbox_with_options`](Self::search_inbox_with_options)
    /// to change the deadline.
    ///
    /// # Arguments
    /// * `namespace` - The unique namespace to search
    /// * `params` - Filter parameters
    pub fn search_inbox(
        &self,
        namespace: &str,
        params: SearchInboxParams,
    ) -> Result<SearchInboxResponse> {
        self.search_inbox_with_options(namespace, params, RequestOptions::default())
    }

    /// Search a namespace inbox with explicit request options
    ///
    /// `options.timeout` is the overall polling deadline when waiting is
    /// enabled, and the single-attempt timeout otherwise.
    pub fn search_inbox_with_options(
        &self,
        namespace: &str,
        params: SearchInboxParams,
        options: RequestOptions,
    ) -> Result<SearchInboxResponse> {
        let params = params.normalized(Utc::now());
        let path = format!("api/emails/{}/inbox", urlencoding::encode(namespace));
        self.run_search(&path, &params, options)
    }

    /// Search the SMS messages received by a phone number, waiting for a
    /// match by default
    ///
    /// # Arguments
    /// * `phone_number` - The virtual number whose messages to search
    /// * `params` - Filter parameters
    pub fn search_sms(
        &self,
        phone_number: &str,
        params: SearchSmsParams,
    ) -> Result<SearchSmsResponse> {
        self.search_sms_with_options(phone_number, params, RequestOptions::default())
    }

    /// Search SMS messages with explicit request options
    pub fn search_sms_with_options(
        &self,
        phone_number: &str,
        params: SearchSmsParams,
        options: RequestOptions,
    ) -> Result<SearchSmsResponse> {
        let params = params.normalized(Utc::now());
        let path = format!("api/sms/{}/messages", urlencoding::encode(phone_number));
        self.run_search(&path, &params, options)
    }

    /// List the virtual SMS numbers available to this account
    pub fn list_sms_numbers(&self) -> Result<ListSmsNumbersResponse> {
        self.list_sms_numbers_with_options(RequestOptions::default())
    }

    /// List SMS numbers with explicit request options
    pub fn list_sms_numbers_with_options(
        &self,
        options: RequestOptions,
    ) -> Result<ListSmsNumbersResponse> {
        self.http.get_json("api/sms/numbers", &options)
    }

    /// Fetch attachment metadata by ID
    pub fn get_attachment(&self, attachment_id: &str) -> Result<AttachmentResponse> {
        self.get_attachment_with_options(attachment_id, RequestOptions::default())
    }

    /// Fetch attachment metadata with explicit request options
    pub fn get_attachment_with_options(
        &self,
        attachment_id: &str,
        options: RequestOptions,
    ) -> Result<AttachmentResponse> {
        let path = format!("api/attachments/{}", urlencoding::encode(attachment_id));
        self.http.get_json(&path, &options)
    }

    /// Download the content of an attachment
    ///
    /// Fetches the attachment metadata, then its `download_url`.
    pub fn download_attachment(&self, attachment_id: &str) -> Result<Vec<u8>> {
        self.download_attachment_with_options(attachment_id, RequestOptions::default())
    }

    /// Download attachment content with explicit request options
    pub fn download_attachment_with_options(
        &self,
        attachment_id: &str,
        options: RequestOptions,
    ) -> Result<Vec<u8>> {
        let attachment = self.get_attachment_with_options(attachment_id, options.clone())?;
        self.http.get_bytes(&attachment.data.download_url, &options)
    }

    /// Issue a search either through the polling loop or as one direct call
    ///
    /// With waiting enabled the `wait` flag is stripped from the transmitted
    /// query (it controls local polling only) and each attempt runs with the
    /// remaining share of the deadline. With waiting disabled the query is
    /// sent once, `wait=false` included, and a zero-match response is final.
    fn run_search<P, T>(&self, path: &str, params: &P, options: RequestOptions) -> Result<T>
    where
        P: QueryParams,
        T: SearchPage + DeserializeOwned,
    {
        if params.wait_enabled() {
            let deadline = options.timeout.unwrap_or(DEFAULT_WAIT_TIMEOUT);
            let url = format!("{}?{}", path, params.to_query(false));
            log::debug!(
                "searching {} with a {}ms polling budget",
                path,
                deadline.as_millis()
            );
            poll_until_found(&SystemClock, deadline, |attempt_timeout| {
                self.http.get_json(&url, &options.for_attempt(attempt_timeout))
            })
        } else {
            let url = format!("{}?{}", path, params.to_query(true));
            log::debug!("searching {} without waiting", path);
            self.http.get_json(&url, &options)
        }
    }
}
