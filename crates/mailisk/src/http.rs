//! HTTP transport for the Mailisk API
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic. Non-2xx statuses
//! are classified into the typed [`Error`](crate::Error) variants here;
//! callers never see a raw status code for the well-known failure modes.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use ureq::Agent;
use url::Url;

use crate::config::MailiskCredentials;
use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("mailisk-rs/", env!("CARGO_PKG_VERSION"));

/// Per-call request options
///
/// `timeout` bounds a single HTTP attempt. For the search operations with
/// waiting enabled it instead sets the overall polling deadline, and each
/// attempt is issued with the remaining share of that budget.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Attempt timeout (or overall deadline for waiting searches)
    pub timeout: Option<Duration>,
    /// Extra headers sent with every attempt
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options with just a timeout set
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }

    /// Copy of these options with the timeout replaced
    pub(crate) fn for_attempt(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            headers: self.headers.clone(),
        }
    }
}

/// Shape of the API's 400 response body
#[derive(Deserialize)]
struct ApiErrorBody {
    errors: Vec<FieldError>,
}

#[derive(Deserialize)]
struct FieldError {
    field: String,
    detail: Vec<FieldErrorDetail>,
}

#[derive(Deserialize)]
struct FieldErrorDetail {
    description: String,
}

/// Low-level client carrying the agent, base URL, and default headers
pub(crate) struct HttpClient {
    agent: Agent,
    base_url: Url,
    api_key: String,
}

impl HttpClient {
    pub(crate) fn new(credentials: MailiskCredentials) -> Result<Self> {
        if credentials.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        let base_url = Url::parse(&credentials.api_url)?;

        // Status classification happens in this module, not in ureq.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: Agent::new_with_config(config),
            base_url,
            api_key: credentials.api_key,
        })
    }

    /// GET a JSON body from a path (or absolute URL)
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let mut response = self.send_get(path, options)?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(response.body_mut().read_json()?);
        }
        Err(classify_status(status, &mut response))
    }

    /// GET a raw body from a path (or absolute URL)
    pub(crate) fn get_bytes(&self, path: &str, options: &RequestOptions) -> Result<Vec<u8>> {
        let mut response = self.send_get(path, options)?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(response.body_mut().read_to_vec()?);
        }
        Err(classify_status(status, &mut response))
    }

    fn send_get(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        // join() resolves relative paths against the base URL and passes
        // absolute URLs (attachment downloads) through unchanged.
        let url = self.base_url.join(path)?;

        let mut request = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/json")
            .header("X-Api-Key", &self.api_key)
            .header("User-Agent", USER_AGENT);

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = options.timeout {
            request = request.config().timeout_global(Some(timeout)).build();
        }

        Ok(request.call()?)
    }
}

/// Map a non-2xx status to its error variant
fn classify_status(status: u16, response: &mut ureq::http::Response<ureq::Body>) -> Error {
    match status {
        400 => Error::InvalidParams(read_param_errors(response)),
        401 => Error::AuthFailed,
        403 => Error::PermissionDenied,
        404 => Error::NotFound,
        other => Error::Api(other),
    }
}

/// Build the per-field message for a 400 response
fn read_param_errors(response: &mut ureq::http::Response<ureq::Body>) -> String {
    const FALLBACK: &str = "Request had one or more invalid parameters.";

    match response.body_mut().read_json::<ApiErrorBody>() {
        Ok(body) if !body.errors.is_empty() => body
            .errors
            .iter()
            .map(|err| {
                let description = err
                    .detail
                    .first()
                    .map(|d| d.description.as_str())
                    .unwrap_or("invalid value");
                format!("({}) {}", err.field, description)
            })
            .collect::<Vec<_>>()
            .join("\r\n"),
        _ => FALLBACK.to_string(),
    }
}
