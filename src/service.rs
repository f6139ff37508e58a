//! Service description and hooks.
//!
//! A [`ServiceSpec`] describes a family of endpoints sharing a base URL:
//! where requests go, how they are decorated, how responses are validated,
//! and how failures are classified. Every hook has a no-op default, so a
//! minimal service only supplies `id` and `base_url`.

use reqwest::Url;

use crate::encoding::EncoderConfig;
use crate::error::Error;
use crate::transport::{TransportRequest, TransportResponse};

/// Outcome of the service-side error classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDecision {
    /// Surface the error to the caller.
    Propagate,
    /// Re-issue the request against this URL. The pipeline caps hops at the
    /// client's `max_redirects`.
    Redirect(Url),
}

/// A service-specific error parsed from a response body.
///
/// The pipeline wraps it as [`Error::Service`] with the triggering failure
/// as the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFault {
    /// Message suitable for direct display.
    pub message: String,
    /// Opaque diagnostic payload, e.g. the decoded error envelope.
    pub details: Option<serde_json::Value>,
}

impl ServiceFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Per-service configuration and validation hooks.
pub trait ServiceSpec: Send + Sync {
    /// Stable identifier used for logging.
    fn id(&self) -> &str;

    /// Base URL endpoint paths are joined against.
    fn base_url(&self) -> Url;

    /// Encoder-level configuration for the form/query/multipart tracks.
    fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig::default()
    }

    /// Last-step request mutation, applied after URL, body, and
    /// authorization are in place. Failing here aborts before dispatch.
    fn configure_request(&self, request: &mut TransportRequest) -> Result<(), Error> {
        let _ = request;
        Ok(())
    }

    /// Second validation pass over the raw transport response, after the
    /// automatic 2xx check succeeded.
    fn validate_response(&self, response: &TransportResponse) -> Result<(), Error> {
        let _ = response;
        Ok(())
    }

    /// Decodes and validates the service-wide response envelope, when the
    /// service has one. Failures funnel into the same path as status
    /// failures.
    fn check_envelope(&self, body: &[u8]) -> Result<(), Error> {
        let _ = body;
        Ok(())
    }

    /// Attempts to parse a service-specific error envelope from a (possibly
    /// partial) failure body. `None` leaves the original failure untouched.
    fn parse_error_envelope(&self, body: &[u8]) -> Option<ServiceFault> {
        let _ = body;
        None
    }

    /// Decides what to do with a classified failure, given the raw response
    /// it was derived from.
    fn classify(&self, error: &Error, response: &TransportResponse) -> ErrorDecision {
        let _ = (error, response);
        ErrorDecision::Propagate
    }
}

/// A hook-free service: just an id and a base URL.
#[derive(Debug, Clone)]
pub struct StaticService {
    id: String,
    base_url: Url,
}

impl StaticService {
    pub fn new(id: impl Into<String>, base_url: Url) -> Self {
        Self {
            id: id.into(),
            base_url,
        }
    }
}

impl ServiceSpec for StaticService {
    fn id(&self) -> &str {
        &self.id
    }

    fn base_url(&self) -> Url {
        self.base_url.clone()
    }
}
