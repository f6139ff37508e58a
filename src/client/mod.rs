//! The endpoint client.
//!
//! [`Client`] binds a [`ServiceSpec`], a [`Transport`], and a mutable
//! credential slot, and exposes typed call entry points. One instance is
//! typically shared process-wide behind an `Arc`, but independently
//! configured instances (multi-tenant, test isolation) are equally
//! supported — there is no ambient global.

mod blocking;
mod pipeline;

pub use blocking::BlockingClient;

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::config::HttpConfig;
use crate::defaults;
use crate::encoding::EncoderConfig;
use crate::error::Error;
use crate::request::{Endpoint, RequestBody};
use crate::service::ServiceSpec;
use crate::transport::{HttpTransport, Transport, TransportResponse};

/// Declarative HTTP endpoint client.
pub struct Client {
    pub(crate) spec: Arc<dyn ServiceSpec>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) credential: RwLock<Option<SecretString>>,
    pub(crate) max_redirects: usize,
}

impl Client {
    /// A client over `spec` with the default HTTP transport.
    pub fn new(spec: impl ServiceSpec + 'static) -> Result<Self, Error> {
        Self::builder(spec).build()
    }

    pub fn builder(spec: impl ServiceSpec + 'static) -> ClientBuilder {
        ClientBuilder {
            spec: Arc::new(spec),
            transport: None,
            credential: None,
            max_redirects: defaults::pipeline::MAX_REDIRECTS,
            http: HttpConfig::default(),
        }
    }

    /// Swaps in a credential (login). Pending requests that already read the
    /// old credential finish with it; later hops observe the new one.
    pub fn set_credential(&self, credential: SecretString) {
        let mut slot = self
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(credential);
    }

    /// Clears the credential (logout).
    pub fn clear_credential(&self) {
        let mut slot = self
            .credential
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }

    /// Encoder configuration the service prescribes; used by the
    /// [`encode_form`](Self::encode_form)-style helpers.
    pub fn encoder_config(&self) -> EncoderConfig {
        self.spec.encoder_config()
    }

    /// Flattens `input` into a form body with the service's encoder
    /// configuration.
    pub fn encode_form<T: serde::Serialize>(&self, input: &T) -> Result<RequestBody, Error> {
        RequestBody::form(input, &self.encoder_config())
    }

    pub fn encode_multipart<T: serde::Serialize>(&self, input: &T) -> Result<RequestBody, Error> {
        RequestBody::multipart(input, &self.encoder_config())
    }

    pub fn encode_query<T: serde::Serialize>(&self, input: &T) -> Result<RequestBody, Error> {
        RequestBody::query(input, &self.encoder_config())
    }

    /// Executes the endpoint and decodes the JSON response body into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<T, Error> {
        let operation = endpoint.operation_name().map(str::to_owned);
        let tag = |error: Error| error.with_operation(operation.as_deref());

        let response = pipeline::run(self, endpoint, &body).await.map_err(tag)?;
        if response.body.is_empty() {
            return Err(tag(Error::MissingBody));
        }
        serde_json::from_slice(&response.body).map_err(|e| tag(Error::Decode(e.to_string())))
    }

    /// Executes the endpoint and returns the raw response body.
    pub async fn call_bytes(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<Vec<u8>, Error> {
        let response = self.call_response(endpoint, body).await?;
        Ok(response.body)
    }

    /// Executes the endpoint and returns the body as UTF-8 text.
    pub async fn call_text(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<String, Error> {
        let operation = endpoint.operation_name().map(str::to_owned);
        let response = self.call_response(endpoint, body).await?;
        String::from_utf8(response.body)
            .map_err(|e| Error::Decode(e.to_string()).with_operation(operation.as_deref()))
    }

    /// Executes the endpoint, discarding any response body.
    pub async fn call_unit(&self, endpoint: &Endpoint, body: RequestBody) -> Result<(), Error> {
        self.call_response(endpoint, body).await.map(|_| ())
    }

    /// Executes the endpoint and returns the validated transport response
    /// (pass-through/download case: status and headers stay visible).
    pub async fn call_response(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<TransportResponse, Error> {
        pipeline::run(self, endpoint, &body)
            .await
            .map_err(|error| error.with_operation(endpoint.operation_name()))
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    spec: Arc<dyn ServiceSpec>,
    transport: Option<Arc<dyn Transport>>,
    credential: Option<SecretString>,
    max_redirects: usize,
    http: HttpConfig,
}

impl ClientBuilder {
    /// Overrides the wire transport (test doubles, interception).
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Seeds the credential slot.
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(SecretString::from(credential.into()));
        self
    }

    /// Redirect re-attempts allowed per call.
    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// HTTP configuration for the default transport. Ignored when an
    /// explicit transport is set.
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::from_config(&self.http)?),
        };
        Ok(Client {
            spec: self.spec,
            transport,
            credential: RwLock::new(self.credential),
            max_redirects: self.max_redirects,
        })
    }
}
