//! Synchronous adapter over the asynchronous client.
//!
//! One generic block-until-resolved wrapper, not a per-endpoint
//! re-implementation. Must not be driven from inside an async runtime: the
//! adapter refuses with an error instead of deadlocking.

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::request::{Endpoint, RequestBody};
use crate::transport::TransportResponse;

use super::Client;

/// Blocking facade for backend/script contexts.
pub struct BlockingClient {
    inner: Client,
    runtime: tokio::runtime::Runtime,
}

impl BlockingClient {
    pub fn new(client: Client) -> Result<Self, Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Config(format!("failed to build blocking runtime: {e}")))?;
        Ok(Self {
            inner: client,
            runtime,
        })
    }

    /// The wrapped asynchronous client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    pub fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<T, Error> {
        guard_runtime()?;
        self.runtime.block_on(self.inner.call(endpoint, body))
    }

    pub fn call_bytes(&self, endpoint: &Endpoint, body: RequestBody) -> Result<Vec<u8>, Error> {
        guard_runtime()?;
        self.runtime.block_on(self.inner.call_bytes(endpoint, body))
    }

    pub fn call_text(&self, endpoint: &Endpoint, body: RequestBody) -> Result<String, Error> {
        guard_runtime()?;
        self.runtime.block_on(self.inner.call_text(endpoint, body))
    }

    pub fn call_unit(&self, endpoint: &Endpoint, body: RequestBody) -> Result<(), Error> {
        guard_runtime()?;
        self.runtime.block_on(self.inner.call_unit(endpoint, body))
    }

    pub fn call_response(
        &self,
        endpoint: &Endpoint,
        body: RequestBody,
    ) -> Result<TransportResponse, Error> {
        guard_runtime()?;
        self.runtime
            .block_on(self.inner.call_response(endpoint, body))
    }
}

fn guard_runtime() -> Result<(), Error> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(Error::Custom(
            "blocking call invoked inside an async runtime; use the async client instead"
                .to_owned(),
        ));
    }
    Ok(())
}
