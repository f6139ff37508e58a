//! enroute
//!
//! Declarative HTTP endpoint client: callers describe an endpoint (method,
//! path, input/output shapes, authorization policy) as a typed descriptor,
//! and the framework turns a serializable input into a wire request, executes
//! it through a pluggable transport, and turns the response back into a typed
//! output or a classified error.
//!
//! ```rust,no_run
//! use enroute::{AuthPolicy, Client, Endpoint, RequestBody, StaticService};
//!
//! # async fn demo() -> Result<(), enroute::Error> {
//! let service = StaticService::new("example", "https://api.example.com/v1/".parse().unwrap());
//! let client = Client::builder(service).credential("token").build()?;
//!
//! let endpoint = Endpoint::get("profile")
//!     .auth(AuthPolicy::Required)
//!     .operation("fetch profile");
//! let profile: serde_json::Value = client.call(&endpoint, RequestBody::Empty).await?;
//! # Ok(()) }
//! ```
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod defaults;
pub mod encoding;
pub mod error;
pub mod request;
pub mod service;
pub mod transport;

pub use client::{BlockingClient, Client, ClientBuilder};
pub use config::HttpConfig;
pub use error::{Error, ErrorReport, Result};
pub use request::{AuthPolicy, Endpoint, RequestBody, ResponseFormat};
pub use service::{ErrorDecision, ServiceFault, ServiceSpec, StaticService};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
