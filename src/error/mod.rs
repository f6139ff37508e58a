//! Error handling.
//!
//! One discriminated union ([`Error`]) for every failure the pipeline can
//! produce, plus display helpers ([`ErrorReport`]) for user-facing rendering.

pub mod helpers;
pub mod types;

pub use helpers::{ErrorReport, report};
pub use types::{Error, Result, TransportErrorKind};
