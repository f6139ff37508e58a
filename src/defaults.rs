//! Default constants.

use std::time::Duration;

pub mod http {
    use super::Duration;

    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("enroute/", env!("CARGO_PKG_VERSION"));
}

pub mod pipeline {
    /// Redirect re-attempts allowed per call. One hop covers the only
    /// legitimate pattern (a service steering a failed request to an
    /// alternate URL) without letting a misbehaving classifier loop forever.
    pub const MAX_REDIRECTS: usize = 1;

    /// Largest error-body snippet kept on a `Status` error.
    pub const ERROR_BODY_SNIPPET: usize = 2048;
}
