//! Execution pipeline: dispatch, response classification, and the redirect
//! controller.
//!
//! A call moves from Dispatched to exactly one Terminal outcome. Redirects
//! re-enter assembly with a URL override but share the same call frame, so
//! the caller still observes a single result.

use uuid::Uuid;

use crate::defaults;
use crate::error::Error;
use crate::request::{self, Endpoint, RequestBody};
use crate::service::{ErrorDecision, ServiceSpec};
use crate::transport::TransportResponse;

use super::Client;

pub(super) async fn run(
    client: &Client,
    endpoint: &Endpoint,
    body: &RequestBody,
) -> Result<TransportResponse, Error> {
    let request_id = Uuid::new_v4();
    let mut url_override: Option<reqwest::Url> = None;
    let mut hops = 0usize;

    loop {
        let request = {
            // Credential reads are per-hop so a login/logout between hops is
            // observed.
            let credential = client
                .credential
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            request::assemble(
                client.spec.as_ref(),
                credential.as_ref(),
                endpoint,
                body,
                url_override.as_ref(),
            )?
        };

        tracing::debug!(
            service = client.spec.id(),
            request_id = %request_id,
            method = %request.method,
            url = %request.url,
            hop = hops,
            "dispatching request"
        );

        let response = match client.transport.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                // No response to classify against, so no redirect opportunity.
                tracing::debug!(
                    service = client.spec.id(),
                    request_id = %request_id,
                    %error,
                    "transport failed without a response"
                );
                return Err(error);
            }
        };

        match validate(client.spec.as_ref(), &response) {
            None => {
                tracing::debug!(
                    service = client.spec.id(),
                    request_id = %request_id,
                    status = response.status,
                    "request completed"
                );
                return Ok(response);
            }
            Some(error) => {
                let error = attach_service_fault(client.spec.as_ref(), &response, error);
                match client.spec.classify(&error, &response) {
                    ErrorDecision::Propagate => {
                        tracing::debug!(
                            service = client.spec.id(),
                            request_id = %request_id,
                            %error,
                            "request failed"
                        );
                        return Err(error);
                    }
                    ErrorDecision::Redirect(url) => {
                        if hops >= client.max_redirects {
                            tracing::warn!(
                                service = client.spec.id(),
                                request_id = %request_id,
                                hops,
                                "redirect budget exhausted"
                            );
                            return Err(error);
                        }
                        tracing::debug!(
                            service = client.spec.id(),
                            request_id = %request_id,
                            target = %url,
                            "redirecting"
                        );
                        hops += 1;
                        url_override = Some(url);
                    }
                }
            }
        }
    }
}

/// Automatic status validation followed by the service's two optional
/// passes. `None` means the response is good.
fn validate(spec: &dyn ServiceSpec, response: &TransportResponse) -> Option<Error> {
    if !(200..300).contains(&response.status) {
        return Some(Error::Status {
            status: response.status,
            body: snippet(&response.body),
        });
    }
    if let Err(error) = spec.validate_response(response) {
        return Some(error);
    }
    if let Err(error) = spec.check_envelope(&response.body) {
        return Some(error);
    }
    None
}

/// Wraps the failure in a parsed service error when the body yields one;
/// otherwise the original failure passes through unchanged.
fn attach_service_fault(
    spec: &dyn ServiceSpec,
    response: &TransportResponse,
    error: Error,
) -> Error {
    match spec.parse_error_envelope(&response.body) {
        Some(fault) => Error::Service {
            message: fault.message,
            details: fault.details,
            source: Box::new(error),
        },
        None => error,
    }
}

fn snippet(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    let cut = body.len().min(defaults::pipeline::ERROR_BODY_SNIPPET);
    Some(String::from_utf8_lossy(&body[..cut]).into_owned())
}
