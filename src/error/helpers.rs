//! User-facing error reports.
//!
//! Derives the display surface from a classified [`Error`]: a short title, a
//! reason suitable for direct display, optional diagnostic details, and the
//! internal/caller-fault flag. Details are diagnostic-only and never required
//! for correct behavior.

use super::types::Error;

/// Structured summary for CLI/UI rendering.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Short title, e.g. the operation name.
    pub title: String,
    /// Medium-length reason intended for direct end-user display.
    pub reason: String,
    /// Optional diagnostic details (raw bodies, field paths).
    pub details: Option<String>,
    /// When `true`, callers should append a request to report the issue.
    pub is_internal: bool,
}

/// Summarizes a classified error for display.
pub fn report(error: &Error) -> ErrorReport {
    let title = error
        .operation()
        .map(str::to_owned)
        .unwrap_or_else(|| "Request failed".to_owned());
    let root = error.root();
    ErrorReport {
        title,
        reason: reason_of(root),
        details: details_of(root),
        is_internal: error.is_internal(),
    }
}

fn reason_of(error: &Error) -> String {
    match error {
        Error::Encode { .. } => "The request could not be prepared.".to_owned(),
        Error::NoResponse => "The server did not respond.".to_owned(),
        Error::MissingBody | Error::Decode(_) => {
            "The server response could not be understood.".to_owned()
        }
        Error::Service { message, .. } => message.clone(),
        Error::Status { status, .. } => match status {
            401 | 403 => "You are not authorized to perform this action.".to_owned(),
            404 => "The requested resource was not found.".to_owned(),
            429 => "Too many requests; please try again later.".to_owned(),
            500..=599 => "The server reported an internal problem.".to_owned(),
            other => format!("The server rejected the request (status {other})."),
        },
        Error::Transport { kind, .. } => match kind {
            crate::error::TransportErrorKind::Timeout => "The request timed out.".to_owned(),
            crate::error::TransportErrorKind::Connect => {
                "The server could not be reached.".to_owned()
            }
            _ => "A network problem interrupted the request.".to_owned(),
        },
        Error::MissingCredential => "Please sign in and try again.".to_owned(),
        Error::InvalidUrl(_) | Error::Config(_) | Error::Hook(_) => {
            "The request could not be prepared.".to_owned()
        }
        Error::Custom(message) => message.clone(),
        Error::Operation { source, .. } => reason_of(source),
    }
}

fn details_of(error: &Error) -> Option<String> {
    match error {
        Error::Encode { path, message } => Some(format!("field `{path}`: {message}")),
        Error::Decode(message) => Some(message.clone()),
        Error::Service {
            details, source, ..
        } => details
            .as_ref()
            .map(|d| d.to_string())
            .or_else(|| Some(source.to_string())),
        Error::Status { status, body } => body
            .as_ref()
            .map(|b| format!("status {status}: {b}")),
        Error::Transport { message, .. } => Some(message.clone()),
        Error::InvalidUrl(detail) | Error::Config(detail) | Error::Hook(detail) => {
            Some(detail.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_uses_operation_as_title() {
        let err = Error::NoResponse.with_operation(Some("verify receipt"));
        let report = report(&err);
        assert_eq!(report.title, "verify receipt");
        assert_eq!(report.reason, "The server did not respond.");
        assert!(report.is_internal);
    }

    #[test]
    fn unauthorized_is_not_internal() {
        let report = report(&Error::Status {
            status: 401,
            body: None,
        });
        assert!(!report.is_internal);
        assert!(report.reason.contains("not authorized"));
    }

    #[test]
    fn service_errors_surface_their_own_message() {
        let err = Error::Service {
            message: "Ticket queue is closed".into(),
            details: Some(serde_json::json!({"code": 7})),
            source: Box::new(Error::Status {
                status: 422,
                body: None,
            }),
        };
        let report = report(&err);
        assert_eq!(report.reason, "Ticket queue is closed");
        assert_eq!(report.details.as_deref(), Some("{\"code\":7}"));
    }
}
