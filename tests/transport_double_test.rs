//! Pipeline behavior against transport doubles: failures that never produce
//! a response, and the blocking adapter.

use std::sync::Arc;

use async_trait::async_trait;
use enroute::error::TransportErrorKind;
use enroute::{
    BlockingClient, Client, Endpoint, Error, RequestBody, StaticService, Transport,
    TransportRequest, TransportResponse,
};

fn service() -> StaticService {
    StaticService::new("double", "https://unreachable.test/".parse().unwrap())
}

struct FailingTransport {
    error: fn() -> Error,
}

#[async_trait]
impl Transport for FailingTransport {
    async fn execute(&self, _request: TransportRequest) -> Result<TransportResponse, Error> {
        Err((self.error)())
    }
}

#[tokio::test]
async fn no_response_is_terminal_and_internal() {
    let client = Client::builder(service())
        .transport(Arc::new(FailingTransport {
            error: || Error::NoResponse,
        }))
        .build()
        .unwrap();

    let err = client
        .call_unit(&Endpoint::get("x").operation("probe"), RequestBody::Empty)
        .await
        .unwrap_err();

    assert!(matches!(err.root(), Error::NoResponse));
    assert!(err.is_internal());
    assert_eq!(err.operation(), Some("probe"));

    let report = enroute::error::report(&err);
    assert_eq!(report.reason, "The server did not respond.");
    assert!(report.is_internal);
}

#[tokio::test]
async fn timeout_keeps_its_transport_kind() {
    let client = Client::builder(service())
        .transport(Arc::new(FailingTransport {
            error: || Error::Transport {
                kind: TransportErrorKind::Timeout,
                message: "deadline elapsed".into(),
            },
        }))
        .build()
        .unwrap();

    let err = client
        .call_unit(&Endpoint::get("x"), RequestBody::Empty)
        .await
        .unwrap_err();

    match err.root() {
        Error::Transport { kind, .. } => assert_eq!(*kind, TransportErrorKind::Timeout),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        enroute::error::report(&err).reason,
        "The request timed out."
    );
}

#[test]
fn blocking_call_runs_outside_any_runtime() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body(r#"{"pong":true}"#)
        .create();

    let client = Client::builder(StaticService::new(
        "ping",
        format!("{}/", server.url()).parse().unwrap(),
    ))
    .build()
    .unwrap();
    let blocking = BlockingClient::new(client).unwrap();

    let value: serde_json::Value = blocking
        .call(&Endpoint::get("ping"), RequestBody::Empty)
        .unwrap();
    assert_eq!(value["pong"], true);
}

#[test]
fn blocking_call_refuses_to_run_inside_a_runtime() {
    let client = Client::builder(service())
        .transport(Arc::new(FailingTransport {
            error: || Error::NoResponse,
        }))
        .build()
        .unwrap();
    let blocking = BlockingClient::new(client).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let err = runtime.block_on(async {
        blocking
            .call_unit(&Endpoint::get("x"), RequestBody::Empty)
            .unwrap_err()
    });
    assert!(matches!(err, Error::Custom(_)));
}
