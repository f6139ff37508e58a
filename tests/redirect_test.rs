//! Redirect control flow: a service-classified redirect re-enters assembly
//! with a URL override, and the hop budget bounds re-dispatch.

use std::sync::Mutex;

use enroute::{
    Client, Endpoint, Error, ErrorDecision, RequestBody, ServiceSpec, TransportResponse,
};

/// Treats a `location` field in a 2xx body as "resource moved, go there".
struct RelocatingService {
    base_url: reqwest::Url,
}

impl ServiceSpec for RelocatingService {
    fn id(&self) -> &str {
        "relocating"
    }

    fn base_url(&self) -> reqwest::Url {
        self.base_url.clone()
    }

    fn validate_response(&self, response: &TransportResponse) -> Result<(), Error> {
        if relocation_target(response).is_some() {
            return Err(Error::Custom("resource moved".into()));
        }
        Ok(())
    }

    fn classify(&self, _error: &Error, response: &TransportResponse) -> ErrorDecision {
        match relocation_target(response) {
            Some(url) => ErrorDecision::Redirect(url),
            None => ErrorDecision::Propagate,
        }
    }
}

fn relocation_target(response: &TransportResponse) -> Option<reqwest::Url> {
    let value: serde_json::Value = serde_json::from_slice(&response.body).ok()?;
    value.get("location")?.as_str()?.parse().ok()
}

#[tokio::test]
async fn redirect_reissues_once_and_yields_a_single_outcome() {
    let mut server = mockito::Server::new_async().await;
    let moved = server
        .mock("GET", "/report")
        .with_status(200)
        .with_body(format!(r#"{{"location":"{}/report-v2"}}"#, server.url()))
        .expect(1)
        .create_async()
        .await;
    let target = server
        .mock("GET", "/report-v2")
        .with_status(200)
        .with_body(r#"{"rows":2}"#)
        .expect(1)
        .create_async()
        .await;

    let client = Client::builder(RelocatingService {
        base_url: format!("{}/", server.url()).parse().unwrap(),
    })
    .build()
    .unwrap();

    let value: serde_json::Value = client
        .call(&Endpoint::get("report"), RequestBody::Empty)
        .await
        .unwrap();

    assert_eq!(value["rows"], 2);
    moved.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn redirect_budget_exhaustion_surfaces_the_last_failure() {
    let mut server = mockito::Server::new_async().await;
    // Points at itself forever. Default budget is one extra hop, so exactly
    // two requests go out.
    let mock = server
        .mock("GET", "/loop")
        .with_status(200)
        .with_body(format!(r#"{{"location":"{}/loop"}}"#, server.url()))
        .expect(2)
        .create_async()
        .await;

    let client = Client::builder(RelocatingService {
        base_url: format!("{}/", server.url()).parse().unwrap(),
    })
    .build()
    .unwrap();

    let err = client
        .call_unit(&Endpoint::get("loop"), RequestBody::Empty)
        .await
        .unwrap_err();

    assert!(matches!(err.root(), Error::Custom(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn redirect_budget_is_configurable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/loop")
        .with_status(200)
        .with_body(format!(r#"{{"location":"{}/loop"}}"#, server.url()))
        .expect(4)
        .create_async()
        .await;

    let client = Client::builder(RelocatingService {
        base_url: format!("{}/", server.url()).parse().unwrap(),
    })
    .max_redirects(3)
    .build()
    .unwrap();

    let err = client
        .call_unit(&Endpoint::get("loop"), RequestBody::Empty)
        .await
        .unwrap_err();
    assert!(matches!(err.root(), Error::Custom(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn redirect_hop_reads_a_freshly_swapped_credential() {
    use async_trait::async_trait;
    use enroute::{AuthPolicy, Transport, TransportRequest};

    /// Captures the Authorization header of every request and answers with a
    /// relocation on the first hop only.
    struct CapturingTransport {
        seen: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl Transport for CapturingTransport {
        async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, Error> {
            let auth = request
                .headers
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let mut seen = self.seen.lock().unwrap();
            seen.push(auth);
            let body = if seen.len() == 1 {
                br#"{"location":"https://example.test/next"}"#.to_vec()
            } else {
                b"{}".to_vec()
            };
            Ok(TransportResponse {
                status: 200,
                headers: Default::default(),
                body,
            })
        }
    }

    let transport = std::sync::Arc::new(CapturingTransport {
        seen: Mutex::new(Vec::new()),
    });
    let client = Client::builder(RelocatingService {
        base_url: "https://example.test/".parse().unwrap(),
    })
    .transport(transport.clone())
    .credential("first-token")
    .build()
    .unwrap();

    let endpoint = Endpoint::get("anything").auth(AuthPolicy::Required);

    // First call redirects once (two dispatches), second call succeeds
    // directly. Each dispatch must carry the credential current at that
    // moment.
    client.call_unit(&endpoint, RequestBody::Empty).await.unwrap();
    client.set_credential(secrecy::SecretString::from("second-token"));
    client.call_unit(&endpoint, RequestBody::Empty).await.unwrap();

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].as_deref(), Some("Bearer first-token"));
    assert_eq!(seen[1].as_deref(), Some("Bearer first-token"));
    assert_eq!(seen[2].as_deref(), Some("Bearer second-token"));
}
