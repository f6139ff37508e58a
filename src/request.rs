//! Endpoint descriptors, request input variants, and the request assembler.

use reqwest::Method;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::encoding::{self, EncoderConfig, FieldList};
use crate::error::Error;
use crate::service::ServiceSpec;
use crate::transport::TransportRequest;

/// Authorization requirement of a single endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Never attach credentials.
    #[default]
    None,
    /// Attach credentials when the service holds them, proceed silently
    /// otherwise.
    Optional,
    /// Fail with [`Error::MissingCredential`] before any network activity
    /// when no credential is set.
    Required,
}

/// Expected response encoding; drives the `Accept` header and the typed
/// decode step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Text,
    Binary,
}

impl ResponseFormat {
    fn accept(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Text => "text/plain",
            Self::Binary => "*/*",
        }
    }
}

/// Static description of one HTTP operation.
///
/// Constructed per call site; stateless beyond its fields.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: String,
    auth: AuthPolicy,
    response: ResponseFormat,
    operation: Option<String>,
}

impl Endpoint {
    /// A GET endpoint at `path` (relative to the service base URL).
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            auth: AuthPolicy::default(),
            response: ResponseFormat::default(),
            operation: None,
        }
    }

    pub fn auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    pub fn response(mut self, response: ResponseFormat) -> Self {
        self.response = response;
        self
    }

    /// Human-readable operation name, used only in error text.
    pub fn operation(mut self, name: impl Into<String>) -> Self {
        self.operation = Some(name.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn auth_policy(&self) -> AuthPolicy {
        self.auth
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.operation.as_deref()
    }
}

/// Request input variant: exactly one is produced per call.
///
/// `Json` comes from a serde codec, `Xml`/`Binary`/`Text` are direct
/// pass-throughs, and `Form`/`Multipart`/`Query` run through the structured
/// encoder and a wire serializer at assembly time.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Xml(Vec<u8>),
    Binary(Vec<u8>),
    Text(String),
    Form(FieldList),
    Multipart(FieldList),
    Query(FieldList),
}

impl RequestBody {
    /// JSON-encodes any serializable input.
    pub fn json<T: Serialize>(input: &T) -> Result<Self, Error> {
        let value = serde_json::to_value(input).map_err(|e| Error::Encode {
            path: "$".to_owned(),
            message: e.to_string(),
        })?;
        Ok(Self::Json(value))
    }

    /// Flattens `input` for the `application/x-www-form-urlencoded` track.
    pub fn form<T: Serialize>(input: &T, config: &EncoderConfig) -> Result<Self, Error> {
        Ok(Self::Form(encoding::to_field_list(input, config)?))
    }

    /// Flattens `input` for the multipart track.
    pub fn multipart<T: Serialize>(input: &T, config: &EncoderConfig) -> Result<Self, Error> {
        Ok(Self::Multipart(encoding::to_field_list(input, config)?))
    }

    /// Flattens `input` into URL query items.
    pub fn query<T: Serialize>(input: &T, config: &EncoderConfig) -> Result<Self, Error> {
        Ok(Self::Query(encoding::to_field_list(input, config)?))
    }

    pub fn text(input: impl Into<String>) -> Self {
        Self::Text(input.into())
    }

    pub fn binary(input: impl Into<Vec<u8>>) -> Self {
        Self::Binary(input.into())
    }

    pub fn xml(input: impl Into<Vec<u8>>) -> Self {
        Self::Xml(input.into())
    }
}

/// Assembles a transport-level request from a service, an endpoint, and an
/// input variant.
///
/// Steps, in order: resolve the final URL (override wins, query variants
/// attach as query items), set method, body, and `Content-Type`, set
/// `Accept`, apply authorization per policy, and finally run the service's
/// request-configuration hook. Any failure short-circuits before dispatch.
pub fn assemble(
    spec: &dyn ServiceSpec,
    credential: Option<&SecretString>,
    endpoint: &Endpoint,
    body: &RequestBody,
    url_override: Option<&reqwest::Url>,
) -> Result<TransportRequest, Error> {
    let mut url = match url_override {
        Some(url) => url.clone(),
        None => spec
            .base_url()
            .join(endpoint.path())
            .map_err(|e| Error::InvalidUrl(format!("`{}`: {e}", endpoint.path())))?,
    };

    if let RequestBody::Query(fields) = body {
        let query = encoding::urlencoded(fields);
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
    }

    let mut headers = HeaderMap::new();
    let payload: Option<Vec<u8>> = match body {
        RequestBody::Empty | RequestBody::Query(_) => None,
        RequestBody::Json(value) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Some(serde_json::to_vec(value).map_err(|e| Error::Encode {
                path: "$".to_owned(),
                message: e.to_string(),
            })?)
        }
        RequestBody::Xml(bytes) => {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/xml; charset=utf-8"),
            );
            Some(bytes.clone())
        }
        RequestBody::Binary(bytes) => {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            );
            Some(bytes.clone())
        }
        RequestBody::Text(text) => {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            Some(text.clone().into_bytes())
        }
        RequestBody::Form(fields) => {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
            );
            Some(encoding::urlencoded(fields).into_bytes())
        }
        RequestBody::Multipart(fields) => {
            let multipart = encoding::multipart(fields);
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_str(&multipart.content_type())
                    .map_err(|e| Error::Config(format!("invalid boundary: {e}")))?,
            );
            Some(multipart.content)
        }
    };

    headers.insert(
        ACCEPT,
        HeaderValue::from_static(endpoint.response_format().accept()),
    );

    match endpoint.auth_policy() {
        AuthPolicy::None => {}
        AuthPolicy::Optional | AuthPolicy::Required => match credential {
            Some(credential) => {
                let value = format!("Bearer {}", credential.expose_secret());
                let mut value = HeaderValue::from_str(&value)
                    .map_err(|e| Error::Config(format!("invalid credential: {e}")))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None if endpoint.auth_policy() == AuthPolicy::Required => {
                return Err(Error::MissingCredential);
            }
            None => {}
        },
    }

    let mut request = TransportRequest {
        method: endpoint.method().clone(),
        url,
        headers,
        body: payload,
    };
    spec.configure_request(&mut request)?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::StaticService;

    fn service() -> StaticService {
        StaticService::new("test", "https://api.example.com/v1/".parse().unwrap())
    }

    fn token() -> SecretString {
        SecretString::from("sekrit".to_owned())
    }

    #[test]
    fn joins_path_against_base_url() {
        let endpoint = Endpoint::get("widgets");
        let request =
            assemble(&service(), None, &endpoint, &RequestBody::Empty, None).unwrap();
        assert_eq!(request.url.as_str(), "https://api.example.com/v1/widgets");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn override_url_wins() {
        let endpoint = Endpoint::get("widgets");
        let other: reqwest::Url = "https://mirror.example.com/widgets".parse().unwrap();
        let request = assemble(
            &service(),
            None,
            &endpoint,
            &RequestBody::Empty,
            Some(&other),
        )
        .unwrap();
        assert_eq!(request.url, other);
    }

    #[test]
    fn query_variant_attaches_query_items() {
        #[derive(Serialize)]
        struct Params {
            q: &'static str,
            page: u32,
        }

        let body =
            RequestBody::query(&Params { q: "a b", page: 2 }, &EncoderConfig::default()).unwrap();
        let request = assemble(&service(), None, &Endpoint::get("search"), &body, None).unwrap();
        assert_eq!(request.url.query(), Some("q=a%20b&page=2"));
        assert!(request.body.is_none());
    }

    #[test]
    fn form_variant_sets_body_and_content_type() {
        #[derive(Serialize)]
        struct Input {
            text: &'static str,
        }

        let body =
            RequestBody::form(&Input { text: "a&b" }, &EncoderConfig::default()).unwrap();
        let request = assemble(&service(), None, &Endpoint::put("submit"), &body, None).unwrap();
        assert_eq!(
            request.headers.get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded; charset=utf-8"
        );
        assert_eq!(request.body.as_deref(), Some(b"text=a%26b".as_slice()));
    }

    #[test]
    fn multipart_content_type_carries_the_body_boundary() {
        #[derive(Serialize)]
        struct Input {
            name: &'static str,
        }

        let body =
            RequestBody::multipart(&Input { name: "x" }, &EncoderConfig::default()).unwrap();
        let request = assemble(&service(), None, &Endpoint::post("upload"), &body, None).unwrap();
        let content_type = request.headers.get(CONTENT_TYPE).unwrap().to_str().unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .expect("boundary parameter");
        let rendered = String::from_utf8(request.body.unwrap()).unwrap();
        assert!(rendered.starts_with(&format!("--{boundary}\r\n")));
        assert!(rendered.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn accept_header_follows_response_format() {
        let endpoint = Endpoint::get("data").response(ResponseFormat::Binary);
        let request =
            assemble(&service(), None, &endpoint, &RequestBody::Empty, None).unwrap();
        assert_eq!(request.headers.get(ACCEPT).unwrap(), "*/*");
    }

    #[test]
    fn required_auth_without_credential_fails_before_dispatch() {
        let endpoint = Endpoint::get("me").auth(AuthPolicy::Required);
        let err =
            assemble(&service(), None, &endpoint, &RequestBody::Empty, None).unwrap_err();
        assert!(matches!(err, Error::MissingCredential));
    }

    #[test]
    fn optional_auth_attaches_when_held_and_skips_when_not() {
        let endpoint = Endpoint::get("me").auth(AuthPolicy::Optional);

        let with = assemble(
            &service(),
            Some(&token()),
            &endpoint,
            &RequestBody::Empty,
            None,
        )
        .unwrap();
        assert_eq!(
            with.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer sekrit"
        );

        let without =
            assemble(&service(), None, &endpoint, &RequestBody::Empty, None).unwrap();
        assert!(without.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn no_auth_policy_never_attaches_a_held_credential() {
        let request = assemble(
            &service(),
            Some(&token()),
            &Endpoint::get("public"),
            &RequestBody::Empty,
            None,
        )
        .unwrap();
        assert!(request.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn configure_request_hook_failure_short_circuits() {
        struct Rejecting;

        impl ServiceSpec for Rejecting {
            fn id(&self) -> &str {
                "rejecting"
            }

            fn base_url(&self) -> reqwest::Url {
                "https://api.example.com/".parse().unwrap()
            }

            fn configure_request(&self, _: &mut TransportRequest) -> Result<(), Error> {
                Err(Error::Hook("nope".into()))
            }
        }

        let err = assemble(
            &Rejecting,
            None,
            &Endpoint::get("x"),
            &RequestBody::Empty,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Hook(_)));
    }
}
