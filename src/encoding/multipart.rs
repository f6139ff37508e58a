//! Multipart form serializer.
//!
//! One part per `(key, leaf)` pair, in input order, each introduced by the
//! body's boundary token and carrying a `Content-Disposition: form-data`
//! header. `File` leaves add `filename` and a `Content-Type` header and carry
//! their raw content; `Bytes` leaves are rendered as base64 text like the
//! form track; `Absent` emits an empty part body. The body ends with the
//! closing boundary marker.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::value::{FieldList, Value};

/// A serialized multipart body with the boundary it was written against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub boundary: String,
    pub content: Vec<u8>,
}

impl MultipartBody {
    /// The `Content-Type` header value for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Serializes the field list with a freshly generated boundary token.
pub fn multipart(fields: &FieldList) -> MultipartBody {
    let boundary = format!("enroute.boundary.{}", uuid::Uuid::new_v4().simple());
    let content = multipart_with_boundary(fields, &boundary);
    MultipartBody { boundary, content }
}

/// Percent-encodes the characters that would corrupt a
/// `Content-Disposition` parameter (RFC 7578 §4.2).
fn escape_header_param(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '"' => out.push_str("%22"),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            other => out.push(other),
        }
    }
    out
}

/// Serializes the field list against a caller-chosen boundary token.
pub fn multipart_with_boundary(fields: &FieldList, boundary: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for (key, value) in fields {
        let key = escape_header_param(key);
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match value {
            Value::File {
                file_name,
                content,
                content_type,
            } => {
                let file_name = escape_header_param(file_name);
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{key}\"; filename=\"{file_name}\"\r\n"
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
                out.extend_from_slice(content);
            }
            Value::Absent => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
            }
            Value::Text(text) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
                out.extend_from_slice(text.as_bytes());
            }
            Value::Bool(b) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
                out.extend_from_slice(if *b { b"true" } else { b"false" });
            }
            Value::Bytes(bytes) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
                );
                out.extend_from_slice(BASE64.encode(bytes).as_bytes());
            }
        }
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "test.boundary";

    fn render(fields: &FieldList) -> String {
        String::from_utf8(multipart_with_boundary(fields, BOUNDARY)).expect("utf8 body")
    }

    #[test]
    fn text_part_layout() {
        let fields = vec![("name".to_owned(), Value::Text("value".into()))];
        assert_eq!(
            render(&fields),
            "--test.boundary\r\n\
             Content-Disposition: form-data; name=\"name\"\r\n\r\n\
             value\r\n\
             --test.boundary--\r\n"
        );
    }

    #[test]
    fn file_part_carries_filename_and_content_type() {
        let fields = vec![(
            "upload".to_owned(),
            Value::File {
                file_name: "a.txt".into(),
                content: b"data".to_vec(),
                content_type: "text/plain".into(),
            },
        )];
        let body = render(&fields);
        assert!(body.contains(
            "Content-Disposition: form-data; name=\"upload\"; filename=\"a.txt\"\r\n"
        ));
        assert!(body.contains("Content-Type: text/plain\r\n\r\ndata\r\n"));
    }

    #[test]
    fn absent_part_has_empty_body() {
        let fields = vec![("gone".to_owned(), Value::Absent)];
        assert!(render(&fields).contains("name=\"gone\"\r\n\r\n\r\n"));
    }

    #[test]
    fn parts_keep_input_order() {
        let fields = vec![
            ("b".to_owned(), Value::Text("2".into())),
            ("a".to_owned(), Value::Text("1".into())),
            ("b".to_owned(), Value::Text("3".into())),
        ];
        let body = render(&fields);
        let first_b = body.find("name=\"b\"").unwrap();
        let a = body.find("name=\"a\"").unwrap();
        let second_b = body.rfind("name=\"b\"").unwrap();
        assert!(first_b < a && a < second_b);
    }

    #[test]
    fn quotes_and_line_breaks_in_names_are_escaped() {
        let fields = vec![(
            "na\"me\r\nX".to_owned(),
            Value::File {
                file_name: "a\"b\n.txt".into(),
                content: b"data".to_vec(),
                content_type: "text/plain".into(),
            },
        )];
        let body = render(&fields);
        assert!(body.contains("name=\"na%22me%0D%0AX\"; filename=\"a%22b%0A.txt\""));
    }

    #[test]
    fn body_ends_with_closing_marker() {
        assert!(render(&Vec::new()).ends_with("--test.boundary--\r\n"));
    }

    #[test]
    fn bytes_part_is_base64_text() {
        let fields = vec![("blob".to_owned(), Value::Bytes(b"hi".to_vec()))];
        assert!(render(&fields).contains("\r\n\r\naGk=\r\n"));
    }

    #[test]
    fn generated_boundaries_are_unique_per_body() {
        let fields = vec![("k".to_owned(), Value::Text("v".into()))];
        let a = multipart(&fields);
        let b = multipart(&fields);
        assert_ne!(a.boundary, b.boundary);
        assert!(a.content_type().starts_with("multipart/form-data; boundary="));
    }
}
