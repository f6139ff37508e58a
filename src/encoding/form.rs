//! Percent-encoded query/form serializer.
//!
//! A pure function over a `FieldList`: pairs are joined as `key=value` with
//! `&`, both sides percent-encoded against the unreserved set. `Absent` emits
//! the bare key with no `=`; `Bytes` and `File` emit base64; `Bool` emits
//! `true`/`false`. The same output doubles as the URL query string for the
//! query input variant.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::value::{FieldList, Value};

/// Renders the literal textual form of a leaf, or `None` for `Absent`.
pub fn literal(value: &Value) -> Option<String> {
    match value {
        Value::Absent => None,
        Value::Text(text) => Some(text.clone()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_owned()),
        Value::Bytes(bytes) => Some(BASE64.encode(bytes)),
        // Lossy by design: only the base64 content survives this track.
        Value::File { content, .. } => Some(BASE64.encode(content)),
    }
}

/// Serializes the field list as `application/x-www-form-urlencoded` text.
pub fn urlencoded(fields: &FieldList) -> String {
    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        let key = urlencoding::encode(key);
        match literal(value) {
            Some(text) => pairs.push(format!("{key}={}", urlencoding::encode(&text))),
            None => pairs.push(key.into_owned()),
        }
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_and_percent_encodes() {
        let fields = vec![
            ("date".to_owned(), Value::Text("-14182980".into())),
            ("text".to_owned(), Value::Text("a&b".into())),
        ];
        assert_eq!(urlencoded(&fields), "date=-14182980&text=a%26b");
    }

    #[test]
    fn absent_emits_bare_key() {
        let fields = vec![
            ("empty".to_owned(), Value::Absent),
            ("ok".to_owned(), Value::Bool(true)),
        ];
        assert_eq!(urlencoded(&fields), "empty&ok=true");
    }

    #[test]
    fn bytes_and_files_emit_base64() {
        let fields = vec![
            ("blob".to_owned(), Value::Bytes(b"hi".to_vec())),
            (
                "file".to_owned(),
                Value::File {
                    file_name: "f.bin".into(),
                    content: b"hi".to_vec(),
                    content_type: "application/octet-stream".into(),
                },
            ),
        ];
        assert_eq!(urlencoded(&fields), "blob=aGk%3D&file=aGk%3D");
    }

    #[test]
    fn keys_are_percent_encoded_too() {
        let fields = vec![("a key".to_owned(), Value::Text("v".into()))];
        assert_eq!(urlencoded(&fields), "a%20key=v");
    }

    #[test]
    fn repeated_keys_are_preserved_in_order() {
        let fields = vec![
            ("tags[]".to_owned(), Value::Text("b".into())),
            ("tags[]".to_owned(), Value::Text("a".into())),
        ];
        assert_eq!(urlencoded(&fields), "tags%5B%5D=b&tags%5B%5D=a");
    }
}
