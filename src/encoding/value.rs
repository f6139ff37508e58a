//! Leaf serialization values.
//!
//! `Value` is the universal intermediate representation for the non-JSON
//! encodings: the structured encoder flattens arbitrary serializable input
//! into an ordered list of `(field name, Value)` pairs, which the form and
//! multipart serializers then render onto the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A single leaf produced by the structured encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicitly absent optional. Serializers emit an empty parameter
    /// rather than dropping the field.
    Absent,
    /// Plain text, including stringified numbers.
    Text(String),
    /// Raw bytes. Rendered as base64 by the form and multipart serializers.
    Bytes(Vec<u8>),
    /// A boolean, rendered as `true`/`false`.
    Bool(bool),
    /// A file with metadata. Multipart parts carry the filename and content
    /// type; the form serializer keeps only the base64 content.
    File {
        file_name: String,
        content: Vec<u8>,
        content_type: String,
    },
}

/// Ordered `(field name, leaf)` pairs in encounter order.
///
/// Order is significant for encoder determinism; the wire serializers never
/// reorder, dedupe, or merge repeated keys.
pub type FieldList = Vec<(String, Value)>;

/// Magic newtype name the flattening serializer intercepts for timestamps.
pub(crate) const TIMESTAMP_TOKEN: &str = "$enroute::private::Timestamp";

/// Magic struct name the flattening serializer intercepts for file uploads.
pub(crate) const FILE_TOKEN: &str = "$enroute::private::UploadFile";

/// A timestamp field whose wire rendering follows the encoder configuration.
///
/// Under any ordinary serde serializer (e.g. `serde_json`) this encodes as an
/// RFC 3339 string, chrono's default. The structured encoder intercepts it
/// (same magic-name trick the `toml` crate uses for datetimes) and re-renders
/// it as RFC 3339, epoch seconds, epoch milliseconds, or a custom format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(pub DateTime<Utc>);

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        serializer.serialize_newtype_struct(TIMESTAMP_TOKEN, &raw)
    }
}

/// A file destined for a multipart part (or, lossily, a form field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

impl Serialize for UploadFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct(FILE_TOKEN, 3)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("content", &AsBytes(&self.content))?;
        state.serialize_field("content_type", &self.content_type)?;
        state.end()
    }
}

/// Forces `serialize_bytes` for a byte slice (`Vec<u8>` would otherwise
/// serialize as a sequence of numbers).
struct AsBytes<'a>(&'a [u8]);

impl Serialize for AsBytes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}
