//! Structured encoder: flattens any serializable value into a `FieldList`.
//!
//! The walk is depth-first in encounter order:
//! - `None` and unit values contribute an explicit `(name, Absent)` pair —
//!   never a silent skip — so the form serializer can still emit an empty
//!   parameter.
//! - Scalars keep their literal printed form; raw bytes become `Value::Bytes`
//!   (base64 on the wire); [`Timestamp`](super::Timestamp) and
//!   [`UploadFile`](super::UploadFile) wrappers are intercepted by magic name.
//! - Sequence elements recurse under the parent field name, post-fixed with
//!   `[]` or nothing per [`ArrayEncoding`].
//! - Nested composites flatten one level at a time: each sub-field name is
//!   taken on its own, with no dotted-path prefixing.
//!
//! Any failure during the walk surfaces as an [`EncodeError`] carrying the
//! offending field path; no partial output escapes.

use serde::ser::{self, Impossible, Serialize};
use std::fmt;

use super::value::{FieldList, FILE_TOKEN, TIMESTAMP_TOKEN, Value};

/// How sequence elements name themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArrayEncoding {
    /// `tags[]=a&tags[]=b`
    #[default]
    Brackets,
    /// `tags=a&tags=b`
    Repeat,
}

/// How [`Timestamp`](super::Timestamp) fields render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampEncoding {
    /// Verbatim RFC 3339 re-encode (chrono's default).
    #[default]
    Rfc3339,
    /// Whole seconds since the Unix epoch.
    EpochSeconds,
    /// Milliseconds since the Unix epoch.
    EpochMillis,
    /// A chrono `format` string, e.g. `"%Y-%m-%d"`.
    Custom(String),
}

/// Encoder-level configuration, supplied per service via
/// [`ServiceSpec::encoder_config`](crate::service::ServiceSpec::encoder_config).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncoderConfig {
    pub arrays: ArrayEncoding,
    pub timestamps: TimestampEncoding,
}

/// Failure during the flattening walk.
#[derive(Debug, Clone)]
pub struct EncodeError {
    /// Dotted path of the offending field, outermost first. Empty when the
    /// failure is not attributable to a single field.
    pub path: String,
    pub message: String,
}

impl EncodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            message: message.into(),
        }
    }

    /// Prefixes a path segment while unwinding. The innermost segment lands
    /// first, parents prepend in order.
    fn at(mut self, segment: &str) -> Self {
        if self.path.is_empty() {
            self.path = segment.to_owned();
        } else {
            self.path = format!("{segment}.{}", self.path);
        }
        self
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "field `{}`: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for EncodeError {}

impl ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::new(msg.to_string())
    }
}

/// Flattens `input` into an ordered `FieldList`.
///
/// The top-level value must be a structure or a map; scalars and sequences
/// have no field names to flatten under.
pub fn to_field_list<T>(input: &T, config: &EncoderConfig) -> Result<FieldList, EncodeError>
where
    T: Serialize + ?Sized,
{
    let mut fields = FieldList::new();
    input.serialize(RootSink {
        fields: &mut fields,
        config,
    })?;
    Ok(fields)
}

fn top_level_error() -> EncodeError {
    EncodeError::new("top-level input must be a structured value")
}

fn render_timestamp(raw: &str, encoding: &TimestampEncoding) -> Result<String, EncodeError> {
    if let TimestampEncoding::Rfc3339 = encoding {
        return Ok(raw.to_owned());
    }
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .map_err(|e| EncodeError::new(format!("invalid timestamp `{raw}`: {e}")))?;
    Ok(match encoding {
        TimestampEncoding::Rfc3339 => unreachable!(),
        TimestampEncoding::EpochSeconds => parsed.timestamp().to_string(),
        TimestampEncoding::EpochMillis => parsed.timestamp_millis().to_string(),
        // `DelayedFormat` reports bad specifiers through `fmt::Error`, so
        // render through `write!` instead of `to_string` (which would panic).
        TimestampEncoding::Custom(format) => {
            use fmt::Write as _;
            let mut rendered = String::new();
            write!(rendered, "{}", parsed.format(format)).map_err(|_| {
                EncodeError::new(format!("invalid timestamp format `{format}`"))
            })?;
            rendered
        }
    })
}

// ---------------------------------------------------------------------------
// Root serializer: only structures and maps are admissible entry points.
// ---------------------------------------------------------------------------

struct RootSink<'a> {
    fields: &'a mut FieldList,
    config: &'a EncoderConfig,
}

macro_rules! root_rejects {
    ($($method:ident: $ty:ty,)*) => {
        $(fn $method(self, _v: $ty) -> Result<(), EncodeError> {
            Err(top_level_error())
        })*
    };
}

impl<'a> ser::Serializer for RootSink<'a> {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = Impossible<(), EncodeError>;
    type SerializeTuple = Impossible<(), EncodeError>;
    type SerializeTupleStruct = Impossible<(), EncodeError>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = MapSink<'a>;
    type SerializeStruct = StructSink<'a>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    root_rejects! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
        serialize_bytes: &[u8],
    }

    fn serialize_none(self) -> Result<(), EncodeError> {
        Err(top_level_error())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodeError> {
        Err(top_level_error())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), EncodeError> {
        Err(top_level_error())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), EncodeError> {
        Err(top_level_error())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Err(top_level_error())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodeError> {
        Err(top_level_error())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        Err(top_level_error())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(top_level_error())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Ok(MapSink {
            fields: self.fields,
            config: self.config,
            key: None,
        })
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        Ok(StructSink::Nested {
            fields: self.fields,
            config: self.config,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(top_level_error())
    }
}

// ---------------------------------------------------------------------------
// Field serializer: one leaf (or sub-walk) under a known field name.
// ---------------------------------------------------------------------------

struct ValueSink<'a> {
    key: String,
    fields: &'a mut FieldList,
    config: &'a EncoderConfig,
}

impl ValueSink<'_> {
    fn put(self, value: Value) -> Result<(), EncodeError> {
        self.fields.push((self.key, value));
        Ok(())
    }

    fn put_text(self, text: impl ToString) -> Result<(), EncodeError> {
        let rendered = text.to_string();
        self.put(Value::Text(rendered))
    }
}

impl<'a> ser::Serializer for ValueSink<'a> {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = SeqSink<'a>;
    type SerializeTuple = SeqSink<'a>;
    type SerializeTupleStruct = SeqSink<'a>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = MapSink<'a>;
    type SerializeStruct = StructSink<'a>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    fn serialize_bool(self, v: bool) -> Result<(), EncodeError> {
        self.put(Value::Bool(v))
    }

    // Numbers keep their literal printed form; no precision is lost by the
    // stringification.
    fn serialize_i8(self, v: i8) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_i16(self, v: i16) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_i32(self, v: i32) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_i64(self, v: i64) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_i128(self, v: i128) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_u8(self, v: u8) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_u16(self, v: u16) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_u32(self, v: u32) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_u64(self, v: u64) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_u128(self, v: u128) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_f32(self, v: f32) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_f64(self, v: f64) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_char(self, v: char) -> Result<(), EncodeError> {
        self.put_text(v)
    }

    fn serialize_str(self, v: &str) -> Result<(), EncodeError> {
        self.put(Value::Text(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), EncodeError> {
        self.put(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<(), EncodeError> {
        self.put(Value::Absent)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodeError> {
        self.put(Value::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), EncodeError> {
        self.put(Value::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<(), EncodeError> {
        self.put(Value::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if name == TIMESTAMP_TOKEN {
            let raw = value.serialize(StringCapture)?;
            let rendered = render_timestamp(&raw, &self.config.timestamps)?;
            self.put(Value::Text(rendered))
        } else {
            value.serialize(self)
        }
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
        Ok(SeqSink {
            base: self.key,
            fields: self.fields,
            config: self.config,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodeError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodeError> {
        Err(EncodeError::new(format!(
            "tuple variant `{variant}` cannot be flattened"
        )))
    }

    // Nested composite: each sub-field name is taken on its own; the parent
    // key is dropped rather than dot-prefixed.
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
        Ok(MapSink {
            fields: self.fields,
            config: self.config,
            key: None,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodeError> {
        if name == FILE_TOKEN {
            Ok(StructSink::File(FileSink {
                key: self.key,
                fields: self.fields,
                file_name: None,
                content: None,
                content_type: None,
            }))
        } else {
            Ok(StructSink::Nested {
                fields: self.fields,
                config: self.config,
            })
        }
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodeError> {
        Err(EncodeError::new(format!(
            "struct variant `{variant}` cannot be flattened"
        )))
    }
}

// ---------------------------------------------------------------------------
// Compound sinks.
// ---------------------------------------------------------------------------

struct SeqSink<'a> {
    base: String,
    fields: &'a mut FieldList,
    config: &'a EncoderConfig,
}

impl SeqSink<'_> {
    fn element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = match self.config.arrays {
            ArrayEncoding::Brackets => format!("{}[]", self.base),
            ArrayEncoding::Repeat => self.base.clone(),
        };
        value.serialize(ValueSink {
            key,
            fields: &mut *self.fields,
            config: self.config,
        })
    }
}

impl ser::SerializeSeq for SeqSink<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeTuple for SeqSink<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for SeqSink<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        self.element(value)
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

struct MapSink<'a> {
    fields: &'a mut FieldList,
    config: &'a EncoderConfig,
    key: Option<String>,
}

impl ser::SerializeMap for MapSink<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), EncodeError> {
        let captured = key
            .serialize(StringCapture)
            .map_err(|_| EncodeError::new("map keys must encode as strings"))?;
        self.key = Some(captured);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EncodeError> {
        let key = self
            .key
            .take()
            .ok_or_else(|| EncodeError::new("map value serialized before its key"))?;
        value
            .serialize(ValueSink {
                key: key.clone(),
                fields: &mut *self.fields,
                config: self.config,
            })
            .map_err(|e| e.at(&key))
    }

    fn end(self) -> Result<(), EncodeError> {
        Ok(())
    }
}

enum StructSink<'a> {
    Nested {
        fields: &'a mut FieldList,
        config: &'a EncoderConfig,
    },
    File(FileSink<'a>),
}

impl ser::SerializeStruct for StructSink<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        match self {
            StructSink::Nested { fields, config } => value
                .serialize(ValueSink {
                    key: key.to_owned(),
                    fields: &mut **fields,
                    config: *config,
                })
                .map_err(|e| e.at(key)),
            StructSink::File(file) => file.field(key, value),
        }
    }

    fn end(self) -> Result<(), EncodeError> {
        match self {
            StructSink::Nested { .. } => Ok(()),
            StructSink::File(file) => file.end(),
        }
    }
}

/// Captures the three fields of the magic file struct and emits a single
/// `Value::File` leaf, bypassing further recursion.
struct FileSink<'a> {
    key: String,
    fields: &'a mut FieldList,
    file_name: Option<String>,
    content: Option<Vec<u8>>,
    content_type: Option<String>,
}

impl FileSink<'_> {
    fn field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), EncodeError> {
        match key {
            "file_name" => self.file_name = Some(value.serialize(StringCapture)?),
            "content" => self.content = Some(value.serialize(BytesCapture)?),
            "content_type" => self.content_type = Some(value.serialize(StringCapture)?),
            other => {
                return Err(EncodeError::new(format!(
                    "unexpected file field `{other}`"
                )));
            }
        }
        Ok(())
    }

    fn end(self) -> Result<(), EncodeError> {
        let (Some(file_name), Some(content), Some(content_type)) =
            (self.file_name, self.content, self.content_type)
        else {
            return Err(EncodeError::new("incomplete file value").at(&self.key));
        };
        self.fields.push((
            self.key,
            Value::File {
                file_name,
                content,
                content_type,
            },
        ));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Capture serializers for the magic wrapper internals.
// ---------------------------------------------------------------------------

macro_rules! capture_rejects {
    ($ok:ty, $expected:literal, $($method:ident: $ty:ty,)*) => {
        $(fn $method(self, _v: $ty) -> Result<$ok, EncodeError> {
            Err(EncodeError::new($expected))
        })*
    };
}

macro_rules! capture_rejects_units {
    ($ok:ty, $expected:literal) => {
        fn serialize_none(self) -> Result<$ok, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_unit(self) -> Result<$ok, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_unit_struct(self, _name: &'static str) -> Result<$ok, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_unit_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
        ) -> Result<$ok, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<$ok, EncodeError> {
            value.serialize(self)
        }

        fn serialize_newtype_struct<T: Serialize + ?Sized>(
            self,
            _name: &'static str,
            value: &T,
        ) -> Result<$ok, EncodeError> {
            value.serialize(self)
        }

        fn serialize_newtype_variant<T: Serialize + ?Sized>(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            value: &T,
        ) -> Result<$ok, EncodeError> {
            value.serialize(self)
        }

        fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_tuple_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleStruct, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_tuple_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeTupleVariant, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_struct(
            self,
            _name: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStruct, EncodeError> {
            Err(EncodeError::new($expected))
        }

        fn serialize_struct_variant(
            self,
            _name: &'static str,
            _index: u32,
            _variant: &'static str,
            _len: usize,
        ) -> Result<Self::SerializeStructVariant, EncodeError> {
            Err(EncodeError::new($expected))
        }
    };
}

struct StringCapture;

impl ser::Serializer for StringCapture {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    fn serialize_str(self, v: &str) -> Result<String, EncodeError> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String, EncodeError> {
        Ok(v.to_string())
    }

    capture_rejects! {
        String, "expected a string",
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_bytes: &[u8],
    }

    capture_rejects_units!(String, "expected a string");
}

struct BytesCapture;

impl ser::Serializer for BytesCapture {
    type Ok = Vec<u8>;
    type Error = EncodeError;
    type SerializeSeq = Impossible<Vec<u8>, EncodeError>;
    type SerializeTuple = Impossible<Vec<u8>, EncodeError>;
    type SerializeTupleStruct = Impossible<Vec<u8>, EncodeError>;
    type SerializeTupleVariant = Impossible<Vec<u8>, EncodeError>;
    type SerializeMap = Impossible<Vec<u8>, EncodeError>;
    type SerializeStruct = Impossible<Vec<u8>, EncodeError>;
    type SerializeStructVariant = Impossible<Vec<u8>, EncodeError>;

    fn serialize_bytes(self, v: &[u8]) -> Result<Vec<u8>, EncodeError> {
        Ok(v.to_vec())
    }

    capture_rejects! {
        Vec<u8>, "expected raw bytes",
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
    }

    capture_rejects_units!(Vec<u8>, "expected raw bytes");
}
