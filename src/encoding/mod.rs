//! Structured value encoding.
//!
//! The non-JSON request tracks share one intermediate representation: the
//! encoder flattens serializable input into an ordered [`FieldList`] of
//! [`Value`] leaves, and the form/multipart serializers render that list onto
//! the wire.

pub mod encoder;
pub mod form;
pub mod multipart;
pub mod value;

pub use encoder::{ArrayEncoding, EncodeError, EncoderConfig, TimestampEncoding, to_field_list};
pub use form::urlencoded;
pub use multipart::{MultipartBody, multipart, multipart_with_boundary};
pub use value::{FieldList, Timestamp, UploadFile, Value};
