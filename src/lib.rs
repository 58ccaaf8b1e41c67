//! Tagwire - schema-free Protocol Buffers wire-format serialization.
//!
//! A struct's field layout determines its wire tags: the field at
//! position `i` carries wire number `i + 1`. There is no IDL and no
//! generated code; a type joins the wire by implementing [`Message`],
//! exposing each field as a [`Field`]/[`FieldMut`] view.
//!
//! # Example
//!
//! ```rust
//! use tagwire::{marshal, unmarshal, Field, FieldMut, Message, Result};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//!     label: String,
//! }
//!
//! impl Message for Point {
//!     fn field_count(&self) -> usize {
//!         3
//!     }
//!
//!     fn field(&self, index: usize) -> Field<'_> {
//!         match index {
//!             0 => Field::Uint32(self.x),
//!             1 => Field::Uint32(self.y),
//!             2 => Field::Str(&self.label),
//!             _ => Field::Skip,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
//!         match index {
//!             0 => FieldMut::Uint32(&mut self.x),
//!             1 => FieldMut::Uint32(&mut self.y),
//!             2 => FieldMut::Str(&mut self.label),
//!             _ => FieldMut::Skip,
//!         }
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let point = Point {
//!         x: 3,
//!         y: 4,
//!         label: "origin".to_string(),
//!     };
//!     let data = marshal(&point)?;
//!
//!     let mut decoded = Point::default();
//!     unmarshal(&data, &mut decoded)?;
//!     assert_eq!(decoded, point);
//!     Ok(())
//! }
//! ```

mod annotation;
mod decode;
mod encode;
mod error;
mod field;
mod message;
mod reader;
mod size;
mod types;
mod writer;

pub use annotation::{Annotation, Encoding, Label};
pub use bytes::Bytes;
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use field::{Field, FieldMut};
pub use message::{Message, MessageList, MessageSlot};
pub use types::WireType;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the exact encoded size of `v` in bytes.
///
/// Nested message length prefixes require sizes before any bytes exist,
/// so encoding is two passes: this one, then the write.
pub fn size(v: &dyn Message) -> usize {
    crate::size::message_size(v)
}

/// Traverses `v` recursively and returns its wire encoding in a freshly
/// allocated, exactly sized buffer.
pub fn marshal(v: &dyn Message) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(size(v));
    encode::encode_message(&mut buf, v)?;
    Ok(buf)
}

/// Encodes `v` into `buf` at computed offsets and returns the number of
/// bytes written.
///
/// # Panics
///
/// Panics if `buf` is smaller than [`size()`] reports for `v`; sizing
/// the buffer is the caller's responsibility.
pub fn marshal_into(buf: &mut [u8], v: &dyn Message) -> Result<usize> {
    let mut w = writer::SliceWriter::new(buf);
    encode::encode_message(&mut w, v)?;
    Ok(w.position())
}

/// Parses the wire encoding in `data` and stores the result in `v`,
/// copying byte payloads into owned storage.
///
/// Fields without a wire entry keep their current values; wire entries
/// with field numbers beyond `v`'s arity end parsing without error.
pub fn unmarshal(data: &[u8], v: &mut dyn Message) -> Result<()> {
    decode::decode_message(v, data, None)
}

/// As [`unmarshal`], but [`FieldMut::Shared`] byte fields receive
/// zero-copy slices of `data` instead of copies.
pub fn unmarshal_shared(data: &Bytes, v: &mut dyn Message) -> Result<()> {
    decode::decode_message(v, data, Some(data))
}
