//! Field views over message structs.
//!
//! [`Field`] and [`FieldMut`] form the closed set of shapes the codec
//! understands. A message exposes each of its struct fields as one of
//! these views; a shape the wire format cannot carry is reported as
//! `Skip` and ignored without error.

use std::error::Error as StdError;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;

use crate::message::{Message, MessageList, MessageSlot};

/// Immutable view of one message field, consumed while sizing and
/// encoding.
///
/// Scalar variants carry implicit presence: the type's zero value (0,
/// 0.0 bits, false, empty) is suppressed from the encoding. `Opt`
/// variants carry explicit presence in the wrapper, so a held zero value
/// is still emitted. List variants encode one tagged wire entry per
/// element, never the packed form.
pub enum Field<'a> {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(&'a str),
    Bytes(&'a [u8]),
    /// Nested message, emitted as a length-delimited payload even when
    /// its body is empty.
    Message(&'a dyn Message),
    /// Instant encoded as varint nanoseconds since the Unix epoch;
    /// `UNIX_EPOCH` is the zero value.
    Time(SystemTime),
    /// Textual error, encoded as its display text; `None` encodes
    /// nothing.
    Error(Option<&'a (dyn StdError + Send + Sync)>),
    OptBool(Option<bool>),
    OptInt32(Option<i32>),
    OptInt64(Option<i64>),
    OptUint32(Option<u32>),
    OptUint64(Option<u64>),
    OptFloat32(Option<f32>),
    OptFloat64(Option<f64>),
    OptStr(Option<&'a str>),
    OptBytes(Option<&'a [u8]>),
    OptMessage(&'a dyn MessageSlot),
    BoolList(&'a [bool]),
    Int32List(&'a [i32]),
    Int64List(&'a [i64]),
    Uint32List(&'a [u32]),
    Uint64List(&'a [u64]),
    Float32List(&'a [f32]),
    Float64List(&'a [f64]),
    StrList(&'a [String]),
    BytesList(&'a [Vec<u8>]),
    MessageList(&'a dyn MessageList),
    /// Field the wire format does not carry; skipped without error.
    Skip,
}

/// Mutable view of one message field, filled while decoding.
///
/// The decoder assigns scalars in place, inserts into `Opt` slots,
/// appends to lists, and recurses into nested messages. A wire entry
/// whose wire type does not match the field's shape is consumed and
/// ignored.
pub enum FieldMut<'a> {
    Bool(&'a mut bool),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Uint32(&'a mut u32),
    Uint64(&'a mut u64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    Str(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    /// Byte payload held as a refcounted slice. Filled zero-copy by
    /// [`unmarshal_shared`](crate::unmarshal_shared) and the streaming
    /// decoder, by copy otherwise.
    Shared(&'a mut Bytes),
    Message(&'a mut dyn Message),
    Time(&'a mut SystemTime),
    Error(&'a mut Option<Box<dyn StdError + Send + Sync>>),
    OptBool(&'a mut Option<bool>),
    OptInt32(&'a mut Option<i32>),
    OptInt64(&'a mut Option<i64>),
    OptUint32(&'a mut Option<u32>),
    OptUint64(&'a mut Option<u64>),
    OptFloat32(&'a mut Option<f32>),
    OptFloat64(&'a mut Option<f64>),
    OptStr(&'a mut Option<String>),
    OptBytes(&'a mut Option<Vec<u8>>),
    OptMessage(&'a mut dyn MessageSlot),
    BoolList(&'a mut Vec<bool>),
    Int32List(&'a mut Vec<i32>),
    Int64List(&'a mut Vec<i64>),
    Uint32List(&'a mut Vec<u32>),
    Uint64List(&'a mut Vec<u64>),
    Float32List(&'a mut Vec<f32>),
    Float64List(&'a mut Vec<f64>),
    StrList(&'a mut Vec<String>),
    BytesList(&'a mut Vec<Vec<u8>>),
    MessageList(&'a mut dyn MessageList),
    /// Field the wire format does not carry; skipped without error.
    Skip,
}

/// Nanoseconds since the Unix epoch, negative for earlier instants.
pub(crate) fn unix_nanos(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i64,
        Err(e) => -(e.duration().as_nanos() as i64),
    }
}

/// Inverse of [`unix_nanos`].
pub(crate) fn time_from_unix_nanos(ns: i64) -> SystemTime {
    if ns >= 0 {
        UNIX_EPOCH + Duration::from_nanos(ns as u64)
    } else {
        UNIX_EPOCH - Duration::from_nanos(ns.unsigned_abs())
    }
}
