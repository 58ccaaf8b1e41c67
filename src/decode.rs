//! Recursive message decoding and the streaming decoder.

use std::io::{self, BufReader, Read};

use byteorder::ReadBytesExt;
use bytes::Bytes;

use crate::error::{Error, Result};
use crate::field::{time_from_unix_nanos, FieldMut};
use crate::message::Message;
use crate::reader::{Reader, MAX_VARINT_BYTES};
use crate::types::WireType;

/// Parses one message body into `v`, dispatching each wire entry to the
/// field its number selects.
///
/// A field number of zero or beyond the message's arity stops parsing:
/// the remaining bytes belong to fields this message does not declare,
/// which is not an error. When `shared` carries the refcounted buffer
/// backing `data`, byte payloads land in [`FieldMut::Shared`] fields as
/// zero-copy slices of it.
pub(crate) fn decode_message(
    v: &mut dyn Message,
    data: &[u8],
    shared: Option<&Bytes>,
) -> Result<()> {
    let count = v.field_count() as u64;
    let mut r = Reader::new(data);
    while r.has_more() {
        let key = r.read_uvarint()?;
        let num = key >> 3;
        if num == 0 || num > count {
            break;
        }
        let index = (num - 1) as usize;
        let wire = WireType::from_u8((key & 7) as u8)
            .ok_or(Error::MalformedTag((key & 7) as u8))?;
        match wire {
            WireType::Varint => {
                let raw = r.read_uvarint()?;
                set_varint(v.field_mut(index), raw)?;
            }
            WireType::Fixed32 => {
                let raw = r.read_fixed32()?;
                set_fixed32(v.field_mut(index), raw);
            }
            WireType::Fixed64 => {
                let raw = r.read_fixed64()?;
                set_fixed64(v.field_mut(index), raw);
            }
            WireType::Bytes => {
                let payload = r.read_len_prefixed()?;
                set_bytes(v.field_mut(index), payload, shared)?;
            }
        }
    }
    Ok(())
}

fn set_varint(field: FieldMut<'_>, raw: u64) -> Result<()> {
    match field {
        FieldMut::Bool(slot) => *slot = bool_value(raw)?,
        FieldMut::Int32(slot) => *slot = int32_value(raw)?,
        FieldMut::Int64(slot) => *slot = raw as i64,
        FieldMut::Uint32(slot) => *slot = uint32_value(raw)?,
        FieldMut::Uint64(slot) => *slot = raw,
        FieldMut::Time(slot) => *slot = time_from_unix_nanos(raw as i64),
        FieldMut::OptBool(slot) => *slot = Some(bool_value(raw)?),
        FieldMut::OptInt32(slot) => *slot = Some(int32_value(raw)?),
        FieldMut::OptInt64(slot) => *slot = Some(raw as i64),
        FieldMut::OptUint32(slot) => *slot = Some(uint32_value(raw)?),
        FieldMut::OptUint64(slot) => *slot = Some(raw),
        FieldMut::BoolList(items) => items.push(bool_value(raw)?),
        FieldMut::Int32List(items) => items.push(int32_value(raw)?),
        FieldMut::Int64List(items) => items.push(raw as i64),
        FieldMut::Uint32List(items) => items.push(uint32_value(raw)?),
        FieldMut::Uint64List(items) => items.push(raw),
        // Any other field shape does not take a varint; the entry has
        // already been consumed and is dropped.
        _ => {}
    }
    Ok(())
}

fn set_fixed32(field: FieldMut<'_>, raw: u32) {
    match field {
        FieldMut::Int32(slot) => *slot = raw as i32,
        FieldMut::Uint32(slot) => *slot = raw,
        FieldMut::Float32(slot) => *slot = f32::from_bits(raw),
        FieldMut::OptInt32(slot) => *slot = Some(raw as i32),
        FieldMut::OptUint32(slot) => *slot = Some(raw),
        FieldMut::OptFloat32(slot) => *slot = Some(f32::from_bits(raw)),
        FieldMut::Int32List(items) => items.push(raw as i32),
        FieldMut::Uint32List(items) => items.push(raw),
        FieldMut::Float32List(items) => items.push(f32::from_bits(raw)),
        _ => {}
    }
}

fn set_fixed64(field: FieldMut<'_>, raw: u64) {
    match field {
        FieldMut::Int64(slot) => *slot = raw as i64,
        FieldMut::Uint64(slot) => *slot = raw,
        FieldMut::Float64(slot) => *slot = f64::from_bits(raw),
        FieldMut::OptInt64(slot) => *slot = Some(raw as i64),
        FieldMut::OptUint64(slot) => *slot = Some(raw),
        FieldMut::OptFloat64(slot) => *slot = Some(f64::from_bits(raw)),
        FieldMut::Int64List(items) => items.push(raw as i64),
        FieldMut::Uint64List(items) => items.push(raw),
        FieldMut::Float64List(items) => items.push(f64::from_bits(raw)),
        _ => {}
    }
}

fn set_bytes(field: FieldMut<'_>, payload: &[u8], shared: Option<&Bytes>) -> Result<()> {
    match field {
        FieldMut::Str(slot) => *slot = utf8(payload)?,
        FieldMut::Bytes(slot) => *slot = payload.to_vec(),
        FieldMut::Shared(slot) => *slot = shared_bytes(payload, shared),
        FieldMut::Message(m) => decode_message(m, payload, shared)?,
        FieldMut::Error(slot) => *slot = Some(utf8(payload)?.into()),
        FieldMut::OptStr(slot) => *slot = Some(utf8(payload)?),
        FieldMut::OptBytes(slot) => *slot = Some(payload.to_vec()),
        FieldMut::OptMessage(slot) => decode_message(slot.get_or_insert(), payload, shared)?,
        FieldMut::StrList(items) => items.push(utf8(payload)?),
        FieldMut::BytesList(items) => items.push(payload.to_vec()),
        FieldMut::MessageList(list) => decode_message(list.push_default(), payload, shared)?,
        _ => {}
    }
    Ok(())
}

fn bool_value(raw: u64) -> Result<bool> {
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(Error::InvalidBool(other)),
    }
}

fn int32_value(raw: u64) -> Result<i32> {
    i32::try_from(raw as i64).map_err(|_| Error::Overflow("value exceeds 32-bit signed field"))
}

fn uint32_value(raw: u64) -> Result<u32> {
    u32::try_from(raw).map_err(|_| Error::Overflow("value exceeds 32-bit unsigned field"))
}

fn utf8(payload: &[u8]) -> Result<String> {
    String::from_utf8(payload.to_vec()).map_err(|_| Error::InvalidUtf8)
}

fn shared_bytes(payload: &[u8], shared: Option<&Bytes>) -> Bytes {
    match shared {
        Some(backing) => backing.slice_ref(payload),
        None => Bytes::copy_from_slice(payload),
    }
}

/// Decoder reads length-prefixed messages from a byte stream.
///
/// Input is buffered; the decoder owns each message body it reads, so
/// [`FieldMut::Shared`] fields receive zero-copy slices of that body.
pub struct Decoder<R: Read> {
    r: BufReader<R>,
    max: usize,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder reading from `r`.
    ///
    /// `max` bounds the size of a single message; 0 disables the check.
    pub fn new(r: R, max: usize) -> Self {
        Self {
            r: BufReader::new(r),
            max,
        }
    }

    /// Reads one length-prefixed message and decodes it into `v`.
    ///
    /// A declared length above `max` fails with
    /// [`Error::MessageTooLarge`] before the body is consumed; a body
    /// shorter than declared fails with [`Error::UnexpectedEof`].
    pub fn decode(&mut self, v: &mut dyn Message) -> Result<()> {
        let size = self.read_frame_len()?;
        let mut body = vec![0u8; size];
        self.r.read_exact(&mut body).map_err(eof_err)?;
        let body = Bytes::from(body);
        decode_message(v, &body, Some(&body))
    }

    /// Reads one length-prefixed message and throws the body away,
    /// leaving the stream positioned at the next message.
    pub fn discard(&mut self) -> Result<()> {
        let size = self.read_frame_len()? as u64;
        let copied = io::copy(&mut (&mut self.r).take(size), &mut io::sink())?;
        if copied < size {
            return Err(Error::UnexpectedEof);
        }
        Ok(())
    }

    /// Drops any buffered data and rebinds the decoder to a new source
    /// and maximum message size.
    pub fn reset(&mut self, r: R, max: usize) {
        self.r = BufReader::new(r);
        self.max = max;
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.r.get_ref()
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.r.get_mut()
    }

    fn read_frame_len(&mut self) -> Result<usize> {
        let raw = read_uvarint_io(&mut self.r)?;
        let size = usize::try_from(raw)
            .map_err(|_| Error::Overflow("message length exceeds platform size"))?;
        if self.max > 0 && size > self.max {
            return Err(Error::MessageTooLarge {
                size,
                max: self.max,
            });
        }
        Ok(size)
    }
}

fn read_uvarint_io<R: Read>(r: &mut R) -> Result<u64> {
    let mut result = 0u64;
    let mut shift = 0;
    for i in 0..MAX_VARINT_BYTES {
        let b = r.read_u8().map_err(eof_err)?;
        if i == MAX_VARINT_BYTES - 1 && b > 1 {
            return Err(Error::Overflow("varint exceeds 64 bits"));
        }
        result |= u64::from(b & 0x7f) << shift;
        if b & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
    Err(Error::Overflow("varint exceeds 64 bits"))
}

fn eof_err(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(e)
    }
}
