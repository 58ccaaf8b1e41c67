//! Recursive message encoding and the streaming encoder.

use std::io::{BufWriter, Write};

use crate::annotation::{Annotation, Label};
use crate::error::{Error, Result};
use crate::field::{unix_nanos, Field};
use crate::message::Message;
use crate::size::message_size;
use crate::types::WireType;
use crate::writer::{
    write_fixed32, write_fixed64, write_len_prefixed, write_tag, write_uvarint, IoWriter,
    WireWrite,
};

/// Walks `v` in field order and writes one wire entry per populated
/// field.
pub(crate) fn encode_message<W: WireWrite>(w: &mut W, v: &dyn Message) -> Result<()> {
    for i in 0..v.field_count() {
        encode_field(w, i as u64 + 1, v.field(i), v.annotation(i))?;
    }
    Ok(())
}

fn encode_field<W: WireWrite>(
    w: &mut W,
    num: u64,
    field: Field<'_>,
    ann: Annotation,
) -> Result<()> {
    let forced = matches!(ann.label, Label::Optional | Label::Required);
    match field {
        Field::Bool(v) => {
            if v || forced {
                put_bool(w, num, v)?;
            }
        }
        Field::Int32(v) => {
            if v != 0 || forced {
                put_int(w, num, v as i64 as u64, ann.encoding.wire32())?;
            }
        }
        Field::Int64(v) => {
            if v != 0 || forced {
                put_int(w, num, v as u64, ann.encoding.wire64())?;
            }
        }
        Field::Uint32(v) => {
            if v != 0 || forced {
                put_int(w, num, u64::from(v), ann.encoding.wire32())?;
            }
        }
        Field::Uint64(v) => {
            if v != 0 || forced {
                put_int(w, num, v, ann.encoding.wire64())?;
            }
        }
        Field::Float32(v) => {
            let bits = v.to_bits();
            if bits != 0 || forced {
                write_tag(w, num, WireType::Fixed32)?;
                write_fixed32(w, bits)?;
            }
        }
        Field::Float64(v) => {
            let bits = v.to_bits();
            if bits != 0 || forced {
                write_tag(w, num, WireType::Fixed64)?;
                write_fixed64(w, bits)?;
            }
        }
        Field::Str(s) => {
            if !s.is_empty() || forced {
                put_bytes(w, num, s.as_bytes())?;
            }
        }
        Field::Bytes(b) => {
            if !b.is_empty() || forced {
                put_bytes(w, num, b)?;
            }
        }
        Field::Message(m) => put_nested(w, num, m)?,
        Field::Time(t) => {
            let ns = unix_nanos(t) as u64;
            if ns != 0 || forced {
                put_int(w, num, ns, WireType::Varint)?;
            }
        }
        Field::Error(e) => {
            if let Some(err) = e {
                put_bytes(w, num, err.to_string().as_bytes())?;
            }
        }
        Field::OptBool(o) => match o {
            Some(v) => put_bool(w, num, v)?,
            None => missing(num, ann)?,
        },
        Field::OptInt32(o) => match o {
            Some(v) => put_int(w, num, v as i64 as u64, ann.encoding.wire32())?,
            None => missing(num, ann)?,
        },
        Field::OptInt64(o) => match o {
            Some(v) => put_int(w, num, v as u64, ann.encoding.wire64())?,
            None => missing(num, ann)?,
        },
        Field::OptUint32(o) => match o {
            Some(v) => put_int(w, num, u64::from(v), ann.encoding.wire32())?,
            None => missing(num, ann)?,
        },
        Field::OptUint64(o) => match o {
            Some(v) => put_int(w, num, v, ann.encoding.wire64())?,
            None => missing(num, ann)?,
        },
        Field::OptFloat32(o) => match o {
            Some(v) => {
                write_tag(w, num, WireType::Fixed32)?;
                write_fixed32(w, v.to_bits())?;
            }
            None => missing(num, ann)?,
        },
        Field::OptFloat64(o) => match o {
            Some(v) => {
                write_tag(w, num, WireType::Fixed64)?;
                write_fixed64(w, v.to_bits())?;
            }
            None => missing(num, ann)?,
        },
        Field::OptStr(o) => match o {
            Some(s) => put_bytes(w, num, s.as_bytes())?,
            None => missing(num, ann)?,
        },
        Field::OptBytes(o) => match o {
            Some(b) => put_bytes(w, num, b)?,
            None => missing(num, ann)?,
        },
        Field::OptMessage(slot) => match slot.get() {
            Some(m) => put_nested(w, num, m)?,
            None => missing(num, ann)?,
        },
        Field::BoolList(items) => {
            for &v in items {
                put_bool(w, num, v)?;
            }
        }
        Field::Int32List(items) => {
            let wire = ann.encoding.wire32();
            for &v in items {
                put_int(w, num, v as i64 as u64, wire)?;
            }
        }
        Field::Int64List(items) => {
            let wire = ann.encoding.wire64();
            for &v in items {
                put_int(w, num, v as u64, wire)?;
            }
        }
        Field::Uint32List(items) => {
            let wire = ann.encoding.wire32();
            for &v in items {
                put_int(w, num, u64::from(v), wire)?;
            }
        }
        Field::Uint64List(items) => {
            let wire = ann.encoding.wire64();
            for &v in items {
                put_int(w, num, v, wire)?;
            }
        }
        Field::Float32List(items) => {
            for &v in items {
                write_tag(w, num, WireType::Fixed32)?;
                write_fixed32(w, v.to_bits())?;
            }
        }
        Field::Float64List(items) => {
            for &v in items {
                write_tag(w, num, WireType::Fixed64)?;
                write_fixed64(w, v.to_bits())?;
            }
        }
        Field::StrList(items) => {
            for s in items {
                put_bytes(w, num, s.as_bytes())?;
            }
        }
        Field::BytesList(items) => {
            for b in items {
                put_bytes(w, num, b)?;
            }
        }
        Field::MessageList(list) => {
            for i in 0..list.len() {
                put_nested(w, num, list.get(i))?;
            }
        }
        Field::Skip => {}
    }
    Ok(())
}

/// One tagged integer entry with the resolved wire type.
fn put_int<W: WireWrite>(w: &mut W, num: u64, v: u64, wire: WireType) -> Result<()> {
    write_tag(w, num, wire)?;
    match wire {
        WireType::Fixed32 => write_fixed32(w, v as u32),
        WireType::Fixed64 => write_fixed64(w, v),
        _ => write_uvarint(w, v),
    }
}

fn put_bool<W: WireWrite>(w: &mut W, num: u64, v: bool) -> Result<()> {
    write_tag(w, num, WireType::Varint)?;
    w.put_byte(v as u8)
}

fn put_bytes<W: WireWrite>(w: &mut W, num: u64, data: &[u8]) -> Result<()> {
    write_tag(w, num, WireType::Bytes)?;
    write_len_prefixed(w, data)
}

/// One nested message entry: tag, body length, body.
fn put_nested<W: WireWrite>(w: &mut W, num: u64, m: &dyn Message) -> Result<()> {
    write_tag(w, num, WireType::Bytes)?;
    write_uvarint(w, message_size(m) as u64)?;
    encode_message(w, m)
}

/// Absent optional field: an error when required, otherwise nothing.
fn missing(num: u64, ann: Annotation) -> Result<()> {
    if ann.label == Label::Required {
        return Err(Error::RequiredFieldMissing { field: num as u32 });
    }
    Ok(())
}

/// Encoder writes length-prefixed messages to a byte stream.
///
/// Each message is framed as `[body length: varint][body]`, letting a
/// receiver on a continuous stream know exactly how many bytes belong to
/// one message. Output is buffered; call [`flush`](Encoder::flush) or
/// [`into_inner`](Encoder::into_inner) to push it to the transport.
pub struct Encoder<W: Write> {
    w: BufWriter<W>,
    max: usize,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder writing to `w`.
    ///
    /// `max` bounds the size of a single message; 0 disables the check.
    pub fn new(w: W, max: usize) -> Self {
        Self {
            w: BufWriter::new(w),
            max,
        }
    }

    /// Encodes one message with its varint length prefix.
    ///
    /// A message larger than `max` fails with
    /// [`Error::MessageTooLarge`] before anything is written.
    pub fn encode(&mut self, v: &dyn Message) -> Result<()> {
        let size = message_size(v);
        if self.max > 0 && size > self.max {
            return Err(Error::MessageTooLarge {
                size,
                max: self.max,
            });
        }
        let mut sink = IoWriter(&mut self.w);
        write_uvarint(&mut sink, size as u64)?;
        encode_message(&mut sink, v)
    }

    /// Flushes buffered output to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.w.flush().map_err(Error::from)
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.w.get_ref()
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        self.w.get_mut()
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.w
            .into_inner()
            .map_err(|e| Error::from(e.into_error()))
    }
}
