//! Exact pre-computation of encoded message sizes.
//!
//! The wire format prefixes every nested message with its byte length,
//! so sizes must be known before any bytes exist. The walk here must
//! agree byte-for-byte with the encoder's walk; the two are kept in
//! lockstep arm by arm.

use crate::annotation::{Annotation, Label};
use crate::field::{unix_nanos, Field};
use crate::message::Message;
use crate::types::{tag_len, uvarint_len, WireType};

/// Returns the exact number of bytes encoding `v` produces.
pub(crate) fn message_size(v: &dyn Message) -> usize {
    let mut n = 0;
    for i in 0..v.field_count() {
        n += field_size(i as u64 + 1, v.field(i), v.annotation(i));
    }
    n
}

fn field_size(num: u64, field: Field<'_>, ann: Annotation) -> usize {
    let tag = tag_len(num);
    let forced = matches!(ann.label, Label::Optional | Label::Required);
    match field {
        Field::Bool(v) => {
            if v || forced {
                tag + 1
            } else {
                0
            }
        }
        Field::Int32(v) => scalar_size(tag, v == 0, v as i64 as u64, ann.encoding.wire32(), forced),
        Field::Int64(v) => scalar_size(tag, v == 0, v as u64, ann.encoding.wire64(), forced),
        Field::Uint32(v) => scalar_size(tag, v == 0, u64::from(v), ann.encoding.wire32(), forced),
        Field::Uint64(v) => scalar_size(tag, v == 0, v, ann.encoding.wire64(), forced),
        Field::Float32(v) => scalar_size(tag, v.to_bits() == 0, 0, WireType::Fixed32, forced),
        Field::Float64(v) => scalar_size(tag, v.to_bits() == 0, 0, WireType::Fixed64, forced),
        Field::Str(s) => bytes_size(tag, s.len(), forced),
        Field::Bytes(b) => bytes_size(tag, b.len(), forced),
        Field::Message(m) => nested_size(tag, m),
        Field::Time(t) => {
            let ns = unix_nanos(t) as u64;
            scalar_size(tag, ns == 0, ns, WireType::Varint, forced)
        }
        Field::Error(e) => match e {
            Some(err) => {
                let n = err.to_string().len();
                tag + uvarint_len(n as u64) + n
            }
            None => 0,
        },
        Field::OptBool(o) => o.map_or(0, |_| tag + 1),
        Field::OptInt32(o) => {
            o.map_or(0, |v| entry_size(tag, ann.encoding.wire32(), v as i64 as u64))
        }
        Field::OptInt64(o) => o.map_or(0, |v| entry_size(tag, ann.encoding.wire64(), v as u64)),
        Field::OptUint32(o) => o.map_or(0, |v| entry_size(tag, ann.encoding.wire32(), u64::from(v))),
        Field::OptUint64(o) => o.map_or(0, |v| entry_size(tag, ann.encoding.wire64(), v)),
        Field::OptFloat32(o) => o.map_or(0, |_| tag + 4),
        Field::OptFloat64(o) => o.map_or(0, |_| tag + 8),
        Field::OptStr(o) => o.map_or(0, |s| tag + uvarint_len(s.len() as u64) + s.len()),
        Field::OptBytes(o) => o.map_or(0, |b| tag + uvarint_len(b.len() as u64) + b.len()),
        Field::OptMessage(slot) => slot.get().map_or(0, |m| nested_size(tag, m)),
        Field::BoolList(items) => items.len() * (tag + 1),
        Field::Int32List(items) => {
            let wire = ann.encoding.wire32();
            items
                .iter()
                .map(|&v| entry_size(tag, wire, v as i64 as u64))
                .sum()
        }
        Field::Int64List(items) => {
            let wire = ann.encoding.wire64();
            items.iter().map(|&v| entry_size(tag, wire, v as u64)).sum()
        }
        Field::Uint32List(items) => {
            let wire = ann.encoding.wire32();
            items
                .iter()
                .map(|&v| entry_size(tag, wire, u64::from(v)))
                .sum()
        }
        Field::Uint64List(items) => {
            let wire = ann.encoding.wire64();
            items.iter().map(|&v| entry_size(tag, wire, v)).sum()
        }
        Field::Float32List(items) => items.len() * (tag + 4),
        Field::Float64List(items) => items.len() * (tag + 8),
        Field::StrList(items) => items
            .iter()
            .map(|s| tag + uvarint_len(s.len() as u64) + s.len())
            .sum(),
        Field::BytesList(items) => items
            .iter()
            .map(|b| tag + uvarint_len(b.len() as u64) + b.len())
            .sum(),
        Field::MessageList(list) => (0..list.len()).map(|i| nested_size(tag, list.get(i))).sum(),
        Field::Skip => 0,
    }
}

/// Size of one zero-suppressible scalar entry.
fn scalar_size(tag: usize, is_zero: bool, v: u64, wire: WireType, forced: bool) -> usize {
    if is_zero && !forced {
        0
    } else {
        entry_size(tag, wire, v)
    }
}

/// Size of one tagged wire entry holding a numeric payload.
fn entry_size(tag: usize, wire: WireType, v: u64) -> usize {
    tag + match wire {
        WireType::Fixed32 => 4,
        WireType::Fixed64 => 8,
        _ => uvarint_len(v),
    }
}

fn bytes_size(tag: usize, len: usize, forced: bool) -> usize {
    if len == 0 && !forced {
        0
    } else {
        tag + uvarint_len(len as u64) + len
    }
}

fn nested_size(tag: usize, m: &dyn Message) -> usize {
    let body = message_size(m);
    tag + uvarint_len(body as u64) + body
}
