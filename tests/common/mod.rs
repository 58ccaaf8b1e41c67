//! Message types shared by the integration test suites.

#![allow(dead_code)]

use std::error::Error as StdError;
use std::time::{SystemTime, UNIX_EPOCH};

use tagwire::{Annotation, Bytes, Field, FieldMut, Message};

/// One field of every scalar kind.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scalars {
    pub uint32: u32,
    pub uint64: u64,
    pub int32: i32,
    pub int64: i64,
    pub float32: f32,
    pub float64: f64,
    pub boolean: bool,
    pub text: String,
}

impl Message for Scalars {
    fn field_count(&self) -> usize {
        8
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.uint32),
            1 => Field::Uint64(self.uint64),
            2 => Field::Int32(self.int32),
            3 => Field::Int64(self.int64),
            4 => Field::Float32(self.float32),
            5 => Field::Float64(self.float64),
            6 => Field::Bool(self.boolean),
            7 => Field::Str(&self.text),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.uint32),
            1 => FieldMut::Uint64(&mut self.uint64),
            2 => FieldMut::Int32(&mut self.int32),
            3 => FieldMut::Int64(&mut self.int64),
            4 => FieldMut::Float32(&mut self.float32),
            5 => FieldMut::Float64(&mut self.float64),
            6 => FieldMut::Bool(&mut self.boolean),
            7 => FieldMut::Str(&mut self.text),
            _ => FieldMut::Skip,
        }
    }
}

/// One field of every repeated kind.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Lists {
    pub uint32s: Vec<u32>,
    pub uint64s: Vec<u64>,
    pub int32s: Vec<i32>,
    pub int64s: Vec<i64>,
    pub float32s: Vec<f32>,
    pub float64s: Vec<f64>,
    pub bools: Vec<bool>,
    pub texts: Vec<String>,
    pub blobs: Vec<Vec<u8>>,
}

impl Message for Lists {
    fn field_count(&self) -> usize {
        9
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32List(&self.uint32s),
            1 => Field::Uint64List(&self.uint64s),
            2 => Field::Int32List(&self.int32s),
            3 => Field::Int64List(&self.int64s),
            4 => Field::Float32List(&self.float32s),
            5 => Field::Float64List(&self.float64s),
            6 => Field::BoolList(&self.bools),
            7 => Field::StrList(&self.texts),
            8 => Field::BytesList(&self.blobs),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32List(&mut self.uint32s),
            1 => FieldMut::Uint64List(&mut self.uint64s),
            2 => FieldMut::Int32List(&mut self.int32s),
            3 => FieldMut::Int64List(&mut self.int64s),
            4 => FieldMut::Float32List(&mut self.float32s),
            5 => FieldMut::Float64List(&mut self.float64s),
            6 => FieldMut::BoolList(&mut self.bools),
            7 => FieldMut::StrList(&mut self.texts),
            8 => FieldMut::BytesList(&mut self.blobs),
            _ => FieldMut::Skip,
        }
    }
}

/// Nested message of the documentation example.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Embedded {
    pub field1: String,
    pub field2: u64,
}

impl Message for Embedded {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Str(&self.field1),
            1 => Field::Uint64(self.field2),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Str(&mut self.field1),
            1 => FieldMut::Uint64(&mut self.field2),
            _ => FieldMut::Skip,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outer {
    pub field1: u32,
    pub field2: Option<Embedded>,
}

impl Message for Outer {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.field1),
            1 => Field::OptMessage(&self.field2),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.field1),
            1 => FieldMut::OptMessage(&mut self.field2),
            _ => FieldMut::Skip,
        }
    }
}

/// Message with a plain (always emitted) nested field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Wrapper {
    pub id: u32,
    pub inner: Embedded,
}

impl Message for Wrapper {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.id),
            1 => Field::Message(&self.inner),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.id),
            1 => FieldMut::Message(&mut self.inner),
            _ => FieldMut::Skip,
        }
    }
}

/// Fixed-width annotated numerics, scalar and repeated.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FixedNums {
    pub sfixed32: i32,
    pub sfixed64: i64,
    pub fixed32: u32,
    pub fixed64: u64,
    pub sfixed32s: Vec<i32>,
    pub fixed64s: Vec<u64>,
}

impl Message for FixedNums {
    fn field_count(&self) -> usize {
        6
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Int32(self.sfixed32),
            1 => Field::Int64(self.sfixed64),
            2 => Field::Uint32(self.fixed32),
            3 => Field::Uint64(self.fixed64),
            4 => Field::Int32List(&self.sfixed32s),
            5 => Field::Uint64List(&self.fixed64s),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Int32(&mut self.sfixed32),
            1 => FieldMut::Int64(&mut self.sfixed64),
            2 => FieldMut::Uint32(&mut self.fixed32),
            3 => FieldMut::Uint64(&mut self.fixed64),
            4 => FieldMut::Int32List(&mut self.sfixed32s),
            5 => FieldMut::Uint64List(&mut self.fixed64s),
            _ => FieldMut::Skip,
        }
    }

    fn annotation(&self, index: usize) -> Annotation {
        match index {
            0 => Annotation::parse("sfixed32"),
            1 => Annotation::parse("sfixed64"),
            2 => Annotation::parse("fixed32"),
            3 => Annotation::parse("fixed64"),
            4 => Annotation::parse("sfixed32,repeated"),
            5 => Annotation::parse("fixed64,repeated"),
            _ => Annotation::DEFAULT,
        }
    }
}

/// Annotated message of the documentation example.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaggedEmbedded {
    pub field1: String,
    pub field2: u64,
}

impl Message for TaggedEmbedded {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Str(&self.field1),
            1 => Field::Uint64(self.field2),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Str(&mut self.field1),
            1 => FieldMut::Uint64(&mut self.field2),
            _ => FieldMut::Skip,
        }
    }

    fn annotation(&self, index: usize) -> Annotation {
        match index {
            0 => Annotation::parse("bytes,required"),
            1 => Annotation::parse("varint,optional"),
            _ => Annotation::DEFAULT,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tagged {
    pub field1: u32,
    pub field2: u32,
    pub field3: Option<TaggedEmbedded>,
}

impl Message for Tagged {
    fn field_count(&self) -> usize {
        3
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.field1),
            1 => Field::Uint32(self.field2),
            2 => Field::OptMessage(&self.field3),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.field1),
            1 => FieldMut::Uint32(&mut self.field2),
            2 => FieldMut::OptMessage(&mut self.field3),
            _ => FieldMut::Skip,
        }
    }

    fn annotation(&self, index: usize) -> Annotation {
        match index {
            0 => Annotation::parse("varint,required"),
            1 => Annotation::parse("fixed32,required"),
            2 => Annotation::parse("required"),
            _ => Annotation::DEFAULT,
        }
    }
}

/// Explicit-presence scalars.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OptScalars {
    pub uint32: Option<u32>,
    pub text: Option<String>,
    pub float64: Option<f64>,
    pub flag: Option<bool>,
}

impl Message for OptScalars {
    fn field_count(&self) -> usize {
        4
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::OptUint32(self.uint32),
            1 => Field::OptStr(self.text.as_deref()),
            2 => Field::OptFloat64(self.float64),
            3 => Field::OptBool(self.flag),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::OptUint32(&mut self.uint32),
            1 => FieldMut::OptStr(&mut self.text),
            2 => FieldMut::OptFloat64(&mut self.float64),
            3 => FieldMut::OptBool(&mut self.flag),
            _ => FieldMut::Skip,
        }
    }
}

/// A single required optional field.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NeedsValue {
    pub required: Option<u32>,
}

impl Message for NeedsValue {
    fn field_count(&self) -> usize {
        1
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::OptUint32(self.required),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::OptUint32(&mut self.required),
            _ => FieldMut::Skip,
        }
    }

    fn annotation(&self, index: usize) -> Annotation {
        match index {
            0 => Annotation::parse("varint,required"),
            _ => Annotation::DEFAULT,
        }
    }
}

/// Timestamp between ordinary scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped {
    pub uint32: u32,
    pub stamp: SystemTime,
    pub uint64: u64,
}

impl Default for Stamped {
    fn default() -> Self {
        Self {
            uint32: 0,
            stamp: UNIX_EPOCH,
            uint64: 0,
        }
    }
}

impl Message for Stamped {
    fn field_count(&self) -> usize {
        3
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.uint32),
            1 => Field::Time(self.stamp),
            2 => Field::Uint64(self.uint64),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.uint32),
            1 => FieldMut::Time(&mut self.stamp),
            2 => FieldMut::Uint64(&mut self.uint64),
            _ => FieldMut::Skip,
        }
    }
}

/// Message carrying a textual error.
#[derive(Debug, Default)]
pub struct Report {
    pub code: u32,
    pub fault: Option<Box<dyn StdError + Send + Sync>>,
}

impl Message for Report {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.code),
            1 => Field::Error(self.fault.as_deref()),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.code),
            1 => FieldMut::Error(&mut self.fault),
            _ => FieldMut::Skip,
        }
    }
}

/// Byte payload decoded as a refcounted slice.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Blob {
    pub data: Bytes,
    pub note: String,
}

impl Message for Blob {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Bytes(&self.data),
            1 => Field::Str(&self.note),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Shared(&mut self.data),
            1 => FieldMut::Str(&mut self.note),
            _ => FieldMut::Skip,
        }
    }
}

/// Repeated nested messages.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Group {
    pub name: String,
    pub items: Vec<Embedded>,
}

impl Message for Group {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Str(&self.name),
            1 => Field::MessageList(&self.items),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Str(&mut self.name),
            1 => FieldMut::MessageList(&mut self.items),
            _ => FieldMut::Skip,
        }
    }
}

/// Sixteen fields, so the last tag key no longer fits one byte.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WideMessage {
    pub fields: [u32; 16],
}

impl Message for WideMessage {
    fn field_count(&self) -> usize {
        16
    }

    fn field(&self, index: usize) -> Field<'_> {
        match self.fields.get(index) {
            Some(&v) => Field::Uint32(v),
            None => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match self.fields.get_mut(index) {
            Some(v) => FieldMut::Uint32(v),
            None => FieldMut::Skip,
        }
    }
}

/// Two-field message, decode target for unknown-field tolerance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pair {
    pub first: u32,
    pub second: u32,
}

impl Message for Pair {
    fn field_count(&self) -> usize {
        2
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.first),
            1 => Field::Uint32(self.second),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.first),
            1 => FieldMut::Uint32(&mut self.second),
            _ => FieldMut::Skip,
        }
    }
}

/// Three-field message, encode source for unknown-field tolerance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Triple {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl Message for Triple {
    fn field_count(&self) -> usize {
        3
    }

    fn field(&self, index: usize) -> Field<'_> {
        match index {
            0 => Field::Uint32(self.first),
            1 => Field::Uint32(self.second),
            2 => Field::Uint32(self.third),
            _ => Field::Skip,
        }
    }

    fn field_mut(&mut self, index: usize) -> FieldMut<'_> {
        match index {
            0 => FieldMut::Uint32(&mut self.first),
            1 => FieldMut::Uint32(&mut self.second),
            2 => FieldMut::Uint32(&mut self.third),
            _ => FieldMut::Skip,
        }
    }
}
