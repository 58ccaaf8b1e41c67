//! Per-field wire annotations.
//!
//! Annotations refine how a numeric field crosses the wire and whether an
//! optional field may be absent, in the style of protobuf struct tags
//! such as `"fixed64,required"`.

use crate::types::WireType;

/// Wire-type override for a numeric field.
///
/// The fixed spellings move a matching-width integer field from varint to
/// fixed wire encoding; on any other field shape the override is ignored
/// and the structural default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Structural default: varint for integers, fixed for floats.
    #[default]
    Plain,
    /// Explicit varint (the integer default).
    Varint,
    /// 32-bit unsigned little-endian.
    Fixed32,
    /// 64-bit unsigned little-endian.
    Fixed64,
    /// 32-bit signed little-endian.
    Sfixed32,
    /// 64-bit signed little-endian.
    Sfixed64,
    /// Reserved for zigzag varints; currently encodes as plain varint.
    Sint32,
    /// Reserved for zigzag varints; currently encodes as plain varint.
    Sint64,
}

impl Encoding {
    /// Wire type a 32-bit integer field takes under this annotation.
    pub(crate) fn wire32(self) -> WireType {
        match self {
            Encoding::Fixed32 | Encoding::Sfixed32 => WireType::Fixed32,
            _ => WireType::Varint,
        }
    }

    /// Wire type a 64-bit integer field takes under this annotation.
    pub(crate) fn wire64(self) -> WireType {
        match self {
            Encoding::Fixed64 | Encoding::Sfixed64 => WireType::Fixed64,
            _ => WireType::Varint,
        }
    }
}

/// Field presence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Label {
    /// No label: implicit presence, zero values are suppressed.
    #[default]
    Default,
    /// Explicit presence: the field is emitted even when zero.
    Optional,
    /// As `Optional`, and encoding fails if an `Option` field is `None`.
    Required,
    /// Repeated field.
    Repeated,
}

/// Wire annotation for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotation {
    pub encoding: Encoding,
    pub label: Label,
}

impl Annotation {
    /// No annotation: structural wire types, implicit presence.
    pub const DEFAULT: Annotation = Annotation {
        encoding: Encoding::Plain,
        label: Label::Default,
    };

    /// Parses a comma-separated annotation string such as
    /// `"sfixed32,repeated"` or `"varint,req"`.
    ///
    /// Unrecognized values are ignored.
    pub fn parse(tag: &str) -> Annotation {
        let mut ann = Annotation::DEFAULT;
        for part in tag.split(',') {
            match part.trim() {
                "varint" => ann.encoding = Encoding::Varint,
                "fixed32" => ann.encoding = Encoding::Fixed32,
                "fixed64" => ann.encoding = Encoding::Fixed64,
                "sfixed32" => ann.encoding = Encoding::Sfixed32,
                "sfixed64" => ann.encoding = Encoding::Sfixed64,
                "sint32" => ann.encoding = Encoding::Sint32,
                "sint64" => ann.encoding = Encoding::Sint64,
                "optional" | "opt" => ann.label = Label::Optional,
                "required" | "req" => ann.label = Label::Required,
                "repeated" | "rep" => ann.label = Label::Repeated,
                _ => {}
            }
        }
        ann
    }
}
