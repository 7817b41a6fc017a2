//! Value types for catalogued elements.

use std::fmt;

/// The primitive type an element was allocated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// One byte, zero is `false`.
    Bool,
    /// One byte, rendered as a character.
    Char,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    LongLong,
    /// 64-bit unsigned integer.
    SizeT,
    /// 64-bit float.
    Double,
}

impl ValueType {
    /// Every value type, in declaration order.
    pub const ALL: [ValueType; 6] = [
        Self::Bool,
        Self::Char,
        Self::Int,
        Self::LongLong,
        Self::SizeT,
        Self::Double,
    ];

    /// Size of one item in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Bool | Self::Char => 1,
            Self::Int => 4,
            Self::LongLong | Self::SizeT | Self::Double => 8,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "int",
            Self::LongLong => "long long",
            Self::SizeT => "size_t",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

/// One decoded item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A single byte character.
    Char(u8),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    LongLong(i64),
    /// A 64-bit unsigned integer.
    SizeT(u64),
    /// A 64-bit float.
    Double(f64),
}

impl Value {
    /// The type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Char(_) => ValueType::Char,
            Self::Int(_) => ValueType::Int,
            Self::LongLong(_) => ValueType::LongLong,
            Self::SizeT(_) => ValueType::SizeT,
            Self::Double(_) => ValueType::Double,
        }
    }

    /// Decode one item of type `ty`. `None` if `bytes` has the wrong length.
    pub fn from_bytes(ty: ValueType, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != ty.size() {
            return None;
        }
        let value = match ty {
            ValueType::Bool => Self::Bool(bytes[0] != 0),
            ValueType::Char => Self::Char(bytes[0]),
            ValueType::Int => Self::Int(bytemuck::pod_read_unaligned(bytes)),
            ValueType::LongLong => Self::LongLong(bytemuck::pod_read_unaligned(bytes)),
            ValueType::SizeT => Self::SizeT(bytemuck::pod_read_unaligned(bytes)),
            ValueType::Double => Self::Double(bytemuck::pod_read_unaligned(bytes)),
        };
        Some(value)
    }

    /// Parse user input as a value of type `ty`.
    ///
    /// Booleans accept `true`/`false`/`1`/`0`; characters take the first
    /// byte of the trimmed input.
    pub fn parse(ty: ValueType, text: &str) -> Option<Self> {
        let text = text.trim();
        match ty {
            ValueType::Bool => match text {
                "true" | "1" => Some(Self::Bool(true)),
                "false" | "0" => Some(Self::Bool(false)),
                _ => None,
            },
            ValueType::Char => text.bytes().next().map(Self::Char),
            ValueType::Int => text.parse().ok().map(Self::Int),
            ValueType::LongLong => text.parse().ok().map(Self::LongLong),
            ValueType::SizeT => text.parse().ok().map(Self::SizeT),
            ValueType::Double => text.parse().ok().map(Self::Double),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{}", char::from(*v)),
            Self::Int(v) => write!(f, "{v}"),
            Self::LongLong(v) => write!(f, "{v}"),
            Self::SizeT(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
        }
    }
}
