use crate::errors::*;
use crate::{List, Map};
use std::convert::TryFrom;
use std::fmt;

/// The type tag of a [`Value`](enum.Value.html).
///
/// Every tag has a fixed one-byte wire code, taken from the AMQP 0-10 type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Void,
    Bool,
    Byte,
    UInt16,
    UInt32,
    UInt64,
    Int16,
    Int32,
    Int64,
    Char,
    Float32,
    Float64,
    Str,
    List,
    Map,
}

impl Tag {
    const ALL: [Tag; 15] = [
        Tag::Void,
        Tag::Bool,
        Tag::Byte,
        Tag::UInt16,
        Tag::UInt32,
        Tag::UInt64,
        Tag::Int16,
        Tag::Int32,
        Tag::Int64,
        Tag::Char,
        Tag::Float32,
        Tag::Float64,
        Tag::Str,
        Tag::List,
        Tag::Map,
    ];

    /// The byte written ahead of a value with this tag.
    pub fn code(self) -> u8 {
        match self {
            Tag::Void => 0xf0,
            Tag::Bool => 0x08,
            Tag::Byte => 0x02,
            Tag::UInt16 => 0x12,
            Tag::UInt32 => 0x22,
            Tag::UInt64 => 0x32,
            Tag::Int16 => 0x11,
            Tag::Int32 => 0x21,
            Tag::Int64 => 0x31,
            Tag::Char => 0x27,
            Tag::Float32 => 0x23,
            Tag::Float64 => 0x33,
            Tag::Str => 0x95,
            Tag::List => 0xa9,
            Tag::Map => 0xa8,
        }
    }

    /// Looks up the tag for a wire code. Returns `None` for codes we do not know.
    pub fn from_code(code: u8) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|tag| tag.code() == code)
    }

    /// Size of the value payload for fixed-width tags; `None` for variable-width ones.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Tag::Void => Some(0),
            Tag::Bool | Tag::Byte => Some(1),
            Tag::UInt16 | Tag::Int16 => Some(2),
            Tag::UInt32 | Tag::Int32 | Tag::Char | Tag::Float32 => Some(4),
            Tag::UInt64 | Tag::Int64 | Tag::Float64 => Some(8),
            Tag::Str | Tag::List | Tag::Map => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Tag::Void => "void",
            Tag::Bool => "bool",
            Tag::Byte => "byte",
            Tag::UInt16 => "uint16",
            Tag::UInt32 => "uint32",
            Tag::UInt64 => "uint64",
            Tag::Int16 => "int16",
            Tag::Int32 => "int32",
            Tag::Int64 => "int64",
            Tag::Char => "char",
            Tag::Float32 => "float32",
            Tag::Float64 => "float64",
            Tag::Str => "str",
            Tag::List => "list",
            Tag::Map => "map",
        };
        f.write_str(name)
    }
}

/// A single item of a structured message payload.
///
/// Numeric variants are never coerced into one another: `UInt16(5)` and `Int32(5)` are
/// different values, and both keep their tag through an encode/decode round trip.
///
/// Floats compare by bit pattern, so a NaN equals an identical NaN and `0.0` differs from
/// `-0.0`. This is the equality the codec preserves.
#[derive(Debug, Clone)]
pub enum Value {
    Void,
    Bool(bool),
    Byte(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Char(char),
    Float32(f32),
    Float64(f64),
    Str(String),
    List(List),
    Map(Map),
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Void, Value::Void) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::UInt16(a), Value::UInt16(b)) => a == b,
            (Value::UInt32(a), Value::UInt32(b)) => a == b,
            (Value::UInt64(a), Value::UInt64(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            (Value::Float64(a), Value::Float64(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Void => Tag::Void,
            Value::Bool(_) => Tag::Bool,
            Value::Byte(_) => Tag::Byte,
            Value::UInt16(_) => Tag::UInt16,
            Value::UInt32(_) => Tag::UInt32,
            Value::UInt64(_) => Tag::UInt64,
            Value::Int16(_) => Tag::Int16,
            Value::Int32(_) => Tag::Int32,
            Value::Int64(_) => Tag::Int64,
            Value::Char(_) => Tag::Char,
            Value::Float32(_) => Tag::Float32,
            Value::Float64(_) => Tag::Float64,
            Value::Str(_) => Tag::Str,
            Value::List(_) => Tag::List,
            Value::Map(_) => Tag::Map,
        }
    }

    /// Number of bytes the encoder emits for this value, excluding its tag byte.
    pub fn encoded_size(&self) -> usize {
        match self {
            Value::Str(s) => 2 + s.len(),
            Value::List(list) => list.encoded_size(),
            Value::Map(map) => map.encoded_size(),
            other => other.tag().fixed_width().unwrap_or(0),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    fn mismatch(&self, expected: Tag) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.tag(),
        }
    }
}

macro_rules! impl_scalar_conversions {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Value {
                Value::$variant(val)
            }
        }

        impl TryFrom<&Value> for $type {
            type Error = Error;

            fn try_from(value: &Value) -> Result<$type> {
                match value {
                    Value::$variant(val) => Ok(*val),
                    other => Err(other.mismatch(Tag::$variant)),
                }
            }
        }
    };
}

impl_scalar_conversions!(bool, Bool);
impl_scalar_conversions!(u8, Byte);
impl_scalar_conversions!(u16, UInt16);
impl_scalar_conversions!(u32, UInt32);
impl_scalar_conversions!(u64, UInt64);
impl_scalar_conversions!(i16, Int16);
impl_scalar_conversions!(i32, Int32);
impl_scalar_conversions!(i64, Int64);
impl_scalar_conversions!(char, Char);
impl_scalar_conversions!(f32, Float32);
impl_scalar_conversions!(f64, Float64);

impl From<String> for Value {
    fn from(val: String) -> Value {
        Value::Str(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Value {
        Value::Str(val.to_string())
    }
}

impl From<List> for Value {
    fn from(val: List) -> Value {
        Value::List(val)
    }
}

impl From<Map> for Value {
    fn from(val: Map) -> Value {
        Value::Map(val)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Value {
        val.map_or(Value::Void, Into::into)
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<&'a str> {
        value.as_str().ok_or_else(|| value.mismatch(Tag::Str))
    }
}

impl<'a> TryFrom<&'a Value> for &'a List {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<&'a List> {
        value.as_list().ok_or_else(|| value.mismatch(Tag::List))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Map {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<&'a Map> {
        value.as_map().ok_or_else(|| value.mismatch(Tag::Map))
    }
}
