use crate::errors::*;
use crate::{CodecOptions, Envelope, List, Map, Tag, Value, MAP_CONTENT_TYPE};
use bytes::{Buf, BufMut, BytesMut};
use log::trace;
use snafu::ensure;

// Keys are short strings, values are str16.
const MAX_KEY_LEN: usize = u8::MAX as usize;
const MAX_STR_LEN: usize = u16::MAX as usize;
const MAX_COMPOSITE_LEN: usize = u32::MAX as usize;

/// Encode `map` into an envelope using default [`CodecOptions`](struct.CodecOptions.html).
pub fn encode(map: &Map) -> Result<Envelope> {
    Encoder::default().encode(map)
}

/// Decode an envelope produced by [`encode`](fn.encode.html) using default
/// [`CodecOptions`](struct.CodecOptions.html).
pub fn decode(envelope: &Envelope) -> Result<Map> {
    Encoder::default().decode(envelope)
}

/// Converts [`Map`](struct.Map.html)s to [`Envelope`](struct.Envelope.html)s and back.
///
/// Encoding walks the tree depth-first in insertion order, writing each value as a one-byte
/// [`Tag`](enum.Tag.html) code followed by its fixed-width big-endian representation, or by a
/// length prefix for strings and a byte-size and count prefix for lists and maps. Map entries
/// additionally carry their key as a length-prefixed short string ahead of the tag.
///
/// An `Encoder` only holds its options; it is `Copy` and may be shared freely across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    options: CodecOptions,
}

impl Encoder {
    pub fn new(options: CodecOptions) -> Encoder {
        Encoder { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn encode(&self, map: &Map) -> Result<Envelope> {
        // Grown by put_map, which bounds the depth before descending.
        let mut buf = BytesMut::new();
        self.put_map(&mut buf, map, 1)?;
        trace!(
            "encoded map with {} entries into {} bytes",
            map.len(),
            buf.len()
        );
        Ok(Envelope::new(buf.freeze()))
    }

    pub fn decode(&self, envelope: &Envelope) -> Result<Map> {
        ensure!(
            envelope.content_type() == MAP_CONTENT_TYPE,
            CorruptEnvelopeSnafu {
                reason: format!("unexpected content type {:?}", envelope.content_type()),
            }
        );
        let mut reader = Reader::new(envelope.body());
        let map = self.get_map(&mut reader, 1)?;
        ensure!(
            reader.is_empty(),
            CorruptEnvelopeSnafu {
                reason: format!("{} trailing bytes after map", reader.remaining()),
            }
        );
        trace!(
            "decoded map with {} entries from {} bytes",
            map.len(),
            envelope.len()
        );
        Ok(map)
    }

    fn put_map(&self, buf: &mut BytesMut, map: &Map, depth: usize) -> Result<()> {
        self.check_encode_depth(depth)?;
        let start = begin_composite(buf, map.len())?;
        for (key, value) in map.iter() {
            ensure!(
                key.len() <= MAX_KEY_LEN,
                EncodingSnafu {
                    reason: format!(
                        "key of {} bytes exceeds the {} byte limit",
                        key.len(),
                        MAX_KEY_LEN
                    ),
                }
            );
            buf.put_u8(key.len() as u8);
            buf.put_slice(key.as_bytes());
            self.put_value(buf, value, depth)?;
        }
        end_composite(buf, start)
    }

    fn put_list(&self, buf: &mut BytesMut, list: &List, depth: usize) -> Result<()> {
        self.check_encode_depth(depth)?;
        let start = begin_composite(buf, list.len())?;
        for value in list {
            self.put_value(buf, value, depth)?;
        }
        end_composite(buf, start)
    }

    fn put_value(&self, buf: &mut BytesMut, value: &Value, depth: usize) -> Result<()> {
        buf.put_u8(value.tag().code());
        match value {
            Value::Void => (),
            Value::Bool(b) => buf.put_u8(*b as u8),
            Value::Byte(v) => buf.put_u8(*v),
            Value::UInt16(v) => buf.put_u16(*v),
            Value::UInt32(v) => buf.put_u32(*v),
            Value::UInt64(v) => buf.put_u64(*v),
            Value::Int16(v) => buf.put_i16(*v),
            Value::Int32(v) => buf.put_i32(*v),
            Value::Int64(v) => buf.put_i64(*v),
            Value::Char(c) => buf.put_u32(*c as u32),
            Value::Float32(v) => buf.put_f32(*v),
            Value::Float64(v) => buf.put_f64(*v),
            Value::Str(s) => {
                ensure!(
                    s.len() <= MAX_STR_LEN,
                    EncodingSnafu {
                        reason: format!(
                            "string of {} bytes exceeds the {} byte limit",
                            s.len(),
                            MAX_STR_LEN
                        ),
                    }
                );
                buf.put_u16(s.len() as u16);
                buf.put_slice(s.as_bytes());
            }
            Value::List(list) => self.put_list(buf, list, depth + 1)?,
            Value::Map(map) => self.put_map(buf, map, depth + 1)?,
        }
        Ok(())
    }

    fn check_encode_depth(&self, depth: usize) -> Result<()> {
        ensure!(
            depth <= self.options.max_depth,
            EncodingSnafu {
                reason: format!("nesting exceeds max depth {}", self.options.max_depth),
            }
        );
        Ok(())
    }

    fn get_map(&self, reader: &mut Reader, depth: usize) -> Result<Map> {
        self.check_decode_depth(depth)?;
        let mut body = reader.composite("map")?;
        let count = body.u32("map entry count")? as usize;
        let mut map = Map::with_capacity(count.min(body.remaining()));
        for _ in 0..count {
            let key_len = body.u8("map key length")? as usize;
            let key = utf8(body.bytes(key_len, "map key")?, "map key")?;
            ensure!(
                !map.contains_key(key),
                CorruptEnvelopeSnafu {
                    reason: format!("duplicate map key {:?}", key),
                }
            );
            let value = self.get_value(&mut body, depth)?;
            map.set(key, value);
        }
        ensure!(
            body.is_empty(),
            CorruptEnvelopeSnafu {
                reason: format!("map size disagrees with its {} entries", count),
            }
        );
        Ok(map)
    }

    fn get_list(&self, reader: &mut Reader, depth: usize) -> Result<List> {
        self.check_decode_depth(depth)?;
        let mut body = reader.composite("list")?;
        let count = body.u32("list element count")? as usize;
        let mut list = List::with_capacity(count.min(body.remaining()));
        for _ in 0..count {
            list.append(self.get_value(&mut body, depth)?);
        }
        ensure!(
            body.is_empty(),
            CorruptEnvelopeSnafu {
                reason: format!("list size disagrees with its {} elements", count),
            }
        );
        Ok(list)
    }

    fn get_value(&self, reader: &mut Reader, depth: usize) -> Result<Value> {
        let code = reader.u8("type tag")?;
        let tag = match Tag::from_code(code) {
            Some(tag) => tag,
            None => {
                return CorruptEnvelopeSnafu {
                    reason: format!("unknown type tag 0x{:02x}", code),
                }
                .fail()
            }
        };
        let value = match tag {
            Tag::Void => Value::Void,
            Tag::Bool => match reader.u8("bool")? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                other => {
                    return CorruptEnvelopeSnafu {
                        reason: format!("invalid bool 0x{:02x}", other),
                    }
                    .fail()
                }
            },
            Tag::Byte => Value::Byte(reader.u8("byte")?),
            Tag::UInt16 => Value::UInt16(reader.u16("uint16")?),
            Tag::UInt32 => Value::UInt32(reader.u32("uint32")?),
            Tag::UInt64 => Value::UInt64(reader.u64("uint64")?),
            Tag::Int16 => Value::Int16(reader.i16("int16")?),
            Tag::Int32 => Value::Int32(reader.i32("int32")?),
            Tag::Int64 => Value::Int64(reader.i64("int64")?),
            Tag::Char => {
                let raw = reader.u32("char")?;
                match std::char::from_u32(raw) {
                    Some(c) => Value::Char(c),
                    None => {
                        return CorruptEnvelopeSnafu {
                            reason: format!("invalid unicode scalar 0x{:x}", raw),
                        }
                        .fail()
                    }
                }
            }
            Tag::Float32 => Value::Float32(reader.f32("float32")?),
            Tag::Float64 => Value::Float64(reader.f64("float64")?),
            Tag::Str => {
                let len = reader.u16("string length")? as usize;
                Value::Str(utf8(reader.bytes(len, "string")?, "string")?.to_string())
            }
            Tag::List => Value::List(self.get_list(reader, depth + 1)?),
            Tag::Map => Value::Map(self.get_map(reader, depth + 1)?),
        };
        Ok(value)
    }

    fn check_decode_depth(&self, depth: usize) -> Result<()> {
        ensure!(
            depth <= self.options.max_depth,
            CorruptEnvelopeSnafu {
                reason: format!("nesting exceeds max depth {}", self.options.max_depth),
            }
        );
        Ok(())
    }
}

// Writes the size placeholder and count; returns the position of the size field.
fn begin_composite(buf: &mut BytesMut, count: usize) -> Result<usize> {
    ensure!(
        count <= MAX_COMPOSITE_LEN,
        EncodingSnafu {
            reason: format!("{} entries exceeds the u32 count limit", count),
        }
    );
    let start = buf.len();
    buf.put_u32(0);
    buf.put_u32(count as u32);
    Ok(start)
}

fn end_composite(buf: &mut BytesMut, start: usize) -> Result<()> {
    let size = buf.len() - start - 4;
    ensure!(
        size <= MAX_COMPOSITE_LEN,
        EncodingSnafu {
            reason: format!("composite of {} bytes exceeds the u32 size limit", size),
        }
    );
    buf[start..start + 4].copy_from_slice(&(size as u32).to_be_bytes());
    Ok(())
}

fn utf8<'a>(bytes: &'a [u8], what: &str) -> Result<&'a str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(_) => CorruptEnvelopeSnafu {
            reason: format!("{} is not valid utf-8", what),
        }
        .fail(),
    }
}

macro_rules! read_fixed {
    ($name:ident, $type:ty, $get:ident) => {
        fn $name(&mut self, what: &str) -> Result<$type> {
            self.need(std::mem::size_of::<$type>(), what)?;
            Ok(self.buf.$get())
        }
    };
}

// Bounds-checked cursor; `bytes::Buf` panics on underflow, so every read checks first.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Reader<'a> {
        Reader { buf }
    }

    fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn need(&self, n: usize, what: &str) -> Result<()> {
        ensure!(
            self.buf.remaining() >= n,
            CorruptEnvelopeSnafu {
                reason: format!(
                    "truncated {} (need {} bytes, have {})",
                    what,
                    n,
                    self.buf.remaining()
                ),
            }
        );
        Ok(())
    }

    read_fixed!(u8, u8, get_u8);
    read_fixed!(u16, u16, get_u16);
    read_fixed!(u32, u32, get_u32);
    read_fixed!(u64, u64, get_u64);
    read_fixed!(i16, i16, get_i16);
    read_fixed!(i32, i32, get_i32);
    read_fixed!(i64, i64, get_i64);
    read_fixed!(f32, f32, get_f32);
    read_fixed!(f64, f64, get_f64);

    fn bytes(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        self.need(n, what)?;
        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        Ok(head)
    }

    // Reads a u32 byte-size and returns a reader over exactly that many bytes.
    fn composite(&mut self, what: &str) -> Result<Reader<'a>> {
        let size = self.u32(what)? as usize;
        Ok(Reader::new(self.bytes(size, what)?))
    }
}
