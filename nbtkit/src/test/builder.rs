use std::convert::TryInto;

use byteorder::{BigEndian, WriteBytesExt};

use crate::TagKind;

/// Builder for NBT bytes in tests. Nothing here checks that the result is
/// valid NBT: lengths, kinds and name bytes are written exactly as given, so
/// truncated, mistyped and non-UTF-8 input is as easy to make as good input.
pub struct Builder {
    payload: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            payload: Vec::new(),
        }
    }

    pub fn kind(mut self, k: TagKind) -> Self {
        self.payload.push(k.into());
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.raw_name(name.as_bytes())
    }

    /// A length-prefixed name or string made of arbitrary bytes, which need
    /// not be UTF-8.
    pub fn raw_name(self, bytes: &[u8]) -> Self {
        self.raw_str_len(bytes.len()).raw_bytes(bytes)
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.kind(TagKind::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.kind(TagKind::End)
    }

    pub fn start_list(self, name: &str, element_kind: TagKind, size: i32) -> Self {
        self.kind(TagKind::List)
            .name(name)
            .start_anon_list(element_kind, size)
    }

    /// A list header without the kind and name, as found inside other lists.
    pub fn start_anon_list(self, element_kind: TagKind, size: i32) -> Self {
        self.kind(element_kind).int_payload(size)
    }

    pub fn byte(self, name: &str, b: i8) -> Self {
        self.kind(TagKind::Byte).name(name).byte_payload(b)
    }

    pub fn short(self, name: &str, s: i16) -> Self {
        self.kind(TagKind::Short).name(name).short_payload(s)
    }

    pub fn int(self, name: &str, i: i32) -> Self {
        self.kind(TagKind::Int).name(name).int_payload(i)
    }

    pub fn long(mut self, name: &str, l: i64) -> Self {
        self = self.kind(TagKind::Long).name(name);
        self.payload.write_i64::<BigEndian>(l).unwrap();
        self
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.kind(TagKind::String).name(name).string_payload(s)
    }

    /// Floats go in by their bits, so NaN payloads are kept.
    pub fn float(mut self, name: &str, f: f32) -> Self {
        self = self.kind(TagKind::Float).name(name);
        self.payload.write_u32::<BigEndian>(f.to_bits()).unwrap();
        self
    }

    pub fn double(mut self, name: &str, f: f64) -> Self {
        self = self.kind(TagKind::Double).name(name);
        self.payload.write_u64::<BigEndian>(f.to_bits()).unwrap();
        self
    }

    pub fn byte_array(mut self, name: &str, bs: &[i8]) -> Self {
        self = self.kind(TagKind::ByteArray).name(name).array_len(bs.len());
        self.payload.extend(bs.iter().map(|b| *b as u8));
        self
    }

    pub fn int_array(mut self, name: &str, is: &[i32]) -> Self {
        self = self.kind(TagKind::IntArray).name(name).array_len(is.len());
        for i in is {
            self = self.int_payload(*i);
        }
        self
    }

    pub fn long_array(mut self, name: &str, ls: &[i64]) -> Self {
        self = self.kind(TagKind::LongArray).name(name).array_len(ls.len());
        for l in ls {
            self.payload.write_i64::<BigEndian>(*l).unwrap();
        }
        self
    }

    pub fn string_payload(self, s: &str) -> Self {
        self.name(s)
    }

    pub fn byte_payload(mut self, b: i8) -> Self {
        self.payload.write_i8(b).unwrap();
        self
    }

    pub fn short_payload(mut self, s: i16) -> Self {
        self.payload.write_i16::<BigEndian>(s).unwrap();
        self
    }

    pub fn int_payload(mut self, i: i32) -> Self {
        self.payload.write_i32::<BigEndian>(i).unwrap();
        self
    }

    fn array_len(self, len: usize) -> Self {
        self.int_payload(len.try_into().expect("test given length beyond i32"))
    }

    /// A string length prefix with no check that the bytes follow.
    pub fn raw_str_len(mut self, len: usize) -> Self {
        let len: u16 = len.try_into().expect("test given length beyond u16");
        self.payload.write_u16::<BigEndian>(len).unwrap();
        self
    }

    /// Straight up add some bytes to the payload. For very corner-case tests
    /// that are not worth a specific builder method.
    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.payload.extend_from_slice(bs);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.payload
    }
}
