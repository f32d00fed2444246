use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::{NamedTag, RootTag, Tag, TagKind};

pub(crate) trait WriteNbt: Write {
    fn write_kind(&mut self, kind: TagKind) -> Result<()> {
        self.write_u8(kind.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| Error::string_too_long(s.len()))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len
            .try_into()
            .map_err(|_| Error::invalid_length(len.try_into().unwrap_or(i64::MAX)))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

fn i8_slice_as_u8_slice(s: &[i8]) -> &[u8] {
    // SAFETY: i8 and u8 have the same size and alignment, and every bit
    // pattern is valid for both.
    unsafe { std::slice::from_raw_parts(s.as_ptr() as *const u8, s.len()) }
}

/// Writer encodes trees to any `Write`. It does no buffering of its own, so
/// wrap unbuffered outputs like files in a `BufWriter`.
///
/// Writing an End tag as the root produces the single kind byte, which reads
/// back as an empty root.
pub struct Writer<W: Write> {
    writer: W,
}

impl<W: Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes this writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a root. If `named` the root's name is written after the kind
    /// byte, using the empty name for an unnamed root. If not, any name is
    /// dropped.
    pub fn write_root(&mut self, root: &RootTag, named: bool) -> Result<()> {
        let name = if named {
            Some(root.name().unwrap_or(""))
        } else {
            None
        };
        self.write_tree(name, root.tag())
    }

    pub fn write_named(&mut self, root: &NamedTag) -> Result<()> {
        self.write_tree(Some(root.name()), root.tag())
    }

    pub fn write_unnamed(&mut self, root: &Tag) -> Result<()> {
        self.write_tree(None, root)
    }

    fn write_tree(&mut self, name: Option<&str>, tag: &Tag) -> Result<()> {
        trace!("writing root {}", tag.kind());
        let res = self.write_tree_inner(name, tag);
        if let Err(e) = &res {
            debug!("failed to write nbt: {}", e);
        }
        res
    }

    fn write_tree_inner(&mut self, name: Option<&str>, tag: &Tag) -> Result<()> {
        self.writer.write_kind(tag.kind())?;
        if tag.is_end() {
            return Ok(());
        }

        if let Some(name) = name {
            self.writer.write_size_prefixed_str(name)?;
        }

        self.write_payload(tag)
    }

    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::End => {}
            Tag::Byte(v) => self.writer.write_i8(*v)?,
            Tag::Short(v) => self.writer.write_i16::<BigEndian>(*v)?,
            Tag::Int(v) => self.writer.write_i32::<BigEndian>(*v)?,
            Tag::Long(v) => self.writer.write_i64::<BigEndian>(*v)?,
            Tag::Float(v) => self.writer.write_u32::<BigEndian>(v.to_bits())?,
            Tag::Double(v) => self.writer.write_u64::<BigEndian>(v.to_bits())?,
            Tag::ByteArray(v) => {
                self.writer.write_len(v.len())?;
                self.writer.write_all(i8_slice_as_u8_slice(v))?;
            }
            Tag::String(v) => self.writer.write_size_prefixed_str(v)?,
            Tag::List(list) => {
                // Empty lists still carry their declared kind.
                self.writer.write_kind(list.element_kind())?;
                self.writer.write_len(list.len())?;
                for element in list {
                    self.write_payload(element)?;
                }
            }
            Tag::Compound(compound) => {
                for entry in compound {
                    // An end tag here would terminate the compound early.
                    if entry.tag().is_end() {
                        return Err(Error::end_in_compound(entry.name()));
                    }
                    self.writer.write_kind(entry.kind())?;
                    self.writer.write_size_prefixed_str(entry.name())?;
                    self.write_payload(entry.tag())?;
                }
                self.writer.write_kind(TagKind::End)?;
            }
            Tag::IntArray(v) => {
                self.writer.write_len(v.len())?;
                for i in v {
                    self.writer.write_i32::<BigEndian>(*i)?;
                }
            }
            Tag::LongArray(v) => {
                self.writer.write_len(v.len())?;
                for l in v {
                    self.writer.write_i64::<BigEndian>(*l)?;
                }
            }
        }

        Ok(())
    }
}

/// Write `root` to `writer`, with its name if `named`.
///
/// ```
/// # use nbtkit::{RootTag, Tag};
/// let mut out = Vec::new();
/// nbtkit::write(&mut out, &RootTag::Unnamed(Tag::Short(-2)), false).unwrap();
/// assert_eq!(out, [0x02, 0xff, 0xfe]);
/// ```
pub fn write<W: Write>(writer: W, root: &RootTag, named: bool) -> Result<()> {
    Writer::new(writer).write_root(root, named)
}

/// Write a named root to `writer`.
pub fn write_named<W: Write>(writer: W, root: &NamedTag) -> Result<()> {
    Writer::new(writer).write_named(root)
}

/// Write an unnamed root to `writer`.
pub fn write_unnamed<W: Write>(writer: W, root: &Tag) -> Result<()> {
    Writer::new(writer).write_unnamed(root)
}
