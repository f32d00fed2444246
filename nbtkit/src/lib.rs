//! nbtkit reads and writes the NBT binary tag format, the tree-structured
//! big-endian format *Minecraft: Java Edition* uses to store world data,
//! player inventories and so on.
//!
//! * For the in-memory tree see [`Tag`], [`List`], [`Compound`] and
//!   [`NamedTag`].
//! * For decoding see [`read`] and the lower level [`Reader`].
//! * For encoding see [`write`] and [`Writer`].
//! * For GZip compressed data see [`gzip`].
//!
//! ```toml
//! [dependencies]
//! nbtkit = "0.1"
//! ```
//!
//! # Quick example
//!
//! ```
//! use nbtkit::{Compound, NamedTag, Tag};
//!
//! let mut root = Compound::new();
//! root.push("x", 42i32);
//! root.push("y", "hi");
//!
//! let bytes = nbtkit::to_bytes(&NamedTag::new("root", root)).unwrap();
//! assert_eq!(
//!     bytes,
//!     [
//!         0x0a, 0x00, 0x04, b'r', b'o', b'o', b't', // root compound
//!         0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2a, // int x
//!         0x08, 0x00, 0x01, b'y', 0x00, 0x02, b'h', b'i', // string y
//!         0x00, // end of compound
//!     ]
//! );
//!
//! let root = nbtkit::from_bytes(&bytes).unwrap();
//! assert_eq!(root.name(), "root");
//! assert_eq!(root.tag().as_compound().unwrap().get("x"), Some(&Tag::Int(42)));
//! ```
//!
//! # Reading files
//!
//! Data on disk is usually GZip compressed. [`gzip::read_maybe_gzip`] peeks
//! at the start of the input and decompresses only when it finds the GZip
//! magic bytes.
//!
//! ```no_run
//! use std::{fs::File, io::BufReader};
//!
//! let file = BufReader::new(File::open("level.dat").unwrap());
//! let root = nbtkit::gzip::read_maybe_gzip(file, true).unwrap();
//! println!("{}", root);
//! ```

pub mod error;
pub mod gzip;

mod dump;
mod read;
mod ser;
mod tag;
mod write;

#[cfg(test)]
mod test;

pub use read::*;
pub use tag::*;
pub use write::*;

use std::convert::TryFrom;
use std::fmt;

/// The kind of an NBT tag. This does not carry the value or the name of the
/// data, it is the single byte discriminator found on the wire.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum TagKind {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other tags, all of the same kind.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl TagKind {
    /// The conventional `TAG_*` name of this kind, as used by the
    /// pretty-printer.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::End => "TAG_End",
            TagKind::Byte => "TAG_Byte",
            TagKind::Short => "TAG_Short",
            TagKind::Int => "TAG_Int",
            TagKind::Long => "TAG_Long",
            TagKind::Float => "TAG_Float",
            TagKind::Double => "TAG_Double",
            TagKind::ByteArray => "TAG_Byte_Array",
            TagKind::String => "TAG_String",
            TagKind::List => "TAG_List",
            TagKind::Compound => "TAG_Compound",
            TagKind::IntArray => "TAG_Int_Array",
            TagKind::LongArray => "TAG_Long_Array",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually. The kinds will very rarely
// change so it isn't a massive burden.
impl TryFrom<u8> for TagKind {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagKind::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagKind> for u8 {
    fn from(kind: TagKind) -> Self {
        kind as u8
    }
}

/// Decode a named root from a byte slice. Bytes after the root are ignored.
pub fn from_bytes(input: &[u8]) -> error::Result<NamedTag> {
    read_named(input)
}

/// Encode a named root into a new `Vec`.
pub fn to_bytes(root: &NamedTag) -> error::Result<Vec<u8>> {
    let mut out = Vec::new();
    write_named(&mut out, root)?;
    Ok(out)
}
