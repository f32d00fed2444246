//! GZip handling around the reader and writer.
//!
//! NBT files on disk (`level.dat`, player data and so on) are usually GZip
//! compressed, while NBT inside region files or sent over the network is
//! usually not. The reader and writer never look at compression themselves;
//! these helpers decide whether to put a decompression stream in front of
//! them.

use std::io::{Cursor, Read, Write};

use flate2::{read, write::GzEncoder, Compression};
use log::debug;

use crate::error::Result;
use crate::{ReadOpts, Reader, RootTag, Writer};

/// The first two bytes of any GZip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether a peeked prefix of a stream starts with the GZip magic bytes.
///
/// ```
/// assert!(nbtkit::gzip::is_gzip(&[0x1f, 0x8b, 0x08]));
/// assert!(!nbtkit::gzip::is_gzip(&[0x0a, 0x00]));
/// assert!(!nbtkit::gzip::is_gzip(&[0x1f]));
/// ```
pub fn is_gzip(prefix: &[u8]) -> bool {
    prefix.starts_with(&GZIP_MAGIC)
}

/// Read a root from input that may or may not be GZip compressed. The first
/// two bytes decide, and are handed on to whichever reader follows so
/// uncompressed input is still read from the start.
pub fn read_maybe_gzip<R: Read>(reader: R, named: bool) -> Result<RootTag> {
    read_maybe_gzip_with_opts(reader, named, ReadOpts::default())
}

pub fn read_maybe_gzip_with_opts<R: Read>(
    mut reader: R,
    named: bool,
    opts: ReadOpts,
) -> Result<RootTag> {
    let mut prefix = Vec::with_capacity(GZIP_MAGIC.len());
    reader
        .by_ref()
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut prefix)?;

    let compressed = is_gzip(&prefix);
    let reader = Cursor::new(prefix).chain(reader);

    if compressed {
        debug!("input is gzip compressed");
        Reader::with_opts(read::GzDecoder::new(reader), opts).read_root(named)
    } else {
        Reader::with_opts(reader, opts).read_root(named)
    }
}

/// Read a root from input that is known to be GZip compressed.
pub fn read_gzip<R: Read>(reader: R, named: bool) -> Result<RootTag> {
    Reader::new(read::GzDecoder::new(reader)).read_root(named)
}

/// Write a root GZip compressed, returning the writer once the compressed
/// stream is finished.
///
/// ```
/// # use nbtkit::{gzip, NamedTag, RootTag};
/// let root = RootTag::from(NamedTag::new("", 1i8));
/// let bytes = gzip::write_gzip(Vec::new(), &root, true).unwrap();
/// assert!(gzip::is_gzip(&bytes));
/// assert_eq!(gzip::read_maybe_gzip(&bytes[..], true).unwrap(), root);
/// ```
pub fn write_gzip<W: Write>(writer: W, root: &RootTag, named: bool) -> Result<W> {
    let mut writer = Writer::new(GzEncoder::new(writer, Compression::default()));
    writer.write_root(root, named)?;
    Ok(writer.into_inner().finish()?)
}
