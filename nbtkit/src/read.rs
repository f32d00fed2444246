use std::convert::TryFrom;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::{Compound, List, NamedTag, RootTag, Tag, TagKind};

/// How deeply lists and compounds may nest before the reader gives up.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

// Lengths come from untrusted input, so never reserve more than this many
// elements up front. Longer sequences grow as their data actually arrives.
const MAX_PREALLOC: usize = 4096;

/// Options for reading NBT.
///
/// ```
/// # use nbtkit::{Reader, ReadOpts};
/// let opts = ReadOpts::new().max_depth(64).max_seq_len(1 << 20);
/// let reader = Reader::with_opts(&[0u8][..], opts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOpts {
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl ReadOpts {
    pub fn new() -> Self {
        Default::default()
    }

    /// Maximum number of nested lists and compounds, counting the root.
    /// Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Maximum number of elements of any array or list. Longer sequences
    /// fail with [`ErrorKind::InvalidLength`][`crate::error::ErrorKind::InvalidLength`]
    /// before anything is allocated for them. Unlimited by default.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }
}

impl Default for ReadOpts {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_seq_len: usize::MAX,
        }
    }
}

/// Reader decodes a single root tag from any `Read`. It does not do
/// decompression, see [`gzip`][`crate::gzip`] for that.
///
/// Every failure is terminal: if [`Reader::read_root`] returns an error the
/// position of the underlying reader is unspecified.
pub struct Reader<R: Read> {
    reader: R,
    opts: ReadOpts,
}

impl<R: Read> Reader<R> {
    /// Create a reader with the default options.
    pub fn new(reader: R) -> Self {
        Self::with_opts(reader, ReadOpts::default())
    }

    pub fn with_opts(reader: R, opts: ReadOpts) -> Self {
        Self { reader, opts }
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this reader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one root tag. If `named` the kind byte is followed by a name.
    ///
    /// Input that starts with an end tag is an empty root: the result's tag is
    /// [`Tag::End`] and nothing past the kind byte is consumed.
    pub fn read_root(&mut self, named: bool) -> Result<RootTag> {
        let root = self.read_root_inner(named);
        if let Err(e) = &root {
            debug!("failed to read nbt: {}", e);
        }
        root
    }

    /// Read a root that carries a name.
    pub fn read_named(&mut self) -> Result<NamedTag> {
        self.read_root(true).map(RootTag::into_named)
    }

    /// Read a root without a name.
    pub fn read_unnamed(&mut self) -> Result<Tag> {
        self.read_root(false).map(RootTag::into_tag)
    }

    fn read_root_inner(&mut self, named: bool) -> Result<RootTag> {
        let kind = self.read_kind()?;
        trace!("reading root {}", kind);

        if kind == TagKind::End {
            return Ok(if named {
                RootTag::Named(NamedTag::default())
            } else {
                RootTag::Unnamed(Tag::End)
            });
        }

        if named {
            let name = self.read_size_prefixed_string()?;
            let tag = self.read_payload(kind)?;
            Ok(RootTag::Named(NamedTag::new(name, tag)))
        } else {
            Ok(RootTag::Unnamed(self.read_payload(kind)?))
        }
    }

    fn read_kind(&mut self) -> Result<TagKind> {
        let kind = self.reader.read_u8()?;
        TagKind::try_from(kind).map_err(|_| Error::invalid_tag_kind(kind))
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        if len == 0 {
            return Ok(String::new());
        }

        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf[..])?;

        // Invalid UTF-8 is replaced rather than rejected.
        Ok(match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Validate a length read from the input.
    fn check_len(&self, len: i32) -> Result<usize> {
        if len < 0 {
            return Err(Error::invalid_length(len.into()));
        }

        let len = len as usize;
        if len > self.opts.max_seq_len {
            return Err(Error::seq_too_long(len as i64, self.opts.max_seq_len));
        }

        Ok(len)
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.reader.read_i32::<BigEndian>()?;
        self.check_len(len)
    }

    /// Lists and compounds call this before decoding anything of their
    /// payload. The root container is at depth 0.
    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.opts.max_depth {
            return Err(Error::max_depth_exceeded(self.opts.max_depth));
        }
        Ok(())
    }

    /// Decode the payload of a `kind` tag. Lists and compounds being read are
    /// kept on an explicit stack of frames, not the call stack.
    fn read_payload(&mut self, kind: TagKind) -> Result<Tag> {
        let mut stack = Vec::new();
        let mut value = self.read_value(kind, &mut stack)?;

        while let Some(frame) = stack.last_mut() {
            if let Some(tag) = value.take() {
                frame.attach(tag);
            }

            value = match self.next_child(frame)? {
                Some(kind) => self.read_value(kind, &mut stack)?,
                None => stack.pop().map(Frame::into_tag),
            };
        }

        // Every frame has been popped, what is left is the root's value.
        Ok(value.unwrap_or_default())
    }

    /// Read a complete scalar or array, or open a frame for a container. The
    /// number of open frames is the depth of the new container.
    fn read_value(&mut self, kind: TagKind, stack: &mut Vec<Frame>) -> Result<Option<Tag>> {
        Ok(Some(match kind {
            TagKind::End => Tag::End,
            TagKind::Byte => Tag::Byte(self.reader.read_i8()?),
            TagKind::Short => Tag::Short(self.reader.read_i16::<BigEndian>()?),
            TagKind::Int => Tag::Int(self.reader.read_i32::<BigEndian>()?),
            TagKind::Long => Tag::Long(self.reader.read_i64::<BigEndian>()?),
            TagKind::Float => Tag::Float(f32::from_bits(self.reader.read_u32::<BigEndian>()?)),
            TagKind::Double => Tag::Double(f64::from_bits(self.reader.read_u64::<BigEndian>()?)),
            TagKind::ByteArray => Tag::ByteArray(self.read_byte_array()?),
            TagKind::String => Tag::String(self.read_size_prefixed_string()?),
            TagKind::IntArray => Tag::IntArray(self.read_int_array()?),
            TagKind::LongArray => Tag::LongArray(self.read_long_array()?),
            TagKind::List => {
                self.enter(stack.len())?;
                let frame = self.read_list_header()?;
                stack.push(frame);
                return Ok(None);
            }
            TagKind::Compound => {
                self.enter(stack.len())?;
                stack.push(Frame::Compound {
                    compound: Compound::new(),
                    name: String::new(),
                });
                return Ok(None);
            }
        }))
    }

    /// The kind of the next child of `frame`, or `None` once it is complete.
    fn next_child(&mut self, frame: &mut Frame) -> Result<Option<TagKind>> {
        match frame {
            Frame::List {
                element_kind,
                remaining,
                ..
            } => {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
                Ok(Some(*element_kind))
            }
            Frame::Compound { name, .. } => {
                let kind = self.read_kind()?;
                if kind == TagKind::End {
                    return Ok(None);
                }
                *name = self.read_size_prefixed_string()?;
                Ok(Some(kind))
            }
        }
    }

    fn read_list_header(&mut self) -> Result<Frame> {
        let element_kind = self.read_kind()?;
        let raw_len = self.reader.read_i32::<BigEndian>()?;
        let len = self.check_len(raw_len)?;

        if element_kind == TagKind::End && len != 0 {
            return Err(Error::invalid_list_type(raw_len));
        }

        Ok(Frame::List {
            element_kind,
            remaining: len,
            elements: Vec::with_capacity(len.min(MAX_PREALLOC)),
        })
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_len()?;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            buf.push(self.reader.read_i32::<BigEndian>()?);
        }
        Ok(buf)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_len()?;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            buf.push(self.reader.read_i64::<BigEndian>()?);
        }
        Ok(buf)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_len()?;

        // Take rather than a sized buffer, so a huge claimed length only costs
        // as much memory as the input really has.
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::unexpected_eof());
        }

        Ok(vec_u8_into_i8(buf))
    }
}

/// A list or compound that is part way through being read.
enum Frame {
    List {
        element_kind: TagKind,
        remaining: usize,
        elements: Vec<Tag>,
    },
    Compound {
        compound: Compound,
        /// Name of the entry currently being read.
        name: String,
    },
}

impl Frame {
    fn attach(&mut self, tag: Tag) {
        match self {
            Frame::List { elements, .. } => elements.push(tag),
            // Duplicate names are kept, in the order they were read.
            Frame::Compound { compound, name } => compound.push(std::mem::take(name), tag),
        }
    }

    fn into_tag(self) -> Tag {
        match self {
            Frame::List {
                element_kind,
                elements,
                ..
            } => Tag::List(List::from_parts(element_kind, elements)),
            Frame::Compound { compound, .. } => Tag::Compound(compound),
        }
    }
}

fn vec_u8_into_i8(v: Vec<u8>) -> Vec<i8> {
    // Vec::into_raw_parts is unstable, so take the Vec apart by hand. It must
    // not free the buffer it is handing over.
    let mut v = std::mem::ManuallyDrop::new(v);

    let p = v.as_mut_ptr();
    let len = v.len();
    let cap = v.capacity();

    // SAFETY: the buffer came from a Vec with this length and capacity, and
    // u8 and i8 have the same size and alignment.
    unsafe { Vec::from_raw_parts(p as *mut i8, len, cap) }
}

/// Read a root from `reader` with the default options.
///
/// ```
/// # use nbtkit::{RootTag, Tag};
/// let input = [0x03, 0x00, 0x00, 0x00, 0x2a];
/// let root = nbtkit::read(&input[..], false).unwrap();
/// assert_eq!(root, RootTag::Unnamed(Tag::Int(42)));
/// ```
pub fn read<R: Read>(reader: R, named: bool) -> Result<RootTag> {
    Reader::new(reader).read_root(named)
}

/// Read a named root from `reader` with the default options.
pub fn read_named<R: Read>(reader: R) -> Result<NamedTag> {
    Reader::new(reader).read_named()
}

/// Read an unnamed root from `reader` with the default options.
pub fn read_unnamed<R: Read>(reader: R) -> Result<Tag> {
    Reader::new(reader).read_unnamed()
}
