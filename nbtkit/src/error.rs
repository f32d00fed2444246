//! Contains the Error and Result type used by the reader, writer and tag
//! accessors.
use crate::TagKind;

/// Errors that can occur while reading, writing or inspecting tags. Every
/// error aborts the call that produced it; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The underlying reader or writer failed. The message of the error
    /// carries the underlying description.
    Io,

    /// The input ended part way through a field.
    UnexpectedEof,

    /// A kind byte outside of the range 0 to 12, or an End tag where one
    /// cannot be written (as a compound entry).
    InvalidTagKind(u8),

    /// A negative array or list length, or one above the configured
    /// [`ReadOpts::max_seq_len`][`crate::ReadOpts::max_seq_len`]. Also used
    /// when an in-memory sequence is too long for the 32-bit wire length.
    InvalidLength(i64),

    /// A list declared its elements as End but claimed to have some.
    InvalidListType,

    /// Lists and compounds were nested deeper than allowed.
    MaxDepthExceeded,

    /// A string is longer than the 16-bit length prefix can express. Contains
    /// the UTF-8 byte length.
    StringTooLong(usize),

    /// A typed accessor was used on a tag of a different kind.
    TypeMismatch { expected: TagKind, found: TagKind },

    /// A tag was added to a list of a different element kind.
    HeterogeneousList { expected: TagKind, found: TagKind },

    /// A list element was replaced at an index past its end.
    IndexOutOfBounds { index: usize, len: usize },
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Whether this error was caused by the input running out.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn invalid_tag_kind(kind: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag kind: {}", kind),
            kind: ErrorKind::InvalidTagKind(kind),
        }
    }

    pub(crate) fn end_in_compound(name: &str) -> Self {
        Self {
            msg: format!("compound entry {:?} is an end tag", name),
            kind: ErrorKind::InvalidTagKind(TagKind::End.into()),
        }
    }

    pub(crate) fn invalid_length(len: i64) -> Self {
        Self {
            msg: format!("invalid nbt length: {}", len),
            kind: ErrorKind::InvalidLength(len),
        }
    }

    pub(crate) fn seq_too_long(len: i64, max: usize) -> Self {
        Self {
            msg: format!(
                "size ({}) greater than max sequence length ({})",
                len, max
            ),
            kind: ErrorKind::InvalidLength(len),
        }
    }

    pub(crate) fn invalid_list_type(len: i32) -> Self {
        Self {
            msg: format!("list of type 'end' cannot contain items, found {}", len),
            kind: ErrorKind::InvalidListType,
        }
    }

    pub(crate) fn max_depth_exceeded(max: usize) -> Self {
        Self {
            msg: format!("nbt nested deeper than {} lists and compounds", max),
            kind: ErrorKind::MaxDepthExceeded,
        }
    }

    pub(crate) fn string_too_long(len: usize) -> Self {
        Self {
            msg: format!(
                "string of length {} exceeds maximum of {}",
                len,
                u16::MAX
            ),
            kind: ErrorKind::StringTooLong(len),
        }
    }

    pub(crate) fn type_mismatch(expected: TagKind, found: TagKind) -> Self {
        Self {
            msg: format!("expected {}, found {}", expected, found),
            kind: ErrorKind::TypeMismatch { expected, found },
        }
    }

    pub(crate) fn heterogeneous_list(expected: TagKind, found: TagKind) -> Self {
        Self {
            msg: format!("cannot add {} to list of {}", found, expected),
            kind: ErrorKind::HeterogeneousList { expected, found },
        }
    }

    pub(crate) fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self {
            msg: format!("index {} out of bounds for list of length {}", index, len),
            kind: ErrorKind::IndexOutOfBounds { index, len },
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::unexpected_eof(),
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}
