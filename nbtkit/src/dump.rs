//! Human readable rendering of trees, via `Display`.
//!
//! ```text
//! TAG_Compound("root"): 2 entries
//! {
//!     TAG_Int("x"): 42
//!     TAG_List("y"): 2 entries of type TAG_String
//!     {
//!         TAG_String: "a"
//!         TAG_String: "b"
//!     }
//! }
//! ```
//!
//! Nesting is indented with tabs. This is for people to read; there is no
//! parser for it.

use std::fmt::{self, Display, Write};

use crate::{NamedTag, RootTag, Tag};

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tag(f, None, self, 0)
    }
}

impl Display for NamedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tag(f, Some(self.name()), self.tag(), 0)
    }
}

impl Display for RootTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tag(f, self.name(), self.tag(), 0)
    }
}

fn write_tag<W: Write>(out: &mut W, name: Option<&str>, tag: &Tag, indent: usize) -> fmt::Result {
    out.write_str(tag.kind().name())?;
    if let Some(name) = name {
        write!(out, "({:?})", name)?;
    }

    match tag {
        Tag::End => Ok(()),
        Tag::Byte(v) => write!(out, ": {}", v),
        Tag::Short(v) => write!(out, ": {}", v),
        Tag::Int(v) => write!(out, ": {}", v),
        Tag::Long(v) => write!(out, ": {}", v),
        Tag::Float(v) => write!(out, ": {}", v),
        Tag::Double(v) => write!(out, ": {}", v),
        Tag::String(v) => write!(out, ": {:?}", v),
        Tag::ByteArray(v) => write_numbers(out, v, indent),
        Tag::IntArray(v) => write_numbers(out, v, indent),
        Tag::LongArray(v) => write_numbers(out, v, indent),
        Tag::List(list) => {
            write!(
                out,
                ": {} entries of type {}",
                list.len(),
                list.element_kind()
            )?;
            open(out, indent)?;
            for element in list {
                newline(out, indent + 1)?;
                write_tag(out, None, element, indent + 1)?;
            }
            close(out, indent)
        }
        Tag::Compound(compound) => {
            write!(out, ": {} entries", compound.len())?;
            open(out, indent)?;
            for entry in compound {
                newline(out, indent + 1)?;
                write_tag(out, Some(entry.name()), entry.tag(), indent + 1)?;
            }
            close(out, indent)
        }
    }
}

fn write_numbers<W: Write, T: Display>(out: &mut W, items: &[T], indent: usize) -> fmt::Result {
    write!(out, ": {} entries", items.len())?;
    open(out, indent)?;
    for item in items {
        newline(out, indent + 1)?;
        write!(out, "{}", item)?;
    }
    close(out, indent)
}

fn open<W: Write>(out: &mut W, indent: usize) -> fmt::Result {
    newline(out, indent)?;
    out.write_char('{')
}

fn close<W: Write>(out: &mut W, indent: usize) -> fmt::Result {
    newline(out, indent)?;
    out.write_char('}')
}

fn newline<W: Write>(out: &mut W, indent: usize) -> fmt::Result {
    out.write_char('\n')?;
    for _ in 0..indent {
        out.write_char('\t')?;
    }
    Ok(())
}
