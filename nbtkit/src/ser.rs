//! `Serialize` for the tag tree, so a tree can be dumped to any serde format.
//!
//! Compounds become maps in entry order, lists and arrays become sequences
//! and an End tag becomes unit. The kind of each tag is not carried, so this
//! is one way: JSON produced from a tree cannot be turned back into the same
//! NBT.

use serde::{Serialize, Serializer};

use crate::{Compound, List, NamedTag, RootTag, Tag};

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tag::End => serializer.serialize_unit(),
            Tag::Byte(v) => serializer.serialize_i8(*v),
            Tag::Short(v) => serializer.serialize_i16(*v),
            Tag::Int(v) => serializer.serialize_i32(*v),
            Tag::Long(v) => serializer.serialize_i64(*v),
            Tag::Float(v) => serializer.serialize_f32(*v),
            Tag::Double(v) => serializer.serialize_f64(*v),
            Tag::ByteArray(v) => serializer.collect_seq(v),
            Tag::String(v) => serializer.serialize_str(v),
            Tag::List(v) => v.serialize(serializer),
            Tag::Compound(v) => v.serialize(serializer),
            Tag::IntArray(v) => serializer.collect_seq(v),
            Tag::LongArray(v) => serializer.collect_seq(v),
        }
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self)
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter().map(|e| (e.name(), e.tag())))
    }
}

/// A named tag is a map with a single entry.
impl Serialize for NamedTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(std::iter::once((self.name(), self.tag())))
    }
}

impl Serialize for RootTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RootTag::Named(named) => named.serialize(serializer),
            RootTag::Unnamed(tag) => tag.serialize(serializer),
        }
    }
}
