use std::slice;

use crate::error::{Error, Result};
use crate::TagKind;

/// Tag is a complete NBT value. It owns its data; lists and compounds own
/// their children, so a tree never shares or cycles.
///
/// The `End` variant carries nothing. It only appears as an empty root,
/// which is what the reader produces for input that starts with an end tag.
///
/// ```
/// # use nbtkit::{Tag, TagKind};
/// let tag = Tag::from(42i32);
/// assert_eq!(tag.kind(), TagKind::Int);
/// assert_eq!(tag.as_int().unwrap(), 42);
/// assert!(tag.as_string().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tag {
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// The kind of this tag, matching the active variant.
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::End => TagKind::End,
            Tag::Byte(_) => TagKind::Byte,
            Tag::Short(_) => TagKind::Short,
            Tag::Int(_) => TagKind::Int,
            Tag::Long(_) => TagKind::Long,
            Tag::Float(_) => TagKind::Float,
            Tag::Double(_) => TagKind::Double,
            Tag::ByteArray(_) => TagKind::ByteArray,
            Tag::String(_) => TagKind::String,
            Tag::List(_) => TagKind::List,
            Tag::Compound(_) => TagKind::Compound,
            Tag::IntArray(_) => TagKind::IntArray,
            Tag::LongArray(_) => TagKind::LongArray,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Tag::End)
    }

    /// The declared element kind if this is a list.
    pub fn element_kind(&self) -> Result<TagKind> {
        self.as_list().map(List::element_kind)
    }
}

macro_rules! scalar_accessors {
    ($($variant:ident => $as:ident: $ty:ty),* $(,)?) => {
        impl Tag {
            $(
                #[doc = concat!("The value of a `", stringify!($variant), "` tag.")]
                pub fn $as(&self) -> Result<$ty> {
                    match *self {
                        Tag::$variant(v) => Ok(v),
                        ref other => Err(Error::type_mismatch(TagKind::$variant, other.kind())),
                    }
                }
            )*
        }
    };
}

scalar_accessors! {
    Byte => as_byte: i8,
    Short => as_short: i16,
    Int => as_int: i32,
    Long => as_long: i64,
    Float => as_float: f32,
    Double => as_double: f64,
}

macro_rules! ref_accessors {
    ($($variant:ident => $as:ident: &$ty:ty, $as_mut:ident: &mut $ty_mut:ty),* $(,)?) => {
        impl Tag {
            $(
                #[doc = concat!("Borrow the payload of a `", stringify!($variant), "` tag.")]
                pub fn $as(&self) -> Result<&$ty> {
                    match self {
                        Tag::$variant(v) => Ok(v),
                        other => Err(Error::type_mismatch(TagKind::$variant, other.kind())),
                    }
                }

                #[doc = concat!("Mutably borrow the payload of a `", stringify!($variant), "` tag.")]
                pub fn $as_mut(&mut self) -> Result<&mut $ty_mut> {
                    match self {
                        Tag::$variant(v) => Ok(v),
                        other => Err(Error::type_mismatch(TagKind::$variant, other.kind())),
                    }
                }
            )*
        }

        // Payloads can be edited freely, the kind of the element stays put.
        impl ElementMut<'_> {
            $(
                #[doc = concat!("Mutably borrow the payload of a `", stringify!($variant), "` element.")]
                pub fn $as_mut(&mut self) -> Result<&mut $ty_mut> {
                    self.tag.$as_mut()
                }
            )*
        }
    };
}

ref_accessors! {
    ByteArray => as_byte_array: &[i8], as_byte_array_mut: &mut Vec<i8>,
    String => as_string: &str, as_string_mut: &mut String,
    List => as_list: &List, as_list_mut: &mut List,
    Compound => as_compound: &Compound, as_compound_mut: &mut Compound,
    IntArray => as_int_array: &[i32], as_int_array_mut: &mut Vec<i32>,
    LongArray => as_long_array: &[i64], as_long_array_mut: &mut Vec<i64>,
}

/// A homogeneous list of tags. Every element has the kind reported by
/// [`List::element_kind`].
///
/// A new list has the element kind End until the first element is pushed,
/// at which point it takes on that element's kind. A list made with
/// [`List::with_kind`] keeps its declared kind even while empty, and that
/// kind is written out for empty lists too.
///
/// ```
/// # use nbtkit::{List, Tag, TagKind};
/// let mut list = List::new();
/// list.push(1i32).unwrap();
/// list.push(2i32).unwrap();
/// assert_eq!(list.element_kind(), TagKind::Int);
/// assert!(list.push("three").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_kind: TagKind,
    elements: Vec<Tag>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    /// Create an empty list with element kind End.
    pub fn new() -> Self {
        Self::with_kind(TagKind::End)
    }

    /// Create an empty list that only accepts elements of `kind`.
    pub fn with_kind(kind: TagKind) -> Self {
        Self {
            element_kind: kind,
            elements: Vec::new(),
        }
    }

    /// Build a list from tags, failing if they are not all of one kind.
    pub fn from_tags<I>(tags: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        let mut list = Self::new();
        for tag in tags {
            list.push(tag)?;
        }
        Ok(list)
    }

    /// The reader has already checked every element against the declared
    /// kind, so there is nothing to validate here.
    pub(crate) fn from_parts(element_kind: TagKind, elements: Vec<Tag>) -> Self {
        Self {
            element_kind,
            elements,
        }
    }

    pub fn element_kind(&self) -> TagKind {
        self.element_kind
    }

    /// Append a tag. Fails with
    /// [`ErrorKind::HeterogeneousList`][`crate::error::ErrorKind::HeterogeneousList`]
    /// if its kind differs from the list's element kind, or if it is an End
    /// tag.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        let found = tag.kind();

        if found == TagKind::End {
            return Err(Error::heterogeneous_list(self.element_kind, found));
        }

        if self.element_kind == TagKind::End {
            self.element_kind = found;
        } else if self.element_kind != found {
            return Err(Error::heterogeneous_list(self.element_kind, found));
        }

        self.elements.push(tag);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one. The new tag
    /// must have the list's element kind.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        if tag.kind() != self.element_kind {
            return Err(Error::heterogeneous_list(self.element_kind, tag.kind()));
        }

        let len = self.elements.len();
        let slot = self
            .elements
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, len))?;
        Ok(std::mem::replace(slot, tag))
    }

    /// Remove the last element. The element kind is kept.
    pub fn pop(&mut self) -> Option<Tag> {
        self.elements.pop()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.elements.get(index)
    }

    /// Edit the element at `index` in place. See [`ElementMut`].
    pub fn get_mut(&mut self, index: usize) -> Option<ElementMut<'_>> {
        self.elements.get_mut(index).map(|tag| ElementMut { tag })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = ElementMut<'_>> {
        self.elements.iter_mut().map(|tag| ElementMut { tag })
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// Mutable access to one element of a [`List`] that cannot change its kind.
///
/// It derefs to the [`Tag`] for reading. Payloads can be edited through the
/// `as_*_mut` accessors, and the whole element replaced with
/// [`ElementMut::set`] as long as the replacement has the same kind.
///
/// ```
/// # use nbtkit::{Compound, List, Tag};
/// let mut list = List::from_tags([Compound::new()]).unwrap();
/// let mut first = list.get_mut(0).unwrap();
/// first.as_compound_mut().unwrap().push("x", 1i8);
/// assert!(first.set(Tag::Int(1)).is_err());
/// ```
#[derive(Debug)]
pub struct ElementMut<'a> {
    tag: &'a mut Tag,
}

impl ElementMut<'_> {
    /// Replace the element, returning the old one. Fails with
    /// [`ErrorKind::HeterogeneousList`][`crate::error::ErrorKind::HeterogeneousList`]
    /// if `tag` is of a different kind.
    pub fn set(&mut self, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        if tag.kind() != self.tag.kind() {
            return Err(Error::heterogeneous_list(self.tag.kind(), tag.kind()));
        }
        Ok(std::mem::replace(self.tag, tag))
    }
}

impl std::ops::Deref for ElementMut<'_> {
    type Target = Tag;

    fn deref(&self) -> &Tag {
        self.tag
    }
}

/// An ordered sequence of named tags.
///
/// Entries keep the order they were pushed or read in, and that order is
/// what gets written. Names are not required to be unique: [`Compound::push`]
/// always appends, and the reader appends duplicate names found in the input
/// rather than overwriting. Lookups by name return the first match.
///
/// ```
/// # use nbtkit::{Compound, Tag};
/// let mut compound = Compound::new();
/// compound.push("a", 1i8);
/// compound.push("a", 2i8);
/// assert_eq!(compound.len(), 2);
/// assert_eq!(compound.get("a"), Some(&Tag::Byte(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    entries: Vec<NamedTag>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, even if one with the same name exists.
    pub fn push(&mut self, name: impl Into<String>, tag: impl Into<Tag>) {
        self.entries.push(NamedTag::new(name, tag));
    }

    /// The first entry called `name`.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.tag)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| &mut e.tag)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Remove the first entry called `name`, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, NamedTag> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, NamedTag> {
        self.entries.iter_mut()
    }

    pub fn entries(&self) -> &[NamedTag] {
        &self.entries
    }
}

impl FromIterator<NamedTag> for Compound {
    fn from_iter<T: IntoIterator<Item = NamedTag>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<NamedTag> for Compound {
    fn extend<T: IntoIterator<Item = NamedTag>>(&mut self, iter: T) {
        self.entries.extend(iter)
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = &'a NamedTag;
    type IntoIter = slice::Iter<'a, NamedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Compound {
    type Item = NamedTag;
    type IntoIter = std::vec::IntoIter<NamedTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A tag with a name. Used for the root of a tree and for compound entries.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
pub struct NamedTag {
    name: String,
    tag: Tag,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    pub fn kind(&self) -> TagKind {
        self.tag.kind()
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }

    pub fn into_parts(self) -> (String, Tag) {
        (self.name, self.tag)
    }
}

/// The root of a tree, as produced by [`read`][`crate::read`] and consumed by
/// [`write`][`crate::write`]. Whether a root is named depends on where the
/// data came from: files on disk use named roots, some network protocols do
/// not.
#[derive(Debug, Clone, PartialEq)]
pub enum RootTag {
    Named(NamedTag),
    Unnamed(Tag),
}

impl RootTag {
    pub fn tag(&self) -> &Tag {
        match self {
            RootTag::Named(named) => named.tag(),
            RootTag::Unnamed(tag) => tag,
        }
    }

    /// The root's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            RootTag::Named(named) => Some(named.name()),
            RootTag::Unnamed(_) => None,
        }
    }

    /// Whether this root is empty, ie the input was a lone end tag.
    pub fn is_end(&self) -> bool {
        self.tag().is_end()
    }

    pub fn into_tag(self) -> Tag {
        match self {
            RootTag::Named(named) => named.into_tag(),
            RootTag::Unnamed(tag) => tag,
        }
    }

    /// Convert to a named root, using the empty name for unnamed roots.
    pub fn into_named(self) -> NamedTag {
        match self {
            RootTag::Named(named) => named,
            RootTag::Unnamed(tag) => NamedTag::new(String::new(), tag),
        }
    }
}

impl From<NamedTag> for RootTag {
    fn from(named: NamedTag) -> Self {
        RootTag::Named(named)
    }
}

impl From<Tag> for RootTag {
    fn from(tag: Tag) -> Self {
        RootTag::Unnamed(tag)
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Tag {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Vec<i64>, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Tag {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

#[cfg(feature = "arbitrary1")]
fn arbitrary_of_kind(u: &mut arbitrary::Unstructured<'_>, kind: TagKind) -> arbitrary::Result<Tag> {
    use arbitrary::Arbitrary;

    Ok(match kind {
        TagKind::End => return Err(arbitrary::Error::IncorrectFormat),
        TagKind::Byte => Tag::Byte(u.arbitrary()?),
        TagKind::Short => Tag::Short(u.arbitrary()?),
        TagKind::Int => Tag::Int(u.arbitrary()?),
        TagKind::Long => Tag::Long(u.arbitrary()?),
        TagKind::Float => Tag::Float(u.arbitrary()?),
        TagKind::Double => Tag::Double(u.arbitrary()?),
        TagKind::ByteArray => Tag::ByteArray(u.arbitrary()?),
        TagKind::String => Tag::String(u.arbitrary()?),
        TagKind::List => Tag::List(List::arbitrary(u)?),
        TagKind::Compound => Tag::Compound(Compound::arbitrary(u)?),
        TagKind::IntArray => Tag::IntArray(u.arbitrary()?),
        TagKind::LongArray => Tag::LongArray(u.arbitrary()?),
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Tag {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let kind: TagKind = u.arbitrary()?;
        arbitrary_of_kind(u, kind)
    }
}

// Lists need to all be the same kind, so pick the kind first and generate
// every element from it.
#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for List {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let kind: TagKind = u.arbitrary()?;
        if kind == TagKind::End {
            return Ok(List::new());
        }

        let len = u.arbitrary_len::<Tag>()?;
        let mut elements = Vec::with_capacity(len);
        for _ in 0..len {
            elements.push(arbitrary_of_kind(u, kind)?);
        }

        Ok(List::from_parts(kind, elements))
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Compound {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Compound {
            entries: u.arbitrary()?,
        })
    }
}
