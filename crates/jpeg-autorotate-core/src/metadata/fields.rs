//! Mutable collection of typed EXIF fields.

use exif::{Context, Field, In, Tag, Value};

/// Logical directory an EXIF field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// IFD0 of the primary image.
    Root,
    /// EXIF sub-IFD.
    Exif,
    /// GPS sub-IFD.
    Gps,
    /// Interoperability sub-IFD.
    Interop,
    /// IFD1, describing the embedded thumbnail.
    Thumbnail,
}

impl Directory {
    /// Directory a parsed field belongs to.
    pub fn of(field: &Field) -> Directory {
        if field.ifd_num == In::THUMBNAIL {
            return Directory::Thumbnail;
        }
        match field.tag.context() {
            Context::Exif => Directory::Exif,
            Context::Gps => Directory::Gps,
            Context::Interop => Directory::Interop,
            _ => Directory::Root,
        }
    }

    fn ifd(self) -> In {
        match self {
            Directory::Thumbnail => In::THUMBNAIL,
            _ => In::PRIMARY,
        }
    }
}

/// EXIF fields keyed by directory and tag number.
///
/// At most one field exists per (directory, tag); [`FieldSet::add`] replaces
/// whatever was there before.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field.
    pub fn find(&self, directory: Directory, tag: Tag) -> Option<&Field> {
        self.position(directory, tag).map(|idx| &self.fields[idx])
    }

    /// Remove a field, returning it if it was present.
    pub fn remove(&mut self, directory: Directory, tag: Tag) -> Option<Field> {
        self.position(directory, tag)
            .map(|idx| self.fields.remove(idx))
    }

    /// Insert a field, replacing any existing value for the same key.
    pub fn add(&mut self, directory: Directory, tag: Tag, value: Value) {
        let field = Field {
            tag,
            ifd_num: directory.ifd(),
            value,
        };
        match self.position(directory, tag) {
            Some(idx) => self.fields[idx] = field,
            None => self.fields.push(field),
        }
    }

    /// Unsigned integer stored at index 0 of a field, if readable as one.
    pub fn uint(&self, directory: Directory, tag: Tag) -> Option<u32> {
        self.find(directory, tag)?.value.get_uint(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn position(&self, directory: Directory, tag: Tag) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| Directory::of(f) == directory && f.tag.number() == tag.number())
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for field in iter {
            let directory = Directory::of(&field);
            set.add(directory, field.tag, field.value);
        }
        set
    }
}
