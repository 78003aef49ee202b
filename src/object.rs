//! PDF object types.
//!
//! Only the value kinds needed for catalogs, page trees, pages, content
//! streams and image XObjects are modeled.

use indexmap::IndexMap;

/// Dictionary with entries kept in insertion order.
pub type Dictionary = IndexMap<String, Object>;

/// Number of an indirect object.
///
/// Ids are positive and unique within one document. Generation numbers are
/// always zero for freshly written files, so they are not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Wrap an object number.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw object number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// A reference object pointing at this id.
    pub fn reference(self) -> Object {
        Object::Reference(self)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array); literal or hex syntax chosen on output
    String(Vec<u8>),
    /// String always written in hex syntax
    HexString(Vec<u8>),
    /// Name (without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary
    Dictionary(Dictionary),
    /// Indirect object reference
    Reference(ObjectId),
}

impl Object {
    /// Build a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Build a dictionary from key/value pairs, preserving their order.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Self {
        Object::Dictionary(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    /// Build an array of reals.
    pub fn reals(values: &[f64]) -> Self {
        Object::Array(values.iter().map(|&v| Object::Real(v)).collect())
    }
}

impl From<usize> for Object {
    fn from(value: usize) -> Self {
        Object::Integer(value as i64)
    }
}

impl From<u32> for Object {
    fn from(value: u32) -> Self {
        Object::Integer(i64::from(value))
    }
}
