//! Properties composing the state schema of a multipart.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::fmt;

use crate::geom::Face;


/// Maximum number of values in a property domain, states store value indices on 16 bits.
pub const MAX_DOMAIN_LEN: usize = u16::MAX as usize + 1;


/// A value that a property can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Face(Face),
    Name(&'static str),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Face(face) => f.write_str(face.name()),
            PropertyValue::Name(name) => f.write_str(name),
        }
    }
}

impl From<bool> for PropertyValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<Face> for PropertyValue {
    #[inline]
    fn from(value: Face) -> Self {
        Self::Face(value)
    }
}

impl From<&'static str> for PropertyValue {
    #[inline]
    fn from(value: &'static str) -> Self {
        Self::Name(value)
    }
}


/// A named property with a finite, ordered domain of values. The first value of the
/// domain is the default one unless overridden when building the state factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: &'static str,
    values: Vec<PropertyValue>,
}

impl Property {

    /// A boolean property, its domain is `[false, true]`.
    pub fn bool(name: &'static str) -> Self {
        Self::new(name, [false, true])
    }

    /// An integer property taking all values of the given range.
    pub fn int(name: &'static str, range: RangeInclusive<i32>) -> Self {
        Self::new(name, range)
    }

    /// A facing property over the given faces, in the given order.
    pub fn face(name: &'static str, faces: &[Face]) -> Self {
        Self::new(name, faces.iter().copied())
    }

    /// An enumeration of names.
    pub fn names(name: &'static str, names: &[&'static str]) -> Self {
        Self::new(name, names.iter().copied())
    }

    /// Create a property from any values, duplicated values are a programming error.
    pub fn new<V: Into<PropertyValue>>(name: &'static str, values: impl IntoIterator<Item = V>) -> Self {

        let values: Vec<PropertyValue> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "property {name} has an empty domain");
        assert!(values.len() <= MAX_DOMAIN_LEN, "property {name} has {} values, at most {MAX_DOMAIN_LEN} are allowed", values.len());

        let mut seen = HashSet::with_capacity(values.len());
        for value in &values {
            assert!(seen.insert(*value), "property {name} has duplicated value {value}");
        }

        Self { name, values }

    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The domain of this property, in declaration order.
    #[inline]
    pub fn values(&self) -> &[PropertyValue] {
        &self.values
    }

    /// Return the index of the value in this property's domain.
    #[inline]
    pub fn index_of(&self, value: PropertyValue) -> Option<usize> {
        self.values.iter().position(|&v| v == value)
    }

}
