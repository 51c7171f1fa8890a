//! Namespaced identifiers used by the registry, loot tables and models.

use std::str::FromStr;
use std::fmt;

use arcstr::ArcStr;
use thiserror::Error;


/// The namespace used when an identifier is parsed without one.
pub const DEFAULT_NAMESPACE: ArcStr = arcstr::literal!("minecraft");


/// A `namespace:path` identifier. Both components are shared strings, so cloning an
/// identifier never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: ArcStr,
    path: ArcStr,
}

impl Identifier {

    /// Construct an identifier from static components, this is usable in constant
    /// contexts but components are not validated.
    pub const fn new_static(namespace: ArcStr, path: ArcStr) -> Self {
        Self { namespace, path }
    }

    /// Construct an identifier from its two components, checking allowed characters.
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {

        if namespace.is_empty() || !namespace.bytes().all(is_namespace_char) {
            return Err(IdentifierError::Namespace(namespace.to_string()));
        }

        if path.is_empty() || !path.bytes().all(is_path_char) {
            return Err(IdentifierError::Path(path.to_string()));
        }

        Ok(Self {
            namespace: ArcStr::from(namespace),
            path: ArcStr::from(path),
        })

    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Return a new identifier in the same namespace but with the given prefix
    /// prepended to the path, for example `mymod:slab` becomes `mymod:multiparts/slab`.
    pub fn with_path_prefix(&self, prefix: &str) -> Self {
        Self {
            namespace: self.namespace.clone(),
            path: ArcStr::from(format!("{prefix}{}", self.path)),
        }
    }

}

impl FromStr for Identifier {

    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(&DEFAULT_NAMESPACE, s),
        }
    }

}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}


#[inline]
fn is_namespace_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.')
}

#[inline]
fn is_path_char(b: u8) -> bool {
    is_namespace_char(b) || b == b'/'
}


/// Error returned when parsing or building a malformed identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("illegal identifier namespace: {0:?}")]
    Namespace(String),
    #[error("illegal identifier path: {0:?}")]
    Path(String),
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse() {

        let id: Identifier = "mymod:slab".parse().unwrap();
        assert_eq!(id.namespace(), "mymod");
        assert_eq!(id.path(), "slab");
        assert_eq!(id.to_string(), "mymod:slab");

        let id: Identifier = "stone".parse().unwrap();
        assert_eq!(id.namespace(), "minecraft");

        assert_eq!("Bad:slab".parse::<Identifier>(), Err(IdentifierError::Namespace("Bad".to_string())));
        assert_eq!("mymod:".parse::<Identifier>(), Err(IdentifierError::Path(String::new())));
        assert!("mymod:pipes/copper".parse::<Identifier>().is_ok());

    }

    #[test]
    fn path_prefix() {
        let id: Identifier = "mymod:slab".parse().unwrap();
        assert_eq!(id.with_path_prefix("multiparts/").to_string(), "mymod:multiparts/slab");
    }

}
