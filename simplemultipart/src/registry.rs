//! Registry of multipart types, mapping identifiers to registered multiparts.
//!
//! The registry is populated at startup and read-only afterward. A process-wide
//! registry can be installed once with [`install`] and retrieved with [`global`], but
//! all container operations take the registry explicitly.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::OnceCell;
use thiserror::Error;

use tracing::{debug, info};

use crate::identifier::{Identifier, IdentifierError};
use crate::multipart::{Multipart, MultipartType};
use crate::state::MultipartState;


/// The global registry, installed once.
static GLOBAL: OnceCell<MultipartRegistry> = OnceCell::new();


/// Identity of a registered multipart, this is its index in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MultipartId(u16);

impl MultipartId {

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u16)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

}

impl fmt::Display for MultipartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// The registry of all multipart types.
#[derive(Default)]
pub struct MultipartRegistry {
    types: Vec<MultipartType>,
    ids: HashMap<Identifier, MultipartId>,
}

impl MultipartRegistry {

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new multipart under the given identifier, its state universe is
    /// generated immediately from its declared properties.
    pub fn register(&mut self, identifier: Identifier, multipart: impl Multipart) -> Result<MultipartId, RegistryError> {

        if self.ids.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier(identifier));
        }

        if self.types.len() > u16::MAX as usize {
            return Err(RegistryError::Full);
        }

        let id = MultipartId::from_index(self.types.len());
        let ty = MultipartType::new(id, identifier.clone(), Box::new(multipart));
        debug!("registered multipart {identifier} as {id} with {} states", ty.states().states().len());

        self.types.push(ty);
        self.ids.insert(identifier, id);
        Ok(id)

    }

    /// Get a registered multipart type from its id.
    #[inline]
    pub fn get(&self, id: MultipartId) -> Option<&MultipartType> {
        self.types.get(id.index())
    }

    /// Resolve a multipart type from its identifier.
    pub fn resolve(&self, identifier: &Identifier) -> Option<&MultipartType> {
        self.ids.get(identifier).and_then(|&id| self.get(id))
    }

    /// Resolve the identifier of a registered multipart.
    #[inline]
    pub fn identifier(&self, id: MultipartId) -> Option<&Identifier> {
        self.get(id).map(MultipartType::identifier)
    }

    /// Get the multipart type owning the given state. A state that cannot be resolved
    /// in this registry is a corrupted reference, so this panics.
    pub fn type_of(&self, state: &MultipartState) -> &MultipartType {
        match self.get(state.multipart()) {
            Some(ty) if ty.states().contains(state) => ty,
            _ => panic!("dangling multipart state {state:?}, not found in registry"),
        }
    }

    /// Iterate over all registered multipart types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &MultipartType> + '_ {
        self.types.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

}

impl fmt::Debug for MultipartRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(MultipartType::identifier))
            .finish()
    }
}


/// Install the process-wide registry, this can only be done once.
pub fn install(registry: MultipartRegistry) -> Result<&'static MultipartRegistry, RegistryError> {
    let count = registry.len();
    GLOBAL.set(registry).map_err(|_| RegistryError::AlreadyInstalled)?;
    info!("installed global multipart registry with {count} multiparts");
    GLOBAL.get().ok_or(RegistryError::AlreadyInstalled)
}

/// Get the process-wide registry, if installed.
#[inline]
pub fn global() -> Option<&'static MultipartRegistry> {
    GLOBAL.get()
}


/// Errors that can happen while registering multiparts.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("a multipart is already registered as {0}")]
    DuplicateIdentifier(Identifier),
    #[error("no more multipart ids are available")]
    Full,
    #[error("the global registry is already installed")]
    AlreadyInstalled,
    #[error("{0}")]
    Identifier(#[from] IdentifierError),
}
