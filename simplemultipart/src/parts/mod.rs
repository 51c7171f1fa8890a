//! Sample multiparts, they are registered by hosts that want them and serve as
//! reference implementations of the [`Multipart`](crate::Multipart) trait.

use crate::identifier::Identifier;
use crate::registry::{MultipartId, MultipartRegistry, RegistryError};

pub mod slab;
pub mod facade;
pub mod lever;

pub use slab::SlabPart;
pub use facade::FacadePart;
pub use lever::LeverPart;


/// One pixel of a block.
pub(crate) const PIXEL: f64 = 1.0 / 16.0;


/// Ids of the sample multiparts once registered.
#[derive(Debug, Clone, Copy)]
pub struct SampleParts {
    pub slab: MultipartId,
    pub facade: MultipartId,
    pub lever: MultipartId,
}

/// Register all sample multiparts in the given namespace.
pub fn register_samples(registry: &mut MultipartRegistry, namespace: &str) -> Result<SampleParts, RegistryError> {
    let id = |path: &str| Identifier::new(namespace, path);
    Ok(SampleParts {
        slab: registry.register(id("slab")?, SlabPart)?,
        facade: registry.register(id("facade")?, FacadePart)?,
        lever: registry.register(id("lever")?, LeverPart)?,
    })
}
