//! Client side rendering of multipart containers.
//!
//! The renderer asks a [`ContainerModel`] for the quads of a block position, the
//! container model resolves one baked model per part from its registry identifier and
//! the variant string of its render state, and concatenates their quads in slot order.

pub mod config;
pub mod quad;
pub mod model;
pub mod container_model;

pub use quad::BakedQuad;
pub use model::{BakedModel, MultipartBakedModel, ModelIdentifier, ModelLookup, ModelStore, BoxModel};
pub use container_model::ContainerModel;
