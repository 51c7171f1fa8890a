//! Multipart blocks: several independent parts sharing a single block position.
//!
//! Each kind of part is described by a [`Multipart`] implementation registered in a
//! [`MultipartRegistry`], where it receives its immutable universe of
//! [`MultipartState`]. Placed parts live in a [`MultipartContainer`], keyed by a
//! [`MultipartSlot`], and the container aggregates their shapes, drops and
//! interactions as if they were a single block.

pub mod geom;
pub mod identifier;
pub mod item;

pub mod property;
pub mod state;
pub mod multipart;
pub mod registry;

pub mod slot;
pub mod view;
pub mod container;
pub mod loot;

pub mod parts;


pub use identifier::Identifier;
pub use item::{ItemStack, Actor, Hand};
pub use property::{Property, PropertyValue};
pub use state::{MultipartState, StateBuilder, StateFactory};
pub use multipart::{Multipart, MultipartType, PlacementContext};
pub use registry::{MultipartId, MultipartRegistry};
pub use slot::MultipartSlot;
pub use view::{MultipartView, MultipartViewMut};
pub use container::{MultipartContainer, ContainerSnapshot, Interaction};
