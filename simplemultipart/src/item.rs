//! Item stacks dropped by parts, and the actors interacting with parts.

use glam::{DVec3, Vec2};

use crate::identifier::Identifier;


/// An item stack defines the actual number of items and their damage value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemStack {
    /// The item identifier.
    pub item: Identifier,
    /// The stack size.
    pub size: u16,
    /// The damage value of the stack.
    pub damage: u16,
}

impl ItemStack {

    pub const EMPTY: Self = Self {
        item: Identifier::new_static(arcstr::literal!("minecraft"), arcstr::literal!("air")),
        size: 0,
        damage: 0,
    };

    /// Create a stack of a single item with no damage.
    pub fn new(item: Identifier) -> Self {
        Self { item, size: 1, damage: 0 }
    }

    pub fn with_size(mut self, size: u16) -> ItemStack {
        self.size = size;
        self
    }

    /// Return true if this item stack represent an empty slot, this is the case of
    /// air stacks or stacks with no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0 || *self == Self::EMPTY
    }

}

/// The hand used by an actor when interacting with a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hand {
    #[default]
    Main,
    Off,
}


/// An entity acting on parts, typically a player placing, activating or breaking a
/// part. This only carries what part behaviors may need to know about the actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// The unique id of the entity in its world.
    pub id: u32,
    /// Position of the actor's eyes, in world coordinates.
    pub eye_pos: DVec3,
    /// The look of the actor, yaw and pitch in radians.
    pub look: Vec2,
}

impl Actor {

    pub fn new(id: u32, eye_pos: DVec3, look: Vec2) -> Self {
        Self { id, eye_pos, look }
    }

    /// Return the unit vector the actor is looking along.
    pub fn look_direction(&self) -> DVec3 {
        let (yaw_sin, yaw_cos) = (self.look.x as f64).sin_cos();
        let (pitch_sin, pitch_cos) = (self.look.y as f64).sin_cos();
        DVec3::new(-yaw_sin * pitch_cos, -pitch_sin, yaw_cos * pitch_cos)
    }

}
