//! Slots identifying where a part lives inside a container.

use std::fmt;

use arcstr::ArcStr;

use crate::geom::Face;


/// A stable key distinguishing the parts sharing a container, for example the facade
/// covering the north side and the pipe going through the center. Slots are ordered by
/// their key, and this order is the one used when aggregating parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MultipartSlot(ArcStr);

impl MultipartSlot {

    /// The slot at the center of the block.
    pub const CENTER: Self = Self(arcstr::literal!("center"));

    /// Create a slot from an arbitrary key.
    pub fn new(key: impl Into<ArcStr>) -> Self {
        Self(key.into())
    }

    /// The slot against the given face of the block, named after that face.
    pub fn face(face: Face) -> Self {
        Self(match face {
            Face::NegY => arcstr::literal!("down"),
            Face::PosY => arcstr::literal!("up"),
            Face::NegZ => arcstr::literal!("north"),
            Face::PosZ => arcstr::literal!("south"),
            Face::NegX => arcstr::literal!("west"),
            Face::PosX => arcstr::literal!("east"),
        })
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for MultipartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
