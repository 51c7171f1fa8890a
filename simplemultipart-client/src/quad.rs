//! Baked quads, the unit of geometry given to the renderer.

use glam::Vec3;

use simplemultipart::geom::{BoundingBox, Face};
use simplemultipart::Identifier;


/// A textured quad, with block-local vertex positions.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedQuad {
    /// Vertices in counter-clockwise order when seen from the front of the quad.
    pub vertices: [Vec3; 4],
    /// The direction the quad is facing.
    pub face: Face,
    /// When set, the quad is not rendered if the block on this side is opaque.
    pub cull_face: Option<Face>,
    /// The tint index given to the block color provider, if the quad is tinted.
    pub tint_index: Option<u32>,
    /// The sprite of the quad.
    pub sprite: Identifier,
}

impl BakedQuad {

    /// Build the quad covering the given face of a bounding box. The quad is culled
    /// on that face if it lies on the boundary of the block.
    pub fn from_box_face(bb: BoundingBox, face: Face, sprite: Identifier) -> Self {

        let min = bb.min.as_vec3();
        let max = bb.max.as_vec3();

        let vertices = match face {
            Face::NegY => [
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, min.y, max.z),
            ],
            Face::PosY => [
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, max.y, min.z),
            ],
            Face::NegZ => [
                Vec3::new(max.x, max.y, min.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, max.y, min.z),
            ],
            Face::PosZ => [
                Vec3::new(min.x, max.y, max.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, max.y, max.z),
            ],
            Face::NegX => [
                Vec3::new(min.x, max.y, min.z),
                Vec3::new(min.x, min.y, min.z),
                Vec3::new(min.x, min.y, max.z),
                Vec3::new(min.x, max.y, max.z),
            ],
            Face::PosX => [
                Vec3::new(max.x, max.y, max.z),
                Vec3::new(max.x, min.y, max.z),
                Vec3::new(max.x, min.y, min.z),
                Vec3::new(max.x, max.y, min.z),
            ],
        };

        let on_boundary = match face {
            Face::NegY => bb.min.y <= 0.0,
            Face::PosY => bb.max.y >= 1.0,
            Face::NegZ => bb.min.z <= 0.0,
            Face::PosZ => bb.max.z >= 1.0,
            Face::NegX => bb.min.x <= 0.0,
            Face::PosX => bb.max.x >= 1.0,
        };

        Self {
            vertices,
            face,
            cull_face: on_boundary.then_some(face),
            tint_index: None,
            sprite,
        }

    }

    /// Return this quad with the given tint index.
    #[inline]
    pub fn with_tint(mut self, tint_index: u32) -> Self {
        self.tint_index = Some(tint_index);
        self
    }

    /// The normal of the quad.
    pub fn normal(&self) -> Vec3 {
        self.face.delta().as_vec3()
    }

}
