//! Various geometry utilities that completes the `glam` math crate: bounding boxes,
//! faces and shapes made of several boxes.

use std::ops::BitOr;
use std::cmp::Ordering;
use std::fmt;

use glam::{DVec3, IVec3};


/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {

    pub const CUBE: Self = Self { min: DVec3::ZERO, max: DVec3::ONE };

    /// Construct a new bounding box from the minimum and maximum points.
    pub const fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> Self {
        Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        }
    }

    /// Return true if this box has no volume, such boxes are ignored by shapes.
    pub fn is_degenerate(self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y || self.max.z <= self.min.z
    }

    /// Expand this bounding box in all direction by the given delta.
    pub fn inflate(self, delta: DVec3) -> Self {
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }

    /// Return true if this bounding box intersects with the given one. Boxes that only
    /// touch each other on a face are not intersecting.
    pub fn intersects(self, other: Self) -> bool {
        other.max.x > self.min.x && other.min.x < self.max.x &&
        other.max.y > self.min.y && other.min.y < self.max.y &&
        other.max.z > self.min.z && other.min.z < self.max.z
    }

    fn contains_yz(self, point: DVec3) -> bool {
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    fn contains_xz(self, point: DVec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    fn contains_xy(self, point: DVec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y
    }

    /// Compute an intersection of a ray into this bounding box. The ray starts at the
    /// origin and has the length of the given vector. If the ray enters this box, the
    /// vector from the origin to the first face hit is returned with that face.
    pub fn calc_ray_trace(self, origin: DVec3, ray: DVec3) -> Option<(DVec3, Face)> {

        let mut best: Option<(f64, Face)> = None;
        let mut check = |factor: f64, face: Face, on_face: bool| {
            if on_face && (0.0..=1.0).contains(&factor) {
                if best.is_none_or(|(best_factor, _)| factor < best_factor) {
                    best = Some((factor, face));
                }
            }
        };

        if ray.x * ray.x >= 1e-7 {
            let (factor, face) =
            if ray.x > 0.0 { // We can collide only with NegX face.
                ((self.min.x - origin.x) / ray.x, Face::NegX)
            } else { // We can collide only with PosX face.
                ((self.max.x - origin.x) / ray.x, Face::PosX)
            };
            check(factor, face, self.contains_yz(origin + ray * factor));
        }

        if ray.y * ray.y >= 1e-7 {
            let (factor, face) =
            if ray.y > 0.0 {
                ((self.min.y - origin.y) / ray.y, Face::NegY)
            } else {
                ((self.max.y - origin.y) / ray.y, Face::PosY)
            };
            check(factor, face, self.contains_xz(origin + ray * factor));
        }

        if ray.z * ray.z >= 1e-7 {
            let (factor, face) =
            if ray.z > 0.0 {
                ((self.min.z - origin.z) / ray.z, Face::NegZ)
            } else {
                ((self.max.z - origin.z) / ray.z, Face::PosZ)
            };
            check(factor, face, self.contains_xy(origin + ray * factor));
        }

        best.map(|(factor, face)| (ray * factor, face))

    }

    /// Total ordering used to normalize shapes, comparing min then max coordinates.
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.min.to_array().iter()
            .chain(self.max.to_array().iter())
            .zip(other.min.to_array().iter().chain(other.max.to_array().iter()))
            .map(|(a, b)| a.total_cmp(b))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

}

// The bit or operator gives the smallest box enclosing both boxes.
impl BitOr<BoundingBox> for BoundingBox {
    type Output = BoundingBox;
    #[inline]
    fn bitor(self, rhs: BoundingBox) -> Self::Output {
        BoundingBox {
            min: self.min.min(rhs.min),
            max: self.max.max(rhs.max),
        }
    }
}

/// Represent a cube facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    NegY = 0,
    PosY = 1,
    NegZ = 2,
    PosZ = 3,
    NegX = 4,
    PosX = 5,
}

impl Face {

    /// Array containing all 6 faces.
    pub const ALL: [Self; 6] = [Self::NegY, Self::PosY, Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];
    /// Array containing all 4 horizontal faces.
    pub const HORIZONTAL: [Self; 4] = [Self::NegZ, Self::PosZ, Self::NegX, Self::PosX];

    /// Get a face from the yaw component of a look only.
    #[inline]
    pub fn from_yaw(yaw: f32) -> Self {
        match ((yaw * 4.0 / std::f32::consts::TAU + 0.5).floor() as i32) & 3 {
            0 => Self::PosZ,
            1 => Self::NegX,
            2 => Self::NegZ,
            3 => Self::PosX,
            _ => unreachable!()
        }
    }

    /// The canonical lowercase name of the face, as used in model variants.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Face::NegY => "down",
            Face::PosY => "up",
            Face::NegZ => "north",
            Face::PosZ => "south",
            Face::NegX => "west",
            Face::PosX => "east",
        }
    }

    #[inline]
    pub fn is_y(self) -> bool {
        matches!(self, Face::NegY | Face::PosY)
    }

    /// Get the opposite face.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Face::NegY => Face::PosY,
            Face::PosY => Face::NegY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
        }
    }

    /// Get the delta vector for this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
        }
    }

    /// Extrude a face and form a bounding box. The face is extruded toward the opposite
    /// face. The given inset allows shrinking the face toward the center axis.
    #[inline]
    pub fn extrude(self, inset: f64, depth: f64) -> BoundingBox {
        let pos = inset;
        let neg = 1.0 - inset;
        match self {
            Face::NegY => BoundingBox::new(pos, 0.0, pos, neg, depth, neg),
            Face::PosY => BoundingBox::new(pos, 1.0 - depth, pos, neg, 1.0, neg),
            Face::NegZ => BoundingBox::new(pos, pos, 0.0, neg, neg, depth),
            Face::PosZ => BoundingBox::new(pos, pos, 1.0 - depth, neg, neg, 1.0),
            Face::NegX => BoundingBox::new(0.0, pos, pos, depth, neg, neg),
            Face::PosX => BoundingBox::new(1.0 - depth, pos, pos, 1.0, neg, neg),
        }
    }

}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// A shape made of any number of bounding boxes, this is what a part uses for its
/// collision and selection volume. Boxes are kept in a canonical order, degenerate
/// boxes are dropped, so that two shapes built from the same boxes in any order are
/// equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    boxes: Vec<BoundingBox>,
}

impl Shape {

    /// The shape with no volume at all.
    pub const EMPTY: Self = Self { boxes: Vec::new() };

    /// A shape made of the full block cube.
    pub fn cube() -> Self {
        Self::from(BoundingBox::CUBE)
    }

    /// Build a shape from the given boxes.
    pub fn from_boxes(boxes: impl IntoIterator<Item = BoundingBox>) -> Self {
        let mut shape = Self { boxes: boxes.into_iter().collect() };
        shape.normalize();
        shape
    }

    fn normalize(&mut self) {
        self.boxes.retain(|bb| !bb.is_degenerate());
        self.boxes.sort_by(BoundingBox::total_cmp);
        self.boxes.dedup();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get the boxes of this shape, in canonical order.
    #[inline]
    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Make the union of this shape and another one.
    pub fn union(mut self, other: &Shape) -> Self {
        self.boxes.extend_from_slice(&other.boxes);
        self.normalize();
        self
    }

    /// Return the smallest box enclosing the whole shape, if not empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.boxes.iter().copied().reduce(|a, b| a | b)
    }

    /// Return true if any box of this shape intersects the given box.
    pub fn intersects_box(&self, bb: BoundingBox) -> bool {
        self.boxes.iter().any(|shape_bb| shape_bb.intersects(bb))
    }

    /// Return true if any box of this shape intersects any box of the other one.
    pub fn intersects(&self, other: &Shape) -> bool {
        other.boxes.iter().any(|&bb| self.intersects_box(bb))
    }

    /// Ray trace through every box of the shape and return the nearest hit.
    pub fn calc_ray_trace(&self, origin: DVec3, ray: DVec3) -> Option<(DVec3, Face)> {
        self.boxes.iter()
            .filter_map(|bb| bb.calc_ray_trace(origin, ray))
            .min_by(|(a, _), (b, _)| a.length_squared().total_cmp(&b.length_squared()))
    }

}

impl From<BoundingBox> for Shape {
    fn from(bb: BoundingBox) -> Self {
        Self::from_boxes([bb])
    }
}

impl BitOr<&Shape> for Shape {
    type Output = Shape;
    #[inline]
    fn bitor(self, rhs: &Shape) -> Self::Output {
        self.union(rhs)
    }
}
