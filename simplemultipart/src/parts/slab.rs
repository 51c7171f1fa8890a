//! Half slab part, occupying the bottom or top half of a block.

use crate::geom::{Face, Shape};
use crate::multipart::{Multipart, MultipartType, PlacementContext};
use crate::property::Property;
use crate::slot::MultipartSlot;
use crate::state::{MultipartState, StateBuilder};
use crate::view::MultipartView;


/// A half slab, its `top` property tells which half of the block it fills. Both halves
/// can be placed in the same container since they use different slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlabPart;

impl SlabPart {

    /// Return true if the given slab state is in the top half.
    #[inline]
    pub fn is_top(state: &MultipartState) -> bool {
        state.get_bool("top").unwrap_or(false)
    }

    /// Return the half face of a slab state.
    #[inline]
    pub fn half_face(state: &MultipartState) -> Face {
        if Self::is_top(state) { Face::PosY } else { Face::NegY }
    }

}

impl Multipart for SlabPart {

    fn append_properties(&self, builder: &mut StateBuilder) {
        builder.add(Property::bool("top"));
    }

    fn placement_state(&self, ty: &MultipartType, ctx: &PlacementContext) -> MultipartState {
        let top = match ctx.face {
            Face::NegY => true,
            Face::PosY => false,
            _ => ctx.hit.y > 0.5,
        };
        ty.default_state().with("top", top)
    }

    fn placement_slot(&self, state: &MultipartState, _ctx: &PlacementContext) -> MultipartSlot {
        MultipartSlot::face(Self::half_face(state))
    }

    fn bounding_shape(&self, state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
        Shape::from(Self::half_face(state).extrude(0.0, 0.5))
    }

}
