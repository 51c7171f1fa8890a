//! Thin cover part, attached against one face of the block.

use crate::geom::{Face, Shape};
use crate::multipart::{Multipart, MultipartType, PlacementContext};
use crate::property::Property;
use crate::slot::MultipartSlot;
use crate::state::{MultipartState, StateBuilder};
use crate::view::MultipartView;

use super::PIXEL;


/// A one pixel thick cover, the `facing` property is the block face it covers, so up to
/// six facades can share a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct FacadePart;

impl FacadePart {

    #[inline]
    pub fn facing(state: &MultipartState) -> Face {
        state.get_face("facing").unwrap_or(Face::NegY)
    }

}

impl Multipart for FacadePart {

    fn append_properties(&self, builder: &mut StateBuilder) {
        builder.add(Property::face("facing", &Face::ALL));
    }

    fn placement_state(&self, ty: &MultipartType, ctx: &PlacementContext) -> MultipartState {
        // The facade covers the clicked surface.
        ty.default_state().with("facing", ctx.face.opposite())
    }

    fn placement_slot(&self, state: &MultipartState, _ctx: &PlacementContext) -> MultipartSlot {
        MultipartSlot::face(Self::facing(state))
    }

    fn bounding_shape(&self, state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
        Shape::from(Self::facing(state).extrude(0.0, PIXEL))
    }

}
