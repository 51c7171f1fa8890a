//! Lever part, attached to a face of the block and toggled by actors.

use glam::DVec3;

use tracing::trace;

use crate::geom::{Face, Shape};
use crate::item::{Actor, Hand};
use crate::multipart::{Multipart, MultipartType, PlacementContext};
use crate::property::Property;
use crate::state::{MultipartState, StateBuilder};
use crate::view::{MultipartView, MultipartViewMut};

use super::PIXEL;


/// A lever, `facing` is the face of the block it is attached to and `powered` is
/// toggled on each activation. Levers on the floor or the ceiling also have an `axis`
/// along which their stick points, chosen from the placer's look. It uses the center
/// slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeverPart;

impl LeverPart {

    #[inline]
    pub fn facing(state: &MultipartState) -> Face {
        state.get_face("facing").unwrap_or(Face::NegY)
    }

    #[inline]
    pub fn is_powered(state: &MultipartState) -> bool {
        state.get_bool("powered").unwrap_or(false)
    }

    /// The axis of the stick, `x` or `z`.
    #[inline]
    pub fn axis(state: &MultipartState) -> &'static str {
        state.get_name("axis").unwrap_or("z")
    }

}

impl Multipart for LeverPart {

    fn append_properties(&self, builder: &mut StateBuilder) {
        builder
            .add(Property::face("facing", &Face::ALL))
            .add(Property::names("axis", &["z", "x"]))
            .add(Property::bool("powered"));
    }

    fn placement_state(&self, ty: &MultipartType, ctx: &PlacementContext) -> MultipartState {
        let facing = ctx.face.opposite();
        let axis = match ctx.actor_facing() {
            Some(Face::NegX | Face::PosX) if facing.is_y() => "x",
            _ => "z",
        };
        ty.default_state()
            .with("facing", facing)
            .with("axis", axis)
    }

    fn bounding_shape(&self, state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
        let face = Self::facing(state);
        let bb = if face.is_y() {
            face.extrude(0.25, 0.6)
        } else {
            face.extrude(5.0 / 16.0, 6.0 / 16.0).inflate(DVec3::new(0.0, PIXEL * 2.0, 0.0))
        };
        Shape::from(bb)
    }

    fn activate(&self, state: &MultipartState, view: &mut MultipartViewMut, actor: &Actor, _hand: Hand) -> bool {
        let new_state = state.cycle("powered");
        trace!("actor #{} toggled lever at {} to {}", actor.id, view.pos(), Self::is_powered(&new_state));
        view.set_state(new_state);
        true
    }

}
