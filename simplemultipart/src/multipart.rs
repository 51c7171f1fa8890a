//! The multipart behavior trait and the registered multipart type.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::fmt;

use glam::{DVec3, IVec3};
use once_cell::sync::OnceCell;

use crate::container::MultipartContainer;
use crate::identifier::Identifier;
use crate::item::{Actor, Hand, ItemStack};
use crate::loot::{self, LootContextBuilder};
use crate::registry::MultipartId;
use crate::slot::MultipartSlot;
use crate::state::{MultipartState, StateBuilder, StateFactory};
use crate::view::{MultipartView, MultipartViewMut};
use crate::geom::{Face, Shape};


/// Behavior of a kind of part, analogous to what a block is for a whole block position.
///
/// Only [`Multipart::bounding_shape`] is required, every other method has a default
/// behavior. These methods are hooks: they are called by [`MultipartType`],
/// [`MultipartView`], [`MultipartViewMut`] and [`MultipartContainer`], and should not
/// be called directly.
pub trait Multipart: Send + Sync + 'static {

    /// Declare the properties of this multipart. This is called once when registering
    /// the multipart, before its state universe is generated.
    fn append_properties(&self, builder: &mut StateBuilder) {
        let _ = builder;
    }

    /// Return the loot table used by the default [`Multipart::dropped_stacks`], given
    /// the identifier this multipart is registered with. The result is cached by the
    /// multipart type. Return [`loot::EMPTY_TABLE`] for a part that drops nothing.
    fn drop_table(&self, identifier: &Identifier) -> Identifier {
        identifier.with_path_prefix("multiparts/")
    }

    /// Compute the state to place from the given context, this must not have any side
    /// effect. The default implementation returns the default state of the type.
    fn placement_state(&self, ty: &MultipartType, ctx: &PlacementContext) -> MultipartState {
        let _ = ctx;
        ty.default_state()
    }

    /// Compute the slot where the given placement state should be inserted.
    fn placement_slot(&self, state: &MultipartState, ctx: &PlacementContext) -> MultipartSlot {
        let _ = (state, ctx);
        MultipartSlot::CENTER
    }

    /// Return the state that should be used for rendering this part, without changing
    /// its actual state. This can be used to derive a render state from neighbour parts.
    fn state_for_rendering(&self, state: &MultipartState, view: &MultipartView) -> MultipartState {
        let _ = view;
        state.clone()
    }

    /// Return the shape of this part in the given state, in block-local coordinates.
    ///
    /// The view is `None` when the shape is queried before the part is inserted in a
    /// container, for example to check if the part fits in it.
    fn bounding_shape(&self, state: &MultipartState, view: Option<&MultipartView>) -> Shape;

    /// Return the stacks to drop when this part is broken. The default implementation
    /// evaluates the loot table of the multipart type.
    fn dropped_stacks(&self, state: &MultipartState, view: &MultipartView, loot: LootContextBuilder) -> Vec<ItemStack> {
        loot::table_drops(view.multipart_type().drop_table_id(), state, loot)
    }

    /// Called when this part is activated by an actor, the view allows modifying the
    /// part. Return true if the activation has been handled.
    fn activate(&self, state: &MultipartState, view: &mut MultipartViewMut, actor: &Actor, hand: Hand) -> bool {
        let _ = (state, view, actor, hand);
        false
    }

}


/// A registered multipart: its behavior, identity and state universe.
pub struct MultipartType {
    id: MultipartId,
    identifier: Identifier,
    behavior: Box<dyn Multipart>,
    states: StateFactory,
    /// Index of the default state in the universe.
    default_state: AtomicUsize,
    drop_table_id: OnceCell<Identifier>,
}

impl MultipartType {

    pub(crate) fn new(id: MultipartId, identifier: Identifier, behavior: Box<dyn Multipart>) -> Self {

        let mut builder = StateBuilder::new();
        behavior.append_properties(&mut builder);
        let states = builder.build(id);
        let default_state = AtomicUsize::new(states.default_state().index());

        Self {
            id,
            identifier,
            behavior,
            states,
            default_state,
            drop_table_id: OnceCell::new(),
        }

    }

    #[inline]
    pub fn id(&self) -> MultipartId {
        self.id
    }

    #[inline]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    #[inline]
    pub(crate) fn behavior(&self) -> &dyn Multipart {
        &*self.behavior
    }

    /// The state universe of this multipart, never changes.
    #[inline]
    pub fn states(&self) -> &StateFactory {
        &self.states
    }

    /// The state used when no particular state is requested.
    pub fn default_state(&self) -> MultipartState {
        self.states.states()[self.default_state.load(Ordering::Relaxed)].clone()
    }

    /// Replace the default state, the given state must come from this multipart's
    /// universe, giving a state of another multipart is a programming error.
    pub fn set_default_state(&self, state: &MultipartState) {
        assert!(self.states.contains(state), "state {state:?} is not a state of multipart {}", self.identifier);
        self.default_state.store(state.index(), Ordering::Relaxed);
    }

    /// The loot table evaluated by default when a part of this type is broken.
    pub fn drop_table_id(&self) -> &Identifier {
        self.drop_table_id.get_or_init(|| self.behavior.drop_table(&self.identifier))
    }

    /// Return true if parts of this type never drop anything through loot tables.
    pub fn has_empty_drop_table(&self) -> bool {
        *self.drop_table_id() == loot::EMPTY_TABLE
    }

    /// Compute the state to place for the given context.
    pub fn placement_state(&self, ctx: &PlacementContext) -> MultipartState {
        let state = self.behavior.placement_state(self, ctx);
        assert!(self.states.contains(&state), "placement state {state:?} is not a state of multipart {}", self.identifier);
        state
    }

    /// Compute the slot where the given state should be placed.
    pub fn placement_slot(&self, state: &MultipartState, ctx: &PlacementContext) -> MultipartSlot {
        self.behavior.placement_slot(state, ctx)
    }

    /// The shape of a part of this type in the given state, before being inserted in
    /// any container.
    pub fn detached_shape(&self, state: &MultipartState) -> Shape {
        self.behavior.bounding_shape(state, None)
    }

}

impl fmt::Debug for MultipartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartType")
            .field("id", &self.id)
            .field("identifier", &self.identifier)
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}


/// Context given to a multipart when an actor places it.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// The position of the block where the part is placed.
    pub pos: IVec3,
    /// The face of the clicked surface, pointing out of it. For example a part placed
    /// on the top of the block below receives [`Face::PosY`].
    pub face: Face,
    /// The clicked point, relative to the block where the part is placed.
    pub hit: DVec3,
    /// The actor placing the part, if any.
    pub actor: Option<&'a Actor>,
    /// The container already at this position, if any.
    pub container: Option<&'a MultipartContainer>,
}

impl<'a> PlacementContext<'a> {

    pub fn new(pos: IVec3, face: Face, hit: DVec3) -> Self {
        Self { pos, face, hit, actor: None, container: None }
    }

    pub fn with_actor(mut self, actor: &'a Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_container(mut self, container: &'a MultipartContainer) -> Self {
        self.container = Some(container);
        self
    }

    /// The horizontal face the actor is looking toward, if there is an actor.
    pub fn actor_facing(&self) -> Option<Face> {
        self.actor.map(|actor| Face::from_yaw(actor.look.x))
    }

}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::property::Property;
    use crate::registry::MultipartRegistry;

    struct Gauge;

    impl Multipart for Gauge {
        fn append_properties(&self, builder: &mut StateBuilder) {
            builder.add(Property::int("level", 0..=3));
        }
        fn bounding_shape(&self, _state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
            Shape::from(Face::NegY.extrude(0.0, 0.25))
        }
    }

    /// A part whose placement state comes from a universe of its own.
    struct Stray(StateFactory);

    impl Multipart for Stray {
        fn append_properties(&self, builder: &mut StateBuilder) {
            builder.add(Property::int("level", 0..=3));
        }
        fn placement_state(&self, _ty: &MultipartType, _ctx: &PlacementContext) -> MultipartState {
            self.0.default_state().clone()
        }
        fn bounding_shape(&self, _state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
            Shape::cube()
        }
    }

    fn stray() -> Stray {
        let mut builder = StateBuilder::new();
        builder.add(Property::int("level", 0..=3));
        Stray(builder.build(MultipartId::from_index(0)))
    }

    #[test]
    fn default_state() {

        let mut registry = MultipartRegistry::new();
        let gauge = registry.register("test:gauge".parse().unwrap(), Gauge).unwrap();
        let ty = registry.get(gauge).unwrap();

        let full = ty.default_state().with("level", 3);
        ty.set_default_state(&full);
        assert_eq!(ty.default_state(), full);
        assert_eq!(ty.placement_state(&PlacementContext::new(IVec3::ZERO, Face::PosY, DVec3::ZERO)), full);
        assert_eq!(ty.drop_table_id().to_string(), "test:multiparts/gauge");
        assert!(!ty.has_empty_drop_table());

    }

    #[test]
    #[should_panic]
    fn foreign_default_state() {

        let mut registry = MultipartRegistry::new();
        let first = registry.register("test:first".parse().unwrap(), Gauge).unwrap();
        let second = registry.register("test:second".parse().unwrap(), Gauge).unwrap();

        let foreign = registry.get(second).unwrap().default_state();
        registry.get(first).unwrap().set_default_state(&foreign);

    }

    #[test]
    #[should_panic]
    fn foreign_placement_state() {

        let mut registry = MultipartRegistry::new();
        let id = registry.register("test:stray".parse().unwrap(), stray()).unwrap();
        let ctx = PlacementContext::new(IVec3::ZERO, Face::PosY, DVec3::ZERO);
        registry.get(id).unwrap().placement_state(&ctx);

    }

}
