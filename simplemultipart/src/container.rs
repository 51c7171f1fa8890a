//! Containers aggregating all parts placed at a single block position.

use std::collections::BTreeMap;
use std::mem;

use glam::{DVec3, IVec3};
use thiserror::Error;

use tracing::{debug, instrument};

use crate::geom::{Face, Shape};
use crate::item::{Actor, Hand, ItemStack};
use crate::loot::LootContextBuilder;
use crate::multipart::{MultipartType, PlacementContext};
use crate::registry::MultipartRegistry;
use crate::slot::MultipartSlot;
use crate::state::MultipartState;
use crate::view::{MultipartView, MultipartViewMut};


/// All parts currently placed at a block position, keyed by their slot. For the rest of
/// the world, the container behaves like a single block: its shape is the union of its
/// parts' shapes, and breaking or activating it is dispatched to a part.
///
/// # Ordering
///
/// Parts are always iterated in ascending slot order, regardless of their insertion
/// order, so that aggregated results (shapes, geometry) are stable.
///
/// # Events
///
/// Like the world does for blocks, the container can record what happened to its
/// parts into a queue of [`ContainerEvent`]. Events are disabled by default and can be
/// enabled by swapping in a `Vec` with [`MultipartContainer::swap_events`], this is how
/// the surrounding world gets notified of changes.
///
/// # Invariants
///
/// Every state in the container is a live part whose multipart can be resolved in the
/// registry given to the container's methods, a state that cannot be resolved is a
/// corruption and causes a panic.
#[derive(Debug, Clone)]
pub struct MultipartContainer {
    /// Position of the container in the world.
    pos: IVec3,
    /// Parts of the container.
    parts: BTreeMap<MultipartSlot, MultipartState>,
    /// When enabled, the events since last swap.
    events: Option<Vec<ContainerEvent>>,
}

impl MultipartContainer {

    /// Create a new empty container at the given position, with events disabled.
    pub fn new(pos: IVec3) -> Self {
        Self {
            pos,
            parts: BTreeMap::new(),
            events: None,
        }
    }

    /// Swap in a new events queue and return the previous one. Giving `None` disables
    /// events registration.
    pub fn swap_events(&mut self, events: Option<Vec<ContainerEvent>>) -> Option<Vec<ContainerEvent>> {
        mem::replace(&mut self.events, events)
    }

    #[inline]
    fn push_event(&mut self, event: ContainerEvent) {
        if let Some(events) = &mut self.events {
            events.push(event);
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec3 {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Get all parts of the container, in slot order.
    #[inline]
    pub fn parts(&self) -> &BTreeMap<MultipartSlot, MultipartState> {
        &self.parts
    }

    /// Get the state of the part in the given slot.
    #[inline]
    pub fn get(&self, slot: &MultipartSlot) -> Option<&MultipartState> {
        self.parts.get(slot)
    }

    /// Get a view of the part in the given slot.
    pub fn view<'a>(&'a self, registry: &'a MultipartRegistry, slot: &MultipartSlot) -> Option<MultipartView<'a>> {
        let (slot, state) = self.parts.get_key_value(slot)?;
        Some(MultipartView::new(registry, self.pos, &self.parts, slot, state))
    }

    /// Iterate over views of all parts, in slot order.
    pub fn views<'a>(&'a self, registry: &'a MultipartRegistry) -> impl Iterator<Item = MultipartView<'a>> + 'a {
        iter_views(registry, self.pos, &self.parts)
    }

    /// Get a mutable view of the part in the given slot.
    pub fn view_mut<'a>(&'a mut self, registry: &'a MultipartRegistry, slot: &MultipartSlot) -> Option<MultipartViewMut<'a>> {
        let slot = self.parts.get_key_value(slot)?.0.clone();
        Some(MultipartViewMut::new(registry, self, slot))
    }

    /// Make a copy of the current parts, that can be read while this container is
    /// modified, for example from a render thread.
    pub fn snapshot(&self) -> ContainerSnapshot {
        ContainerSnapshot {
            pos: self.pos,
            parts: self.parts.clone(),
        }
    }

    /// Compute the shape of the container, the union of all its parts' shapes.
    #[instrument(level = "debug", skip_all)]
    pub fn bounding_shape(&self, registry: &MultipartRegistry) -> Shape {
        union_shape(self.views(registry))
    }

    /// Return true if the given part could be inserted in the given slot: the slot must
    /// be free and the part must not intersect the current parts.
    pub fn can_insert(&self, registry: &MultipartRegistry, slot: &MultipartSlot, state: &MultipartState) -> bool {
        if self.parts.contains_key(slot) {
            return false;
        }
        let shape = registry.type_of(state).detached_shape(state);
        !self.bounding_shape(registry).intersects(&shape)
    }

    /// Insert a part in the given slot, this fails if the slot is already occupied, in
    /// which case the container is unchanged. This doesn't check for intersections with
    /// the current parts, see [`Self::can_insert`].
    pub fn insert_part(&mut self, registry: &MultipartRegistry, slot: MultipartSlot, state: MultipartState) -> Result<(), InsertError> {

        // Panics on dangling state before any modification.
        let ty = registry.type_of(&state);

        if self.parts.contains_key(&slot) {
            return Err(InsertError::SlotOccupied(slot));
        }

        debug!("inserted {} {state:?} in slot {slot} at {}", ty.identifier(), self.pos);
        self.parts.insert(slot.clone(), state.clone());
        self.push_event(ContainerEvent::Inserted { slot, state });
        Ok(())

    }

    /// Place a part of the given type: its state and slot are computed from the
    /// placement context, then it's inserted if it fits. The placement context should
    /// not reference a container, this container is given to the multipart.
    pub fn place_part(&mut self, registry: &MultipartRegistry, ty: &MultipartType, ctx: PlacementContext) -> Result<MultipartSlot, PlaceError> {

        let (slot, state) = {
            let ctx = ctx.with_container(self);
            let state = ty.placement_state(&ctx);
            (ty.placement_slot(&state, &ctx), state)
        };

        if self.parts.contains_key(&slot) {
            return Err(PlaceError::SlotOccupied(slot));
        }

        if !self.can_insert(registry, &slot, &state) {
            return Err(PlaceError::Obstructed(slot));
        }

        self.insert_part(registry, slot.clone(), state)?;
        Ok(slot)

    }

    /// Replace the state of an existing part, called from mutable views.
    pub(crate) fn replace_part(&mut self, registry: &MultipartRegistry, slot: &MultipartSlot, state: MultipartState) {

        // Panics on dangling state before any modification.
        registry.type_of(&state);

        let Some(current) = self.parts.get_mut(slot) else {
            panic!("no part in slot {slot} at {}", self.pos);
        };

        if *current == state {
            return;
        }

        let prev = mem::replace(current, state.clone());
        debug!("changed part in slot {slot} at {} from {prev:?} to {state:?}", self.pos);
        self.push_event(ContainerEvent::Changed { slot: slot.clone(), prev, new: state });

    }

    /// Break the part in the given slot, removing it and returning its drops. This is
    /// what breaking a part through its view does, the slot being the container entry
    /// the view is bound to. Breaking an empty slot does nothing and drops nothing. The loot context builder should
    /// carry what the caller knows about the breaking, the position and the part's
    /// state are added to it.
    pub fn break_part(&mut self, registry: &MultipartRegistry, slot: &MultipartSlot, loot: LootContextBuilder) -> Vec<ItemStack> {

        let Some(view) = self.view(registry, slot) else {
            debug!("break of empty slot {slot} at {}", self.pos);
            return Vec::new();
        };

        let drops = view.dropped_stacks(loot.pos(self.pos));

        if let Some((slot, state)) = self.parts.remove_entry(slot) {
            debug!("broken {state:?} in slot {slot} at {}, {} stacks dropped", self.pos, drops.len());
            self.push_event(ContainerEvent::Removed { slot, state });
        }

        drops

    }

    /// Activate the part in the given slot.
    pub fn activate_part(&mut self, registry: &MultipartRegistry, slot: &MultipartSlot, actor: &Actor, hand: Hand) -> Interaction {
        match self.view_mut(registry, slot) {
            Some(mut view) => view.activate(actor, hand).into(),
            None => Interaction::None,
        }
    }

    /// Ray trace against every part of the container, the origin and ray are in world
    /// coordinates. The nearest part hit is returned with the hit vector from the
    /// origin and the face hit.
    #[instrument(level = "debug", skip_all)]
    pub fn ray_trace(&self, registry: &MultipartRegistry, origin: DVec3, ray: DVec3) -> Option<(MultipartSlot, DVec3, Face)> {
        let local_origin = origin - self.pos.as_dvec3();
        self.views(registry)
            .filter_map(|view| {
                let (hit, face) = view.bounding_shape().calc_ray_trace(local_origin, ray)?;
                Some((view.slot().clone(), hit, face))
            })
            .min_by(|(_, a, _), (_, b, _)| a.length_squared().total_cmp(&b.length_squared()))
    }

    /// Find the part an actor is looking at, within the given reach distance.
    pub fn targeted_part(&self, registry: &MultipartRegistry, actor: &Actor, reach: f64) -> Option<MultipartSlot> {
        self.ray_trace(registry, actor.eye_pos, actor.look_direction() * reach)
            .map(|(slot, _, _)| slot)
    }

}


/// An owned copy of a container's parts at some point, it can be sent to another
/// thread and read while the container continues to be modified.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSnapshot {
    pos: IVec3,
    parts: BTreeMap<MultipartSlot, MultipartState>,
}

impl ContainerSnapshot {

    #[inline]
    pub fn pos(&self) -> IVec3 {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn parts(&self) -> &BTreeMap<MultipartSlot, MultipartState> {
        &self.parts
    }

    pub fn view<'a>(&'a self, registry: &'a MultipartRegistry, slot: &MultipartSlot) -> Option<MultipartView<'a>> {
        let (slot, state) = self.parts.get_key_value(slot)?;
        Some(MultipartView::new(registry, self.pos, &self.parts, slot, state))
    }

    pub fn views<'a>(&'a self, registry: &'a MultipartRegistry) -> impl Iterator<Item = MultipartView<'a>> + 'a {
        iter_views(registry, self.pos, &self.parts)
    }

    /// Compute the shape of the snapshot, the union of all its parts' shapes.
    pub fn bounding_shape(&self, registry: &MultipartRegistry) -> Shape {
        union_shape(self.views(registry))
    }

}


fn iter_views<'a>(
    registry: &'a MultipartRegistry,
    pos: IVec3,
    parts: &'a BTreeMap<MultipartSlot, MultipartState>,
) -> impl Iterator<Item = MultipartView<'a>> + 'a {
    parts.iter().map(move |(slot, state)| MultipartView::new(registry, pos, parts, slot, state))
}

fn union_shape<'a>(views: impl Iterator<Item = MultipartView<'a>>) -> Shape {
    views.fold(Shape::EMPTY, |shape, view| shape.union(&view.bounding_shape()))
}


/// An event that happened to a container.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerEvent {
    /// A part has been inserted.
    Inserted {
        slot: MultipartSlot,
        state: MultipartState,
    },
    /// A part has been broken and removed.
    Removed {
        slot: MultipartSlot,
        state: MultipartState,
    },
    /// The state of a part has changed.
    Changed {
        slot: MultipartSlot,
        prev: MultipartState,
        new: MultipartState,
    },
}


/// The result of an interaction with a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// No interaction has been handled, other handlers can be tried.
    None,
    /// An interaction has been handled by the part, the actor should swing its hand.
    Handled,
}

impl From<bool> for Interaction {
    #[inline]
    fn from(value: bool) -> Self {
        if value { Self::Handled } else { Self::None }
    }
}


/// Error returned when inserting a part.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    #[error("slot {0} is already occupied")]
    SlotOccupied(MultipartSlot),
}

/// Error returned when placing a part, placement failures are silent for the actor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("slot {0} is already occupied")]
    SlotOccupied(MultipartSlot),
    #[error("part in slot {0} would intersect other parts")]
    Obstructed(MultipartSlot),
}

impl From<InsertError> for PlaceError {
    fn from(value: InsertError) -> Self {
        match value {
            InsertError::SlotOccupied(slot) => Self::SlotOccupied(slot),
        }
    }
}


#[cfg(test)]
mod tests {

    use std::cell::Cell;

    use glam::Vec2;

    use super::*;
    use crate::identifier::Identifier;
    use crate::loot::{self, FixedLoot, LootEngine, LootSupplier, LootTables};
    use crate::multipart::Multipart;
    use crate::parts::{self, LeverPart, SampleParts, SlabPart};
    use crate::property::Property;
    use crate::state::StateBuilder;

    /// A loot engine counting how many times it is queried.
    #[derive(Default)]
    struct Recording {
        tables: LootTables,
        calls: Cell<usize>,
    }

    impl LootEngine for Recording {
        fn supplier(&self, id: &Identifier) -> Option<&dyn LootSupplier> {
            self.calls.set(self.calls.get() + 1);
            self.tables.supplier(id)
        }
    }

    /// A part that never drops anything.
    struct Ghost;

    impl Multipart for Ghost {
        fn drop_table(&self, _identifier: &Identifier) -> Identifier {
            loot::EMPTY_TABLE
        }
        fn bounding_shape(&self, _state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
            Shape::from(Face::NegZ.extrude(0.0, 0.25))
        }
    }

    fn samples() -> (MultipartRegistry, SampleParts) {
        let mut registry = MultipartRegistry::new();
        let samples = parts::register_samples(&mut registry, "test").unwrap();
        (registry, samples)
    }

    fn slab(registry: &MultipartRegistry, samples: &SampleParts, top: bool) -> MultipartState {
        registry.get(samples.slab).unwrap().default_state().with("top", top)
    }

    #[test]
    fn slab_lifecycle() {

        let mut registry = MultipartRegistry::new();
        let slab_id = registry.register("test:slab".parse().unwrap(), SlabPart).unwrap();
        let ty = registry.get(slab_id).unwrap();
        assert_eq!(ty.drop_table_id().to_string(), "test:multiparts/slab");

        let ctx = PlacementContext::new(IVec3::new(4, 70, 4), Face::PosY, DVec3::new(0.3, 0.0, 0.8));
        let state = ty.placement_state(&ctx);
        assert_eq!(state.get_bool("top"), Some(false));

        let mut container = MultipartContainer::new(IVec3::new(4, 70, 4));
        let slot = MultipartSlot::new("slab");
        container.insert_part(&registry, slot.clone(), state).unwrap();
        assert_eq!(container.bounding_shape(&registry), Shape::from(Face::NegY.extrude(0.0, 0.5)));

        let planks = vec![ItemStack::new("test:slab".parse().unwrap()).with_size(1)];
        let mut engine = Recording::default();
        engine.tables.insert(ty.drop_table_id().clone(), FixedLoot(planks.clone()));

        let drops = container.break_part(&registry, &slot, LootContextBuilder::new(&engine));
        assert_eq!(drops, planks);
        assert_eq!(engine.calls.get(), 1);
        assert!(container.is_empty());
        assert!(container.bounding_shape(&registry).is_empty());

    }

    #[test]
    fn insertion_is_exclusive() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        let slot = MultipartSlot::new("shared");

        let bottom = slab(&registry, &samples, false);
        let top = slab(&registry, &samples, true);
        container.insert_part(&registry, slot.clone(), bottom.clone()).unwrap();

        assert_eq!(container.insert_part(&registry, slot.clone(), top), Err(InsertError::SlotOccupied(slot.clone())));
        assert_eq!(container.get(&slot), Some(&bottom));
        assert_eq!(container.len(), 1);

    }

    #[test]
    fn break_empty_slot() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        container.insert_part(&registry, MultipartSlot::face(Face::NegY), slab(&registry, &samples, false)).unwrap();
        container.swap_events(Some(Vec::new()));

        let engine = Recording::default();
        for _ in 0..2 {
            let drops = container.break_part(&registry, &MultipartSlot::CENTER, LootContextBuilder::new(&engine));
            assert!(drops.is_empty());
        }

        assert_eq!(container.len(), 1);
        assert_eq!(engine.calls.get(), 0);
        assert_eq!(container.swap_events(None), Some(Vec::new()));

    }

    #[test]
    fn empty_drop_table_skips_engine() {

        let mut registry = MultipartRegistry::new();
        let ghost = registry.register("test:ghost".parse().unwrap(), Ghost).unwrap();
        assert!(registry.get(ghost).unwrap().has_empty_drop_table());

        let mut container = MultipartContainer::new(IVec3::ZERO);
        let state = registry.get(ghost).unwrap().default_state();
        container.insert_part(&registry, MultipartSlot::CENTER, state).unwrap();

        let engine = Recording::default();
        let drops = container.break_part(&registry, &MultipartSlot::CENTER, LootContextBuilder::new(&engine));
        assert!(drops.is_empty());
        assert_eq!(engine.calls.get(), 0);
        assert!(container.is_empty());

    }

    #[test]
    fn shape_follows_parts() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);

        let a = slab(&registry, &samples, false);
        let b = registry.get(samples.facade).unwrap().default_state().with("facing", Face::PosX);
        let shape_a = registry.type_of(&a).detached_shape(&a);
        let shape_b = registry.type_of(&b).detached_shape(&b);

        container.insert_part(&registry, MultipartSlot::new("a"), a).unwrap();
        container.insert_part(&registry, MultipartSlot::new("b"), b).unwrap();
        assert_eq!(container.bounding_shape(&registry), shape_a.clone().union(&shape_b));

        let engine = Recording::default();
        container.break_part(&registry, &MultipartSlot::new("b"), LootContextBuilder::new(&engine));
        assert_eq!(container.bounding_shape(&registry), shape_a);

    }

    #[test]
    fn iteration_order_is_stable() {

        let (registry, samples) = samples();
        let bottom = slab(&registry, &samples, false);
        let top = slab(&registry, &samples, true);

        let mut first = MultipartContainer::new(IVec3::ZERO);
        first.insert_part(&registry, MultipartSlot::face(Face::NegY), bottom.clone()).unwrap();
        first.insert_part(&registry, MultipartSlot::face(Face::PosY), top.clone()).unwrap();

        let mut second = MultipartContainer::new(IVec3::ZERO);
        second.insert_part(&registry, MultipartSlot::face(Face::PosY), top).unwrap();
        second.insert_part(&registry, MultipartSlot::face(Face::NegY), bottom).unwrap();

        let first_slots = first.views(&registry).map(|view| view.slot().clone()).collect::<Vec<_>>();
        let second_slots = second.views(&registry).map(|view| view.slot().clone()).collect::<Vec<_>>();
        assert_eq!(first_slots, second_slots);
        assert_eq!(first.snapshot(), second.snapshot());

    }

    #[test]
    fn placement() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        let slab_ty = registry.get(samples.slab).unwrap();
        let lever_ty = registry.get(samples.lever).unwrap();

        let floor = PlacementContext::new(IVec3::ZERO, Face::PosY, DVec3::new(0.5, 0.0, 0.5));
        assert_eq!(container.place_part(&registry, lever_ty, floor), Ok(MultipartSlot::CENTER));
        assert_eq!(container.place_part(&registry, lever_ty, floor), Err(PlaceError::SlotOccupied(MultipartSlot::CENTER)));

        // The lever on the floor goes through the bottom half.
        let bottom_slot = MultipartSlot::face(Face::NegY);
        assert_eq!(container.place_part(&registry, slab_ty, floor), Err(PlaceError::Obstructed(bottom_slot.clone())));
        assert!(container.get(&bottom_slot).is_none());

        let facade_ty = registry.get(samples.facade).unwrap();
        let ceiling = PlacementContext::new(IVec3::ZERO, Face::NegY, DVec3::new(0.5, 1.0, 0.5));
        assert_eq!(container.place_part(&registry, facade_ty, ceiling), Ok(MultipartSlot::face(Face::PosY)));
        assert_eq!(container.len(), 2);

    }

    #[test]
    fn activation_and_events() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::new(0, 64, 0));
        container.swap_events(Some(Vec::new()));

        let lever = registry.get(samples.lever).unwrap().default_state();
        container.insert_part(&registry, MultipartSlot::CENTER, lever.clone()).unwrap();

        let actor = Actor::new(1, DVec3::new(0.5, 65.6, -1.0), Vec2::ZERO);
        assert_eq!(container.activate_part(&registry, &MultipartSlot::CENTER, &actor, Hand::Main), Interaction::Handled);
        assert_eq!(container.activate_part(&registry, &MultipartSlot::face(Face::PosY), &actor, Hand::Main), Interaction::None);

        let powered = container.get(&MultipartSlot::CENTER).unwrap().clone();
        assert!(LeverPart::is_powered(&powered));
        assert_eq!(powered, lever.with("powered", true));

        let engine = Recording::default();
        container.break_part(&registry, &MultipartSlot::CENTER, LootContextBuilder::new(&engine));
        assert_eq!(engine.calls.get(), 1);

        let events = container.swap_events(None).unwrap();
        assert_eq!(events, vec![
            ContainerEvent::Inserted { slot: MultipartSlot::CENTER, state: lever.clone() },
            ContainerEvent::Changed { slot: MultipartSlot::CENTER, prev: lever, new: powered.clone() },
            ContainerEvent::Removed { slot: MultipartSlot::CENTER, state: powered },
        ]);

    }

    #[test]
    fn view_write_back() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        let bottom = slab(&registry, &samples, false);
        let slot = MultipartSlot::face(Face::NegY);
        container.insert_part(&registry, slot.clone(), bottom.clone()).unwrap();

        let snapshot = container.snapshot();

        let mut view = container.view_mut(&registry, &slot).unwrap();
        view.set_state(bottom.with("top", true));
        view.set_state(bottom.with("top", true));

        assert_eq!(container.get(&slot), Some(&bottom.with("top", true)));
        assert_eq!(snapshot.parts().get(&slot), Some(&bottom));
        assert_eq!(snapshot.bounding_shape(&registry), Shape::from(Face::NegY.extrude(0.0, 0.5)));

    }

    #[test]
    #[should_panic]
    fn view_rejects_foreign_multipart() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        let slot = MultipartSlot::face(Face::NegY);
        container.insert_part(&registry, slot.clone(), slab(&registry, &samples, false)).unwrap();

        let lever = registry.get(samples.lever).unwrap().default_state();
        container.view_mut(&registry, &slot).unwrap().set_state(lever);

    }

    #[test]
    fn neighbours() {

        let (registry, samples) = samples();
        let mut container = MultipartContainer::new(IVec3::ZERO);
        container.insert_part(&registry, MultipartSlot::face(Face::NegY), slab(&registry, &samples, false)).unwrap();
        container.insert_part(&registry, MultipartSlot::face(Face::PosY), slab(&registry, &samples, true)).unwrap();

        let view = container.view(&registry, &MultipartSlot::face(Face::NegY)).unwrap();
        assert_eq!(view.multipart_type().id(), samples.slab);
        assert_eq!(view.neighbour(&MultipartSlot::face(Face::PosY)), Some(&slab(&registry, &samples, true)));
        assert_eq!(view.neighbours().count(), 1);

    }

    #[test]
    fn ray_trace_nearest_part() {

        let (registry, samples) = samples();
        let pos = IVec3::new(10, 64, -3);
        let mut container = MultipartContainer::new(pos);
        container.insert_part(&registry, MultipartSlot::face(Face::NegY), slab(&registry, &samples, false)).unwrap();

        let origin = pos.as_dvec3() + DVec3::new(0.5, 2.0, 0.5);
        let ray = DVec3::new(0.0, -3.0, 0.0);

        let (slot, hit, face) = container.ray_trace(&registry, origin, ray).unwrap();
        assert_eq!(slot, MultipartSlot::face(Face::NegY));
        assert_eq!(face, Face::PosY);
        assert!((hit.y + 1.5).abs() < 1e-9);

        container.insert_part(&registry, MultipartSlot::face(Face::PosY), slab(&registry, &samples, true)).unwrap();
        let (slot, hit, _) = container.ray_trace(&registry, origin, ray).unwrap();
        assert_eq!(slot, MultipartSlot::face(Face::PosY));
        assert!((hit.y + 1.0).abs() < 1e-9);

        assert!(container.ray_trace(&registry, origin, DVec3::new(0.0, 3.0, 0.0)).is_none());

        // Looking straight down from above the block.
        let actor = Actor::new(1, origin, Vec2::new(0.0, std::f32::consts::FRAC_PI_2));
        assert_eq!(container.targeted_part(&registry, &actor, 5.0), Some(MultipartSlot::face(Face::PosY)));
        assert_eq!(container.targeted_part(&registry, &actor, 0.5), None);

    }

    #[test]
    #[should_panic]
    fn dangling_state_panics() {

        let (registry, _) = samples();
        let mut other = MultipartRegistry::new();
        let foreign = other.register("test:slab".parse().unwrap(), SlabPart).unwrap();
        let state = other.get(foreign).unwrap().default_state();

        let mut container = MultipartContainer::new(IVec3::ZERO);
        let _ = container.insert_part(&registry, MultipartSlot::CENTER, state);

    }

    #[test]
    fn default_state_override() {

        struct Dial;
        impl Multipart for Dial {
            fn append_properties(&self, builder: &mut StateBuilder) {
                builder.add(Property::int("notch", 0..=7));
            }
            fn bounding_shape(&self, _state: &MultipartState, _view: Option<&MultipartView>) -> Shape {
                Shape::from(Face::NegY.extrude(0.25, 0.125))
            }
        }

        let mut registry = MultipartRegistry::new();
        let dial = registry.register("test:dial".parse().unwrap(), Dial).unwrap();
        let ty = registry.get(dial).unwrap();
        assert_eq!(ty.default_state().get_int("notch"), Some(0));

        ty.set_default_state(&ty.default_state().with("notch", 4));
        let ctx = PlacementContext::new(IVec3::ZERO, Face::PosY, DVec3::ZERO);

        let mut container = MultipartContainer::new(IVec3::ZERO);
        container.place_part(&registry, ty, ctx).unwrap();
        assert_eq!(container.get(&MultipartSlot::CENTER).and_then(|s| s.get_int("notch")), Some(4));

    }

}
