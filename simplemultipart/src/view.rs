//! Short-lived accessors binding a part's state to its container and position.
//!
//! Views are the only way for external code to call the behavior of a part: they know
//! which registry resolves the part, which container entry it comes from, and they can
//! write back into that exact entry.

use std::collections::BTreeMap;

use glam::IVec3;

use crate::container::MultipartContainer;
use crate::geom::Shape;
use crate::item::{Actor, Hand, ItemStack};
use crate::loot::LootContextBuilder;
use crate::multipart::MultipartType;
use crate::registry::MultipartRegistry;
use crate::slot::MultipartSlot;
use crate::state::MultipartState;


/// Read-only view of a part in a container or a container snapshot.
#[derive(Debug, Clone, Copy)]
pub struct MultipartView<'a> {
    registry: &'a MultipartRegistry,
    pos: IVec3,
    parts: &'a BTreeMap<MultipartSlot, MultipartState>,
    slot: &'a MultipartSlot,
    state: &'a MultipartState,
}

impl<'a> MultipartView<'a> {

    pub(crate) fn new(
        registry: &'a MultipartRegistry,
        pos: IVec3,
        parts: &'a BTreeMap<MultipartSlot, MultipartState>,
        slot: &'a MultipartSlot,
        state: &'a MultipartState,
    ) -> Self {
        Self { registry, pos, parts, slot, state }
    }

    /// The registry resolving this part.
    #[inline]
    pub fn registry(&self) -> &'a MultipartRegistry {
        self.registry
    }

    /// Position of the container.
    #[inline]
    pub fn pos(&self) -> IVec3 {
        self.pos
    }

    #[inline]
    pub fn slot(&self) -> &'a MultipartSlot {
        self.slot
    }

    /// Current state of the part.
    #[inline]
    pub fn state(&self) -> &'a MultipartState {
        self.state
    }

    /// The multipart type of this part.
    #[inline]
    pub fn multipart_type(&self) -> &'a MultipartType {
        self.registry.type_of(self.state)
    }

    /// Get the state of another part sharing the same container.
    pub fn neighbour(&self, slot: &MultipartSlot) -> Option<&'a MultipartState> {
        self.parts.get(slot)
    }

    /// Iterate over views of the other parts sharing the same container.
    pub fn neighbours(&self) -> impl Iterator<Item = MultipartView<'a>> + 'a {
        let (registry, pos, parts, own) = (self.registry, self.pos, self.parts, self.slot);
        parts.iter()
            .filter(move |&(slot, _)| slot != own)
            .map(move |(slot, state)| MultipartView::new(registry, pos, parts, slot, state))
    }

    /// The shape of this part, in block-local coordinates.
    pub fn bounding_shape(&self) -> Shape {
        self.multipart_type().behavior().bounding_shape(self.state, Some(self))
    }

    /// The stacks dropped if this part was broken now.
    pub fn dropped_stacks(&self, loot: LootContextBuilder) -> Vec<ItemStack> {
        self.multipart_type().behavior().dropped_stacks(self.state, self, loot)
    }

    /// The state used to render this part.
    pub fn state_for_rendering(&self) -> MultipartState {
        let ty = self.multipart_type();
        let state = ty.behavior().state_for_rendering(self.state, self);
        assert!(ty.states().contains(&state), "render state {state:?} is not a state of multipart {}", ty.identifier());
        state
    }

}


/// Mutable view of a part inside a container, given to activation so the part can
/// change its own state.
#[derive(Debug)]
pub struct MultipartViewMut<'a> {
    registry: &'a MultipartRegistry,
    container: &'a mut MultipartContainer,
    slot: MultipartSlot,
}

impl<'a> MultipartViewMut<'a> {

    pub(crate) fn new(registry: &'a MultipartRegistry, container: &'a mut MultipartContainer, slot: MultipartSlot) -> Self {
        debug_assert!(container.get(&slot).is_some());
        Self { registry, container, slot }
    }

    #[inline]
    pub fn registry(&self) -> &'a MultipartRegistry {
        self.registry
    }

    #[inline]
    pub fn pos(&self) -> IVec3 {
        self.container.pos()
    }

    #[inline]
    pub fn slot(&self) -> &MultipartSlot {
        &self.slot
    }

    /// Current state of the part.
    pub fn state(&self) -> &MultipartState {
        self.container.get(&self.slot)
            .expect("part removed while its view is alive")
    }

    /// Borrow this view as a read-only view.
    pub fn as_view(&self) -> MultipartView<'_> {
        self.container.view(self.registry, &self.slot)
            .expect("part removed while its view is alive")
    }

    /// Replace the state of this part in its container, the new state must be of the
    /// same multipart.
    pub fn set_state(&mut self, state: MultipartState) {
        let current = self.state();
        assert!(current.belongs_to(state.multipart()), "cannot change part {current:?} into {state:?}");
        self.container.replace_part(self.registry, &self.slot, state);
    }

    /// Activate this part, this is called by the container.
    pub(crate) fn activate(&mut self, actor: &Actor, hand: Hand) -> bool {
        let state = self.state().clone();
        let ty = self.registry.type_of(&state);
        ty.behavior().activate(&state, self, actor, hand)
    }

}
