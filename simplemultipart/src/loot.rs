//! Loot interfaces used to compute the stacks dropped by broken parts.
//!
//! The loot engine itself belongs to the host, this module only defines the traits the
//! parts call into, and a small in-memory engine.

use std::collections::HashMap;
use std::fmt;

use glam::IVec3;

use tracing::{trace, warn};

use crate::identifier::Identifier;
use crate::item::{Actor, ItemStack};
use crate::state::MultipartState;


/// The loot table identifier meaning "no drops", evaluating it never touches the loot
/// engine.
pub const EMPTY_TABLE: Identifier = Identifier::new_static(arcstr::literal!("minecraft"), arcstr::literal!("empty"));


/// A loot table, evaluated against a context to produce item stacks.
pub trait LootSupplier: Send + Sync {

    fn drops(&self, ctx: &LootContext<'_>) -> Vec<ItemStack>;

}

impl<F> LootSupplier for F
where
    F: Fn(&LootContext<'_>) -> Vec<ItemStack> + Send + Sync,
{
    fn drops(&self, ctx: &LootContext<'_>) -> Vec<ItemStack> {
        self(ctx)
    }
}


/// The loot engine, resolving loot tables from their identifiers.
pub trait LootEngine {

    fn supplier(&self, id: &Identifier) -> Option<&dyn LootSupplier>;

}


/// Builder for a [`LootContext`], the caller breaking a part fills what it knows about
/// the breaking, then the part adds its state.
#[derive(Clone)]
pub struct LootContextBuilder<'a> {
    ctx: LootContext<'a>,
}

impl<'a> LootContextBuilder<'a> {

    pub fn new(engine: &'a dyn LootEngine) -> Self {
        Self {
            ctx: LootContext {
                engine,
                pos: None,
                tool: None,
                actor: None,
                state: None,
            }
        }
    }

    pub fn pos(mut self, pos: IVec3) -> Self {
        self.ctx.pos = Some(pos);
        self
    }

    pub fn tool(mut self, tool: ItemStack) -> Self {
        self.ctx.tool = Some(tool);
        self
    }

    pub fn actor(mut self, actor: &'a Actor) -> Self {
        self.ctx.actor = Some(actor);
        self
    }

    pub fn state(mut self, state: MultipartState) -> Self {
        self.ctx.state = Some(state);
        self
    }

    #[inline]
    pub fn build(self) -> LootContext<'a> {
        self.ctx
    }

}


/// Parameters given to a loot supplier.
#[derive(Clone)]
pub struct LootContext<'a> {
    engine: &'a dyn LootEngine,
    pos: Option<IVec3>,
    tool: Option<ItemStack>,
    actor: Option<&'a Actor>,
    state: Option<MultipartState>,
}

impl<'a> LootContext<'a> {

    /// The loot engine this context is evaluated in.
    #[inline]
    pub fn engine(&self) -> &'a dyn LootEngine {
        self.engine
    }

    /// Position of the container of the broken part.
    #[inline]
    pub fn pos(&self) -> Option<IVec3> {
        self.pos
    }

    /// Tool used to break the part.
    #[inline]
    pub fn tool(&self) -> Option<&ItemStack> {
        self.tool.as_ref()
    }

    #[inline]
    pub fn actor(&self) -> Option<&'a Actor> {
        self.actor
    }

    /// State of the broken part.
    #[inline]
    pub fn state(&self) -> Option<&MultipartState> {
        self.state.as_ref()
    }

}

impl fmt::Debug for LootContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LootContext")
            .field("pos", &self.pos)
            .field("tool", &self.tool)
            .field("actor", &self.actor)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}


/// Evaluate the given loot table for a part in the given state. The empty table
/// returns no drops without calling the loot engine, and an unknown table drops
/// nothing. Empty stacks returned by the supplier are discarded.
pub fn table_drops(table: &Identifier, state: &MultipartState, loot: LootContextBuilder) -> Vec<ItemStack> {

    if *table == EMPTY_TABLE {
        return Vec::new();
    }

    let ctx = loot.state(state.clone()).build();
    match ctx.engine().supplier(table) {
        Some(supplier) => {
            let mut drops = supplier.drops(&ctx);
            drops.retain(|stack| !stack.is_empty());
            trace!("loot table {table} dropped {} stacks", drops.len());
            drops
        }
        None => {
            warn!("missing loot table {table} for state {state:?}");
            Vec::new()
        }
    }

}


/// A simple in-memory loot engine.
#[derive(Default)]
pub struct LootTables {
    tables: HashMap<Identifier, Box<dyn LootSupplier>>,
}

impl LootTables {

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the supplier of a loot table.
    pub fn insert(&mut self, id: Identifier, supplier: impl LootSupplier + 'static) {
        self.tables.insert(id, Box::new(supplier));
    }

}

impl LootEngine for LootTables {
    fn supplier(&self, id: &Identifier) -> Option<&dyn LootSupplier> {
        self.tables.get(id).map(|supplier| &**supplier)
    }
}


/// A loot supplier that always drops the same stacks.
#[derive(Debug, Clone, Default)]
pub struct FixedLoot(pub Vec<ItemStack>);

impl LootSupplier for FixedLoot {
    fn drops(&self, _ctx: &LootContext<'_>) -> Vec<ItemStack> {
        self.0.clone()
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::state::StateBuilder;
    use crate::property::Property;
    use crate::registry::MultipartId;

    #[test]
    fn empty_table_skips_engine() {

        struct Panicking;
        impl LootEngine for Panicking {
            fn supplier(&self, id: &Identifier) -> Option<&dyn LootSupplier> {
                panic!("engine called for {id}");
            }
        }

        let factory = StateBuilder::new().build(MultipartId::from_index(0));
        let drops = table_drops(&EMPTY_TABLE, factory.default_state(), LootContextBuilder::new(&Panicking));
        assert!(drops.is_empty());

    }

    #[test]
    fn context_carries_state() {

        let mut builder = StateBuilder::new();
        builder.add(Property::int("count", 1..=4));
        let factory = builder.build(MultipartId::from_index(0));
        let state = factory.default_state().with("count", 3);

        let table: Identifier = "test:multiparts/pebble".parse().unwrap();
        let mut tables = LootTables::new();
        fn pebbles(ctx: &LootContext<'_>) -> Vec<ItemStack> {
            let count = ctx.state().and_then(|s| s.get_int("count")).unwrap_or(0);
            vec![ItemStack::new("test:pebble".parse().unwrap()).with_size(count as u16)]
        }
        tables.insert(table.clone(), pebbles);

        let drops = table_drops(&table, &state, LootContextBuilder::new(&tables).pos(IVec3::ONE));
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].size, 3);

        let unknown: Identifier = "test:multiparts/unknown".parse().unwrap();
        assert!(table_drops(&unknown, &state, LootContextBuilder::new(&tables)).is_empty());

    }

    #[test]
    fn context_carries_breaker() {

        fn leaves(ctx: &LootContext<'_>) -> Vec<ItemStack> {
            let sheared = ctx.tool().is_some_and(|tool| tool.item.path() == "shears");
            let by_player = ctx.actor().is_some_and(|actor| actor.id == 7);
            let at_origin = ctx.pos() == Some(IVec3::ZERO);
            let item = if sheared && by_player && at_origin { "test:leaves" } else { "test:sapling" };
            vec![ItemStack::new(item.parse().unwrap()), ItemStack::EMPTY]
        }

        let factory = StateBuilder::new().build(MultipartId::from_index(0));
        let table: Identifier = "test:multiparts/leaves".parse().unwrap();
        let mut tables = LootTables::new();
        tables.insert(table.clone(), leaves);

        let actor = Actor::new(7, glam::DVec3::ZERO, glam::Vec2::ZERO);
        let loot = LootContextBuilder::new(&tables)
            .pos(IVec3::ZERO)
            .tool(ItemStack::new("test:shears".parse().unwrap()))
            .actor(&actor);

        let drops = table_drops(&table, factory.default_state(), loot);
        assert_eq!(drops, vec![ItemStack::new("test:leaves".parse().unwrap())]);

        let drops = table_drops(&table, factory.default_state(), LootContextBuilder::new(&tables));
        assert_eq!(drops, vec![ItemStack::new("test:sapling".parse().unwrap())]);

    }

}
