//! Immutable multipart states and the factory enumerating every state of a multipart.
//!
//! When a multipart is registered, its declared properties are expanded into the full
//! cartesian product of their domains. Each combination gets exactly one shared
//! [`MultipartState`], so comparing two states is just comparing two pointers, and
//! "changing" a state is looking up a neighbour state in the same universe.

use std::sync::{Arc, Weak};
use std::hash::{Hash, Hasher};
use std::fmt;

use indexmap::IndexMap;

use crate::property::{Property, PropertyValue};
use crate::registry::MultipartId;
use crate::geom::Face;


/// Builder for the properties of a multipart, given to [`Multipart::append_properties`]
/// before the state universe is generated.
///
/// [`Multipart::append_properties`]: crate::Multipart::append_properties
#[derive(Debug, Default)]
pub struct StateBuilder {
    properties: IndexMap<&'static str, Property>,
    defaults: IndexMap<&'static str, PropertyValue>,
}

impl StateBuilder {

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property to the schema, the declaration order matters for the enumeration
    /// order of states. Declaring twice the same property name is a programming error.
    pub fn add(&mut self, property: Property) -> &mut Self {
        let name = property.name();
        let prev = self.properties.insert(name, property);
        assert!(prev.is_none(), "property {name} declared twice");
        self
    }

    /// Override the default value of an already declared property, by default the
    /// first value of each property domain is used.
    pub fn default_value(&mut self, name: &'static str, value: impl Into<PropertyValue>) -> &mut Self {
        let value = value.into();
        let property = self.properties.get(name)
            .unwrap_or_else(|| panic!("default value for undeclared property {name}"));
        assert!(property.index_of(value).is_some(), "default value {value} not in the domain of property {name}");
        self.defaults.insert(name, value);
        self
    }

    /// Build the state factory, enumerating all property combinations for the given
    /// multipart.
    pub fn build(self, owner: MultipartId) -> StateFactory {

        let properties: Vec<Property> = self.properties.into_values().collect();

        // The last declared property varies the fastest.
        let mut strides = vec![0; properties.len()];
        let mut count = 1usize;
        for (i, property) in properties.iter().enumerate().rev() {
            strides[i] = count;
            count = count.checked_mul(property.values().len())
                .expect("too many states for a single multipart");
        }

        let default_index = properties.iter()
            .zip(&strides)
            .map(|(property, &stride)| {
                let value_index = self.defaults.get(property.name())
                    .and_then(|&value| property.index_of(value))
                    .unwrap_or(0);
                value_index * stride
            })
            .sum();

        let schema = Arc::new(Schema { properties, strides });

        let table = Arc::new_cyclic(|weak: &Weak<StateTable>| {
            let states = (0..count)
                .map(|index| {
                    let values = schema.properties.iter()
                        .zip(&schema.strides)
                        .map(|(property, &stride)| ((index / stride) % property.values().len()) as u16)
                        .collect();
                    MultipartState(Arc::new(StateInner {
                        owner,
                        index,
                        values,
                        schema: Arc::clone(&schema),
                        table: weak.clone(),
                    }))
                })
                .collect();
            StateTable { states }
        });

        StateFactory { schema, table, default_index }

    }

}


/// The schema shared by all states of a multipart.
#[derive(Debug)]
struct Schema {
    properties: Vec<Property>,
    /// For each property, the distance between two states differing by one value of
    /// that property in the universe.
    strides: Vec<usize>,
}

impl Schema {

    fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name() == name)
    }

}

/// The universe of states, states hold a weak reference to it in order to find their
/// neighbours.
struct StateTable {
    states: Vec<MultipartState>,
}


/// The universe of all states of a multipart, generated once when the multipart is
/// registered and never modified afterward.
pub struct StateFactory {
    schema: Arc<Schema>,
    table: Arc<StateTable>,
    default_index: usize,
}

impl StateFactory {

    /// Get all states of the universe, in enumeration order.
    #[inline]
    pub fn states(&self) -> &[MultipartState] {
        &self.table.states
    }

    /// The initial default state, made of the default value of each property.
    #[inline]
    pub fn default_state(&self) -> &MultipartState {
        &self.table.states[self.default_index]
    }

    /// Iterate the declared properties, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.schema.properties.iter()
    }

    /// Find a declared property by its name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.schema.properties.iter().find(|p| p.name() == name)
    }

    /// Find the state matching the given property mapping, the mapping must give a
    /// value in domain for each declared property, in any order, and nothing more.
    pub fn get(&self, mapping: &[(&str, PropertyValue)]) -> Option<&MultipartState> {

        if mapping.len() != self.schema.properties.len() {
            return None;
        }

        let mut index = 0;
        let mut seen = vec![false; self.schema.properties.len()];

        for &(name, value) in mapping {
            let pos = self.schema.position(name)?;
            if std::mem::replace(&mut seen[pos], true) {
                return None;
            }
            index += self.schema.properties[pos].index_of(value)? * self.schema.strides[pos];
        }

        self.table.states.get(index)

    }

    /// Return true if the given state is one of this universe.
    pub fn contains(&self, state: &MultipartState) -> bool {
        self.table.states.get(state.0.index)
            .is_some_and(|own| own == state)
    }

}

impl fmt::Debug for StateFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateFactory")
            .field("properties", &self.schema.properties)
            .field("count", &self.table.states.len())
            .field("default_index", &self.default_index)
            .finish()
    }
}


/// One immutable combination of property values of a multipart. This is a cheap
/// shared handle, cloning it doesn't copy the state.
#[derive(Clone)]
pub struct MultipartState(Arc<StateInner>);

struct StateInner {
    /// The multipart owning this state, resolved through the registry.
    owner: MultipartId,
    /// Index of this state in its universe.
    index: usize,
    /// For each property of the schema, the index of its value in the domain.
    values: Box<[u16]>,
    schema: Arc<Schema>,
    table: Weak<StateTable>,
}

impl MultipartState {

    /// The multipart this state belongs to.
    #[inline]
    pub fn multipart(&self) -> MultipartId {
        self.0.owner
    }

    #[inline]
    pub fn belongs_to(&self, multipart: MultipartId) -> bool {
        self.0.owner == multipart
    }

    /// Index of this state in its universe.
    #[inline]
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Get the value of the given property, if declared.
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        let pos = self.0.schema.position(name)?;
        Some(self.value_at(pos))
    }

    #[inline]
    fn value_at(&self, pos: usize) -> PropertyValue {
        self.0.schema.properties[pos].values()[self.0.values[pos] as usize]
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            PropertyValue::Bool(b) => Some(b),
            _ => None
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            PropertyValue::Int(i) => Some(i),
            _ => None
        }
    }

    pub fn get_face(&self, name: &str) -> Option<Face> {
        match self.get(name)? {
            PropertyValue::Face(face) => Some(face),
            _ => None
        }
    }

    pub fn get_name(&self, name: &str) -> Option<&'static str> {
        match self.get(name)? {
            PropertyValue::Name(n) => Some(n),
            _ => None
        }
    }

    /// Iterate over every property name and its value, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, PropertyValue)> + '_ {
        self.0.schema.properties.iter()
            .enumerate()
            .map(|(pos, property)| (property.name(), self.value_at(pos)))
    }

    /// Return the state of the same universe with the given property changed, `None`
    /// is returned if the property is not declared or if the value is out of domain.
    pub fn try_with(&self, name: &str, value: impl Into<PropertyValue>) -> Option<MultipartState> {
        let pos = self.0.schema.position(name)?;
        let value_index = self.0.schema.properties[pos].index_of(value.into())?;
        Some(self.neighbour(pos, value_index))
    }

    /// Return the state of the same universe with the given property changed. Unlike
    /// [`Self::try_with`], this panics if the property is not part of the schema.
    pub fn with(&self, name: &str, value: impl Into<PropertyValue>) -> MultipartState {
        let value = value.into();
        self.try_with(name, value)
            .unwrap_or_else(|| panic!("illegal property {name}={value} for state {self:?}"))
    }

    /// Return the state with the given property set to its next value, wrapping to the
    /// first value after the last one.
    pub fn cycle(&self, name: &str) -> MultipartState {
        let pos = self.0.schema.position(name)
            .unwrap_or_else(|| panic!("illegal property {name} for state {self:?}"));
        let len = self.0.schema.properties[pos].values().len();
        self.neighbour(pos, (self.0.values[pos] as usize + 1) % len)
    }

    fn neighbour(&self, pos: usize, value_index: usize) -> MultipartState {
        let stride = self.0.schema.strides[pos];
        let index = self.0.index - self.0.values[pos] as usize * stride + value_index * stride;
        let table = self.0.table.upgrade()
            .expect("state universe has been dropped while its states are still alive");
        table.states[index].clone()
    }

    /// The canonical variant string of this state, made of `name=value` pairs sorted by
    /// property name and separated by commas. This is independent of declaration order
    /// and is empty for multiparts without properties.
    pub fn variant(&self) -> String {
        let mut entries: Vec<_> = self.entries().collect();
        entries.sort_by_key(|&(name, _)| name);
        entries.iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",")
    }

}

impl PartialEq for MultipartState {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MultipartState {}

impl Hash for MultipartState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.owner.hash(state);
        self.0.index.hash(state);
    }
}

impl fmt::Debug for MultipartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.0.owner, self.variant())
    }
}


#[cfg(test)]
mod tests {

    use super::*;

    fn factory() -> StateFactory {
        let mut builder = StateBuilder::new();
        builder.add(Property::face("facing", &Face::HORIZONTAL))
            .add(Property::bool("powered"));
        builder.build(MultipartId::from_index(0))
    }

    #[test]
    fn cartesian_product() {

        let factory = factory();
        assert_eq!(factory.states().len(), 8);

        // Last declared property varies the fastest.
        let second = &factory.states()[1];
        assert_eq!(second.get_face("facing"), Some(Face::NegZ));
        assert_eq!(second.get_bool("powered"), Some(true));

        for (index, state) in factory.states().iter().enumerate() {
            assert_eq!(state.index(), index);
            assert!(factory.contains(state));
        }

    }

    #[test]
    fn default_state() {

        let factory = factory();
        let default = factory.default_state();
        assert_eq!(default.get_face("facing"), Some(Face::NegZ));
        assert_eq!(default.get_bool("powered"), Some(false));

        let mut builder = StateBuilder::new();
        builder.add(Property::face("facing", &Face::HORIZONTAL))
            .add(Property::bool("powered"))
            .default_value("facing", Face::PosX);
        let factory = builder.build(MultipartId::from_index(0));
        assert_eq!(factory.default_state().get_face("facing"), Some(Face::PosX));

    }

    #[test]
    fn lookup_is_cached() {

        let factory = factory();
        let mapping = [("powered", PropertyValue::Bool(true)), ("facing", PropertyValue::Face(Face::PosX))];
        let a = factory.get(&mapping).unwrap();
        let b = factory.get(&mapping).unwrap();
        assert!(Arc::ptr_eq(&a.0, &b.0));

        assert!(factory.get(&mapping[..1]).is_none());
        assert!(factory.get(&[("powered", PropertyValue::Bool(true)), ("facing", PropertyValue::Face(Face::PosY))]).is_none());
        assert!(factory.get(&[("powered", PropertyValue::Bool(true)), ("powered", PropertyValue::Bool(false))]).is_none());

    }

    #[test]
    fn neighbours() {

        let factory = factory();
        let default = factory.default_state().clone();

        let powered = default.with("powered", true);
        assert_eq!(powered.get_bool("powered"), Some(true));
        assert_eq!(powered.get_face("facing"), Some(Face::NegZ));
        assert_eq!(powered.with("powered", false), default);
        assert_eq!(default.cycle("powered"), powered);
        assert_eq!(powered.cycle("powered"), default);

        assert!(default.try_with("powered", 3).is_none());
        assert!(default.try_with("lit", true).is_none());

        let east = default.with("facing", Face::PosX);
        assert_eq!(factory.get(&[("facing", PropertyValue::Face(Face::PosX)), ("powered", PropertyValue::Bool(false))]), Some(&east));

    }

    #[test]
    #[should_panic]
    fn with_undeclared() {
        factory().default_state().with("lit", true);
    }

    #[test]
    fn variant() {

        let factory = factory();
        assert_eq!(factory.default_state().variant(), "facing=north,powered=false");

        // Variant is independent of declaration order.
        let mut builder = StateBuilder::new();
        builder.add(Property::bool("powered"))
            .add(Property::face("facing", &Face::HORIZONTAL));
        let factory = builder.build(MultipartId::from_index(1));
        assert_eq!(factory.default_state().variant(), "facing=north,powered=false");

        let factory = StateBuilder::new().build(MultipartId::from_index(2));
        assert_eq!(factory.states().len(), 1);
        assert_eq!(factory.default_state().variant(), "");
        let empty: [(&str, PropertyValue); 0] = [];
        assert!(factory.get(&empty).is_some());

    }

    #[test]
    fn widest_domain() {

        let last = crate::property::MAX_DOMAIN_LEN - 1;
        let mut builder = StateBuilder::new();
        builder.add(Property::bool("lit"))
            .add(Property::int("x", 0..=last as i32));
        let factory = builder.build(MultipartId::from_index(0));

        let state = &factory.states()[factory.states().len() - 1];
        assert_eq!(state.get_bool("lit"), Some(true));
        assert_eq!(state.get_int("x"), Some(last as i32));
        assert_eq!(state.with("x", 300).get_int("x"), Some(300));
        assert_eq!(state.with("x", 300).with("x", last as i32), *state);

    }

}
