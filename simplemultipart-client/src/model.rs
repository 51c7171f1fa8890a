//! Baked models and the lookup service resolving them.

use std::collections::HashMap;
use std::sync::Arc;
use std::fmt;

use simplemultipart::geom::{Face, Shape};
use simplemultipart::{Identifier, MultipartState, MultipartView};

use crate::quad::BakedQuad;


/// Identifier of a baked model: the identifier of a registered multipart and the
/// variant string of one of its states, displayed as `namespace:path#variant`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelIdentifier {
    pub id: Identifier,
    pub variant: String,
}

impl ModelIdentifier {

    pub fn new(id: Identifier, variant: impl Into<String>) -> Self {
        Self { id, variant: variant.into() }
    }

    /// The model identifier for the given state of a multipart.
    pub fn for_state(id: &Identifier, state: &MultipartState) -> Self {
        Self::new(id.clone(), state.variant())
    }

}

impl fmt::Display for ModelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.variant)
    }
}


/// A model whose quads are computed once, they only depend on the side queried.
pub trait BakedModel: Send + Sync {

    /// Return the quads culled by the given side, or the quads never culled when the
    /// side is `None`. The seed selects between random alternatives.
    fn quads(&self, side: Option<Face>, seed: u64) -> Vec<BakedQuad>;

    /// Return this model as a multipart-aware model, if it is one.
    fn as_multipart(&self) -> Option<&dyn MultipartBakedModel> {
        None
    }

}

/// A model of a part whose quads can depend on the part's container, like its
/// neighbour parts.
pub trait MultipartBakedModel: BakedModel {

    /// Return the quads of a part, given its view in the container and the render
    /// state this model has been resolved from.
    fn multipart_quads(&self, view: &MultipartView, render_state: &MultipartState, side: Option<Face>, seed: u64) -> Vec<BakedQuad>;

}


/// The model lookup service of the host.
pub trait ModelLookup {

    fn model(&self, id: &ModelIdentifier) -> Option<Arc<dyn BakedModel>>;

}


/// A simple in-memory model lookup.
#[derive(Default)]
pub struct ModelStore {
    models: HashMap<ModelIdentifier, Arc<dyn BakedModel>>,
}

impl ModelStore {

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a model.
    pub fn insert(&mut self, id: ModelIdentifier, model: Arc<dyn BakedModel>) {
        self.models.insert(id, model);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

}

impl ModelLookup for ModelStore {
    fn model(&self, id: &ModelIdentifier) -> Option<Arc<dyn BakedModel>> {
        self.models.get(id).cloned()
    }
}


/// A model made of the faces of a shape's boxes, all using the same sprite.
#[derive(Debug, Clone)]
pub struct BoxModel {
    quads: Vec<BakedQuad>,
}

impl BoxModel {

    pub fn new(shape: &Shape, sprite: Identifier) -> Self {
        let quads = shape.boxes().iter()
            .flat_map(|&bb| Face::ALL.into_iter().map(move |face| (bb, face)))
            .map(|(bb, face)| BakedQuad::from_box_face(bb, face, sprite.clone()))
            .collect();
        Self { quads }
    }

}

impl BakedModel for BoxModel {
    fn quads(&self, side: Option<Face>, _seed: u64) -> Vec<BakedQuad> {
        self.quads.iter()
            .filter(|quad| quad.cull_face == side)
            .cloned()
            .collect()
    }
}
