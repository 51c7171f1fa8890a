//! The baked model of a block position holding a multipart container.

use std::any::Any;

use tracing::{error, instrument, trace, warn};

use simplemultipart::geom::Face;
use simplemultipart::{ContainerSnapshot, MultipartContainer, MultipartRegistry, MultipartView};

use crate::config;
use crate::model::{ModelIdentifier, ModelLookup};
use crate::quad::BakedQuad;


/// The model rendered at block positions holding a multipart container, it aggregates
/// the models of every part of the container.
pub struct ContainerModel<'a> {
    registry: &'a MultipartRegistry,
    models: &'a dyn ModelLookup,
}

impl<'a> ContainerModel<'a> {

    pub fn new(registry: &'a MultipartRegistry, models: &'a dyn ModelLookup) -> Self {
        Self { registry, models }
    }

    /// Return true if ambient occlusion should be applied to the quads.
    #[inline]
    pub fn use_ambient_occlusion(&self) -> bool {
        config::ambient_occlusion()
    }

    /// Compute the quads of the given block for the given side. The block should be a
    /// [`MultipartContainer`] or a [`ContainerSnapshot`], anything else has no quads
    /// and returns `None`.
    ///
    /// Quads are concatenated part after part, in ascending slot order.
    #[instrument(level = "debug", skip_all)]
    pub fn quads(&self, block: &dyn Any, side: Option<Face>, seed: u64) -> Option<Vec<BakedQuad>> {
        if let Some(container) = block.downcast_ref::<MultipartContainer>() {
            Some(self.collect_quads(container.views(self.registry), side, seed))
        } else if let Some(snapshot) = block.downcast_ref::<ContainerSnapshot>() {
            Some(self.collect_quads(snapshot.views(self.registry), side, seed))
        } else {
            trace!("block is not a multipart container, no quads");
            None
        }
    }

    fn collect_quads<'v>(&self, views: impl Iterator<Item = MultipartView<'v>>, side: Option<Face>, seed: u64) -> Vec<BakedQuad> {

        let mut quads = Vec::new();

        for view in views {

            let render_state = view.state_for_rendering();
            let model_id = ModelIdentifier::for_state(view.multipart_type().identifier(), &render_state);

            let Some(model) = self.models.model(&model_id) else {
                if config::strict_models() {
                    error!("missing model {model_id} for part in slot {} at {}", view.slot(), view.pos());
                } else {
                    warn!("missing model {model_id} for part in slot {} at {}", view.slot(), view.pos());
                }
                continue;
            };

            match model.as_multipart() {
                Some(model) => quads.extend(model.multipart_quads(&view, &render_state, side, seed)),
                None => quads.extend(model.quads(side, seed)),
            }

        }

        quads

    }

}
