//! Build a sample multipart container and dump the quads its model renders.
//!
//! Set `RUST_LOG` to change the log level, for example `RUST_LOG=debug`.

use std::process::ExitCode;
use std::sync::Arc;

use glam::{DVec3, IVec3};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use simplemultipart::geom::Face;
use simplemultipart::parts;
use simplemultipart::registry::{self, RegistryError};
use simplemultipart::{Identifier, MultipartContainer, MultipartRegistry, PlacementContext};

use simplemultipart_client::{BoxModel, ContainerModel, ModelIdentifier, ModelStore};


pub fn main() -> ExitCode {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to build the sample registry: {e}");
            ExitCode::FAILURE
        }
    }

}

fn run() -> Result<(), RegistryError> {

    let mut registry = MultipartRegistry::new();
    let samples = parts::register_samples(&mut registry, "simplemultipart")?;
    let registry = registry::install(registry)?;

    let mut models = ModelStore::new();
    for ty in registry.iter() {
        for state in ty.states().states() {
            let sprite = Identifier::new(ty.identifier().namespace(), &format!("block/{}", ty.identifier().path()))?;
            let model = BoxModel::new(&ty.detached_shape(state), sprite);
            models.insert(ModelIdentifier::for_state(ty.identifier(), state), Arc::new(model));
        }
    }
    info!("baked {} models", models.len());

    let pos = IVec3::new(0, 64, 0);
    let mut container = MultipartContainer::new(pos);
    let placements = [
        (samples.slab, Face::PosY, DVec3::new(0.5, 0.0, 0.5)),
        (samples.facade, Face::PosZ, DVec3::new(0.5, 0.5, 0.0)),
        (samples.facade, Face::NegY, DVec3::new(0.5, 1.0, 0.5)),
        (samples.lever, Face::NegX, DVec3::new(1.0, 0.75, 0.5)),
    ];

    for (id, face, hit) in placements {
        let Some(ty) = registry.get(id) else { continue };
        match container.place_part(registry, ty, PlacementContext::new(pos, face, hit)) {
            Ok(slot) => info!("placed {} in slot {slot}", ty.identifier()),
            Err(e) => info!("cannot place {}: {e}", ty.identifier()),
        }
    }

    for view in container.views(registry) {
        info!("slot {}: {}[{}]", view.slot(), view.multipart_type().identifier(), view.state().variant());
    }
    info!("container shape: {:?}", container.bounding_shape(registry).bounds());

    let model = ContainerModel::new(registry, &models);
    info!("ambient occlusion: {}", model.use_ambient_occlusion());

    for side in [None].into_iter().chain(Face::ALL.map(Some)) {
        let quads = model.quads(&container, side, 0).unwrap_or_default();
        let side = side.map_or("none", Face::name);
        info!("side {side}: {} quads", quads.len());
        for quad in quads {
            info!("  {} facing {} {:?}", quad.sprite, quad.face, quad.vertices);
        }
    }

    Ok(())

}
