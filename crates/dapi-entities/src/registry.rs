//! The set of entities a repository is validated against

use dapi_core::EntityCapability;
use dapi_fs::NormalizedPath;

use crate::dapi::DapiCapability;
use crate::datastores::DatastoresCapability;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::purposes::PurposesCapability;
use crate::teams::TeamsCapability;

/// Build every enabled entity for `root`, in run order.
///
/// Teams and datastores always run. Purposes run only when enabled in the
/// manifest, and DAPIs only when the manifest declares datasets.
pub fn entity_capabilities(
    root: &NormalizedPath,
    manifest: &Manifest,
) -> Result<Vec<Box<dyn EntityCapability>>> {
    let ctx = manifest.seed_context(root)?;
    let mut capabilities: Vec<Box<dyn EntityCapability>> = vec![
        Box::new(TeamsCapability::new(&ctx, &manifest.seed.teams)),
        Box::new(DatastoresCapability::new(&ctx, &manifest.seed.datastores)),
    ];
    if manifest.project.purposes_enabled {
        capabilities.push(Box::new(PurposesCapability::new(&ctx, &manifest.seed.purposes)));
    }
    if !manifest.datasets.is_empty() {
        capabilities.push(Box::new(DapiCapability::new(&ctx, &manifest.datasets)));
    }
    tracing::debug!(
        entities = ?capabilities.iter().map(|c| c.name()).collect::<Vec<_>>(),
        "Registered entities"
    );
    Ok(capabilities)
}
