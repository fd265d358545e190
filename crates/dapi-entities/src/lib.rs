//! Built-in OpenDAPI entities
//!
//! Each entity implements [`dapi_core::EntityCapability`]: its file
//! suffixes, merge policy, seed template and content rules. Seed templates
//! come from the project manifest (`opendapi.toml`).
//!
//! | entity       | suffix         | content rule                          |
//! |--------------|----------------|---------------------------------------|
//! | `teams`      | `.teams.*`     | parent team must be declared          |
//! | `datastores` | `.datastores.*`| none                                  |
//! | `purposes`   | `.purposes.*`  | none, only run when enabled           |
//! | `dapi`       | `.dapi.*`      | primary key must name declared fields |

pub mod dapi;
pub mod datastores;
pub mod defs;
pub mod error;
pub mod manifest;
pub mod purposes;
pub mod registry;
pub mod teams;

pub use dapi::DapiCapability;
pub use datastores::DatastoresCapability;
pub use defs::{PLACEHOLDER_TEXT, SeedContext};
pub use error::{Error, Result};
pub use manifest::{MANIFEST_FILE, Manifest};
pub use purposes::PurposesCapability;
pub use registry::entity_capabilities;
pub use teams::TeamsCapability;
