//! Schema validation for OpenDAPI documents
//!
//! Each document names its JSON Schema in a top-level `schema` field. The
//! [`SchemaValidator`] checks that the reference lives under the trusted
//! origin, fetches the body once per URL through a [`SchemaFetcher`], and
//! reports every violation with its instance path.

pub mod error;
pub mod fetch;
pub mod reference;
pub mod settings;
pub mod validator;

pub use error::{Error, MismatchDetail, Result};
pub use fetch::{FetchError, HttpSchemaFetcher, SchemaFetcher};
pub use reference::{DEFAULT_TRUSTED_ORIGIN, SCHEMA_FIELD, SchemaRef};
pub use settings::SchemaSettings;
pub use validator::SchemaValidator;
