//! The schema-url command

use dapi_schema::SchemaRef;

use crate::error::Result;

pub fn run_schema_url(entity: &str, version: &str, origin: &str) -> Result<()> {
    println!("{}", SchemaRef::for_entity(origin, version, entity));
    Ok(())
}
