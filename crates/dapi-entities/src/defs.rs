//! Shared constants and the context seed templates are built from

use dapi_fs::NormalizedPath;
use dapi_schema::SchemaRef;

pub const TEAMS_SUFFIX: &[&str] = &[".teams.yaml", ".teams.yml", ".teams.json"];
pub const DATASTORES_SUFFIX: &[&str] = &[".datastores.yaml", ".datastores.yml", ".datastores.json"];
pub const PURPOSES_SUFFIX: &[&str] = &[".purposes.yaml", ".purposes.yml", ".purposes.json"];
pub const DAPI_SUFFIX: &[&str] = &[".dapi.yaml", ".dapi.yml", ".dapi.json"];

/// Value left in seeded documents where a human has to fill something in.
pub const PLACEHOLDER_TEXT: &str = "placeholder text";

/// Organization and layout facts every seed template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedContext {
    pub org_name: String,
    pub email_domain: String,
    pub slack_team_id: Option<String>,
    /// Directory seeded documents are written to, under the root
    pub dapis_dir: NormalizedPath,
    pub spec_version: String,
    pub trusted_origin: String,
}

impl SeedContext {
    /// Lowercased organization name, the prefix of every URN.
    pub fn org_slug(&self) -> String {
        self.org_name.to_lowercase()
    }

    /// `<org>.<kind>.<name>`
    pub fn urn(&self, kind: &str, name: &str) -> String {
        format!("{}.{kind}.{name}", self.org_slug())
    }

    pub fn schema_url(&self, entity: &str) -> String {
        SchemaRef::for_entity(&self.trusted_origin, &self.spec_version, entity).to_string()
    }

    /// `<dapis_dir>/<org>.<entity>.yaml`
    pub fn seed_location(&self, entity: &str) -> NormalizedPath {
        self.dapis_dir
            .join(&format!("{}.{entity}.yaml", self.org_slug()))
    }
}
