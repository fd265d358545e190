//! Project manifest parsing for `opendapi.toml`
//!
//! Every section is optional; a missing manifest behaves like an empty one.
//!
//! ```toml
//! [project]
//! dapis_dir = "dapis"
//! spec_version = "0-0-1"
//! purposes_enabled = true
//!
//! [org]
//! name = "Acme"
//! email_domain = "acme.com"
//!
//! [seed]
//! teams = ["Platform"]
//! purposes = ["Analytics"]
//! datastores = { warehouse = "snowflake" }
//!
//! [[dataset]]
//! name = "user"
//! namespace = "app.public"
//! producer = "postgres"
//! primary_key = ["id"]
//! fields = [{ name = "id", data_type = "integer" }]
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use dapi_fs::NormalizedPath;
use dapi_schema::{DEFAULT_TRUSTED_ORIGIN, SchemaSettings};
use serde::{Deserialize, Serialize};

use crate::defs::SeedContext;
use crate::error::{Error, Result};

/// Manifest file name, looked up at the repository root.
pub const MANIFEST_FILE: &str = "opendapi.toml";

fn default_dapis_dir() -> String {
    "dapis".to_string()
}

fn default_spec_version() -> String {
    "0-0-1".to_string()
}

fn default_org_name() -> String {
    "my_company".to_string()
}

fn default_email_domain() -> String {
    "example.com".to_string()
}

fn default_trusted_origin() -> String {
    DEFAULT_TRUSTED_ORIGIN.to_string()
}

fn default_timeout_secs() -> u64 {
    2
}

fn default_data_type() -> String {
    "string".to_string()
}

/// `[project]` layout and feature switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Where seeded documents live, relative to the root
    #[serde(default = "default_dapis_dir")]
    pub dapis_dir: String,

    #[serde(default = "default_spec_version")]
    pub spec_version: String,

    #[serde(default)]
    pub purposes_enabled: bool,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            dapis_dir: default_dapis_dir(),
            spec_version: default_spec_version(),
            purposes_enabled: false,
        }
    }
}

/// `[org]` identity used in URNs and team emails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSection {
    #[serde(default = "default_org_name")]
    pub name: String,

    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    #[serde(default)]
    pub slack_team_id: Option<String>,
}

impl Default for OrgSection {
    fn default() -> Self {
        Self {
            name: default_org_name(),
            email_domain: default_email_domain(),
            slack_team_id: None,
        }
    }
}

/// `[seed]` entries created on first run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSection {
    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub purposes: Vec<String>,

    /// Datastore name to datastore type
    #[serde(default)]
    pub datastores: BTreeMap<String, String>,
}

/// One column of a `[[dataset]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSection {
    pub name: String,

    #[serde(default = "default_data_type")]
    pub data_type: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_nullable: bool,

    #[serde(default)]
    pub is_pii: bool,
}

/// `[[dataset]]` a dataset that gets a DAPI document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSection {
    pub name: String,

    #[serde(default)]
    pub namespace: String,

    /// Seeded datastore name that produces this dataset
    #[serde(default)]
    pub producer: Option<String>,

    /// Seeded datastore name that consumes this dataset
    #[serde(default)]
    pub consumer: Option<String>,

    /// Seeded team name that owns this dataset
    #[serde(default)]
    pub owner_team: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSection>,

    #[serde(default)]
    pub primary_key: Vec<String>,
}

/// `[schema]` where schemas may come from and how long a fetch may take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSection {
    #[serde(default = "default_trusted_origin")]
    pub trusted_origin: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SchemaSection {
    fn default() -> Self {
        Self {
            trusted_origin: default_trusted_origin(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Project configuration parsed from `opendapi.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub org: OrgSection,

    #[serde(default)]
    pub seed: SeedSection,

    #[serde(default, rename = "dataset")]
    pub datasets: Vec<DatasetSection>,

    #[serde(default)]
    pub schema: SchemaSection,
}

impl Manifest {
    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use dapi_entities::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [org]
    /// name = "Acme"
    ///
    /// [seed]
    /// teams = ["Platform", "Data"]
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.org.name, "Acme");
    /// assert_eq!(manifest.project.spec_version, "0-0-1");
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest file; a missing file yields the defaults.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path, "No manifest, using defaults");
            return Ok(Self::default());
        }
        let content = dapi_fs::io::read_text(path)?;
        Self::parse(&content).map_err(|e| Error::InvalidManifest {
            path: path.to_native(),
            message: e.to_string(),
        })
    }

    /// Load `opendapi.toml` from the repository root.
    pub fn load_from_root(root: &NormalizedPath) -> Result<Self> {
        Self::load(&root.join(MANIFEST_FILE))
    }

    /// Resolve `dapis_dir` against `root`, refusing anything outside it.
    pub fn dapis_dir(&self, root: &NormalizedPath) -> Result<NormalizedPath> {
        let outside = || Error::DapisDirOutsideRoot {
            dapis_dir: self.project.dapis_dir.clone(),
            root: root.to_string(),
        };

        let raw = NormalizedPath::new(&self.project.dapis_dir);
        if raw.to_native().is_absolute() {
            return if raw.is_under(root) { Ok(raw) } else { Err(outside()) };
        }

        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.as_str().split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop().ok_or_else(outside)?;
                }
                other => segments.push(other),
            }
        }
        if segments.is_empty() {
            return Ok(root.clone());
        }
        Ok(root.join(&segments.join("/")))
    }

    /// Facts every seed template is built from.
    pub fn seed_context(&self, root: &NormalizedPath) -> Result<SeedContext> {
        Ok(SeedContext {
            org_name: self.org.name.clone(),
            email_domain: self.org.email_domain.clone(),
            slack_team_id: self.org.slack_team_id.clone(),
            dapis_dir: self.dapis_dir(root)?,
            spec_version: self.project.spec_version.clone(),
            trusted_origin: self.schema.trusted_origin.clone(),
        })
    }

    pub fn schema_settings(&self) -> SchemaSettings {
        SchemaSettings {
            trusted_origin: self.schema.trusted_origin.clone(),
            timeout: Duration::from_secs(self.schema.timeout_secs),
        }
    }
}
