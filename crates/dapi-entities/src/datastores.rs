//! Datastores documents: where data physically lives

use dapi_core::{EntityCapability, EntityPolicy, Template};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::defs::{DATASTORES_SUFFIX, PLACEHOLDER_TEXT, SeedContext};

pub struct DatastoresCapability {
    policy: EntityPolicy,
    template: Template,
}

impl DatastoresCapability {
    /// `seed` maps datastore name to datastore type.
    pub fn new(ctx: &SeedContext, seed: &BTreeMap<String, String>) -> Self {
        let datastores: Vec<Value> = seed
            .iter()
            .map(|(name, kind)| {
                json!({
                    "urn": ctx.urn("datastores", name),
                    "type": kind,
                    "host": {
                        "env_prod": {
                            "location": PLACEHOLDER_TEXT,
                            "username": format!("plaintext:{PLACEHOLDER_TEXT}"),
                            "password": format!("plaintext:{PLACEHOLDER_TEXT}"),
                        }
                    }
                })
            })
            .collect();

        let mut template = Template::new();
        template.insert(
            ctx.seed_location("datastores"),
            json!({
                "schema": ctx.schema_url("datastores"),
                "datastores": datastores,
            }),
        );

        Self {
            policy: EntityPolicy::new(DATASTORES_SUFFIX),
            template,
        }
    }
}

impl EntityCapability for DatastoresCapability {
    fn name(&self) -> &str {
        "datastores"
    }

    fn policy(&self) -> &EntityPolicy {
        &self.policy
    }

    fn template(&self) -> Template {
        self.template.clone()
    }
}
