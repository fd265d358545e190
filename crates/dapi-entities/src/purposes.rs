//! Purposes documents: why data is used

use dapi_core::{EntityCapability, EntityPolicy, Template};
use serde_json::{Value, json};

use crate::defs::{PLACEHOLDER_TEXT, PURPOSES_SUFFIX, SeedContext};

pub struct PurposesCapability {
    policy: EntityPolicy,
    template: Template,
}

impl PurposesCapability {
    pub fn new(ctx: &SeedContext, seed_purposes: &[String]) -> Self {
        let purposes: Vec<Value> = seed_purposes
            .iter()
            .map(|name| {
                json!({
                    "urn": ctx.urn("purposes", &name.to_lowercase()),
                    "description": PLACEHOLDER_TEXT,
                })
            })
            .collect();

        let mut template = Template::new();
        template.insert(
            ctx.seed_location("purposes"),
            json!({
                "schema": ctx.schema_url("purposes"),
                "purposes": purposes,
            }),
        );

        Self {
            policy: EntityPolicy::new(PURPOSES_SUFFIX),
            template,
        }
    }
}

impl EntityCapability for PurposesCapability {
    fn name(&self) -> &str {
        "purposes"
    }

    fn policy(&self) -> &EntityPolicy {
        &self.policy
    }

    fn template(&self) -> Template {
        self.template.clone()
    }
}
