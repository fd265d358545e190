//! Teams documents: who owns what

use std::collections::BTreeSet;

use dapi_core::{DocumentSet, EntityCapability, EntityPolicy, Template, ValidationError};
use dapi_fs::NormalizedPath;
use serde_json::{Value, json};

use crate::defs::{PLACEHOLDER_TEXT, SeedContext, TEAMS_SUFFIX};

pub struct TeamsCapability {
    policy: EntityPolicy,
    template: Template,
}

impl TeamsCapability {
    pub fn new(ctx: &SeedContext, seed_teams: &[String]) -> Self {
        let teams: Vec<Value> = seed_teams
            .iter()
            .map(|name| {
                json!({
                    "urn": ctx.urn("teams", &name.to_lowercase()),
                    "name": name,
                    "domain": PLACEHOLDER_TEXT,
                    "email": format!("grp.{name}@{}", ctx.email_domain.to_lowercase()),
                })
            })
            .collect();
        let slack_teams: Vec<&str> = ctx.slack_team_id.iter().map(String::as_str).collect();

        let mut template = Template::new();
        template.insert(
            ctx.seed_location("teams"),
            json!({
                "schema": ctx.schema_url("teams"),
                "organization": {
                    "name": ctx.org_name,
                    "slack_teams": slack_teams,
                },
                "teams": teams,
            }),
        );

        Self {
            policy: EntityPolicy::new(TEAMS_SUFFIX),
            template,
        }
    }
}

/// URNs of every team declared anywhere in `snapshot`.
fn declared_team_urns(snapshot: &DocumentSet) -> BTreeSet<&str> {
    snapshot
        .values()
        .filter_map(|doc| doc.content().get("teams").and_then(Value::as_array))
        .flatten()
        .filter_map(|team| team.get("urn").and_then(Value::as_str))
        .collect()
}

impl EntityCapability for TeamsCapability {
    fn name(&self) -> &str {
        "teams"
    }

    fn policy(&self) -> &EntityPolicy {
        &self.policy
    }

    fn template(&self) -> Template {
        self.template.clone()
    }

    fn check_content(
        &self,
        location: &NormalizedPath,
        content: &Value,
        snapshot: &DocumentSet,
    ) -> Result<(), ValidationError> {
        let declared = declared_team_urns(snapshot);
        let teams = content.get("teams").and_then(Value::as_array);

        let problems: Vec<String> = teams
            .into_iter()
            .flatten()
            .filter_map(|team| {
                let parent = team.get("parent_team_urn").and_then(Value::as_str)?;
                if parent.is_empty() || declared.contains(parent) {
                    return None;
                }
                let urn = team.get("urn").and_then(Value::as_str).unwrap_or("<unnamed>");
                Some(format!(
                    "Parent team urn {parent} not found in {urn} in {location}"
                ))
            })
            .collect();

        match problems.split_first() {
            None => Ok(()),
            Some((first, rest)) => {
                Err(ValidationError::new(first.clone()).with_details(rest.to_vec()))
            }
        }
    }
}
