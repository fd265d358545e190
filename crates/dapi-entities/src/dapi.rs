//! DAPI documents: one per dataset, describing its fields and datastores

use dapi_core::{
    DocumentSet, EntityCapability, EntityPolicy, MergePolicy, Template, ValidationError,
};
use dapi_fs::NormalizedPath;
use serde_json::{Value, json};

use crate::defs::{DAPI_SUFFIX, PLACEHOLDER_TEXT, SeedContext};
use crate::manifest::DatasetSection;

/// Fields come from the dataset definition; a field that is not there
/// must not be kept by autoupdate.
const DISALLOW_NEW_ENTRIES: &str = "fields";

pub struct DapiCapability {
    policy: EntityPolicy,
    template: Template,
}

impl DapiCapability {
    pub fn new(ctx: &SeedContext, datasets: &[DatasetSection]) -> Self {
        let template = datasets
            .iter()
            .map(|dataset| {
                let location = ctx
                    .dapis_dir
                    .join(&format!("datasets/{}.dapi.yaml", dataset.name));
                (location, dataset_document(ctx, dataset))
            })
            .collect();

        Self {
            policy: EntityPolicy::new(DAPI_SUFFIX)
                .with_merge(MergePolicy::default().disallow_new_entries_at(DISALLOW_NEW_ENTRIES)),
            template,
        }
    }
}

fn datastore_urn(ctx: &SeedContext, name: Option<&String>) -> String {
    match name {
        Some(name) => ctx.urn("datastores", name),
        None => PLACEHOLDER_TEXT.to_string(),
    }
}

fn dataset_document(ctx: &SeedContext, dataset: &DatasetSection) -> Value {
    let data = json!({
        "identifier": dataset.name,
        "namespace": dataset.namespace,
    });
    let fields: Vec<Value> = dataset
        .fields
        .iter()
        .map(|field| {
            json!({
                "name": field.name,
                "data_type": field.data_type,
                "description": field.description.as_deref().unwrap_or(PLACEHOLDER_TEXT),
                "is_nullable": field.is_nullable,
                "is_pii": field.is_pii,
                "share_status": "stable",
            })
        })
        .collect();
    let owner = match &dataset.owner_team {
        Some(team) => ctx.urn("teams", &team.to_lowercase()),
        None => PLACEHOLDER_TEXT.to_string(),
    };

    json!({
        "schema": ctx.schema_url("dapi"),
        "urn": ctx.urn("dapis", &dataset.name),
        "type": "entity",
        "description": PLACEHOLDER_TEXT,
        "owner_team_urn": owner,
        "datastores": {
            "producers": [{"urn": datastore_urn(ctx, dataset.producer.as_ref()), "data": data}],
            "consumers": [{"urn": datastore_urn(ctx, dataset.consumer.as_ref()), "data": data}],
        },
        "fields": fields,
        "primary_key": dataset.primary_key,
    })
}

impl EntityCapability for DapiCapability {
    fn name(&self) -> &str {
        "dapi"
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
        _snapshot: &DocumentSet,
    ) -> Result<(), ValidationError> {
        let field_names: Vec<&str> = content
            .get("fields")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|f| f.get("name").and_then(Value::as_str))
            .collect();

        let problems: Vec<String> = content
            .get("primary_key")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|key| !key.as_str().is_some_and(|k| field_names.contains(&k)))
            .map(|key| {
                let key = key.as_str().map_or_else(|| key.to_string(), str::to_string);
                format!("Primary key element {key} not a valid field in {location}")
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn capability() -> DapiCapability {
        let ctx = SeedContext {
            org_name: "Acme".into(),
            email_domain: "acme.com".into(),
            slack_team_id: None,
            dapis_dir: NormalizedPath::new("/repo/dapis"),
            spec_version: "0-0-1".into(),
            trusted_origin: "https://opendapi.org/".into(),
        };
        DapiCapability::new(&ctx, &[])
    }

    #[test]
    fn primary_key_must_name_fields() {
        let doc = json!({
            "fields": [{"name": "id"}, {"name": "email"}],
            "primary_key": ["id", "missing", "other"]
        });
        let err = capability()
            .check_content(&NormalizedPath::new("u.dapi.yaml"), &doc, &DocumentSet::new())
            .unwrap_err();
        assert_eq!(err.message, "Primary key element missing not a valid field in u.dapi.yaml");
        assert_eq!(err.details.len(), 1);
    }

    #[test]
    fn missing_primary_key_is_fine() {
        let doc = json!({"fields": []});
        capability()
            .check_content(&NormalizedPath::new("u.dapi.yaml"), &doc, &DocumentSet::new())
            .unwrap();
    }

    #[test]
    fn fields_path_disallows_new_entries() {
        let cap = capability();
        assert!(cap.policy().merge.disallows_new_entries(&"fields".into()));
    }
}
