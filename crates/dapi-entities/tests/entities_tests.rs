//! Built-in entities end to end: manifest, seed templates, runner

use std::collections::BTreeMap;

use dapi_content::Document;
use dapi_core::{DocumentSet, EntityCapability, Error, ExecutionMode, Runner};
use dapi_entities::{Manifest, PLACEHOLDER_TEXT, TeamsCapability, entity_capabilities};
use dapi_fs::NormalizedPath;
use dapi_test_utils::fakes::permissive_schema;
use dapi_test_utils::{RecordingFetcher, TestRepo};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const MANIFEST: &str = r#"
[project]
dapis_dir = "dapis"
purposes_enabled = true

[org]
name = "Acme"
email_domain = "Acme.com"
slack_team_id = "T123"

[seed]
teams = ["Platform"]
purposes = ["Analytics"]
datastores = { warehouse = "snowflake" }

[[dataset]]
name = "user"
namespace = "app.public"
producer = "warehouse"
owner_team = "Platform"
primary_key = ["id"]
fields = [{ name = "id", data_type = "integer" }, { name = "email", is_pii = true }]
"#;

fn snapshot_of(docs: &[(&str, Value)]) -> DocumentSet {
    docs.iter()
        .map(|(loc, value)| {
            let path = NormalizedPath::new(loc);
            (path.clone(), Document::at(path, value.clone()).unwrap())
        })
        .collect()
}

#[test]
fn test_teams_template_follows_the_manifest() {
    let manifest = Manifest::parse(MANIFEST).unwrap();
    let ctx = manifest.seed_context(&NormalizedPath::new("/repo")).unwrap();
    let template = TeamsCapability::new(&ctx, &manifest.seed.teams).template();

    let (location, doc) = template.iter().next().unwrap();
    assert_eq!(location.as_str(), "/repo/dapis/acme.teams.yaml");
    assert_eq!(
        doc,
        &json!({
            "schema": "https://opendapi.org/spec/0-0-1/teams.json",
            "organization": {"name": "Acme", "slack_teams": ["T123"]},
            "teams": [{
                "urn": "acme.teams.platform",
                "name": "Platform",
                "domain": PLACEHOLDER_TEXT,
                "email": "grp.Platform@acme.com"
            }]
        })
    );
}

#[test]
fn test_parent_team_must_be_declared_somewhere() {
    let manifest = Manifest::default();
    let ctx = manifest.seed_context(&NormalizedPath::new("/repo")).unwrap();
    let teams = TeamsCapability::new(&ctx, &[]);
    let core = json!({"teams": [{"urn": "acme.teams.core"}]});
    let child = json!({"teams": [
        {"urn": "acme.teams.web", "parent_team_urn": "acme.teams.core"},
        {"urn": "acme.teams.ml", "parent_team_urn": "acme.teams.ghost"}
    ]});
    let snapshot = snapshot_of(&[("/repo/a.teams.yaml", core), ("/repo/b.teams.yaml", child.clone())]);

    let err = teams
        .check_content(&NormalizedPath::new("/repo/b.teams.yaml"), &child, &snapshot)
        .unwrap_err();

    assert_eq!(
        err.message,
        "Parent team urn acme.teams.ghost not found in acme.teams.ml in /repo/b.teams.yaml"
    );
}

#[test]
fn test_registry_respects_switches() {
    let root = NormalizedPath::new("/repo");
    let names = |manifest: &Manifest| -> Vec<String> {
        entity_capabilities(&root, manifest)
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    };

    assert_eq!(names(&Manifest::default()), vec!["teams", "datastores"]);
    assert_eq!(
        names(&Manifest::parse(MANIFEST).unwrap()),
        vec!["teams", "datastores", "purposes", "dapi"]
    );
}

#[test]
fn test_first_run_seeds_then_ci_run_passes() {
    let repo = TestRepo::new();
    repo.write(dapi_entities::MANIFEST_FILE, MANIFEST);
    let manifest = Manifest::load_from_root(&repo.root()).unwrap();
    let capabilities = entity_capabilities(&repo.root(), &manifest).unwrap();
    let fetcher = RecordingFetcher::serving_all(permissive_schema());
    let mut schemas = fetcher.validator();

    let summary = Runner::new(repo.root(), ExecutionMode::Interactive)
        .run(&capabilities, &mut schemas)
        .unwrap();
    assert_eq!(summary.written(), 4);
    repo.assert_file_exists("dapis/acme.teams.yaml");
    repo.assert_file_exists("dapis/acme.datastores.yaml");
    repo.assert_file_exists("dapis/acme.purposes.yaml");
    repo.assert_file_contains("dapis/datasets/user.dapi.yaml", "urn: acme.datastores.warehouse");

    let summary = Runner::new(repo.root(), ExecutionMode::Unattended)
        .run(&capabilities, &mut schemas)
        .unwrap();
    assert_eq!(summary.written(), 0);
    assert_eq!(fetcher.call_count(), 4);
}

#[test]
fn test_autoupdate_keeps_edits_but_drops_unknown_fields() {
    let repo = TestRepo::new();
    repo.write(dapi_entities::MANIFEST_FILE, MANIFEST);
    let manifest = Manifest::load_from_root(&repo.root()).unwrap();
    let capabilities = entity_capabilities(&repo.root(), &manifest).unwrap();
    let fetcher = RecordingFetcher::serving_all(permissive_schema());
    let mut schemas = fetcher.validator();
    let runner = Runner::new(repo.root(), ExecutionMode::Interactive);
    runner.run(&capabilities, &mut schemas).unwrap();

    let mut edited = repo.read_value("dapis/datasets/user.dapi.yaml");
    edited["description"] = json!("Registered users");
    edited["fields"][0]["description"] = json!("Primary id");
    edited["fields"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "stray", "data_type": "string"}));
    repo.write_yaml("dapis/datasets/user.dapi.yaml", &edited);

    runner.run(&capabilities, &mut schemas).unwrap();

    let merged = repo.read_value("dapis/datasets/user.dapi.yaml");
    assert_eq!(merged["description"], json!("Registered users"));
    assert_eq!(merged["fields"][0]["description"], json!("Primary id"));
    let names: Vec<_> = merged["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["id", "email"]);
}

#[test]
fn test_ci_run_on_empty_repo_reports_every_entity() {
    let repo = TestRepo::new();
    let manifest = Manifest::default();
    let capabilities = entity_capabilities(&repo.root(), &manifest).unwrap();
    let fetcher = RecordingFetcher::serving_all(permissive_schema());
    let mut schemas = fetcher.validator();

    let err = Runner::new(repo.root(), ExecutionMode::Unattended)
        .run(&capabilities, &mut schemas)
        .unwrap_err();

    let Error::RunnerFailed { failures } = &err else {
        panic!("expected RunnerFailed, got {err:?}");
    };
    let by_entity: BTreeMap<_, _> = failures
        .iter()
        .map(|f| (f.entity.as_str(), matches!(f.error, Error::AutoupdateNotAllowed { .. })))
        .collect();
    assert_eq!(by_entity, BTreeMap::from([("datastores", true), ("teams", true)]));
    assert_eq!(fetcher.call_count(), 0);
    repo.assert_file_not_exists("dapis/my_company.teams.yaml");
}
