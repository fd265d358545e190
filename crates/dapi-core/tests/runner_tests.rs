//! Runner behavior across several entities

use std::sync::Arc;

use dapi_core::{EntityCapability, EntityPolicy, Error, ExecutionMode, Runner};
use dapi_test_utils::fakes::permissive_schema;
use dapi_test_utils::{RecordingFetcher, RecordingWriter, StaticCapability, TestRepo};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_runner_reports_every_failing_entity() {
    let repo = TestRepo::new();
    repo.write_yaml(
        "org.teams.yaml",
        &json!({"schema": "https://opendapi.org/spec/0-0-1/teams.json", "teams": []}),
    );
    let capabilities: Vec<Box<dyn EntityCapability>> = vec![
        Box::new(StaticCapability::new("teams", EntityPolicy::new(&[".teams.yaml"]))),
        Box::new(StaticCapability::new("datastores", EntityPolicy::new(&[".datastores.yaml"]))),
        Box::new(StaticCapability::new("purposes", EntityPolicy::new(&[".purposes.yaml"]))),
    ];
    let fetcher = RecordingFetcher::serving_all(permissive_schema());
    let mut schemas = fetcher.validator();

    let err = Runner::new(repo.root(), ExecutionMode::Interactive)
        .with_writer(Arc::new(RecordingWriter::new()))
        .run(&capabilities, &mut schemas)
        .unwrap_err();

    let Error::RunnerFailed { failures } = &err else {
        panic!("expected RunnerFailed, got {err:?}");
    };
    let entities: Vec<_> = failures.iter().map(|f| f.entity.as_str()).collect();
    assert_eq!(entities, vec!["datastores", "purposes"]);
    assert!(err.to_string().contains("OpenDAPI purposes error: No files found"));
}

#[test]
fn test_runner_shares_one_schema_cache() {
    let repo = TestRepo::new();
    let schema = "https://opendapi.org/spec/0-0-1/shared.json";
    repo.write_yaml("a.teams.yaml", &json!({"schema": schema}));
    repo.write_yaml("a.purposes.yaml", &json!({"schema": schema}));
    let capabilities: Vec<Box<dyn EntityCapability>> = vec![
        Box::new(StaticCapability::new("teams", EntityPolicy::new(&[".teams.yaml"]))),
        Box::new(StaticCapability::new("purposes", EntityPolicy::new(&[".purposes.yaml"]))),
    ];
    let fetcher = RecordingFetcher::serving_all(permissive_schema());
    let mut schemas = fetcher.validator();

    let summary = Runner::new(repo.root(), ExecutionMode::Unattended)
        .run(&capabilities, &mut schemas)
        .unwrap();

    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.written(), 0);
    assert_eq!(fetcher.call_count(), 1);
}
