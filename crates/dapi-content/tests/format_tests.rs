//! Parse/render behavior across the supported formats

use dapi_content::{Document, Format};
use dapi_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn sample() -> Value {
    json!({
        "schema": "https://opendapi.org/spec/0-0-1/teams.json",
        "organization": {"name": "Acme", "slack_teams": []},
        "teams": [
            {"urn": "acme.teams.platform", "name": "Platform", "email": "grp.platform@acme.com"},
            {"urn": "acme.teams.data", "name": "Data", "parent_team_urn": "acme.teams.platform"}
        ],
        "count": 2,
        "ratio": 0.5,
        "flag": false,
        "nothing": null
    })
}

#[test]
fn test_yaml_round_trip_preserves_value_and_order() {
    let rendered = Format::Yaml.render(&sample()).unwrap();
    let parsed = Format::Yaml.parse(&rendered).unwrap();
    assert_eq!(parsed, sample());

    let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys[0], "schema");
    assert_eq!(keys[2], "teams");
}

#[test]
fn test_json_round_trip() {
    let rendered = Format::Json.render(&sample()).unwrap();
    assert_eq!(Format::Json.parse(&rendered).unwrap(), sample());
}

#[test]
fn test_document_load_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("acme.teams.yml");
    fs::write(&path, "teams:\n  - urn: a\n").unwrap();

    let doc = Document::load(&NormalizedPath::new(&path)).unwrap();
    assert_eq!(doc.format(), Format::Yaml);
    assert_eq!(doc.content(), &json!({"teams": [{"urn": "a"}]}));
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ._-]{0,12}".prop_map(Value::from),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_rendered_documents_reparse_equal(value in document()) {
        for format in [Format::Yaml, Format::Json] {
            let rendered = format.render(&value).unwrap();
            prop_assert_eq!(format.parse(&rendered).unwrap(), value.clone());
        }
    }
}
