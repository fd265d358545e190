//! Structural merge of a desired-state template into an existing document
//!
//! `merge(base, candidate)` treats `base` as the template and `candidate` as
//! the human-edited document. Candidate values win, except that at a
//! disallow-new-entries path no entry absent from the template survives.
//!
//! | base / candidate           | result                                  |
//! |----------------------------|-----------------------------------------|
//! | mapping / mapping          | recursive merge, key union              |
//! | sequence of mappings       | unique-key merge (see below)            |
//! | any other sequence         | candidate replaces base                 |
//! | anything else              | candidate                               |
//!
//! Sets are mappings whose values are all null, so key union is set union.

use dapi_content::FieldPath;
use serde_json::{Map, Value};

use crate::capability::MergePolicy;

/// Python-style truthiness: null, false, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Deterministic, infallible merge driven by a [`MergePolicy`].
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationEngine<'p> {
    policy: &'p MergePolicy,
}

impl<'p> ReconciliationEngine<'p> {
    pub fn new(policy: &'p MergePolicy) -> Self {
        Self { policy }
    }

    /// Merge `candidate` (existing) into `base` (template).
    pub fn merge(&self, base: &Value, candidate: &Value) -> Value {
        self.merge_at(&FieldPath::root(), base, candidate)
    }

    fn merge_at(&self, path: &FieldPath, base: &Value, candidate: &Value) -> Value {
        match (base, candidate) {
            (Value::Object(b), Value::Object(c)) => Value::Object(self.merge_mappings(path, b, c)),
            (Value::Array(b), Value::Array(c)) if is_mapping_sequence(b) && is_mapping_sequence(c) => {
                Value::Array(self.merge_by_lookup_key(path, b, c))
            }
            _ => candidate.clone(),
        }
    }

    fn merge_mappings(
        &self,
        path: &FieldPath,
        base: &Map<String, Value>,
        candidate: &Map<String, Value>,
    ) -> Map<String, Value> {
        let mut merged = Map::new();
        for (key, base_value) in base {
            let value = match candidate.get(key) {
                Some(candidate_value) => self.merge_at(&path.key(key), base_value, candidate_value),
                None => base_value.clone(),
            };
            merged.insert(key.clone(), value);
        }
        for (key, candidate_value) in candidate {
            if !base.contains_key(key) {
                merged.insert(key.clone(), candidate_value.clone());
            }
        }
        merged
    }

    fn merge_by_lookup_key(&self, path: &FieldPath, base: &[Value], candidate: &[Value]) -> Vec<Value> {
        let mut matched = vec![false; candidate.len()];
        let mut merged = Vec::with_capacity(base.len());

        for (idx, item) in base.iter().enumerate() {
            let found = self.lookup(item).and_then(|(key, value)| {
                candidate
                    .iter()
                    .position(|other| other.get(key) == Some(value))
            });
            match found {
                Some(pos) => {
                    matched[pos] = true;
                    merged.push(self.merge_at(&path.index(idx), item, &candidate[pos]));
                }
                None => merged.push(item.clone()),
            }
        }

        let unmatched = candidate
            .iter()
            .zip(&matched)
            .filter(|(_, hit)| !**hit)
            .map(|(item, _)| item);

        if self.policy.disallows_new_entries(path) {
            let dropped = unmatched.count();
            if dropped > 0 {
                tracing::warn!(
                    path = %path,
                    dropped,
                    "Dropping entries that are not in the template"
                );
            }
            return merged;
        }

        // Only the result before appending counts; repeated candidates stay.
        let settled = merged.clone();
        for item in unmatched {
            if !settled.contains(item) {
                merged.push(item.clone());
            }
        }
        merged
    }

    /// The first policy key carrying a truthy value on `item`.
    fn lookup<'v>(&self, item: &'v Value) -> Option<(&'p str, &'v Value)> {
        let fields = item.as_object()?;
        let policy: &'p MergePolicy = self.policy;
        policy.lookup_keys().iter().find_map(|key| {
            fields
                .get(key)
                .filter(|v| is_truthy(v))
                .map(|v| (key.as_str(), v))
        })
    }
}

fn is_mapping_sequence(items: &[Value]) -> bool {
    items.first().is_none_or(Value::is_object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn merge(policy: &MergePolicy, base: Value, candidate: Value) -> Value {
        ReconciliationEngine::new(policy).merge(&base, &candidate)
    }

    fn urn_policy() -> MergePolicy {
        MergePolicy::new(&["urn"], Vec::new())
    }

    #[test]
    fn matched_entry_takes_candidate_values_and_extra_entries_append() {
        let result = merge(
            &urn_policy(),
            json!({"teams": [{"urn": "a", "name": "A"}]}),
            json!({"teams": [{"urn": "a", "name": "Alice", "email": "a@x.com"}, {"urn": "b", "name": "B"}]}),
        );
        assert_eq!(
            result,
            json!({"teams": [{"urn": "a", "name": "Alice", "email": "a@x.com"}, {"urn": "b", "name": "B"}]})
        );
    }

    #[test]
    fn disallowed_path_drops_unmatched_entries() {
        let policy = urn_policy().disallow_new_entries_at("teams");
        let result = merge(
            &policy,
            json!({"teams": [{"urn": "a", "name": "A"}]}),
            json!({"teams": [{"urn": "a", "name": "Alice", "email": "a@x.com"}, {"urn": "b", "name": "B"}]}),
        );
        assert_eq!(result, json!({"teams": [{"urn": "a", "name": "Alice", "email": "a@x.com"}]}));
    }

    #[test]
    fn disallow_applies_only_at_the_exact_path() {
        let policy = MergePolicy::default().disallow_new_entries_at("fields");
        let base = json!({
            "fields": [{"name": "id"}],
            "owners": [{"name": "core", "fields": [{"name": "id"}]}]
        });
        let candidate = json!({
            "fields": [{"name": "id"}, {"name": "extra"}],
            "owners": [{"name": "core", "fields": [{"name": "id"}, {"name": "extra"}]}]
        });
        let result = merge(&policy, base, candidate);
        assert_eq!(result["fields"], json!([{"name": "id"}]));
        assert_eq!(result["owners"][0]["fields"], json!([{"name": "id"}, {"name": "extra"}]));
    }

    #[test]
    fn unmatched_template_entry_passes_through() {
        let result = merge(
            &MergePolicy::default(),
            json!({"teams": [{"urn": "a", "owner": "x"}, {"urn": "c"}]}),
            json!({"teams": [{"urn": "a", "owner": "y"}]}),
        );
        assert_eq!(result, json!({"teams": [{"urn": "a", "owner": "y"}, {"urn": "c"}]}));
    }

    #[test]
    fn first_truthy_key_wins_without_fallback() {
        // `urn` is empty so `name` is the lookup key; the candidate matches by name only
        let result = merge(
            &MergePolicy::default(),
            json!({"items": [{"urn": "", "name": "n1", "v": 1}]}),
            json!({"items": [{"urn": "other", "name": "n1", "v": 2}]}),
        );
        assert_eq!(result, json!({"items": [{"urn": "other", "name": "n1", "v": 2}]}));

        // `urn` is set so `name` is never consulted
        let result = merge(
            &MergePolicy::default(),
            json!({"items": [{"urn": "u1", "name": "n1"}]}),
            json!({"items": [{"urn": "u2", "name": "n1"}]}),
        );
        assert_eq!(
            result,
            json!({"items": [{"urn": "u1", "name": "n1"}, {"urn": "u2", "name": "n1"}]})
        );
    }

    #[test]
    fn scalar_sequences_are_replaced() {
        let result = merge(
            &MergePolicy::default(),
            json!({"tags": ["a", "b"], "mixed": [{"urn": "a"}]}),
            json!({"tags": ["c"], "mixed": [1, 2]}),
        );
        assert_eq!(result, json!({"tags": ["c"], "mixed": [1, 2]}));
    }

    #[test]
    fn sets_union_and_mappings_keep_base_order() {
        let result = merge(
            &MergePolicy::default(),
            json!({"set": {"my": null}, "dict": {"meet": "me"}, "str": "hello"}),
            json!({"str": "hey", "set": {"you": null}, "dict": {"str": "str2"}}),
        );
        assert_eq!(
            result,
            json!({"set": {"my": null, "you": null}, "dict": {"meet": "me", "str": "str2"}, "str": "hey"})
        );
        let keys: Vec<_> = result.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["set", "dict", "str"]);
    }

    #[test]
    fn kind_mismatch_takes_candidate() {
        let result = merge(
            &MergePolicy::default(),
            json!({"owner": {"urn": "a"}, "count": 3}),
            json!({"owner": "a", "count": [3]}),
        );
        assert_eq!(result, json!({"owner": "a", "count": [3]}));
    }

    #[test]
    fn empty_template_sequence_at_disallowed_path_stays_empty() {
        let policy = urn_policy().disallow_new_entries_at("teams");
        let result = merge(&policy, json!({"teams": []}), json!({"teams": [{"urn": "x"}]}));
        assert_eq!(result, json!({"teams": []}));
    }

    #[test]
    fn repeated_candidate_entries_are_all_kept() {
        let result = merge(
            &urn_policy(),
            json!({"teams": [{"urn": "a"}]}),
            json!({"teams": [{"urn": "b", "n": 1}, {"urn": "b", "n": 1}]}),
        );
        assert_eq!(
            result,
            json!({"teams": [{"urn": "a"}, {"urn": "b", "n": 1}, {"urn": "b", "n": 1}]})
        );
    }

    #[test]
    fn unmatched_candidate_equal_to_kept_base_entry_is_not_repeated() {
        let result = merge(
            &urn_policy(),
            json!({"teams": [{"name": "keyless"}]}),
            json!({"teams": [{"name": "keyless"}, {"name": "keyless"}]}),
        );
        assert_eq!(result, json!({"teams": [{"name": "keyless"}]}));
    }

    #[test]
    fn truthiness_matches_python() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }
}
