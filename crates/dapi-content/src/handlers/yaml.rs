//! YAML format handler using serde_yaml
//!
//! Mapping order survives a parse/render cycle because the value model keeps
//! insertion order. Comments are not carried over.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

/// Handler for YAML files using serde_yaml
#[derive(Debug, Default)]
pub struct YamlHandler;

impl YamlHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for YamlHandler {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn parse(&self, source: &str) -> Result<Value> {
        if source.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))
    }

    fn render(&self, value: &Value) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| Error::render("YAML", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_parse_keeps_key_order() {
        let value = YamlHandler::new().parse("b: 2\na: 1\n").unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_yaml_parse_error() {
        assert!(
            YamlHandler::new()
                .parse("invalid: yaml: content: [unclosed")
                .is_err()
        );
    }

    #[test]
    fn test_yaml_empty_source_is_null() {
        assert_eq!(YamlHandler::new().parse("  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_yaml_comments_do_not_survive_a_rewrite() {
        let handler = YamlHandler::new();
        let value = handler.parse("# owners\nteams: [] # filled in later\n").unwrap();
        let rendered = handler.render(&value).unwrap();
        assert_eq!(rendered, "teams: []\n");
    }

    #[test]
    fn test_yaml_render_nested() {
        let rendered = YamlHandler::new()
            .render(&json!({"organization": {"name": "Acme"}, "teams": []}))
            .unwrap();
        assert!(rendered.contains("organization:\n  name: Acme"));
        assert!(rendered.contains("teams: []"));
    }
}
