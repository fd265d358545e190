//! JSON format handler

use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::{Format, FormatHandler};

/// Handler for JSON files. Output is pretty-printed with a trailing newline.
#[derive(Debug, Default)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for JsonHandler {
    fn format(&self) -> Format {
        Format::Json
    }

    fn parse(&self, source: &str) -> Result<Value> {
        serde_json::from_str(source).map_err(|e| Error::parse("JSON", e.to_string()))
    }

    fn render(&self, value: &Value) -> Result<String> {
        let mut rendered =
            serde_json::to_string_pretty(value).map_err(|e| Error::render("JSON", e.to_string()))?;
        rendered.push('\n');
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_render_is_pretty() {
        let rendered = JsonHandler::new().render(&json!({"teams": [{"urn": "a"}]})).unwrap();
        assert_eq!(
            rendered,
            "{\n  \"teams\": [\n    {\n      \"urn\": \"a\"\n    }\n  ]\n}\n"
        );
    }

    #[test]
    fn test_json_parse_error() {
        assert!(JsonHandler::new().parse("{\"teams\": [").is_err());
    }
}
