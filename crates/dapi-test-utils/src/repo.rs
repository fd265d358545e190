//! [`TestRepo`] temporary trees of OpenDAPI documents.

use std::fs;

use dapi_fs::NormalizedPath;
use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory with helpers for writing and asserting documents.
///
/// # Example
///
/// ```rust
/// use dapi_test_utils::TestRepo;
///
/// let repo = TestRepo::new();
/// repo.write("dapis/a.teams.yaml", "schema: https://opendapi.org/spec/0-0-1/teams.json\n");
/// repo.assert_file_contains("dapis/a.teams.yaml", "teams.json");
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> NormalizedPath {
        NormalizedPath::new(self.temp_dir.path())
    }

    /// Location of `relative` inside the repo.
    pub fn path(&self, relative: &str) -> NormalizedPath {
        self.root().join(relative)
    }

    /// Write raw text, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> NormalizedPath {
        let path = self.path(relative);
        let native = path.to_native();
        if let Some(parent) = native.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&native, content).unwrap();
        path
    }

    /// Write `value` as YAML.
    pub fn write_yaml(&self, relative: &str, value: &Value) -> NormalizedPath {
        let rendered = dapi_content::Format::Yaml.render(value).unwrap();
        self.write(relative, &rendered)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative).to_native())
            .unwrap_or_else(|_| panic!("Could not read file: {relative}"))
    }

    /// Parse the document at `relative` in its own format.
    pub fn read_value(&self, relative: &str) -> Value {
        dapi_content::Document::load(&self.path(relative))
            .unwrap()
            .into_content()
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.path(relative).exists(),
            "Expected file to exist: {relative}"
        );
    }

    pub fn assert_file_not_exists(&self, relative: &str) {
        assert!(
            !self.path(relative).exists(),
            "Expected file NOT to exist: {relative}"
        );
    }

    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {relative} does not contain expected content.\nExpected: {content}\nActual: {file_content}"
        );
    }
}
