use super::common::{load_script, FileIdentity};
use super::script::ScriptScanner;
use crate::model::KeywordFile;
use std::path::Path;

/// Parser for custom keyword files (`.groovy` below `Keywords`)
pub struct KeywordParser {
    scanner: ScriptScanner,
}

impl KeywordParser {
    pub fn new() -> Self {
        Self {
            scanner: ScriptScanner::new(),
        }
    }

    pub fn parse(&self, path: &Path, project_root: &Path) -> Option<KeywordFile> {
        let content = load_script(path)?;
        let identity = FileIdentity::new(path, project_root);

        Some(KeywordFile {
            file_path: identity.file_path,
            relative_path: identity.relative_path,
            package: self.scanner.package(&content),
            keywords: self.scanner.keywords(&content),
            imports: self.scanner.imports(&content),
            test_object_calls: self.scanner.test_object_calls(&content),
            test_case_calls: self.scanner.test_case_calls(&content),
            content,
        })
    }
}

impl Default for KeywordParser {
    fn default() -> Self {
        Self::new()
    }
}
