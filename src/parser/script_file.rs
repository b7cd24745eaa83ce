use super::common::{load_script, FileIdentity};
use super::script::ScriptScanner;
use crate::model::Script;
use std::path::Path;

/// Parser for test case scripts (`.groovy` below `Scripts`)
pub struct ScriptParser {
    scanner: ScriptScanner,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self {
            scanner: ScriptScanner::new(),
        }
    }

    pub fn parse(&self, path: &Path, project_root: &Path) -> Option<Script> {
        let content = load_script(path)?;
        let identity = FileIdentity::new(path, project_root);

        Some(Script {
            file_path: identity.file_path,
            relative_path: identity.relative_path,
            calls: self.scanner.calls(&content),
            line_count: content.split('\n').count(),
            content,
        })
    }
}

impl Default for ScriptParser {
    fn default() -> Self {
        Self::new()
    }
}
