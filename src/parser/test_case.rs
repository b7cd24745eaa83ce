use super::common::{load_xml, FileIdentity};
use super::xml::XmlElement;
use crate::model::TestCase;
use std::path::Path;

/// Parser for test case files (`.tc`)
pub struct TestCaseParser;

impl TestCaseParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, path: &Path, project_root: &Path) -> Option<TestCase> {
        let root = load_xml(path)?;
        Some(self.from_element(FileIdentity::new(path, project_root), &root))
    }

    fn from_element(&self, identity: FileIdentity, root: &XmlElement) -> TestCase {
        TestCase {
            file_path: identity.file_path,
            relative_path: identity.relative_path,
            name: root.child_text("name"),
            description: root.child_text("description"),
            tag: root.child_text("tag"),
            comment: root.child_text("comment"),
            record_option: root.child_text("recordOption"),
            guid: root.child_text("testCaseGuid"),
        }
    }
}

impl Default for TestCaseParser {
    fn default() -> Self {
        Self::new()
    }
}
