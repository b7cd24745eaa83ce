use super::common::{load_script, load_xml, FileIdentity};
use super::script::{has_annotation, ScriptScanner};
use super::xml::XmlElement;
use crate::model::{SuiteScript, TestCaseLink, TestSuite};
use std::path::Path;

/// Parser for test suites: the `.ts` XML definition and its `.groovy` companion
pub struct TestSuiteParser {
    scanner: ScriptScanner,
}

impl TestSuiteParser {
    pub fn new() -> Self {
        Self {
            scanner: ScriptScanner::new(),
        }
    }

    /// Parse a `.ts` suite definition
    pub fn parse_ts(&self, path: &Path, project_root: &Path) -> Option<TestSuite> {
        let root = load_xml(path)?;
        let identity = FileIdentity::new(path, project_root);
        Some(self.from_element(TestSuite::new(identity.file_path, identity.relative_path), &root))
    }

    /// Parse a `.groovy` suite script
    pub fn parse_groovy(&self, path: &Path) -> Option<SuiteScript> {
        let content = load_script(path)?;
        Some(self.script_from_content(path, content))
    }

    /// A suite that only exists as a groovy script
    pub fn suite_from_script(&self, script: SuiteScript, project_root: &Path) -> TestSuite {
        let identity = FileIdentity::new(&script.script_path, project_root);
        let mut suite = TestSuite::new(identity.file_path, identity.relative_path);
        suite.script = Some(script);
        suite
    }

    fn from_element(&self, mut suite: TestSuite, root: &XmlElement) -> TestSuite {
        suite.name = root.child_text("name");
        suite.description = root.child_text("description");
        suite.tag = root.child_text("tag");
        suite.is_rerun = root.child_bool("isRerun", false);
        suite.mail_recipient = root.child_text("mailRecipient");
        suite.number_of_rerun = root.child_u32("numberOfRerun", 0);
        suite.page_load_timeout = root.child_u32("pageLoadTimeout", 30);
        suite.page_load_timeout_default = root.child_bool("pageLoadTimeoutDefault", true);
        suite.rerun_failed_test_cases_only = root.child_bool("rerunFailedTestCasesOnly", false);
        suite.rerun_immediately = root.child_bool("rerunImmediately", true);
        suite.guid = root.child_text("testSuiteGuid");
        suite.test_cases = root
            .children_named("testCaseLink")
            .map(|link| TestCaseLink {
                guid: link.child_text("guid"),
                is_reuse_driver: link.child_bool("isReuseDriver", false),
                is_run: link.child_bool("isRun", true),
                test_case_id: link.child_text("testCaseId"),
                using_data_binding: link.child_bool("usingDataBindingAtTestSuiteLevel", false),
            })
            .collect();
        suite
    }

    fn script_from_content(&self, path: &Path, content: String) -> SuiteScript {
        SuiteScript {
            script_path: path.to_path_buf(),
            calls: self.scanner.calls(&content),
            has_setup: has_annotation(&content, "@SetUp"),
            has_teardown: has_annotation(&content, "@TearDown"),
            has_setup_test_case: has_annotation(&content, "@SetupTestCase"),
            has_teardown_test_case: has_annotation(&content, "@TearDownTestCase"),
            content,
        }
    }
}

impl Default for TestSuiteParser {
    fn default() -> Self {
        Self::new()
    }
}
