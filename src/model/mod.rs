//! Typed records for every Katalon artifact kind
//!
//! Each record is produced once per analysis run and never mutated afterwards,
//! except for a test suite receiving its groovy companion during the scan.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A test case (`.tc`)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TestCase {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub name: String,
    pub description: String,
    pub tag: String,
    pub comment: String,
    pub record_option: String,
    pub guid: String,
}

/// A test suite (`.ts`), optionally merged with its groovy companion
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestSuite {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub name: String,
    pub description: String,
    pub tag: String,
    pub is_rerun: bool,
    pub mail_recipient: String,
    pub number_of_rerun: u32,
    pub page_load_timeout: u32,
    pub page_load_timeout_default: bool,
    pub rerun_failed_test_cases_only: bool,
    pub rerun_immediately: bool,
    pub guid: String,
    pub test_cases: Vec<TestCaseLink>,

    /// Fields extracted from the `.groovy` companion, when one exists
    #[serde(flatten)]
    pub script: Option<SuiteScript>,
}

impl TestSuite {
    /// A suite with every XML field at its documented default
    pub fn new(file_path: PathBuf, relative_path: String) -> Self {
        Self {
            file_path,
            relative_path,
            name: String::new(),
            description: String::new(),
            tag: String::new(),
            is_rerun: false,
            mail_recipient: String::new(),
            number_of_rerun: 0,
            page_load_timeout: 30,
            page_load_timeout_default: true,
            rerun_failed_test_cases_only: false,
            rerun_immediately: true,
            guid: String::new(),
            test_cases: Vec::new(),
            script: None,
        }
    }

    pub fn has_setup(&self) -> bool {
        self.script.as_ref().map(|s| s.has_setup).unwrap_or(false)
    }

    pub fn has_teardown(&self) -> bool {
        self.script.as_ref().map(|s| s.has_teardown).unwrap_or(false)
    }

    pub fn uses_data_binding(&self) -> bool {
        self.test_cases.iter().any(|link| link.using_data_binding)
    }

    pub fn imports(&self) -> &[String] {
        self.script.as_ref().map(|s| s.calls.imports.as_slice()).unwrap_or(&[])
    }

    pub fn test_object_calls(&self) -> &[String] {
        self.script
            .as_ref()
            .map(|s| s.calls.test_object_calls.as_slice())
            .unwrap_or(&[])
    }

    pub fn custom_keyword_calls(&self) -> &[String] {
        self.script
            .as_ref()
            .map(|s| s.calls.custom_keyword_calls.as_slice())
            .unwrap_or(&[])
    }
}

/// Reference from a test suite to one of its test cases
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestCaseLink {
    pub guid: String,
    pub is_reuse_driver: bool,
    pub is_run: bool,
    pub test_case_id: String,
    pub using_data_binding: bool,
}

/// Groovy-derived part of a test suite
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SuiteScript {
    /// Path of the `.groovy` file the fields were read from
    pub script_path: PathBuf,
    pub content: String,
    #[serde(flatten)]
    pub calls: ScriptCalls,
    pub has_setup: bool,
    pub has_teardown: bool,
    pub has_setup_test_case: bool,
    pub has_teardown_test_case: bool,
}

/// References extracted from a groovy body
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScriptCalls {
    pub imports: Vec<String>,
    pub test_object_calls: Vec<String>,
    pub test_case_calls: Vec<String>,
    pub custom_keyword_calls: Vec<String>,
}

/// A custom keyword definition
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Keyword {
    pub name: String,
    pub parameters: Vec<String>,
}

/// A groovy file below `Keywords`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct KeywordFile {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub package: String,
    pub content: String,
    pub keywords: Vec<Keyword>,
    pub imports: Vec<String>,
    pub test_object_calls: Vec<String>,
    pub test_case_calls: Vec<String>,
}

impl KeywordFile {
    /// `package.keyword`, or the bare keyword name when the file has no package
    pub fn full_name(&self, keyword: &Keyword) -> String {
        if self.package.is_empty() {
            keyword.name.clone()
        } else {
            format!("{}.{}", self.package, keyword.name)
        }
    }
}

/// Element family of a test object, taken from the XML root tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementType {
    WebElement,
    WindowsElement,
    MobileElement,
}

impl ElementType {
    pub fn from_root_tag(tag: &str) -> Option<Self> {
        match tag {
            "WebElementEntity" => Some(ElementType::WebElement),
            "WindowsElementEntity" => Some(ElementType::WindowsElement),
            "MobileElementEntity" => Some(ElementType::MobileElement),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::WebElement => "WebElement",
            ElementType::WindowsElement => "WindowsElement",
            ElementType::MobileElement => "MobileElement",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A test object (`.rs`) below `Object Repository`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TestObject {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub element_type: Option<ElementType>,
    pub name: String,
    pub description: String,
    pub tag: String,
    pub guid: String,
    pub selector_method: String,
    pub smart_locator_enabled: bool,
    pub selectors: BTreeMap<String, String>,
    pub smart_locators: BTreeMap<String, String>,
    pub properties: Vec<ElementProperty>,
    pub xpaths: Vec<ElementProperty>,
}

/// A locator property or xpath of a test object
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ElementProperty {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub match_condition: String,
    pub is_selected: bool,
    pub guid: String,
}

/// An execution profile (`.glbl`)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Profile {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub name: String,
    pub description: String,
    pub tag: String,
    pub is_default: bool,
    pub global_variables: Vec<GlobalVariable>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GlobalVariable {
    pub name: String,
    pub description: String,
    pub value_type: String,
    pub init_value: String,
    pub is_protected: bool,
}

/// A groovy file below `Scripts`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Script {
    pub file_path: PathBuf,
    pub relative_path: String,
    pub content: String,
    #[serde(flatten)]
    pub calls: ScriptCalls,
    pub line_count: usize,
}
