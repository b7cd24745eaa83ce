//! Integration tests for the project analysis pipeline
//!
//! These tests run discovery and parsing against the sample project fixture
//! and against small projects generated in temporary directories.

use katalon_analyzer::discovery::{find, ArtifactKind};
use katalon_analyzer::model::ElementType;
use katalon_analyzer::{AnalyzerError, Config, Project};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get the path to the sample Katalon project
fn fixture_project() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_project")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

// ============================================================================
// File discovery
// ============================================================================

#[test]
fn test_find_counts_files_at_any_depth() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.tc", "<TestCaseEntity/>");
    write(dir.path(), "one/b.tc", "<TestCaseEntity/>");
    write(dir.path(), "one/two/three/c.tc", "<TestCaseEntity/>");
    write(dir.path(), "one/two/not-a-case.ts", "<TestSuiteEntity/>");

    assert_eq!(find(dir.path(), ArtifactKind::TestCase.extension()).len(), 3);
    assert_eq!(find(dir.path(), ArtifactKind::TestSuite.extension()).len(), 1);
    assert!(find(&dir.path().join("missing"), ".tc").is_empty());
}

// ============================================================================
// Fixture project
// ============================================================================

#[test]
fn test_fixture_collections() {
    let project = Project::analyze(&fixture_project()).unwrap();

    assert_eq!(project.name(), "sample_project");
    // Broken.tc is malformed and skipped
    assert_eq!(project.test_cases().len(), 4);
    assert_eq!(project.test_suites().len(), 2);
    assert_eq!(project.keywords().len(), 2);
    assert_eq!(project.object_repository().len(), 4);
    assert_eq!(project.profiles().len(), 2);
    assert_eq!(project.scripts().len(), 2);

    assert!(project.test_case_by_name("Broken").is_none());
}

#[test]
fn test_fixture_relative_paths_use_forward_slashes() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let paths: Vec<&str> = project
        .test_cases()
        .iter()
        .map(|tc| tc.relative_path.as_str())
        .collect();
    assert!(paths.contains(&"Test Cases/Login/Valid Login.tc"));
    assert!(paths.contains(&"Test Cases/Orphan.tc"));
    assert!(paths.iter().all(|p| !p.contains('\\')));
}

#[test]
fn test_fixture_suite_merges_groovy() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let smoke = project.test_suite_by_name("Smoke").unwrap();
    assert!(smoke.is_rerun);
    assert!(!smoke.rerun_immediately);
    assert_eq!(smoke.test_cases.len(), 2);
    assert!(smoke.uses_data_binding());
    assert!(smoke.has_setup());
    assert!(smoke.has_teardown());
    assert!(smoke
        .imports()
        .contains(&"com.kms.katalon.core.annotation.SetUp".to_string()));

    let regression = project.test_suite_by_name("Regression").unwrap();
    assert!(regression.script.is_none());
    assert_eq!(regression.page_load_timeout, 45);
    assert!(!regression.has_setup());
}

#[test]
fn test_fixture_keywords() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let auth = project.keyword_file_by_name("login").unwrap();
    assert_eq!(auth.package, "com.example");
    let names: Vec<String> = auth.keywords.iter().map(|k| auth.full_name(k)).collect();
    assert_eq!(names, vec!["com.example.login", "com.example.logout"]);
    assert_eq!(auth.keywords[0].parameters, vec!["username", "password"]);

    let cart = project.keyword_file_by_name("addItem").unwrap();
    assert_eq!(cart.keywords[0].name, "addItem");
    assert_eq!(cart.keywords[0].parameters, vec!["sku", "quantity"]);
}

#[test]
fn test_fixture_objects_and_profiles() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let submit = project.object_by_name("btn_Submit").unwrap();
    assert_eq!(submit.element_type, Some(ElementType::WebElement));
    assert_eq!(submit.selector_method, "XPATH");
    assert_eq!(
        submit.selectors.get("XPATH").map(String::as_str),
        Some(r#"//button[@type="submit"]"#)
    );
    assert_eq!(submit.properties.len(), 1);

    let menu = project.object_by_name("btn_Menu").unwrap();
    assert_eq!(menu.element_type, Some(ElementType::MobileElement));

    let default = project.profile_by_name("default").unwrap();
    assert!(default.is_default);
    assert_eq!(default.global_variables.len(), 2);
    assert_eq!(default.global_variables[0].name, "baseUrl");
}

#[test]
fn test_fixture_scripts() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let script = project
        .scripts()
        .iter()
        .find(|s| s.relative_path.starts_with("Scripts/Checkout/"))
        .unwrap();
    assert_eq!(
        script.calls.test_case_calls,
        vec!["Test Cases/Login/Valid Login"]
    );
    assert_eq!(
        script.calls.test_object_calls,
        vec!["Page_Mobile/btn_Menu", "Page_Gone/btn_Old"]
    );
    assert!(script.line_count > 5);
}

#[test]
fn test_fixture_search() {
    let project = Project::analyze(&fixture_project()).unwrap();

    let hits = project.search_test_cases("LOGIN");
    assert_eq!(hits.len(), 2);

    let hits = project.search_test_cases("cart");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Add To Cart");

    let hits = project.search_keywords("log");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].file.relative_path, "Keywords/com/example/Auth.groovy");

    assert_eq!(project.search_object_repository("MobileElement").len(), 1);
    assert_eq!(project.search_test_suites("nightly").len(), 1);
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_nonexistent_root_is_invalid_project() {
    let dir = TempDir::new().unwrap();
    let err = Project::analyze(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidProject(_)));
}

#[test]
fn test_file_as_root_is_invalid_project() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "file.txt", "not a project");
    let err = Project::analyze(&dir.path().join("file.txt")).unwrap_err();
    assert!(err.is_client_error());
}

#[test]
fn test_missing_folders_yield_empty_collections() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Test Cases/Only.tc", "<TestCaseEntity><name>Only</name></TestCaseEntity>");

    let project = Project::analyze(dir.path()).unwrap();
    assert_eq!(project.test_cases().len(), 1);
    assert!(project.test_suites().is_empty());
    assert!(project.keywords().is_empty());
    assert!(project.object_repository().is_empty());
    assert!(project.profiles().is_empty());
    assert!(project.scripts().is_empty());
}

#[test]
fn test_test_case_defaults_for_missing_fields() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Test Cases/Login.tc",
        "<TestCaseEntity><name>Login</name><description>Check login</description></TestCaseEntity>",
    );

    let project = Project::analyze(dir.path()).unwrap();
    let tc = project.test_case_by_name("Login").unwrap();
    assert_eq!(tc.description, "Check login");
    assert_eq!(tc.tag, "");
    assert_eq!(tc.guid, "");
}

#[test]
fn test_groovy_only_suite_is_kept() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Test Suites/Nightly.groovy", "@SetUp\ndef setUp() {}\n");

    let project = Project::analyze(dir.path()).unwrap();
    assert_eq!(project.test_suites().len(), 1);
    let suite = &project.test_suites().as_slice()[0];
    assert!(suite.has_setup());
    assert!(suite.test_cases.is_empty());
    assert_eq!(suite.page_load_timeout, 30);
}

#[test]
fn test_unknown_object_root_tag() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Object Repository/Legacy/thing.rs",
        "<SomeOtherEntity><name>thing</name></SomeOtherEntity>",
    );

    let project = Project::analyze(dir.path()).unwrap();
    let object = project.object_by_name("thing").unwrap();
    assert_eq!(object.element_type, None);

    let json = serde_json::to_value(object).unwrap();
    assert!(json["element_type"].is_null());
}

#[test]
fn test_exclude_patterns_skip_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Keywords/Helper.groovy", "package a\n@Keyword\ndef go() {}\n");
    write(dir.path(), "Keywords/HelperBackup.groovy", "package a\n@Keyword\ndef go() {}\n");

    let config = Config {
        exclude: vec!["*Backup.groovy".to_string()],
        ..Config::default()
    };
    let project = Project::analyze_with_config(dir.path(), config).unwrap();
    assert_eq!(project.keywords().len(), 1);
}

#[test]
fn test_exclude_patterns_apply_below_project_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Archive").join("shop");
    write(&root, "Test Cases/Login.tc", "<TestCaseEntity><name>Login</name></TestCaseEntity>");
    write(&root, "Test Cases/Archive/Old.tc", "<TestCaseEntity><name>Old</name></TestCaseEntity>");
    write(&root, "Keywords/Helper.groovy", "package a\n@Keyword\ndef go() {}\n");

    let config = Config {
        exclude: vec!["**/Archive/**".to_string()],
        ..Config::default()
    };
    let project = Project::analyze_with_config(&root, config).unwrap();

    assert_eq!(project.test_cases().len(), 1);
    assert!(project.test_case_by_name("Login").is_some());
    assert_eq!(project.keywords().len(), 1);
}

#[test]
fn test_renamed_folders_from_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Library/Helper.groovy", "package lib\n@Keyword\ndef go() {}\n");
    write(dir.path(), "Keywords/Ignored.groovy", "package other\n@Keyword\ndef skip() {}\n");

    let mut config = Config::default();
    config.folders.keywords = "Library".to_string();
    let project = Project::analyze_with_config(dir.path(), config).unwrap();

    assert_eq!(project.keywords().len(), 1);
    assert_eq!(project.keywords().as_slice()[0].package, "lib");
}

#[test]
fn test_analysis_is_repeatable() {
    let first = Project::analyze(&fixture_project()).unwrap();
    let second = Project::analyze(&fixture_project()).unwrap();

    let names = |p: &Project| -> Vec<String> {
        p.test_cases().iter().map(|tc| tc.relative_path.clone()).collect()
    };
    assert_eq!(names(&first), names(&second));
}
