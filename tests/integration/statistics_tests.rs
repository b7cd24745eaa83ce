//! Integration tests for the statistics engine

use katalon_analyzer::{Config, Project, ProjectStatistics};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_project() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_project")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn test_case_xml(name: &str) -> String {
    format!("<TestCaseEntity><name>{}</name></TestCaseEntity>", name)
}

fn suite_xml(name: &str, ids: &[&str]) -> String {
    let links: String = ids
        .iter()
        .map(|id| format!("<testCaseLink><testCaseId>{}</testCaseId></testCaseLink>", id))
        .collect();
    format!("<TestSuiteEntity><name>{}</name>{}</TestSuiteEntity>", name, links)
}

// ============================================================================
// Fixture project
// ============================================================================

#[test]
fn test_fixture_summary() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let summary = ProjectStatistics::new(&project).summary();

    assert_eq!(summary.test_cases.total, 4);
    assert_eq!(summary.test_cases.by_folder.get("Test Cases"), Some(&4));
    assert_eq!(summary.test_suites.total, 2);
    assert_eq!(summary.keywords.total_files, 2);
    assert_eq!(summary.keywords.total_keywords, 3);
    assert_eq!(summary.object_repository.total, 4);
    assert_eq!(summary.object_repository.by_type.get("WebElement"), Some(&3));
    assert_eq!(summary.object_repository.by_type.get("MobileElement"), Some(&1));
    assert_eq!(summary.profiles.total, 2);
    assert_eq!(summary.profiles.default_profile.as_deref(), Some("default"));
    assert_eq!(summary.profiles.total_variables, 3);
    assert_eq!(summary.scripts.total, 2);
    assert_eq!(summary.scripts.by_folder.get("Scripts"), Some(&2));
}

#[test]
fn test_fixture_test_case_coverage() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let coverage = ProjectStatistics::new(&project).test_case_coverage();

    assert_eq!(coverage.total_test_cases, 4);
    assert_eq!(coverage.used_in_suites, 3);
    assert_eq!(coverage.unused, 1);
    assert_eq!(coverage.coverage_percentage, 75.0);
    assert_eq!(coverage.unused_test_cases, vec!["Test Cases/Orphan.tc"]);
    assert_eq!(coverage.missing_test_cases, vec!["Test Cases/Deleted Case"]);
}

#[test]
fn test_fixture_keyword_usage() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let usage = ProjectStatistics::new(&project).keyword_usage();

    assert_eq!(usage.total_keywords, 3);
    assert_eq!(usage.used_keywords, 2);
    assert_eq!(usage.unused_keywords.len(), 1);
    assert_eq!(usage.unused_keywords[0].name, "com.example.logout");
    assert_eq!(usage.unused_keywords[0].file, "Keywords/com/example/Auth.groovy");

    assert_eq!(usage.most_used[0].name, "com.example.login");
    assert_eq!(usage.most_used[0].count, 2);
    assert_eq!(usage.usage_count.len(), 3);
    assert_eq!(usage.undefined_calls, vec!["login"]);
}

#[test]
fn test_fixture_object_usage() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let usage = ProjectStatistics::new(&project).object_repository_usage();

    assert_eq!(usage.total_objects, 4);
    assert_eq!(usage.used_objects, 3);
    assert_eq!(usage.unused, 1);
    assert_eq!(usage.coverage_percentage, 75.0);
    assert_eq!(usage.unused_objects, vec!["Page_Cart/btn_Checkout"]);
    assert_eq!(usage.missing_objects, vec!["Page_Gone/btn_Old"]);
}

#[test]
fn test_fixture_import_analysis() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let imports = ProjectStatistics::new(&project).import_analysis();

    assert_eq!(imports.total_unique_imports, 6);
    assert_eq!(
        imports.most_common_imports[0].name,
        "com.kms.katalon.core.webui.keyword.WebUiBuiltInKeywords"
    );
    assert_eq!(imports.most_common_imports[0].count, 4);
    assert_eq!(imports.all_imports.len(), 6);
}

#[test]
fn test_fixture_suite_analysis() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let analysis = ProjectStatistics::new(&project).test_suite_analysis();

    assert_eq!(analysis.total_suites, 2);
    assert_eq!(analysis.suites_with_rerun, 1);
    assert_eq!(analysis.suites_with_data_binding, 1);
    assert_eq!(analysis.suites_with_setup, 1);
    assert_eq!(analysis.suites_with_teardown, 1);
    assert_eq!(analysis.total_test_cases_in_suites, 5);
    assert_eq!(analysis.average_test_cases_per_suite, 2.5);
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_of_three_test_cases_covered() {
    let dir = TempDir::new().unwrap();
    for name in ["A", "B", "C"] {
        write(dir.path(), &format!("Test Cases/{}.tc", name), &test_case_xml(name));
    }
    write(
        dir.path(),
        "Test Suites/Suite.ts",
        &suite_xml("Suite", &["Test Cases/A.tc", "Test Cases/B.tc"]),
    );

    let project = Project::analyze(dir.path()).unwrap();
    let coverage = ProjectStatistics::new(&project).test_case_coverage();

    assert_eq!(coverage.total_test_cases, 3);
    assert_eq!(coverage.used_in_suites, 2);
    assert_eq!(coverage.unused, 1);
    assert_eq!(coverage.coverage_percentage, 66.67);
    assert!(coverage.missing_test_cases.is_empty());
}

#[test]
fn test_ids_without_extension_count_as_used() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Test Cases/A.tc", &test_case_xml("A"));
    write(dir.path(), "Test Suites/Suite.ts", &suite_xml("Suite", &["Test Cases/A"]));

    let project = Project::analyze(dir.path()).unwrap();
    let coverage = ProjectStatistics::new(&project).test_case_coverage();
    assert_eq!(coverage.used_in_suites, 1);
    assert_eq!(coverage.coverage_percentage, 100.0);
}

#[test]
fn test_zero_suites_average_is_zero() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Test Cases/A.tc", &test_case_xml("A"));

    let project = Project::analyze(dir.path()).unwrap();
    let stats = ProjectStatistics::new(&project);

    let analysis = stats.test_suite_analysis();
    assert_eq!(analysis.total_suites, 0);
    assert_eq!(analysis.average_test_cases_per_suite, 0.0);

    let coverage = stats.test_case_coverage();
    assert_eq!(coverage.coverage_percentage, 0.0);
}

#[test]
fn test_empty_project_reports_zero_everywhere() {
    let dir = TempDir::new().unwrap();
    let project = Project::analyze(dir.path()).unwrap();
    let stats = ProjectStatistics::new(&project);

    assert_eq!(stats.test_case_coverage().coverage_percentage, 0.0);
    assert_eq!(stats.object_repository_usage().coverage_percentage, 0.0);
    assert_eq!(stats.keyword_usage().total_keywords, 0);
    assert_eq!(stats.import_analysis().total_unique_imports, 0);
    assert_eq!(stats.summary().profiles.default_profile, None);
}

#[test]
fn test_bare_keyword_call_counts_as_unused() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Keywords/Auth.groovy",
        "package com.example\n\nclass Auth {\n    @Keyword\n    def login(String user, String pass) {}\n}\n",
    );
    write(
        dir.path(),
        "Scripts/Login/Script1.groovy",
        "CustomKeywords.'login'('bob', 'secret')\n",
    );

    let project = Project::analyze(dir.path()).unwrap();
    let usage = ProjectStatistics::new(&project).keyword_usage();

    assert_eq!(usage.total_keywords, 1);
    assert_eq!(usage.used_keywords, 0);
    assert_eq!(usage.unused_keywords[0].name, "com.example.login");
    assert_eq!(usage.undefined_calls, vec!["login"]);
}

#[test]
fn test_objects_outside_object_repository_folder_are_not_counted() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Objects/Page/btn.rs", "<WebElementEntity><name>btn</name></WebElementEntity>");
    write(dir.path(), "Scripts/S/Script1.groovy", "WebUI.click(findTestObject('Page/btn'))\n");

    let mut config = Config::default();
    config.folders.object_repository = "Objects".to_string();
    let project = Project::analyze_with_config(dir.path(), config).unwrap();
    assert_eq!(project.object_repository().len(), 1);

    let usage = ProjectStatistics::new(&project).object_repository_usage();
    assert_eq!(usage.total_objects, 0);
    assert_eq!(usage.used_objects, 0);
    assert_eq!(usage.coverage_percentage, 0.0);
    assert_eq!(usage.missing_objects, vec!["Page/btn"]);
}

#[test]
fn test_most_used_respects_config_limit() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Scripts/S/Script1.groovy",
        "CustomKeywords.'a.x'()\nCustomKeywords.'a.y'()\nCustomKeywords.'a.y'()\nCustomKeywords.'a.z'()\n",
    );

    let mut config = Config::default();
    config.statistics.most_used_keywords = 2;
    let project = Project::analyze_with_config(dir.path(), config).unwrap();
    let usage = ProjectStatistics::new(&project).keyword_usage();

    let names: Vec<&str> = usage.most_used.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["a.y", "a.x"]);
    assert_eq!(usage.usage_count.len(), 3);
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_totals_equal_used_plus_unused() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let stats = ProjectStatistics::new(&project);

    let coverage = stats.test_case_coverage();
    assert_eq!(coverage.total_test_cases, coverage.used_in_suites + coverage.unused);
    assert_eq!(coverage.unused, coverage.unused_test_cases.len());

    let keywords = stats.keyword_usage();
    assert_eq!(keywords.total_keywords, keywords.used_keywords + keywords.unused_keywords.len());

    let objects = stats.object_repository_usage();
    assert_eq!(objects.total_objects, objects.used_objects + objects.unused);
    assert_eq!(objects.unused, objects.unused_objects.len());
}

#[test]
fn test_reports_are_idempotent() {
    let project = Project::analyze(&fixture_project()).unwrap();
    let stats = ProjectStatistics::new(&project);

    assert_eq!(stats.test_case_coverage(), stats.test_case_coverage());
    assert_eq!(stats.keyword_usage(), stats.keyword_usage());
    assert_eq!(stats.object_repository_usage(), stats.object_repository_usage());
    assert_eq!(stats.summary(), stats.summary());
}
