//! Statistics engine
//!
//! Every report is recomputed from the project's collections on each call.
//! Percentages and averages are rounded to two decimals and are 0 when the
//! denominator is 0.

mod tally;

pub use tally::{Tally, UsageCount};

use crate::config::StatisticsConfig;
use crate::project::Project;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

const OBJECT_REPOSITORY_PREFIX: &str = "Object Repository/";

/// Artifact counts grouped by top-level folder
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderSummary {
    pub total: usize,
    pub by_folder: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordSummary {
    pub total_files: usize,
    pub total_keywords: usize,
    pub by_folder: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObjectSummary {
    pub total: usize,
    pub by_folder: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileSummary {
    pub total: usize,
    pub default_profile: Option<String>,
    pub total_variables: usize,
}

/// Per-kind counts for the whole project
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub test_cases: FolderSummary,
    pub test_suites: FolderSummary,
    pub keywords: KeywordSummary,
    pub object_repository: ObjectSummary,
    pub profiles: ProfileSummary,
    pub scripts: FolderSummary,
}

/// Which test cases are referenced by at least one suite
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestCaseCoverage {
    pub total_test_cases: usize,
    pub used_in_suites: usize,
    pub unused: usize,
    pub coverage_percentage: f64,
    pub unused_test_cases: Vec<String>,
    /// Suite references that resolve to no test case
    pub missing_test_cases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnusedKeyword {
    pub name: String,
    pub file: String,
}

/// Custom keyword definitions against their call sites
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordUsage {
    pub total_keywords: usize,
    pub used_keywords: usize,
    pub unused_keywords: Vec<UnusedKeyword>,
    pub most_used: Vec<UsageCount>,
    pub usage_count: Vec<UsageCount>,
    /// Called names with no matching definition
    pub undefined_calls: Vec<String>,
}

/// Test objects against `findTestObject` call sites
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ObjectRepositoryUsage {
    pub total_objects: usize,
    pub used_objects: usize,
    pub unused: usize,
    pub coverage_percentage: f64,
    pub unused_objects: Vec<String>,
    pub missing_objects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportAnalysis {
    pub total_unique_imports: usize,
    pub most_common_imports: Vec<UsageCount>,
    pub all_imports: Vec<UsageCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TestSuiteAnalysis {
    pub total_suites: usize,
    pub suites_with_rerun: usize,
    pub suites_with_data_binding: usize,
    pub suites_with_setup: usize,
    pub suites_with_teardown: usize,
    pub total_test_cases_in_suites: usize,
    pub average_test_cases_per_suite: f64,
}

/// Computes reports over a borrowed [`Project`]
pub struct ProjectStatistics<'a> {
    project: &'a Project,
    config: &'a StatisticsConfig,
}

impl<'a> ProjectStatistics<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            config: &project.config().statistics,
        }
    }

    pub fn summary(&self) -> Summary {
        let project = self.project;

        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for object in project.object_repository() {
            let element_type = object
                .element_type
                .map(|t| t.as_str())
                .unwrap_or("Unknown");
            *by_type.entry(element_type.to_string()).or_insert(0) += 1;
        }

        let default_profile = project
            .profiles()
            .iter()
            .find(|p| p.is_default)
            .map(|p| p.name.clone());

        Summary {
            test_cases: FolderSummary {
                total: project.test_cases().len(),
                by_folder: group_by_folder(project.test_cases().iter().map(|t| &t.relative_path)),
            },
            test_suites: FolderSummary {
                total: project.test_suites().len(),
                by_folder: group_by_folder(project.test_suites().iter().map(|s| &s.relative_path)),
            },
            keywords: KeywordSummary {
                total_files: project.keywords().len(),
                total_keywords: project.keywords().iter().map(|f| f.keywords.len()).sum(),
                by_folder: group_by_folder(project.keywords().iter().map(|f| &f.relative_path)),
            },
            object_repository: ObjectSummary {
                total: project.object_repository().len(),
                by_folder: group_by_folder(
                    project.object_repository().iter().map(|o| &o.relative_path),
                ),
                by_type,
            },
            profiles: ProfileSummary {
                total: project.profiles().len(),
                default_profile,
                total_variables: project
                    .profiles()
                    .iter()
                    .map(|p| p.global_variables.len())
                    .sum(),
            },
            scripts: FolderSummary {
                total: project.scripts().len(),
                by_folder: group_by_folder(project.scripts().iter().map(|s| &s.relative_path)),
            },
        }
    }

    pub fn test_case_coverage(&self) -> TestCaseCoverage {
        let referenced: Vec<&str> = self
            .project
            .test_suites()
            .iter()
            .flat_map(|suite| suite.test_cases.iter())
            .map(|link| link.test_case_id.as_str())
            .collect();
        let referenced_set: HashSet<&str> = referenced.iter().copied().collect();

        let mut seen = HashSet::new();
        let mut known = HashSet::new();
        let mut used = 0;
        let mut unused_test_cases = Vec::new();

        for test_case in self.project.test_cases() {
            let path = test_case.relative_path.as_str();
            if !seen.insert(path) {
                continue;
            }
            let id = path.strip_suffix(".tc").unwrap_or(path);
            known.insert(path);
            known.insert(id);

            if referenced_set.contains(path) || referenced_set.contains(id) {
                used += 1;
            } else {
                unused_test_cases.push(path.to_string());
            }
        }

        let total = seen.len();
        TestCaseCoverage {
            total_test_cases: total,
            used_in_suites: used,
            unused: total - used,
            coverage_percentage: percentage(used, total),
            unused_test_cases,
            missing_test_cases: unresolved(referenced, &known),
        }
    }

    pub fn keyword_usage(&self) -> KeywordUsage {
        let project = self.project;

        let mut calls = Tally::new();
        for script in project.scripts() {
            calls.extend(&script.calls.custom_keyword_calls);
        }
        for suite in project.test_suites() {
            calls.extend(suite.custom_keyword_calls());
        }

        let mut defined = HashSet::new();
        let mut used = 0;
        let mut unused_keywords = Vec::new();

        for file in project.keywords() {
            for keyword in &file.keywords {
                let full_name = file.full_name(keyword);
                if calls.contains(&full_name) {
                    if defined.insert(full_name) {
                        used += 1;
                    }
                } else if defined.insert(full_name.clone()) {
                    unused_keywords.push(UnusedKeyword {
                        name: full_name,
                        file: file.relative_path.clone(),
                    });
                }
            }
        }

        let undefined_calls = calls
            .entries()
            .iter()
            .filter(|entry| !defined.contains(&entry.name))
            .map(|entry| entry.name.clone())
            .collect();

        KeywordUsage {
            total_keywords: defined.len(),
            used_keywords: used,
            unused_keywords,
            most_used: calls.most_common(self.config.most_used_keywords),
            usage_count: calls.entries().to_vec(),
            undefined_calls,
        }
    }

    pub fn object_repository_usage(&self) -> ObjectRepositoryUsage {
        let project = self.project;

        let calls: Vec<&str> = project
            .scripts()
            .iter()
            .flat_map(|s| s.calls.test_object_calls.iter())
            .chain(project.test_suites().iter().flat_map(|s| s.test_object_calls().iter()))
            .map(String::as_str)
            .collect();
        let called: HashSet<&str> = calls.iter().copied().collect();

        let mut known = HashSet::new();
        let mut used = 0;
        let mut unused_objects = Vec::new();

        // Objects whose relative path lacks the folder prefix are left out of the total
        for object in project.object_repository() {
            if !object.relative_path.contains(OBJECT_REPOSITORY_PREFIX) {
                continue;
            }
            let mut logical = object.relative_path.replace(OBJECT_REPOSITORY_PREFIX, "");
            if logical.ends_with(".rs") {
                logical.truncate(logical.len() - ".rs".len());
            }
            if known.contains(logical.as_str()) {
                continue;
            }

            if called.contains(logical.as_str()) {
                used += 1;
            } else {
                unused_objects.push(logical.clone());
            }
            known.insert(logical);
        }

        let known_refs: HashSet<&str> = known.iter().map(String::as_str).collect();
        let total = known.len();
        ObjectRepositoryUsage {
            total_objects: total,
            used_objects: used,
            unused: total - used,
            coverage_percentage: percentage(used, total),
            unused_objects,
            missing_objects: unresolved(calls, &known_refs),
        }
    }

    pub fn import_analysis(&self) -> ImportAnalysis {
        let project = self.project;

        let mut imports = Tally::new();
        for script in project.scripts() {
            imports.extend(&script.calls.imports);
        }
        for suite in project.test_suites() {
            imports.extend(suite.imports());
        }
        for file in project.keywords() {
            imports.extend(&file.imports);
        }

        ImportAnalysis {
            total_unique_imports: imports.entries().len(),
            most_common_imports: imports.most_common(self.config.top_imports),
            all_imports: imports.entries().to_vec(),
        }
    }

    pub fn test_suite_analysis(&self) -> TestSuiteAnalysis {
        let suites = self.project.test_suites();
        let total_links: usize = suites.iter().map(|s| s.test_cases.len()).sum();

        TestSuiteAnalysis {
            total_suites: suites.len(),
            suites_with_rerun: suites.iter().filter(|s| s.is_rerun).count(),
            suites_with_data_binding: suites.iter().filter(|s| s.uses_data_binding()).count(),
            suites_with_setup: suites.iter().filter(|s| s.has_setup()).count(),
            suites_with_teardown: suites.iter().filter(|s| s.has_teardown()).count(),
            total_test_cases_in_suites: total_links,
            average_test_cases_per_suite: ratio(total_links, suites.len()),
        }
    }
}

/// First path component, or `root` for files directly in the project
fn folder_of(relative_path: &str) -> &str {
    relative_path
        .split_once('/')
        .map(|(folder, _)| folder)
        .unwrap_or("root")
}

fn group_by_folder<'s>(paths: impl Iterator<Item = &'s String>) -> BTreeMap<String, usize> {
    let mut groups = BTreeMap::new();
    for path in paths {
        *groups.entry(folder_of(path).to_string()).or_insert(0) += 1;
    }
    groups
}

/// Distinct references absent from `known`, in first-seen order
fn unresolved(references: Vec<&str>, known: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|r| !known.contains(r) && seen.insert(*r))
        .map(str::to_string)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round2(numerator as f64 / denominator as f64)
    }
}

fn percentage(used: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(used as f64 / total as f64 * 100.0)
    }
}
