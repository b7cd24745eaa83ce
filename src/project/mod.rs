//! Project analyzer
//!
//! A [`Project`] performs one full scan of a Katalon project on construction and
//! is read-only afterwards. Re-analyzing means building a new instance.

mod collection;

pub use collection::Collection;

use crate::config::Config;
use crate::discovery::{ArtifactKind, FileFinder};
use crate::error::{AnalyzerError, Result};
use crate::model::{Keyword, KeywordFile, Profile, Script, TestCase, TestObject, TestSuite};
use crate::parser::{
    KeywordParser, ObjectRepositoryParser, ProfileParser, ScriptParser, TestCaseParser,
    TestSuiteParser,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// A keyword search hit together with the file that defines it
#[derive(Debug, Clone, Serialize)]
pub struct KeywordMatch<'a> {
    pub keyword: &'a Keyword,
    pub file: &'a KeywordFile,
}

/// All parsed artifacts of one Katalon project
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    name: String,
    config: Config,
    test_cases: Collection<TestCase>,
    test_suites: Collection<TestSuite>,
    keywords: Collection<KeywordFile>,
    object_repository: Collection<TestObject>,
    profiles: Collection<Profile>,
    scripts: Collection<Script>,
}

impl Project {
    /// Analyze the project at `root` with the default configuration
    pub fn analyze(root: &Path) -> Result<Self> {
        Self::analyze_with_config(root, Config::default())
    }

    /// Analyze the project at `root`
    pub fn analyze_with_config(root: &Path, config: Config) -> Result<Self> {
        if !root.is_dir() {
            return Err(AnalyzerError::InvalidProject(root.to_path_buf()));
        }
        let root = root
            .canonicalize()
            .map_err(|_| AnalyzerError::InvalidProject(root.to_path_buf()))?;
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());

        info!("Analyzing Katalon Studio project: {}", name);
        let start_time = Instant::now();

        let mut project = Self {
            root,
            name,
            config,
            test_cases: Collection::new(),
            test_suites: Collection::new(),
            keywords: Collection::new(),
            object_repository: Collection::new(),
            profiles: Collection::new(),
            scripts: Collection::new(),
        };

        project.scan_test_cases();
        project.scan_test_suites();
        project.scan_keywords();
        project.scan_object_repository();
        project.scan_profiles();
        project.scan_scripts();

        info!(
            "Analysis complete in {:.2?}: {} test cases, {} test suites, {} keyword files, {} test objects, {} profiles, {} scripts",
            start_time.elapsed(),
            project.test_cases.len(),
            project.test_suites.len(),
            project.keywords.len(),
            project.object_repository.len(),
            project.profiles.len(),
            project.scripts.len(),
        );

        Ok(project)
    }

    fn folder(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn scan_test_cases(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = TestCaseParser::new();

        for path in finder.find_kind(&self.root, ArtifactKind::TestCase) {
            if let Some(test_case) = parser.parse(&path, &self.root) {
                self.test_cases.insert(path, test_case);
            }
        }
        debug!("Parsed {} test cases", self.test_cases.len());
    }

    fn scan_test_suites(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = TestSuiteParser::new();

        for path in finder.find_kind(&self.root, ArtifactKind::TestSuite) {
            if let Some(suite) = parser.parse_ts(&path, &self.root) {
                self.test_suites.insert(path, suite);
            }
        }

        // A groovy script merges into the `.ts` suite of the same name in the same folder
        let suites_dir = self.folder(&self.config.folders.test_suites);
        let mut merged = 0;
        for path in finder.find_kind(&suites_dir, ArtifactKind::TestSuiteScript) {
            let Some(script) = parser.parse_groovy(&path) else {
                continue;
            };
            let definition = path.with_extension("ts");
            match self.test_suites.get_mut(&definition) {
                Some(suite) => {
                    suite.script = Some(script);
                    merged += 1;
                }
                None => {
                    let suite = parser.suite_from_script(script, &self.root);
                    self.test_suites.insert(path, suite);
                }
            }
        }
        debug!(
            "Parsed {} test suites ({} with groovy scripts merged)",
            self.test_suites.len(),
            merged
        );
    }

    fn scan_keywords(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = KeywordParser::new();
        let dir = self.folder(&self.config.folders.keywords);

        for path in finder.find_kind(&dir, ArtifactKind::Keyword) {
            if let Some(file) = parser.parse(&path, &self.root) {
                self.keywords.insert(path, file);
            }
        }
        debug!("Parsed {} keyword files", self.keywords.len());
    }

    fn scan_object_repository(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = ObjectRepositoryParser::new();
        let dir = self.folder(&self.config.folders.object_repository);

        for path in finder.find_kind(&dir, ArtifactKind::ObjectRepository) {
            if let Some(object) = parser.parse(&path, &self.root) {
                self.object_repository.insert(path, object);
            }
        }
        debug!("Parsed {} test objects", self.object_repository.len());
    }

    fn scan_profiles(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = ProfileParser::new();
        let dir = self.folder(&self.config.folders.profiles);

        for path in finder.find_kind(&dir, ArtifactKind::Profile) {
            if let Some(profile) = parser.parse(&path, &self.root) {
                self.profiles.insert(path, profile);
            }
        }
        debug!("Parsed {} profiles", self.profiles.len());
    }

    fn scan_scripts(&mut self) {
        let finder = FileFinder::new(&self.config, &self.root);
        let parser = ScriptParser::new();
        let dir = self.folder(&self.config.folders.scripts);

        for path in finder.find_kind(&dir, ArtifactKind::Script) {
            if let Some(script) = parser.parse(&path, &self.root) {
                self.scripts.insert(path, script);
            }
        }
        debug!("Parsed {} scripts", self.scripts.len());
    }

    /// Canonical project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn test_cases(&self) -> &Collection<TestCase> {
        &self.test_cases
    }

    pub fn test_suites(&self) -> &Collection<TestSuite> {
        &self.test_suites
    }

    pub fn keywords(&self) -> &Collection<KeywordFile> {
        &self.keywords
    }

    pub fn object_repository(&self) -> &Collection<TestObject> {
        &self.object_repository
    }

    pub fn profiles(&self) -> &Collection<Profile> {
        &self.profiles
    }

    pub fn scripts(&self) -> &Collection<Script> {
        &self.scripts
    }

    /// Test cases whose name or description contains `query`, ignoring case
    pub fn search_test_cases(&self, query: &str) -> Vec<&TestCase> {
        let query = query.to_lowercase();
        self.test_cases
            .iter()
            .filter(|tc| contains_any(&query, &[tc.name.as_str(), tc.description.as_str()]))
            .collect()
    }

    /// Test suites whose name or description contains `query`, ignoring case
    pub fn search_test_suites(&self, query: &str) -> Vec<&TestSuite> {
        let query = query.to_lowercase();
        self.test_suites
            .iter()
            .filter(|suite| contains_any(&query, &[suite.name.as_str(), suite.description.as_str()]))
            .collect()
    }

    /// Test objects whose name, element type or selector method contains `query`
    pub fn search_object_repository(&self, query: &str) -> Vec<&TestObject> {
        let query = query.to_lowercase();
        self.object_repository
            .iter()
            .filter(|object| {
                let element_type = object.element_type.map(|t| t.as_str()).unwrap_or("");
                contains_any(
                    &query,
                    &[object.name.as_str(), element_type, object.selector_method.as_str()],
                )
            })
            .collect()
    }

    /// Keywords whose name contains `query`, with their defining file
    pub fn search_keywords(&self, query: &str) -> Vec<KeywordMatch<'_>> {
        let query = query.to_lowercase();
        self.keywords
            .iter()
            .flat_map(|file| {
                file.keywords
                    .iter()
                    .map(move |keyword| KeywordMatch { keyword, file })
            })
            .filter(|m| m.keyword.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn test_case_by_name(&self, name: &str) -> Option<&TestCase> {
        self.test_cases.iter().find(|tc| tc.name == name)
    }

    pub fn test_suite_by_name(&self, name: &str) -> Option<&TestSuite> {
        self.test_suites.iter().find(|suite| suite.name == name)
    }

    pub fn object_by_name(&self, name: &str) -> Option<&TestObject> {
        self.object_repository.iter().find(|object| object.name == name)
    }

    pub fn profile_by_name(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    /// First keyword file defining a keyword called `name`
    pub fn keyword_file_by_name(&self, name: &str) -> Option<&KeywordFile> {
        self.keywords
            .iter()
            .find(|file| file.keywords.iter().any(|k| k.name == name))
    }
}

fn contains_any(query: &str, fields: &[&str]) -> bool {
    fields.iter().any(|field| field.to_lowercase().contains(query))
}
