//! Query facade over one analyzed project
//!
//! Every getter returns a serializable view. Views borrow from the facade's
//! project, so callers serialize them or copy what they need.

mod cache;
mod error;

pub use cache::AnalyzerCache;
pub use error::{ApiError, ApiErrorKind, ApiResult};

use crate::config::Config;
use crate::error::Result;
use crate::model::{KeywordFile, Profile, Script, TestCase, TestObject, TestSuite};
use crate::project::{KeywordMatch, Project};
use crate::statistics::{
    ImportAnalysis, KeywordUsage, ObjectRepositoryUsage, ProjectStatistics, Summary,
    TestCaseCoverage, TestSuiteAnalysis,
};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectInfo {
    pub project_name: String,
    pub project_path: String,
}

/// One window of a record list
#[derive(Debug, Serialize)]
pub struct Page<'a, T> {
    pub total: usize,
    pub limit: Option<usize>,
    pub offset: usize,
    pub items: &'a [T],
}

#[derive(Debug, Serialize)]
pub struct SearchResults<T> {
    pub query: String,
    pub count: usize,
    pub results: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct Profiles<'a> {
    pub profiles: &'a [Profile],
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoverageAnalysis {
    pub test_case_coverage: TestCaseCoverage,
    pub object_repository_usage: ObjectRepositoryUsage,
    pub keyword_usage: KeywordUsage,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Analysis {
    pub test_suite_analysis: TestSuiteAnalysis,
    pub import_analysis: ImportAnalysis,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub project_info: ProjectInfo,
    pub summary: Summary,
    pub coverage: CoverageAnalysis,
    pub analysis: Analysis,
}

/// Every record and every report
#[derive(Debug, Serialize)]
pub struct Export<'a> {
    pub project_info: ProjectInfo,
    pub summary: Summary,
    pub test_cases: &'a [TestCase],
    pub test_suites: &'a [TestSuite],
    pub keywords: &'a [KeywordFile],
    pub object_repository: &'a [TestObject],
    pub profiles: &'a [Profile],
    pub scripts: &'a [Script],
    pub coverage: CoverageAnalysis,
    pub analysis: Analysis,
}

/// Facade owning one analyzed [`Project`]
#[derive(Debug)]
pub struct KatalonApi {
    project: Project,
}

impl KatalonApi {
    /// Analyze the project at `path` using its configuration file, if any
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Config::from_default_locations(path)?;
        Self::with_config(path, config)
    }

    pub fn with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let project = Project::analyze_with_config(path.as_ref(), config)?;
        Ok(Self { project })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn statistics(&self) -> ProjectStatistics<'_> {
        ProjectStatistics::new(&self.project)
    }

    pub fn get_project_info(&self) -> ProjectInfo {
        ProjectInfo {
            project_name: self.project.name().to_string(),
            project_path: self.project.root().display().to_string(),
        }
    }

    pub fn get_summary(&self) -> Summary {
        self.statistics().summary()
    }

    pub fn get_test_cases(&self, limit: Option<usize>, offset: usize) -> ApiResult<Page<'_, TestCase>> {
        paginate(self.project.test_cases().as_slice(), limit, offset)
    }

    pub fn get_test_suites(&self, limit: Option<usize>, offset: usize) -> ApiResult<Page<'_, TestSuite>> {
        paginate(self.project.test_suites().as_slice(), limit, offset)
    }

    pub fn get_keywords(&self, limit: Option<usize>, offset: usize) -> ApiResult<Page<'_, KeywordFile>> {
        paginate(self.project.keywords().as_slice(), limit, offset)
    }

    pub fn get_object_repository(
        &self,
        limit: Option<usize>,
        offset: usize,
    ) -> ApiResult<Page<'_, TestObject>> {
        paginate(self.project.object_repository().as_slice(), limit, offset)
    }

    pub fn get_profiles(&self) -> Profiles<'_> {
        Profiles {
            profiles: self.project.profiles().as_slice(),
        }
    }

    pub fn get_coverage_analysis(&self) -> CoverageAnalysis {
        let stats = self.statistics();
        CoverageAnalysis {
            test_case_coverage: stats.test_case_coverage(),
            object_repository_usage: stats.object_repository_usage(),
            keyword_usage: stats.keyword_usage(),
        }
    }

    pub fn get_analysis(&self) -> Analysis {
        let stats = self.statistics();
        Analysis {
            test_suite_analysis: stats.test_suite_analysis(),
            import_analysis: stats.import_analysis(),
        }
    }

    pub fn search_test_cases(&self, query: &str) -> ApiResult<SearchResults<&TestCase>> {
        validate_query(query)?;
        Ok(search_results(query, self.project.search_test_cases(query)))
    }

    pub fn search_test_suites(&self, query: &str) -> ApiResult<SearchResults<&TestSuite>> {
        validate_query(query)?;
        Ok(search_results(query, self.project.search_test_suites(query)))
    }

    pub fn search_keywords(&self, query: &str) -> ApiResult<SearchResults<KeywordMatch<'_>>> {
        validate_query(query)?;
        Ok(search_results(query, self.project.search_keywords(query)))
    }

    pub fn search_object_repository(&self, query: &str) -> ApiResult<SearchResults<&TestObject>> {
        validate_query(query)?;
        Ok(search_results(query, self.project.search_object_repository(query)))
    }

    pub fn get_dashboard_data(&self) -> Dashboard {
        Dashboard {
            project_info: self.get_project_info(),
            summary: self.get_summary(),
            coverage: self.get_coverage_analysis(),
            analysis: self.get_analysis(),
        }
    }

    pub fn export_all(&self) -> Export<'_> {
        Export {
            project_info: self.get_project_info(),
            summary: self.get_summary(),
            test_cases: self.project.test_cases().as_slice(),
            test_suites: self.project.test_suites().as_slice(),
            keywords: self.project.keywords().as_slice(),
            object_repository: self.project.object_repository().as_slice(),
            profiles: self.project.profiles().as_slice(),
            scripts: self.project.scripts().as_slice(),
            coverage: self.get_coverage_analysis(),
            analysis: self.get_analysis(),
        }
    }
}

/// `items[offset..offset + limit]`, clamped to the slice
fn paginate<T>(items: &[T], limit: Option<usize>, offset: usize) -> ApiResult<Page<'_, T>> {
    if limit == Some(0) {
        return Err(ApiError::client("limit must be a positive integer"));
    }

    let start = offset.min(items.len());
    let end = match limit {
        Some(limit) => start.saturating_add(limit).min(items.len()),
        None => items.len(),
    };

    Ok(Page {
        total: items.len(),
        limit,
        offset,
        items: &items[start..end],
    })
}

fn validate_query(query: &str) -> ApiResult<()> {
    if query.is_empty() {
        Err(ApiError::client("search query must not be empty"))
    } else {
        Ok(())
    }
}

fn search_results<T>(query: &str, results: Vec<T>) -> SearchResults<T> {
    SearchResults {
        query: query.to_string(),
        count: results.len(),
        results,
    }
}
