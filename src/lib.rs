//! katalon-analyzer - Static analysis for Katalon Studio projects
//!
//! This library scans a Katalon Studio project on disk, parses every artifact
//! kind into typed records and computes usage and coverage statistics.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find `.tc`, `.ts`, `.groovy`, `.rs` and `.glbl` files
//! 2. **Parsing** - Read the XML descriptors with quick-xml and scan groovy bodies with regexes
//! 3. **Project Analysis** - Collect records per kind, merging suite scripts into their suites
//! 4. **Statistics** - Coverage, keyword usage, import and suite reports
//! 5. **Facade** - Paginated, searchable, serializable views plus a shared project cache
//! 6. **Reporting** - Colored terminal sections or pretty JSON

pub mod api;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod parser;
pub mod project;
pub mod report;
pub mod statistics;

pub use api::{AnalyzerCache, ApiError, ApiErrorKind, KatalonApi, Page, SearchResults};
pub use config::Config;
pub use discovery::{ArtifactKind, FileFinder};
pub use error::{AnalyzerError, Result};
pub use project::Project;
pub use report::{ReportFormat, ReportView, Reporter};
pub use statistics::ProjectStatistics;
