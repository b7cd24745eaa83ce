//! Per-artifact parsers
//!
//! Every parser returns `None` for a file it cannot read or parse; the caller
//! skips it and the scan continues.

mod common;
mod keyword;
mod object_repository;
mod profile;
pub mod script;
mod script_file;
mod test_case;
mod test_suite;
pub mod xml;

pub use common::FileIdentity;
pub use keyword::KeywordParser;
pub use object_repository::ObjectRepositoryParser;
pub use profile::ProfileParser;
pub use script::ScriptScanner;
pub use script_file::ScriptParser;
pub use test_case::TestCaseParser;
pub use test_suite::TestSuiteParser;
