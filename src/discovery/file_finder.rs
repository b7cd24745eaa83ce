use crate::config::Config;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Kind of Katalon artifact, with the file extension it is stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    TestCase,
    TestSuite,
    TestSuiteScript,
    Keyword,
    ObjectRepository,
    Profile,
    Script,
}

impl ArtifactKind {
    /// File extension (with leading dot) used by this kind
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::TestCase => ".tc",
            ArtifactKind::TestSuite => ".ts",
            ArtifactKind::TestSuiteScript => ".groovy",
            ArtifactKind::Keyword => ".groovy",
            ArtifactKind::ObjectRepository => ".rs",
            ArtifactKind::Profile => ".glbl",
            ArtifactKind::Script => ".groovy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::TestCase => "test case",
            ArtifactKind::TestSuite => "test suite",
            ArtifactKind::TestSuiteScript => "test suite script",
            ArtifactKind::Keyword => "keyword file",
            ArtifactKind::ObjectRepository => "test object",
            ArtifactKind::Profile => "profile",
            ArtifactKind::Script => "script",
        }
    }
}

/// Recursively find every file below `root` whose name ends with `extension`.
///
/// The match is a case-sensitive suffix match on the file name, so `.ts` never
/// matches `.tsx`. Entries are visited in file-name order, which keeps the result
/// stable between runs. A missing root yields an empty list; unreadable entries
/// are skipped.
pub fn find(root: &Path, extension: &str) -> Vec<PathBuf> {
    if !root.exists() {
        trace!("Directory does not exist: {}", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                trace!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(extension))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Path of `path` relative to `root`, always `/`-separated.
///
/// Falls back to the full path when `path` is not below `root`.
pub fn relative_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

/// File finder for discovering artifact files in a project
pub struct FileFinder<'a> {
    config: &'a Config,
    root: &'a Path,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config, root: &'a Path) -> Self {
        Self { config, root }
    }

    /// Find all files of `kind` below `dir`, honouring the configured exclusions.
    ///
    /// Exclusion patterns see the path relative to the project root, so the
    /// directories above the project never match.
    pub fn find_kind(&self, dir: &Path, kind: ArtifactKind) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = find(dir, kind.extension())
            .into_iter()
            .filter(|path| {
                if self.config.should_exclude(&relative_path(path, self.root)) {
                    trace!("Excluding: {}", path.display());
                    false
                } else {
                    true
                }
            })
            .collect();

        debug!(
            "Found {} {} files in {}",
            files.len(),
            kind.display_name(),
            dir.display()
        );
        files
    }
}
