use super::xml::XmlElement;
use crate::discovery::relative_path;
use crate::error::{AnalyzerError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Identity shared by every record: absolute and project-relative path
pub struct FileIdentity {
    pub file_path: PathBuf,
    pub relative_path: String,
}

impl FileIdentity {
    pub fn new(file_path: &Path, project_root: &Path) -> Self {
        Self {
            file_path: file_path.to_path_buf(),
            relative_path: relative_path(file_path, project_root),
        }
    }
}

/// Read a file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))
}

/// Read and parse an XML artifact, returning its root element.
///
/// Unreadable or malformed files are logged and yield `None`.
pub fn load_xml(path: &Path) -> Option<XmlElement> {
    match read_text(path).and_then(|contents| XmlElement::parse(path, &contents)) {
        Ok(root) => Some(root),
        Err(e) => {
            warn!("Skipping {}", e);
            None
        }
    }
}

/// Read a groovy artifact.
///
/// Unreadable files are logged and yield `None`; an empty file is still content.
pub fn load_script(path: &Path) -> Option<String> {
    match read_text(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            warn!("Skipping {}", e);
            None
        }
    }
}
