use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a Katalon project analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder names of the artifact kinds that live below the project root
    pub folders: FolderConfig,

    /// Patterns to exclude from analysis
    pub exclude: Vec<String>,

    /// Statistics configuration
    pub statistics: StatisticsConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    pub keywords: String,
    pub object_repository: String,
    pub profiles: String,
    pub scripts: String,
    pub test_suites: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Number of entries in the "most used keywords" ranking
    pub most_used_keywords: usize,

    /// Number of entries in the "most common imports" ranking
    pub top_imports: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: terminal, json
    pub format: String,

    /// List unused items by name in terminal output
    pub show_unused: bool,

    /// Maximum number of items listed per section in terminal output
    pub max_listed: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folders: FolderConfig::default(),
            exclude: vec![],
            statistics: StatisticsConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            keywords: "Keywords".to_string(),
            object_repository: "Object Repository".to_string(),
            profiles: "Profiles".to_string(),
            scripts: "Scripts".to_string(),
            test_suites: "Test Suites".to_string(),
        }
    }
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            most_used_keywords: 10,
            top_imports: 20,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "terminal".to_string(),
            show_unused: true,
            max_listed: 5,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| AnalyzerError::io(path, e))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| {
                AnalyzerError::Config(format!("{}: {}", path.display(), e))
            }),
            "toml" => toml::from_str(&contents).map_err(|e| {
                AnalyzerError::Config(format!("{}: {}", path.display(), e))
            }),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents).map_err(|e| {
                        AnalyzerError::Config(format!("{}: {}", path.display(), e))
                    })
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".katalon-analyzer.yml",
            ".katalon-analyzer.yaml",
            ".katalon-analyzer.toml",
            "katalon-analyzer.yml",
            "katalon-analyzer.yaml",
            "katalon-analyzer.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check if a project-relative path matches one of the exclusion patterns
    pub fn should_exclude(&self, relative: &str) -> bool {
        let path_str = relative.replace('\\', "/");
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Simple glob matching for patterns like "*Backup.groovy" or "**/Archive/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with('*') && !pattern.contains('/') {
        return text.ends_with(&pattern[1..]);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        let file_name = text.rsplit('/').next().unwrap_or(text);
        return file_name.starts_with(prefix);
    }

    if pattern.contains("**") {
        // "**/Archive/**" matches an Archive directory anywhere, never a substring of one
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let dir_name = pattern
                .trim_start_matches("**/")
                .trim_end_matches("/**")
                .trim_matches('/');
            return text.starts_with(&format!("{}/", dir_name))
                || text.contains(&format!("/{}/", dir_name));
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if prefix.is_empty() && suffix.is_empty() {
                return true;
            }

            if prefix.is_empty() {
                return text.ends_with(suffix) || text.contains(&format!("/{}", suffix));
            }

            if suffix.is_empty() {
                return text.starts_with(prefix) || text.contains(&format!("{}/", prefix));
            }

            return (text.starts_with(prefix) || text.contains(&format!("/{}/", prefix)))
                && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)));
        }
    }

    text == pattern
}
