mod loader;

pub use loader::{Config, FolderConfig, ReportConfig, StatisticsConfig};
