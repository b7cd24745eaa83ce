mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::api::{KatalonApi, SearchResults};
use crate::config::ReportConfig;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    /// Parse the `report.format` config value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "terminal" => Some(ReportFormat::Terminal),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Which part of the analysis to report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportView {
    Summary,
    Coverage,
    Analysis,
    #[default]
    Dashboard,
    Export,
}

/// Reporter for project analysis results
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_unused: bool,
    max_listed: usize,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        let defaults = ReportConfig::default();
        Self {
            format,
            output_path,
            show_unused: defaults.show_unused,
            max_listed: defaults.max_listed,
        }
    }

    pub fn with_config(mut self, config: &ReportConfig) -> Self {
        self.show_unused = config.show_unused;
        self.max_listed = config.max_listed;
        self
    }

    /// Report one view of the analyzed project
    pub fn report(&self, api: &KatalonApi, view: ReportView) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                let reporter = TerminalReporter::new(self.show_unused, self.max_listed);
                reporter.report(api, view)
            }
            ReportFormat::Json => {
                let reporter = JsonReporter::new(self.output_path.clone());
                match view {
                    ReportView::Summary => reporter.write(&api.get_summary()),
                    ReportView::Coverage => reporter.write(&api.get_coverage_analysis()),
                    ReportView::Analysis => reporter.write(&api.get_analysis()),
                    ReportView::Dashboard => reporter.write(&api.get_dashboard_data()),
                    ReportView::Export => reporter.write(&api.export_all()),
                }
            }
        }
    }

    /// Report search hits, using `label` for the terminal listing
    pub fn report_search<T: Serialize>(
        &self,
        results: &SearchResults<T>,
        kind: &str,
        label: impl Fn(&T) -> String,
    ) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => {
                TerminalReporter::new(self.show_unused, self.max_listed)
                    .report_search(results, kind, label);
                Ok(())
            }
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).write(results),
        }
    }
}
