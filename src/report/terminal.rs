use super::ReportView;
use crate::api::{Analysis, CoverageAnalysis, KatalonApi, ProjectInfo, SearchResults};
use crate::statistics::{Summary, UsageCount};
use colored::Colorize;
use miette::Result;
use std::collections::BTreeMap;

const RULE_WIDTH: usize = 60;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// List unused items by name
    show_unused: bool,
    max_listed: usize,
}

impl TerminalReporter {
    pub fn new(show_unused: bool, max_listed: usize) -> Self {
        Self {
            show_unused,
            max_listed,
        }
    }

    pub fn report(&self, api: &KatalonApi, view: ReportView) -> Result<()> {
        self.print_header(&api.get_project_info());

        match view {
            ReportView::Summary => self.print_summary(&api.get_summary()),
            ReportView::Coverage => self.print_coverage(&api.get_coverage_analysis()),
            ReportView::Analysis => self.print_analysis(&api.get_analysis()),
            ReportView::Dashboard => {
                let dashboard = api.get_dashboard_data();
                self.print_summary(&dashboard.summary);
                self.print_coverage(&dashboard.coverage);
                self.print_analysis(&dashboard.analysis);
            }
            ReportView::Export => {
                let export = api.export_all();
                self.print_summary(&export.summary);
                self.print_coverage(&export.coverage);
                self.print_analysis(&export.analysis);
                println!(
                    "{}",
                    "Full record lists are only included in JSON output (--format json).".dimmed()
                );
            }
        }

        Ok(())
    }

    pub fn report_search<T>(&self, results: &SearchResults<T>, kind: &str, label: impl Fn(&T) -> String) {
        if results.count == 0 {
            println!(
                "{}",
                format!("No {} matching '{}'", kind, results.query).yellow()
            );
            return;
        }

        println!(
            "{}",
            format!("Found {} {} matching '{}':", results.count, kind, results.query)
                .green()
                .bold()
        );
        for item in &results.results {
            println!("  - {}", label(item));
        }
    }

    fn print_header(&self, info: &ProjectInfo) {
        println!();
        println!("{}", "=".repeat(RULE_WIDTH).dimmed());
        println!(
            "{} {}",
            "Analyzing Project:".bold(),
            info.project_name.cyan().bold()
        );
        println!("{}", info.project_path.dimmed());
        println!("{}", "=".repeat(RULE_WIDTH).dimmed());
    }

    fn print_section(&self, title: &str) {
        println!();
        println!("{}", title.yellow().bold());
        println!("{}", "-".repeat(RULE_WIDTH).dimmed());
    }

    fn print_summary(&self, summary: &Summary) {
        self.print_section("PROJECT SUMMARY");
        println!("Test Cases: {}", summary.test_cases.total.to_string().bold());
        self.print_folders(&summary.test_cases.by_folder);
        println!("Test Suites: {}", summary.test_suites.total.to_string().bold());
        println!(
            "Keywords: {} in {} files",
            summary.keywords.total_keywords.to_string().bold(),
            summary.keywords.total_files
        );
        println!(
            "Object Repository Items: {}",
            summary.object_repository.total.to_string().bold()
        );
        for (element_type, count) in &summary.object_repository.by_type {
            println!("    {}: {}", element_type.dimmed(), count);
        }
        println!(
            "Profiles: {} ({} variables)",
            summary.profiles.total.to_string().bold(),
            summary.profiles.total_variables
        );
        if let Some(default) = &summary.profiles.default_profile {
            println!("    {}: {}", "default".dimmed(), default);
        }
        println!("Scripts: {}", summary.scripts.total.to_string().bold());
    }

    fn print_folders(&self, by_folder: &BTreeMap<String, usize>) {
        for (folder, count) in by_folder {
            println!("    {}: {}", folder.dimmed(), count);
        }
    }

    fn print_coverage(&self, coverage: &CoverageAnalysis) {
        let test_cases = &coverage.test_case_coverage;
        self.print_section("TEST CASE COVERAGE");
        println!("Total Test Cases: {}", test_cases.total_test_cases);
        println!("Used in Suites: {}", test_cases.used_in_suites);
        println!("Unused: {}", test_cases.unused);
        println!("Coverage: {}", colored_percentage(test_cases.coverage_percentage));
        self.print_list("Unused test cases", &test_cases.unused_test_cases);
        self.print_list("Referenced but missing", &test_cases.missing_test_cases);

        let keywords = &coverage.keyword_usage;
        self.print_section("KEYWORD USAGE");
        println!("Total Keywords: {}", keywords.total_keywords);
        println!("Used Keywords: {}", keywords.used_keywords);
        println!("Unused Keywords: {}", keywords.unused_keywords.len());
        self.print_ranking("Most Used Keywords", &keywords.most_used, "times");
        let unused: Vec<String> = keywords
            .unused_keywords
            .iter()
            .map(|k| format!("{} ({})", k.name, k.file))
            .collect();
        self.print_list("Unused keywords", &unused);
        self.print_list("Undefined keyword calls", &keywords.undefined_calls);

        let objects = &coverage.object_repository_usage;
        self.print_section("OBJECT REPOSITORY USAGE");
        println!("Total Objects: {}", objects.total_objects);
        println!("Used Objects: {}", objects.used_objects);
        println!("Unused Objects: {}", objects.unused);
        println!("Coverage: {}", colored_percentage(objects.coverage_percentage));
        self.print_list("Unused objects", &objects.unused_objects);
        self.print_list("Referenced but missing", &objects.missing_objects);
    }

    fn print_analysis(&self, analysis: &Analysis) {
        let suites = &analysis.test_suite_analysis;
        self.print_section("TEST SUITE ANALYSIS");
        println!("Total Suites: {}", suites.total_suites);
        println!("Suites with Rerun: {}", suites.suites_with_rerun);
        println!("Suites with Data Binding: {}", suites.suites_with_data_binding);
        println!("Suites with Setup: {}", suites.suites_with_setup);
        println!("Suites with Teardown: {}", suites.suites_with_teardown);
        println!(
            "Average Test Cases per Suite: {:.2}",
            suites.average_test_cases_per_suite
        );

        let imports = &analysis.import_analysis;
        self.print_section("IMPORT ANALYSIS");
        println!("Unique Imports: {}", imports.total_unique_imports);
        self.print_ranking("Most Common Imports", &imports.most_common_imports, "uses");
    }

    fn print_ranking(&self, title: &str, entries: &[UsageCount], unit: &str) {
        if entries.is_empty() {
            return;
        }
        println!();
        println!("{}:", title);
        for entry in entries.iter().take(self.max_listed) {
            println!("  - {}: {} {}", entry.name.cyan(), entry.count, unit);
        }
    }

    fn print_list(&self, title: &str, items: &[String]) {
        if !self.show_unused || items.is_empty() {
            return;
        }
        println!("{}:", title.dimmed());
        for item in items.iter().take(self.max_listed) {
            println!("  - {}", item);
        }
        if items.len() > self.max_listed {
            println!(
                "  {}",
                format!("... and {} more", items.len() - self.max_listed).dimmed()
            );
        }
    }
}

fn colored_percentage(value: f64) -> colored::ColoredString {
    let text = format!("{:.2}%", value);
    if value >= 80.0 {
        text.green().bold()
    } else if value >= 50.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}
