use clap::Parser;
use colored::Colorize;
use katalon_analyzer::{Config, KatalonApi, ReportFormat, ReportView, Reporter};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::{info, warn};

/// katalon-analyzer - Static analysis for Katalon Studio projects
#[derive(Parser, Debug)]
#[command(name = "katalon-analyzer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Katalon Studio project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (defaults to the config file's report.format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Which part of the analysis to report
    #[arg(long, value_enum, default_value = "dashboard")]
    view: ViewArg,

    /// Search instead of reporting; matches names and descriptions
    #[arg(short, long, value_name = "QUERY")]
    search: Option<String>,

    /// Artifact kind to search
    #[arg(long, value_enum, default_value = "test-cases", requires = "search")]
    search_in: SearchTarget,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum ViewArg {
    Summary,
    Coverage,
    Analysis,
    #[default]
    Dashboard,
    Export,
}

impl From<ViewArg> for ReportView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Summary => ReportView::Summary,
            ViewArg::Coverage => ReportView::Coverage,
            ViewArg::Analysis => ReportView::Analysis,
            ViewArg::Dashboard => ReportView::Dashboard,
            ViewArg::Export => ReportView::Export,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum SearchTarget {
    #[default]
    TestCases,
    TestSuites,
    Keywords,
    Objects,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("katalon-analyzer v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let reporter = build_reporter(&cli, &config);

    let api = analyze(&cli, config)?;

    match &cli.search {
        Some(query) => run_search(&api, &reporter, query, cli.search_in),
        None => reporter.report(&api, cli.view.into()),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so JSON on stdout stays parseable
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)
            .into_diagnostic()
            .wrap_err("Failed to load project config")?
    };

    Ok(config)
}

fn build_reporter(cli: &Cli, config: &Config) -> Reporter {
    let format = match cli.format {
        Some(format) => format.into(),
        None => ReportFormat::from_name(&config.report.format).unwrap_or_else(|| {
            warn!(
                "Unknown report format '{}' in config, using terminal",
                config.report.format
            );
            ReportFormat::Terminal
        }),
    };

    Reporter::new(format, cli.output.clone()).with_config(&config.report)
}

fn analyze(cli: &Cli, config: Config) -> Result<KatalonApi> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;

    let spinner = if cli.quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .into_diagnostic()?
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(format!("Scanning {}...", cli.path.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = KatalonApi::with_config(&cli.path, config);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let api = result
        .into_diagnostic()
        .wrap_err("Error loading project")?;

    if !cli.quiet {
        let summary = api.get_summary();
        eprintln!(
            "{}",
            format!(
                "Scanned {} test cases, {} suites, {} keyword files, {} objects, {} profiles, {} scripts",
                summary.test_cases.total,
                summary.test_suites.total,
                summary.keywords.total_files,
                summary.object_repository.total,
                summary.profiles.total,
                summary.scripts.total
            )
            .green()
        );
    }

    Ok(api)
}

fn run_search(api: &KatalonApi, reporter: &Reporter, query: &str, target: SearchTarget) -> Result<()> {
    match target {
        SearchTarget::TestCases => {
            let results = api.search_test_cases(query).into_diagnostic()?;
            reporter.report_search(&results, "test cases", |tc| {
                format!("{} ({})", tc.name, tc.relative_path)
            })
        }
        SearchTarget::TestSuites => {
            let results = api.search_test_suites(query).into_diagnostic()?;
            reporter.report_search(&results, "test suites", |suite| {
                format!("{} ({} test cases)", suite.name, suite.test_cases.len())
            })
        }
        SearchTarget::Keywords => {
            let results = api.search_keywords(query).into_diagnostic()?;
            reporter.report_search(&results, "keywords", |hit| {
                format!("{} in {}", hit.keyword.name, hit.file.relative_path)
            })
        }
        SearchTarget::Objects => {
            let results = api.search_object_repository(query).into_diagnostic()?;
            reporter.report_search(&results, "objects", |object| {
                format!("{} ({})", object.name, object.relative_path)
            })
        }
    }
}
