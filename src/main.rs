//! Stroke Analyzer - handwriting tracing analysis
//!
//! Analyses captured sample logs and exports test reports.

use std::path::{Path, PathBuf};
use stroke_analyzer::app::cli::{Cli, Commands, ConfigAction};
use stroke_analyzer::app::config::Config;
use stroke_analyzer::workflow::analyzer::{AnalysisInput, StrokeAnalyzer};
use stroke_analyzer::workflow::report::TestReport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config_path = cli.config_path();

    // Execute command
    match cli.command {
        Commands::Analyze { input, output } => {
            let config = load_config(cli.config.as_ref())?;
            run_analyze(&input, output, &config)?;
        }
        Commands::Inspect { report } => {
            run_inspect(&report)?;
        }
        Commands::Config { action: ConfigAction::Show } => {
            let config = load_config(cli.config.as_ref())?;
            println!("Configuration ({:?}):\n", config_path);
            println!("{}", config.to_toml()?);
        }
        Commands::Config {
            action: ConfigAction::Init { force },
        } => {
            run_config_init(&config_path, force)?;
        }
    }

    Ok(())
}

/// Load an explicit config file, or the default one when it exists
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    Ok(config)
}

fn run_analyze(input_path: &Path, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    if !input_path.exists() {
        anyhow::bail!("Input file not found: {:?}", input_path);
    }

    info!("Analyzing {:?}", input_path);
    let content = std::fs::read_to_string(input_path)?;
    let input: AnalysisInput = serde_json::from_str(&content)?;

    let analyzer = StrokeAnalyzer::with_config(config.analysis.clone());
    let analysis = analyzer.analyze(&input)?;
    let report = TestReport::new(&input, analysis);

    let output_path = output.unwrap_or_else(|| report.default_path(&config.export.output_dir));
    report.save(&output_path, config.export.pretty)?;

    print_summary(&report);
    println!("\nReport saved to {}", output_path.display());

    Ok(())
}

fn run_inspect(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Report not found: {:?}", path);
    }

    let report = TestReport::load(path)?;
    print_summary(&report);

    let strokes = report.analysis.drawing_metrics.total_strokes;
    if strokes == 0 {
        warn!(path = %path.display(), "report contains no strokes");
    }

    Ok(())
}

fn print_summary(report: &TestReport) {
    let analysis = &report.analysis;
    let metrics = &analysis.drawing_metrics;
    let coverage = &analysis.text_coverage;

    println!("Text: {}", report.original_text);
    println!("Recorded: {}", report.timestamp.to_rfc3339());
    println!("Accuracy: {}%", analysis.accuracy);
    println!(
        "  coverage {:.1}  pattern {:.1}  consistency {:.1}",
        coverage.coverage, coverage.pattern_accuracy, coverage.consistency
    );
    println!(
        "Strokes: {}  ({} samples, {:.2}s, complexity {:.2})",
        metrics.total_strokes,
        report.len(),
        metrics.drawing_time,
        metrics.complexity
    );

    if analysis.indicators.is_empty() {
        println!("Indicators: none");
        return;
    }

    println!("Indicators:");
    for indicator in &analysis.indicators {
        println!(
            "  [{:?}] {:?}: {}",
            indicator.severity, indicator.kind, indicator.description
        );
        for detail in &indicator.details {
            println!("    - {}", detail);
        }
    }
}

fn run_config_init(config_path: &Path, force: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    let defaults = Config::default();
    defaults.save(&config_path.to_path_buf())?;
    std::fs::create_dir_all(&defaults.export.output_dir)?;

    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", defaults.to_toml()?);
    println!("Reports: {:?}", defaults.export.output_dir);

    Ok(())
}
