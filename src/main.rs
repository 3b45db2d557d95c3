use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

use chat_stats::config::AppConfig;
use chat_stats::logging::{init_logging, OperationTimer};
use chat_stats::pipeline::AnalysisPipeline;
use chat_stats::render::{log_written, SvgRenderer};
use chat_stats::source::DialogDirectory;
use chat_stats::validation::InputValidator;

#[derive(Parser)]
#[command(author, version, about = "Frequency charts from exported chat dialogs", long_about = None)]
struct Cli {
    /// Maximum number of dialog files to read
    #[arg(long)]
    dialog_amount: Option<usize>,

    /// Directory holding one CSV export per dialog
    #[arg(long)]
    dialogs_dir: Option<PathBuf>,

    /// Directory the SVG charts are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Extra configuration file layered over the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let the command line win
    let mut config = AppConfig::load_from(cli.config.clone()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli)?;

    if cli.print_config {
        #[allow(clippy::print_stdout)]
        {
            print!("{}", config.to_yaml()?);
        }
        return Ok(());
    }

    // Keep the guard alive so the file appender flushes on exit
    let _guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(Path::new),
        config.logging.format == "json",
    )?;

    info!("Starting chat-stats");
    let timer = OperationTimer::new("run");

    let source = DialogDirectory::new(&config.input.dialogs_dir, config.input.max_dialogs);
    let mut renderer = SvgRenderer::new(
        Path::new(&config.report.output_dir),
        (config.report.width, config.report.height),
    )
    .with_context(|| format!("Failed to prepare output directory {}", config.report.output_dir))?;

    let mut pipeline = AnalysisPipeline::new(&config)?;
    pipeline
        .ingest(&source)
        .with_context(|| format!("Failed to ingest dialogs from {}", config.input.dialogs_dir))?;
    pipeline.emit(&mut renderer).context("Failed to render charts")?;

    log_written(&renderer);
    info!("Run summary:\n{}", pipeline.metrics().summary());
    timer.finish();

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) -> Result<()> {
    if let Some(amount) = cli.dialog_amount {
        InputValidator::validate_dialog_amount(amount)?;
        config.input.max_dialogs = Some(amount);
    }

    if let Some(dir) = &cli.dialogs_dir {
        InputValidator::validate_dialog_dir(dir)?;
        config.input.dialogs_dir = dir.to_string_lossy().into_owned();
    }

    if let Some(dir) = &cli.output_dir {
        config.report.output_dir = dir.to_string_lossy().into_owned();
    }

    if let Some(level) = &cli.log_level {
        config.logging.level = level.to_lowercase();
    }

    config.validate()?;
    Ok(())
}
