//! sra-an (Survey Response Analyzer) - batch correlation pipeline
//!
//! Normalizes AttrakDiff and SCM survey responses to numeric scale values,
//! correlates the two instruments per application, and writes a summary
//! table plus heatmap and scatter images to the output directory.

use anyhow::Result;
use clap::Parser;
use sra_common::config::PipelineConfig;
use tracing::info;

/// Command-line arguments; every value can also come from the environment
/// or the TOML config file (CLI wins).
#[derive(Parser, Debug)]
#[command(name = "sra-an", version, about = "Survey response correlation analyzer")]
struct Args {
    /// Directory of per-application AttrakDiff CSV files
    #[arg(long, env = "SRA_ATTRAKDIFF_DIR")]
    attrakdiff_dir: Option<String>,

    /// Directory of per-application SCM CSV files
    #[arg(long, env = "SRA_SCM_DIR")]
    scm_dir: Option<String>,

    /// Directory output files are written to
    #[arg(long, env = "SRA_OUTPUT_DIR")]
    output_dir: Option<String>,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Survey Response Analyzer (sra-an) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = PipelineConfig::resolve(
        args.attrakdiff_dir.as_deref(),
        args.scm_dir.as_deref(),
        args.output_dir.as_deref(),
    );

    info!(
        "Input: attrakdiff = {}, scm = {}; output = {}",
        config.attrakdiff_dir.display(),
        config.scm_dir.display(),
        config.output_dir.display()
    );

    let report = sra_an::run(&config)?;

    info!(
        "Analysis complete: {} application(s) processed, {} skipped; outputs in {}",
        report.eligible_apps.len(),
        report.skipped_apps.len(),
        config.output_dir.display()
    );

    Ok(())
}
