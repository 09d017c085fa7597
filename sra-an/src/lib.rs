//! sra-an library - Survey Response Analyzer pipeline
//!
//! Batch pipeline over two collections of per-application survey tables:
//! load, normalize responses to numeric scale values, align the two
//! instruments per application, compute cross-instrument correlation
//! blocks, and write the summary table plus heatmap/scatter images.
//!
//! The pipeline is single-threaded and synchronous; applications are
//! independent, and a failure in one (load error, row-count mismatch)
//! only removes that application from the outputs.

use sra_common::config::PipelineConfig;
use sra_common::{Result, Table};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod correlate;
pub mod instrument;
pub mod load;
pub mod mapper;
pub mod plot;
pub mod summary;

use instrument::Instrument;

/// Output file names, overwritten on every run
pub const HEATMAP_FILE: &str = "all_services_correlation_heatmaps.png";
pub const SUMMARY_FILE: &str = "correlation_summary_stats.csv";
pub const PQ_HQ_SCATTER_FILE: &str = "attrakdiff_mean_PQ_vs_HQ.png";
pub const WARMTH_COMPETENCE_SCATTER_FILE: &str = "scm_mean_Warmth_vs_Competence.png";

/// What one pipeline run produced
#[derive(Debug)]
pub struct RunReport {
    /// Applications present in both collections with aligned row counts
    pub eligible_apps: Vec<String>,
    /// Applications skipped for mismatched row counts
    pub skipped_apps: Vec<String>,
    /// Path of the summary CSV
    pub summary_path: PathBuf,
}

/// Run the full analysis pipeline.
///
/// The only fatal errors are missing input directories and unwritable
/// outputs; per-application problems degrade to diagnostics.
pub fn run(config: &PipelineConfig) -> Result<RunReport> {
    config.validate_inputs()?;

    let attrakdiff_raw = load::load_collection(&config.attrakdiff_dir, Instrument::Attrakdiff)?;
    let scm_raw = load::load_collection(&config.scm_dir, Instrument::Scm)?;

    info!(
        "Available applications: attrakdiff = [{}], scm = [{}]",
        join_keys(&attrakdiff_raw),
        join_keys(&scm_raw)
    );

    let attrakdiff_mapped: BTreeMap<String, Table> = attrakdiff_raw
        .iter()
        .map(|(app, table)| (app.clone(), mapper::map_table(table, Instrument::Attrakdiff)))
        .collect();
    let scm_mapped: BTreeMap<String, Table> = scm_raw
        .iter()
        .map(|(app, table)| (app.clone(), mapper::map_table(table, Instrument::Scm)))
        .collect();

    // Applications present in both collections, in sorted order
    let common_apps: Vec<String> = attrakdiff_mapped
        .keys()
        .filter(|app| scm_mapped.contains_key(*app))
        .cloned()
        .collect();
    info!("{} application(s) present in both collections", common_apps.len());

    let mut panels: Vec<(String, correlate::CorrelationBlock)> = Vec::new();
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for app in &common_apps {
        let attrakdiff = &attrakdiff_mapped[app];
        let scm = &scm_mapped[app];

        match correlate::correlation_block(attrakdiff, scm) {
            Ok(block) => {
                match summary::summarize(app, &block) {
                    Some(record) => records.push(record),
                    None => warn!("No defined correlations for {}; omitting summary row", app),
                }
                panels.push((app.clone(), block));
            }
            Err(e) => {
                warn!("Skipping {} due to mismatched row counts ({})", app, e);
                skipped.push(app.clone());
            }
        }
    }

    std::fs::create_dir_all(&config.output_dir)?;

    let summary_path = config.output_dir.join(SUMMARY_FILE);
    summary::write_summary_csv(&summary_path, &records)?;
    info!("Wrote {} summary row(s) to {}", records.len(), summary_path.display());

    let heatmap_path = config.output_dir.join(HEATMAP_FILE);
    plot::render_heatmap_grid(&heatmap_path, &panels)?;

    render_composite_scatters(config, &panels, &attrakdiff_mapped, &scm_mapped)?;

    Ok(RunReport {
        eligible_apps: panels.into_iter().map(|(app, _)| app).collect(),
        skipped_apps: skipped,
        summary_path,
    })
}

/// Compute per-application composite indices and render both scatter plots.
///
/// Only aligned (eligible) applications contribute points; an application
/// missing a required column for an index is left off that plot.
fn render_composite_scatters(
    config: &PipelineConfig,
    panels: &[(String, correlate::CorrelationBlock)],
    attrakdiff_mapped: &BTreeMap<String, Table>,
    scm_mapped: &BTreeMap<String, Table>,
) -> Result<()> {
    let mut pq_hq = Vec::new();
    let mut warmth_competence = Vec::new();

    for (app, _) in panels {
        let attrakdiff = &attrakdiff_mapped[app];
        match (
            summary::pragmatic_quality(attrakdiff),
            summary::hedonic_quality(attrakdiff),
        ) {
            (Some(pq), Some(hq)) => pq_hq.push((app.clone(), pq, hq)),
            _ => warn!("Cannot compute PQ/HQ for {} (missing columns)", app),
        }

        let scm = &scm_mapped[app];
        match (summary::warmth(scm), summary::competence(scm)) {
            (Some(w), Some(c)) => warmth_competence.push((app.clone(), w, c)),
            _ => warn!("Cannot compute Warmth/Competence for {} (missing columns)", app),
        }
    }

    plot::render_scatter(
        &config.output_dir.join(PQ_HQ_SCATTER_FILE),
        "AttrakDiff: Mean Pragmatic vs Hedonic Quality (per app)",
        "Pragmatic Quality (PQ)",
        "Hedonic Quality (HQ)",
        &pq_hq,
        plotters::style::RGBColor(68, 119, 170),
    )?;

    plot::render_scatter(
        &config.output_dir.join(WARMTH_COMPETENCE_SCATTER_FILE),
        "SCM: Mean Warmth vs Competence (per app)",
        "Warmth",
        "Competence",
        &warmth_competence,
        plotters::style::RGBColor(238, 119, 51),
    )?;

    Ok(())
}

fn join_keys(tables: &BTreeMap<String, Table>) -> String {
    tables.keys().cloned().collect::<Vec<_>>().join(", ")
}
