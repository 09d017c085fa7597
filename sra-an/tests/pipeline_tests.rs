//! End-to-end pipeline tests over fixture CSV directories
//!
//! Builds small AttrakDiff/SCM collections in a temp directory, runs the
//! full pipeline, and checks eligibility rules and output files.

use sra_common::config::PipelineConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ATTRAKDIFF_HEADER: &str = "impractical - practical,complicated - simple,dull - creative,boring - exciting,tacky - stylish,amateurish - professional";
const SCM_HEADER: &str = "warm,user-intentioned,trustworthy,competent,capable";

fn write_csv(dir: &Path, name: &str, lines: &[&str]) {
    fs::write(dir.join(name), lines.join("\n") + "\n").unwrap();
}

/// Fixture with one aligned application (youtube), one row-count mismatch
/// (excel), and one application present only on the SCM side (orphan).
fn build_fixture() -> (TempDir, PipelineConfig) {
    let root = TempDir::new().unwrap();
    let attrakdiff_dir = root.path().join("attrakdiff");
    let scm_dir = root.path().join("scm");
    let output_dir = root.path().join("output");
    fs::create_dir_all(&attrakdiff_dir).unwrap();
    fs::create_dir_all(&scm_dir).unwrap();

    write_csv(
        &attrakdiff_dir,
        "attrakdiffyoutube.csv",
        &[
            ATTRAKDIFF_HEADER,
            "practical,simple,creative,exciting,stylish,professional",
            " Quite Practical ,somewhat simple,somewhat dull,quite exciting,neutral,quite professional",
            "neutral,complicated,dull,somewhat boring,tacky,amateurish",
            "somewhat impractical,quite simple,qute creative,somwhat exciting,somewhat stylish,professional",
        ],
    );
    write_csv(
        &scm_dir,
        "scmyoutube.csv",
        &[
            SCM_HEADER,
            "highly applicable,applicable,neutral,applicable,highly applicable",
            "applicable,applicable,does not apply,neutral,applicable",
            "not applicable,neutral,applicable,highly applicable,applicable",
            "neutral,applicable,applicable,applicable,neutral",
        ],
    );

    // Row counts differ (2 vs 3): must be skipped entirely
    write_csv(
        &attrakdiff_dir,
        "attrakdiffexcel.csv",
        &[
            ATTRAKDIFF_HEADER,
            "practical,simple,creative,exciting,stylish,professional",
            "impractical,complicated,dull,boring,tacky,amateurish",
        ],
    );
    write_csv(
        &scm_dir,
        "scmexcel.csv",
        &[
            SCM_HEADER,
            "applicable,applicable,applicable,applicable,applicable",
            "neutral,neutral,neutral,neutral,neutral",
            "does not apply,neutral,applicable,neutral,applicable",
        ],
    );

    // Present only in the SCM collection: never eligible
    write_csv(
        &scm_dir,
        "scmorphan.csv",
        &[SCM_HEADER, "applicable,neutral,applicable,neutral,applicable"],
    );

    let config = PipelineConfig {
        attrakdiff_dir,
        scm_dir,
        output_dir,
    };
    (root, config)
}

#[test]
fn test_pipeline_eligibility_and_outputs() {
    let (_root, config) = build_fixture();
    let report = sra_an::run(&config).unwrap();

    assert_eq!(report.eligible_apps, vec!["youtube"]);
    assert_eq!(report.skipped_apps, vec!["excel"]);

    // Summary CSV: header plus exactly one row, for youtube
    let summary = fs::read_to_string(&report.summary_path).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "service,min_correlation,max_correlation,mean_correlation,median_correlation,abs_mean_correlation"
    );
    assert!(lines[1].starts_with("youtube,"));

    // Images rendered for the eligible application
    assert!(config.output_dir.join(sra_an::HEATMAP_FILE).exists());
    assert!(config.output_dir.join(sra_an::PQ_HQ_SCATTER_FILE).exists());
    assert!(config
        .output_dir
        .join(sra_an::WARMTH_COMPETENCE_SCATTER_FILE)
        .exists());
}

#[test]
fn test_summary_stats_are_bounded_correlations() {
    let (_root, config) = build_fixture();
    let report = sra_an::run(&config).unwrap();

    let summary = fs::read_to_string(&report.summary_path).unwrap();
    let row = summary.lines().nth(1).unwrap();
    let fields: Vec<&str> = row.split(',').collect();
    assert_eq!(fields.len(), 6);

    let values: Vec<f64> = fields[1..].iter().map(|f| f.parse().unwrap()).collect();
    let (min, max, mean, median, abs_mean) =
        (values[0], values[1], values[2], values[3], values[4]);

    assert!((-1.0..=1.0).contains(&min));
    assert!((-1.0..=1.0).contains(&max));
    assert!(min <= mean && mean <= max);
    assert!(min <= median && median <= max);
    assert!((0.0..=1.0).contains(&abs_mean));
}

#[test]
fn test_mismatched_rows_excluded_everywhere() {
    let (_root, config) = build_fixture();
    let report = sra_an::run(&config).unwrap();

    let summary = fs::read_to_string(&report.summary_path).unwrap();
    assert!(!summary.contains("excel"));
    assert!(!summary.contains("orphan"));
    assert!(!report.eligible_apps.contains(&"excel".to_string()));
}

#[test]
fn test_missing_input_directory_is_fatal() {
    let root = TempDir::new().unwrap();
    let config = PipelineConfig {
        attrakdiff_dir: root.path().join("absent_attrakdiff"),
        scm_dir: root.path().join("absent_scm"),
        output_dir: root.path().join("output"),
    };
    assert!(sra_an::run(&config).is_err());
}

#[test]
fn test_empty_collections_produce_empty_outputs() {
    let root = TempDir::new().unwrap();
    let attrakdiff_dir = root.path().join("attrakdiff");
    let scm_dir = root.path().join("scm");
    fs::create_dir_all(&attrakdiff_dir).unwrap();
    fs::create_dir_all(&scm_dir).unwrap();

    let config = PipelineConfig {
        attrakdiff_dir,
        scm_dir,
        output_dir: root.path().join("output"),
    };
    let report = sra_an::run(&config).unwrap();

    assert!(report.eligible_apps.is_empty());
    assert!(report.skipped_apps.is_empty());
    // Heatmap image is skipped when no application is eligible
    assert!(!config.output_dir.join(sra_an::HEATMAP_FILE).exists());
    assert!(report.summary_path.exists());
}
