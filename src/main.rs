use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod error;
mod geometry;
mod interp;
mod io;
mod leading_edge;
mod plot;
mod surface;

use cli::get_args;
use config::Config;
use io::reference::{ReferenceProfile, read_reference};
use io::table::{SummaryRow, format_table, write_csv};
use leading_edge::{align_min, le_pressure, min_of};
use plot::{Curve, plot_surface_pressure};
use surface::{SurfacePressure, get_surface_pressure};

// Everything the report needs, in case order
struct Comparison {
    cases: Vec<(String, SurfacePressure)>,
    reference: ReferenceProfile,
    rows: Vec<SummaryRow>,
}

fn main() -> Result<()> {
    let args = get_args();

    init_logging(args.verbose)?;

    let config = config::load(args.config.as_deref())?;
    let root = args.root_dir;

    let comparison = compare(&root, &config)?;

    println!("{}", format_table(&comparison.rows));

    if let Some(table_path) = &args.table {
        write_csv(table_path, &comparison.rows)?;
        info!("Summary table saved to {:?}", table_path);
    }

    if args.no_plot {
        return Ok(());
    }
    let figure = render(&root, &config, &comparison)?;
    info!("Figure saved to {:?}", figure);
    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))
}

fn compare(root: &Path, config: &Config) -> Result<Comparison> {
    let times = config.times.samples()?;

    // Create progress bar
    let pb = ProgressBar::new((times.len() * config.cases.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} snapshots ({eta})")?
            .progress_chars("#>-"),
    );

    let mut cases = Vec::with_capacity(config.cases.len());
    let mut rows = Vec::with_capacity(config.cases.len() + 1);
    for case in &config.cases {
        let simu_dir = root.join(&case.folder);
        info!("Processing {} ({:?})", case.label, simu_dir);
        let surface = get_surface_pressure(&simu_dir, config, &pb)
            .with_context(|| format!("Case {} failed", case.label))?;
        let le = le_pressure(&surface.x, &surface.p, config.le_window)
            .with_context(|| format!("No leading-edge pressure for case {}", case.label))?;
        rows.push(SummaryRow::new(&case.label, le));
        cases.push((case.label.clone(), surface));
    }
    pb.finish_and_clear();

    let reference_path = root.join(&config.reference.file);
    let mut reference = read_reference(&reference_path)
        .with_context(|| format!("Failed to load reference data: {:?}", reference_path))?;

    // Align the reference leading edge with the first case
    match cases.first() {
        Some((label, surface)) => {
            align_min(&mut reference.x, min_of(&surface.x));
            info!("Reference x-coordinates aligned with case {}", label);
        }
        None => warn!("No cases configured; reference left unaligned"),
    }

    let le = le_pressure(&reference.x, &reference.p, config.le_window)
        .context("No leading-edge pressure in reference data")?;
    rows.push(SummaryRow::new(&config.reference.label, le));

    Ok(Comparison {
        cases,
        reference,
        rows,
    })
}

// `<root>/figures/<file>`, creating the directory if absent
fn figure_path(root: &Path, config: &Config) -> Result<PathBuf> {
    let figdir = root.join(&config.plot.dir);
    std::fs::create_dir_all(&figdir)
        .with_context(|| format!("Failed to create figure directory: {:?}", figdir))?;
    Ok(figdir.join(&config.plot.file_name))
}

fn reference_curve<'a>(config: &'a Config, comparison: &'a Comparison) -> Curve<'a> {
    Curve {
        label: &config.reference.label,
        x: &comparison.reference.x,
        p: &comparison.reference.p,
    }
}

fn render(root: &Path, config: &Config, comparison: &Comparison) -> Result<PathBuf> {
    let path = figure_path(root, config)?;

    let curves: Vec<Curve> = comparison
        .cases
        .iter()
        .map(|(label, surface)| Curve {
            label,
            x: &surface.x,
            p: &surface.p,
        })
        .collect();
    let reference = reference_curve(config, comparison);

    plot_surface_pressure(&path, &config.plot, &curves, &reference)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaseConfig;
    use crate::io::probe::tests::write_probe;
    use crate::plot::clipped_runs;
    use approx::assert_relative_eq;

    // One case whose pressure is x itself, plus a shifted reference
    fn fixture(root: &Path) -> Config {
        let case_dir = root.join("no_lips/2k35");
        std::fs::create_dir_all(case_dir.join("output")).unwrap();
        std::fs::write(
            case_dir.join("snake.body"),
            "4\n-0.5 0.0\n-0.46 0.0\n-0.3 0.0\n0.5 0.0\n",
        )
        .unwrap();

        let grid: Vec<f64> = (0..=10).map(|i| -1.0 + 0.2 * i as f64).collect();
        let mut config = Config::default();
        config.cases = vec![CaseConfig {
            folder: "no_lips/2k35".to_string(),
            label: "None".to_string(),
        }];
        config.times.end = 52.0;
        let times = config.times.samples().unwrap();
        write_probe(&case_dir.join("output/probe-p.h5"), &grid, &grid, &times, |_, x, _| x);

        std::fs::create_dir_all(root.join("data")).unwrap();
        std::fs::write(
            root.join(&config.reference.file),
            "-1.5 0 -0.75 0.0\n-1.9 0 -0.72 0.0\n-2.5 0 -0.10 0.0\n",
        )
        .unwrap();
        config
    }

    #[test]
    fn test_compare_builds_summary_rows() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path());

        let comparison = compare(dir.path(), &config).unwrap();
        assert_eq!(comparison.rows.len(), 2);

        // midpoints -0.48, -0.38, 0.1; only the first lies inside the window
        let case = &comparison.rows[0];
        assert_eq!(case.case, "None");
        assert_relative_eq!(case.x_le, -0.48, epsilon = 1e-12);
        assert_relative_eq!(case.p_le, -0.48, epsilon = 1e-9);

        // reference shifted by +0.27 so that min(x) == -0.48
        let reference = &comparison.rows[1];
        assert_eq!(reference.case, "Krishnan et al. (2014)");
        assert_relative_eq!(reference.x_le, -0.45, epsilon = 1e-12);
        assert_eq!(reference.p_le, -1.9);
        assert_relative_eq!(min_of(&comparison.reference.x), -0.48, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_case_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture(dir.path());
        config.cases[0].folder = "both_lips/2k35".to_string();
        assert!(compare(dir.path(), &config).is_err());
    }

    #[test]
    fn test_second_logging_init_is_reported() {
        // the global subscriber can only be installed once per process
        let twice = init_logging(false).and_then(|_| init_logging(true));
        assert!(twice.is_err());
    }

    #[test]
    fn test_figure_path_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        assert!(!dir.path().join("figures").exists());

        let path = figure_path(dir.path(), &config).unwrap();
        assert_eq!(path, dir.path().join("figures/surface_pressure_2k35.png"));
        assert!(dir.path().join("figures").is_dir());

        // idempotent when the directory already exists
        assert_eq!(figure_path(dir.path(), &config).unwrap(), path);
    }

    #[test]
    fn test_aligned_reference_is_clipped_at_axis_floor() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture(dir.path());
        let comparison = compare(dir.path(), &config).unwrap();

        // aligned reference: (-0.48, -1.5), (-0.45, -1.9), (0.17, -2.5)
        let runs = clipped_runs(&config.plot, &reference_curve(&config, &comparison));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 3);
        assert_relative_eq!(runs[0][1].0, -0.45, epsilon = 1e-12);
        assert_relative_eq!(runs[0][2].1, -2.0, epsilon = 1e-12);
        assert_relative_eq!(runs[0][2].0, -0.45 + 0.62 / 6.0, epsilon = 1e-12);
    }
}
