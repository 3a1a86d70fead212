use anyhow::{Context, Result};
use indicatif::ProgressBar;
use ndarray::Array2;
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PostError, PostResult};
use crate::interp::{PointSet, RegularGridInterpolator};
use crate::io::body::read_body;
use crate::io::probe::ProbeVolume;

// Time-averaged pressure next to the body, one value per boundary segment
#[derive(Debug, Clone)]
pub struct SurfacePressure {
    pub x: Vec<f64>,
    pub p: Vec<f64>,
}

/// Accumulate the interpolated field over every snapshot and divide by the count.
pub fn time_average<I>(
    interpolator: &mut RegularGridInterpolator,
    points: &PointSet,
    snapshots: I,
) -> PostResult<Vec<f64>>
where
    I: IntoIterator<Item = PostResult<Array2<f64>>>,
{
    let mut sum = vec![0.0; points.len()];
    let mut count = 0usize;
    for snapshot in snapshots {
        interpolator.set_values(snapshot?)?;
        for (acc, v) in sum.iter_mut().zip(interpolator.evaluate(points)) {
            *acc += v;
        }
        count += 1;
    }
    if count > 0 {
        let n = count as f64;
        sum.iter_mut().for_each(|v| *v /= n);
    }
    Ok(sum)
}

pub fn get_surface_pressure(
    simu_dir: &Path,
    config: &Config,
    pb: &ProgressBar,
) -> Result<SurfacePressure> {
    let body_path = simu_dir.join(&config.body_file);
    let boundary = read_body(&body_path)
        .with_context(|| format!("Failed to load boundary: {:?}", body_path))?;
    let segments = boundary.segments()?;

    let times = config.times.samples()?;
    let first = *times.first().ok_or(PostError::InvalidTimeWindow {
        start: config.times.start,
        end: config.times.end,
        step: config.times.step,
    })?;

    let probe_path = simu_dir.join(&config.probe.file);
    let probe = ProbeVolume::open(&probe_path, &config.probe)
        .with_context(|| format!("Failed to open probe volume: {:?}", probe_path))?;

    let (x, y) = probe.grid()?;
    let mut interpolator = RegularGridInterpolator::new(x, y, probe.read(first)?)?;
    debug!("Probe grid {:?} at {:?}", interpolator.shape(), probe_path);

    let points = interpolator
        .prepare(&segments.offset_points(config.offset))
        .with_context(|| format!("Interpolation points outside probe volume {:?}", probe_path))?;

    let snapshots = times.iter().map(|&t| {
        let values = probe.read(t);
        pb.inc(1);
        values
    });
    let p = time_average(&mut interpolator, &points, snapshots)
        .with_context(|| format!("Failed to average pressure from {:?}", probe_path))?;

    info!(
        "{:?}: {} surface points averaged over {} snapshots",
        simu_dir,
        p.len(),
        times.len()
    );

    Ok(SurfacePressure { x: segments.xm, p })
}
