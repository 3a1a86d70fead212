use crate::error::{PostError, PostResult};

/// Pressure minimum among points with `|x - min(x)| < window`.
///
/// Ties resolve to the first occurrence. NaN pressures are skipped.
pub fn le_pressure(x: &[f64], p: &[f64], window: f64) -> PostResult<(f64, f64)> {
    if x.len() != p.len() {
        return Err(PostError::LengthMismatch(x.len(), p.len()));
    }
    let x_min = min_of(x);

    let mut best: Option<(f64, f64)> = None;
    for (&xi, &pi) in x.iter().zip(p) {
        if !((xi - x_min).abs() < window) || pi.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, pb)| pi < pb) {
            best = Some((xi, pi));
        }
    }
    best.ok_or(PostError::EmptyWindow)
}

/// Shift `x` so its minimum coincides with `target_min`.
pub fn align_min(x: &mut [f64], target_min: f64) {
    let x_min = min_of(x);
    if x_min.is_finite() {
        let shift = target_min - x_min;
        x.iter_mut().for_each(|xi| *xi += shift);
    }
}

pub fn min_of(x: &[f64]) -> f64 {
    x.iter().copied().fold(f64::INFINITY, f64::min)
}
