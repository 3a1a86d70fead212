//! Linear interpolation on a rectilinear 2D grid.
//!
//! Field values are stored `(ny, nx)`, i.e. row `j` holds the samples along
//! `y[j]`. Query points are `[x, y]`. Points outside the grid are rejected;
//! points exactly on the upper edge are accepted.

use crate::error::{PostError, PostResult};
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct RegularGridInterpolator {
    x: Vec<f64>,
    y: Vec<f64>,
    values: Array2<f64>,
}

// Precomputed cell index and weights for one query point
#[derive(Debug, Clone, Copy)]
struct Stencil {
    i: usize,
    j: usize,
    tx: f64,
    ty: f64,
}

/// Cell lookups for a fixed point set, reusable while only the values change.
#[derive(Debug, Clone)]
pub struct PointSet {
    stencils: Vec<Stencil>,
}

impl PointSet {
    pub fn len(&self) -> usize {
        self.stencils.len()
    }
}

fn check_axis(line: &[f64], axis: char) -> PostResult<()> {
    if line.len() < 2 || line.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(PostError::InvalidGrid { axis });
    }
    Ok(())
}

// Index of the cell containing `v` and the fractional position within it
fn locate(line: &[f64], v: f64) -> Option<(usize, f64)> {
    let last = line.len() - 1;
    if !(v >= line[0] && v <= line[last]) {
        return None;
    }
    let upper = line.partition_point(|&g| g <= v);
    let i = upper.saturating_sub(1).min(last - 1);
    let t = (v - line[i]) / (line[i + 1] - line[i]);
    Some((i, t))
}

impl RegularGridInterpolator {
    pub fn new(x: Vec<f64>, y: Vec<f64>, values: Array2<f64>) -> PostResult<Self> {
        check_axis(&x, 'x')?;
        check_axis(&y, 'y')?;
        let expected = (y.len(), x.len());
        if values.dim() != expected {
            return Err(PostError::ShapeMismatch {
                expected,
                actual: values.dim(),
            });
        }
        Ok(RegularGridInterpolator { x, y, values })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }

    /// Swap in a new field on the same grid.
    pub fn set_values(&mut self, values: Array2<f64>) -> PostResult<()> {
        if values.dim() != self.shape() {
            return Err(PostError::ShapeMismatch {
                expected: self.shape(),
                actual: values.dim(),
            });
        }
        self.values = values;
        Ok(())
    }

    pub fn prepare(&self, points: &[[f64; 2]]) -> PostResult<PointSet> {
        let stencils = points
            .iter()
            .map(|&[px, py]| {
                let (i, tx) = locate(&self.x, px).ok_or(PostError::OutOfBounds { x: px, y: py })?;
                let (j, ty) = locate(&self.y, py).ok_or(PostError::OutOfBounds { x: px, y: py })?;
                Ok(Stencil { i, j, tx, ty })
            })
            .collect::<PostResult<Vec<_>>>()?;
        Ok(PointSet { stencils })
    }

    pub fn evaluate(&self, points: &PointSet) -> Vec<f64> {
        let v = &self.values;
        points
            .stencils
            .iter()
            .map(|s| {
                let (i, j) = (s.i, s.j);
                let lower = v[[j, i]] * (1.0 - s.tx) + v[[j, i + 1]] * s.tx;
                let upper = v[[j + 1, i]] * (1.0 - s.tx) + v[[j + 1, i + 1]] * s.tx;
                lower * (1.0 - s.ty) + upper * s.ty
            })
            .collect()
    }
}
