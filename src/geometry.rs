use crate::error::{PostError, PostResult};

// Immersed-boundary marker coordinates, in file order
#[derive(Debug, Clone)]
pub struct Boundary {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Boundary {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> PostResult<Self> {
        if x.len() != y.len() {
            return Err(PostError::LengthMismatch(x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(PostError::TooFewPoints(x.len()));
        }
        Ok(Boundary { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Midpoints and unit normals of every segment `[i, i + 1]`.
    ///
    /// The normal of a segment with direction `(dx, dy)` is `(dy, -dx)`,
    /// which points outward for a counter-clockwise body.
    pub fn segments(&self) -> PostResult<Segments> {
        let n = self.len() - 1;
        let mut segments = Segments {
            xm: Vec::with_capacity(n),
            ym: Vec::with_capacity(n),
            nx: Vec::with_capacity(n),
            ny: Vec::with_capacity(n),
        };

        for i in 0..n {
            let (x0, x1) = (self.x[i], self.x[i + 1]);
            let (y0, y1) = (self.y[i], self.y[i + 1]);

            let (nx, ny) = (y1 - y0, -(x1 - x0));
            let norm = nx.hypot(ny);
            if norm == 0.0 {
                return Err(PostError::DegenerateSegment { index: i });
            }

            segments.xm.push(0.5 * (x0 + x1));
            segments.ym.push(0.5 * (y0 + y1));
            segments.nx.push(nx / norm);
            segments.ny.push(ny / norm);
        }

        Ok(segments)
    }
}

// Per-segment midpoints and unit normals
#[derive(Debug, Clone)]
pub struct Segments {
    pub xm: Vec<f64>,
    pub ym: Vec<f64>,
    pub nx: Vec<f64>,
    pub ny: Vec<f64>,
}

impl Segments {
    pub fn len(&self) -> usize {
        self.xm.len()
    }

    /// Midpoints pushed `dist` along their normals.
    pub fn offset_points(&self, dist: f64) -> Vec<[f64; 2]> {
        (0..self.len())
            .map(|i| {
                [
                    self.xm[i] + dist * self.nx[i],
                    self.ym[i] + dist * self.ny[i],
                ]
            })
            .collect()
    }
}
