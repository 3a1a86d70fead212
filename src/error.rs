use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("NetCDF/HDF5 error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("{path:?} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path:?}: missing dataset {name}")]
    MissingDataset { path: PathBuf, name: String },

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("gridline {axis} must be strictly ascending with at least 2 points")]
    InvalidGrid { axis: char },

    #[error("point ({x}, {y}) lies outside the interpolation grid")]
    OutOfBounds { x: f64, y: f64 },

    #[error("boundary segment {index} has zero length")]
    DegenerateSegment { index: usize },

    #[error("boundary needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("array lengths differ: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("no finite pressure inside the leading-edge window")]
    EmptyWindow,

    #[error("invalid time window: start={start}, end={end}, step={step}")]
    InvalidTimeWindow { start: f64, end: f64, step: f64 },
}

pub type PostResult<T> = Result<T, PostError>;
