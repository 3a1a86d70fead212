use crate::config::ProbeConfig;
use crate::error::{PostError, PostResult};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use tracing::debug;

// Probe-volume file: gridlines under `mesh/`, one dataset per time under `<field>/`
pub struct ProbeVolume {
    path: PathBuf,
    file: netcdf::File,
    field: String,
    precision: usize,
    tolerance: f64,
}

impl ProbeVolume {
    pub fn open(path: &Path, config: &ProbeConfig) -> PostResult<Self> {
        let file = netcdf::open(path)?;
        Ok(ProbeVolume {
            path: path.to_path_buf(),
            file,
            field: config.field.clone(),
            precision: config.time_precision,
            tolerance: config.time_tolerance,
        })
    }

    fn missing(&self, name: impl Into<String>) -> PostError {
        PostError::MissingDataset {
            path: self.path.clone(),
            name: name.into(),
        }
    }

    fn group(&self, name: &str) -> PostResult<netcdf::Group<'_>> {
        self.file.group(name)?.ok_or_else(|| self.missing(name))
    }

    /// Gridlines `(x, y)` of the probe volume.
    pub fn grid(&self) -> PostResult<(Vec<f64>, Vec<f64>)> {
        let mesh = self.group("mesh")?;
        let mut lines = Vec::with_capacity(2);
        for axis in ["x", "y"] {
            let var = mesh
                .variable(axis)
                .ok_or_else(|| self.missing(format!("mesh/{}", axis)))?;
            lines.push(var.get_values::<f64, _>(..)?);
        }
        let y = lines.pop().unwrap_or_default();
        let x = lines.pop().unwrap_or_default();
        Ok((x, y))
    }

    /// Field values at `time`, shaped `(ny, nx)`.
    pub fn read(&self, time: f64) -> PostResult<Array2<f64>> {
        let group = self.group(&self.field)?;
        let key = format!("{:.*}", self.precision, time);

        let var = match group.variable(&key) {
            Some(var) => var,
            None => group
                .variables()
                .find(|v| {
                    v.name()
                        .parse::<f64>()
                        .is_ok_and(|t| (t - time).abs() <= self.tolerance)
                })
                .ok_or_else(|| self.missing(format!("{}/{}", self.field, key)))?,
        };

        let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        let shape = match dims.as_slice() {
            [ny, nx] => (*ny, *nx),
            _ => {
                return Err(PostError::ShapeMismatch {
                    expected: (0, 0),
                    actual: (dims.len(), dims.iter().product()),
                });
            }
        };

        let values = var.get_values::<f64, _>(..)?;
        if values.len() != shape.0 * shape.1 {
            return Err(PostError::ShapeMismatch {
                expected: shape,
                actual: (values.len(), 1),
            });
        }
        debug!("Read {}/{} {:?} from {:?}", self.field, var.name(), shape, self.path);
        Array2::from_shape_vec(shape, values).map_err(|_| PostError::ShapeMismatch {
            expected: shape,
            actual: shape,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Write a probe file with a field `f(t, x, y)` at each of `times`.
    pub(crate) fn write_probe(
        path: &Path,
        x: &[f64],
        y: &[f64],
        times: &[f64],
        f: impl Fn(f64, f64, f64) -> f64,
    ) {
        let mut file = netcdf::create(path).unwrap();

        let mut mesh = file.add_group("mesh").unwrap();
        mesh.add_dimension("nx", x.len()).unwrap();
        mesh.add_dimension("ny", y.len()).unwrap();
        mesh.add_variable::<f64>("x", &["nx"])
            .unwrap()
            .put_values(x, ..)
            .unwrap();
        mesh.add_variable::<f64>("y", &["ny"])
            .unwrap()
            .put_values(y, ..)
            .unwrap();

        let mut p = file.add_group("p").unwrap();
        p.add_dimension("ny", y.len()).unwrap();
        p.add_dimension("nx", x.len()).unwrap();
        for &t in times {
            let values: Vec<f64> = y
                .iter()
                .flat_map(|&yj| x.iter().map(move |&xi| (xi, yj)))
                .map(|(xi, yj)| f(t, xi, yj))
                .collect();
            p.add_variable::<f64>(&format!("{:.6}", t), &["ny", "nx"])
                .unwrap()
                .put_values(&values, ..)
                .unwrap();
        }
    }

    #[test]
    fn test_grid_and_values_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe-p.h5");
        let (x, y) = (vec![0.0, 1.0, 2.0], vec![-1.0, 1.0]);
        write_probe(&path, &x, &y, &[50.0, 52.0], |t, a, b| t + 10.0 * a + b);

        let probe = ProbeVolume::open(&path, &ProbeConfig::default()).unwrap();
        assert_eq!(probe.grid().unwrap(), (x, y));

        let values = probe.read(52.0).unwrap();
        assert_eq!(values.dim(), (2, 3));
        assert_eq!(values[[0, 2]], 52.0 + 20.0 - 1.0);
        assert_eq!(values[[1, 0]], 52.0 + 1.0);
    }

    #[test]
    fn test_time_lookup_tolerance_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe-p.h5");
        write_probe(&path, &[0.0, 1.0], &[0.0, 1.0], &[50.0], |_, _, _| 1.0);

        let probe = ProbeVolume::open(&path, &ProbeConfig::default()).unwrap();
        assert!(probe.read(50.0 + 1e-7).is_ok());
        assert!(matches!(
            probe.read(54.0),
            Err(PostError::MissingDataset { .. })
        ));
    }
}
