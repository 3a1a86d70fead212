use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::{PostError, PostResult};

// Analysis configuration; every field falls back to the 2k35 comparison defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cases: Vec<CaseConfig>,
    pub times: TimeWindow,
    pub probe: ProbeConfig,
    pub body_file: String,
    /// Distance from the immersed boundary to the interpolation points
    pub offset: f64,
    /// Half-width of the leading-edge window, measured from min(x)
    pub le_window: f64,
    pub reference: ReferenceConfig,
    pub plot: PlotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseConfig {
    pub folder: String,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe file, relative to a case directory
    pub file: String,
    pub field: String,
    pub time_precision: usize,
    pub time_tolerance: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Reference file, relative to the root directory
    pub file: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub dir: String,
    pub file_name: String,
    /// Figure size in inches
    pub size: (f64, f64),
    pub dpi: u32,
    /// Font size in points
    pub font_size: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_label: String,
    pub y_label: String,
}

impl Default for Config {
    fn default() -> Self {
        let cases = [
            ("both_lips/2k35", "Both"),
            ("front_lip/2k35", "Front"),
            ("back_lip/2k35", "Back"),
            ("no_lips/2k35", "None"),
        ]
        .into_iter()
        .map(|(folder, label)| CaseConfig {
            folder: folder.to_string(),
            label: label.to_string(),
        })
        .collect();

        Self {
            cases,
            times: TimeWindow::default(),
            probe: ProbeConfig::default(),
            body_file: "snake.body".to_string(),
            offset: 0.01,
            le_window: 0.05,
            reference: ReferenceConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start: 50.0,
            end: 80.0,
            step: 2.0,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            file: "output/probe-p.h5".to_string(),
            field: "p".to_string(),
            time_precision: 6,
            time_tolerance: 1e-6,
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            file: "data/krishnan_et_al_2014_surface_pressure_2k35.txt".to_string(),
            label: "Krishnan et al. (2014)".to_string(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            dir: "figures".to_string(),
            file_name: "surface_pressure_2k35.png".to_string(),
            size: (6.0, 4.0),
            dpi: 300,
            font_size: 14.0,
            x_range: (-0.6, 0.6),
            y_range: (-2.0, 1.0),
            x_label: "x-coordinate".to_string(),
            y_label: "Surface pressure".to_string(),
        }
    }
}

impl PlotConfig {
    pub fn pixels(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.size.0 * dpi).round() as u32,
            (self.size.1 * dpi).round() as u32,
        )
    }

    /// Points to pixels at the configured resolution.
    pub fn font_px(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}

// Upper bound on snapshots per case
const MAX_SAMPLES: f64 = 1.0e6;

impl TimeWindow {
    /// Sample times from `start` to `end` inclusive.
    pub fn samples(&self) -> PostResult<Vec<f64>> {
        let invalid = || PostError::InvalidTimeWindow {
            start: self.start,
            end: self.end,
            step: self.step,
        };
        if !self.start.is_finite() || !(self.step > 0.0) || !(self.end >= self.start) {
            return Err(invalid());
        }
        let intervals = ((self.end - self.start) / self.step + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_SAMPLES {
            return Err(invalid());
        }
        let count = intervals as usize + 1;
        Ok((0..count)
            .map(|k| self.start + k as f64 * self.step)
            .collect())
    }
}

impl Config {
    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).context("Failed to parse configuration")
    }
}

/// Defaults, overridden by `path` when given.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Config::from_yaml(&contents).with_context(|| format!("Invalid config file: {:?}", path))
        }
        None => Ok(Config::default()),
    }
}
