use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::config::PlotConfig;

// matplotlib's default colour cycle
const CYCLE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

pub struct Curve<'a> {
    pub label: &'a str,
    pub x: &'a [f64],
    pub p: &'a [f64],
}

type Point = (f64, f64);

// Liang-Barsky: the part of segment a-b inside the window, with the entry/exit parameters
fn clip_segment(config: &PlotConfig, a: Point, b: Point) -> Option<(Point, Point, f64, f64)> {
    let (x0, x1) = config.x_range;
    let (y0, y1) = config.y_range;
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [(-dx, a.0 - x0), (dx, x1 - a.0), (-dy, a.1 - y0), (dy, y1 - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    let at = |t: f64| {
        if t == 0.0 {
            a
        } else if t == 1.0 {
            b
        } else {
            (a.0 + t * dx, a.1 + t * dy)
        }
    };
    Some((at(t0), at(t1), t0, t1))
}

/// Polyline pieces of `curve` clipped to the axes window.
///
/// A curve that leaves the window and comes back yields separate runs, each
/// ending or starting on the border where it crosses.
pub fn clipped_runs(config: &PlotConfig, curve: &Curve) -> Vec<Vec<Point>> {
    let points: Vec<Point> = curve.x.iter().copied().zip(curve.p.iter().copied()).collect();
    let mut runs: Vec<Vec<Point>> = Vec::new();
    // whether the last run ends on an unclipped vertex that the next segment starts from
    let mut open = false;

    for pair in points.windows(2) {
        match clip_segment(config, pair[0], pair[1]) {
            Some((c0, c1, t0, t1)) => {
                match runs.last_mut() {
                    Some(run) if open && t0 == 0.0 => run.push(c1),
                    _ => runs.push(vec![c0, c1]),
                }
                open = t1 == 1.0;
            }
            None => open = false,
        }
    }
    runs
}

/// Surface pressure of every case as solid lines, the reference dashed black.
pub fn plot_surface_pressure(
    path: &Path,
    config: &PlotConfig,
    cases: &[Curve],
    reference: &Curve,
) -> Result<()> {
    let (width, height) = config.pixels();
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let text = config.font_px(config.font_size);
    let small = config.font_px(10.0);
    let stroke = config.font_px(1.5).round() as u32;

    let mut chart = ChartBuilder::on(&root)
        .margin(text as u32 / 2)
        .x_label_area_size((text * 2.5) as u32)
        .y_label_area_size((text * 3.5) as u32)
        .build_cartesian_2d(
            config.x_range.0..config.x_range.1,
            config.y_range.0..config.y_range.1,
        )?;

    // no grid; only the left and bottom spines
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(config.x_label.as_str())
        .y_desc(config.y_label.as_str())
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.1}", y))
        .label_style(("serif", text))
        .axis_desc_style(("serif", text))
        .axis_style(BLACK.stroke_width(stroke / 2 + 1))
        .draw()?;

    for (i, curve) in cases.iter().enumerate() {
        let color = CYCLE[i % CYCLE.len()];
        for (k, run) in clipped_runs(config, curve).into_iter().enumerate() {
            let series =
                chart.draw_series(LineSeries::new(run, color.stroke_width(stroke)))?;
            if k == 0 {
                series.label(curve.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(stroke))
                });
            }
        }
    }

    for (k, run) in clipped_runs(config, reference).into_iter().enumerate() {
        let series = chart.draw_series(DashedLineSeries::new(
            run,
            4 * stroke,
            2 * stroke,
            BLACK.stroke_width(stroke),
        ))?;
        if k == 0 {
            series.label(reference.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 40, y)], BLACK.stroke_width(stroke))
            });
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.0))
        .border_style(&WHITE.mix(0.0))
        .label_font(("serif", small))
        .draw()?;

    root.present()
        .with_context(|| format!("Failed to write figure: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_inside_window_is_one_run() {
        let config = PlotConfig::default();
        let curve = Curve {
            label: "Both",
            x: &[-0.5, -0.4, 0.0, 0.5],
            p: &[-1.0, -1.5, 0.2, 0.5],
        };
        assert_eq!(
            clipped_runs(&config, &curve),
            vec![vec![(-0.5, -1.0), (-0.4, -1.5), (0.0, 0.2), (0.5, 0.5)]]
        );
    }

    #[test]
    fn test_suction_peak_below_axis_splits_curve() {
        let config = PlotConfig::default();
        let curve = Curve {
            label: "Front",
            x: &[-0.50, -0.49, -0.48, -0.40, -0.30],
            p: &[-1.0, -2.3, -2.4, -1.2, -0.5],
        };
        let runs = clipped_runs(&config, &curve);
        assert_eq!(runs.len(), 2);

        // leaves through the bottom border
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[0][0], (-0.5, -1.0));
        assert_relative_eq!(runs[0][1].1, -2.0, epsilon = 1e-12);
        assert_relative_eq!(runs[0][1].0, -0.5 + 0.01 / 1.3, epsilon = 1e-12);

        // re-enters through the same border and continues unclipped
        assert_eq!(runs[1].len(), 3);
        assert_relative_eq!(runs[1][0].1, -2.0, epsilon = 1e-12);
        assert_relative_eq!(runs[1][0].0, -0.48 + 0.08 * (0.4 / 1.2), epsilon = 1e-12);
        assert_eq!(runs[1][1], (-0.4, -1.2));
        assert_eq!(runs[1][2], (-0.3, -0.5));
    }

    #[test]
    fn test_segments_fully_outside_are_not_drawn() {
        let config = PlotConfig::default();
        let curve = Curve {
            label: "None",
            x: &[-0.9, -0.8, -0.7],
            p: &[0.0, 0.1, 0.2],
        };
        assert!(clipped_runs(&config, &curve).is_empty());
    }
}
