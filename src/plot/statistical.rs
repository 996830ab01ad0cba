use std::f64::consts::PI;
use std::path::Path;

use log::debug;
use plotters::prelude::*;

use super::{color, PlotError, Result, CAPTION_FONT, DESC_FONT, LABEL_FONT};
use crate::data::model::Dataset;
use crate::stats::moments::moments_of;

/// Points the density curve is evaluated at.
const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Histogram bins
// ---------------------------------------------------------------------------

/// One histogram bar: `[start, end)`, except the last bin which includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split `[min, max]` of `values` into `bins` equal-width bins.
///
/// A flat sample gets a single unit-wide bin centred on its value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![Bin {
            start: min - 0.5,
            end: max + 0.5,
            count: finite.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Gaussian kernel density estimate
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth, `σ · n^(-1/5)`. `None` without spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let m = moments_of(values)?;
    let bw = m.std_dev * (m.count as f64).powf(-0.2);
    (bw.is_finite() && bw > 0.0).then_some(bw)
}

/// Gaussian KDE of `values` evaluated on `points` evenly spaced positions
/// spanning the data. Densities integrate to one.
pub fn kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(bw) = scott_bandwidth(&finite) else {
        return Vec::new();
    };
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let n = finite.len() as f64;
    let norm = 1.0 / (n * bw * (2.0 * PI).sqrt());
    let step = (max - min) / (points.max(2) - 1) as f64;

    (0..points.max(2))
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = finite
                .iter()
                .map(|&xi| {
                    let z = (x - xi) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// Histogram of `column` with a density curve scaled to counts, saved as a PNG.
pub fn plot_statistical_plot(
    dataset: &Dataset,
    column: &str,
    bins: usize,
    title: &str,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let values = dataset.numeric_values(column)?;
    let bars = histogram(&values, bins);
    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Err(PlotError::InvalidData(format!(
            "'{column}' has no finite values to bin"
        )));
    };

    let bin_width = first.end - first.start;
    let total: usize = bars.iter().map(|b| b.count).sum();
    let curve: Vec<(f64, f64)> = kde(&values, KDE_POINTS)
        .into_iter()
        .map(|(x, d)| (x, d * total as f64 * bin_width))
        .collect();

    let y_max = bars
        .iter()
        .map(|b| b.count as f64)
        .chain(curve.iter().map(|p| p.1))
        .fold(0.0, f64::max)
        * 1.1;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(first.start..last.end, 0.0..y_max.max(1.0))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("Count")
        .axis_desc_style(DESC_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let accent = color::accent();
    chart
        .draw_series(bars.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], accent.mix(0.5).filled())
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart
        .draw_series(bars.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], accent.stroke_width(1))
        }))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    if !curve.is_empty() {
        chart
            .draw_series(LineSeries::new(curve, accent.stroke_width(3)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    debug!(
        "wrote {} bins over {total} values to {}",
        bars.len(),
        output_path.display()
    );
    Ok(())
}
