use std::path::Path;

use log::debug;
use plotters::prelude::*;

use super::{color, padded_range, PlotError, Result, CAPTION_FONT, DESC_FONT, LABEL_FONT};
use crate::data::model::Dataset;

/// Scatter plot of column `x` against column `y`, saved as a PNG.
///
/// Rows missing either value are left out.
pub fn plot_relational_plot(
    dataset: &Dataset,
    x: &str,
    y: &str,
    title: &str,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let points = dataset.paired_values(x, y)?;
    if points.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "no rows with both '{x}' and '{y}' present"
        )));
    }

    let x_range = padded_range(points.iter().map(|p| p.0), 0.05)
        .ok_or_else(|| PlotError::InvalidData(format!("'{x}' has no finite values")))?;
    let y_range = padded_range(points.iter().map(|p| p.1), 0.05)
        .ok_or_else(|| PlotError::InvalidData(format!("'{y}' has no finite values")))?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x)
        .y_desc(y)
        .axis_desc_style(DESC_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let style = color::accent().mix(0.7).filled();
    chart
        .draw_series(
            points
                .iter()
                .map(|&(px, py)| Circle::new((px, py), 5, style)),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    debug!("wrote {} points to {}", points.len(), output_path.display());
    Ok(())
}
