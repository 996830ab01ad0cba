use std::path::Path;

use log::debug;
use plotters::prelude::*;

use super::{color, padded_range, PlotError, Result, CAPTION_FONT, DESC_FONT, LABEL_FONT};
use crate::data::group::group_by;
use crate::data::model::Dataset;

/// Box plot of the numeric `value` column for each category of `category`,
/// saved as a PNG. Points beyond the whiskers are drawn individually.
pub fn plot_categorical_plot(
    dataset: &Dataset,
    category: &str,
    value: &str,
    title: &str,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let groups = group_by(dataset, category, value)?;
    if groups.is_empty() {
        return Err(PlotError::InvalidData(format!(
            "'{value}' has no values to group by '{category}'"
        )));
    }

    let labels: Vec<String> = groups.iter().map(|g| g.label.to_string()).collect();
    let y_range = padded_range(groups.iter().flat_map(|g| g.values.iter().copied()), 0.05)
        .ok_or_else(|| PlotError::InvalidData(format!("'{value}' has no finite values")))?;
    let y_range = y_range.start as f32..y_range.end as f32;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(labels[..].into_segmented(), y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(label) => label.to_string(),
            _ => String::new(),
        })
        .x_desc(category)
        .y_desc(value)
        .axis_desc_style(DESC_FONT)
        .label_style(LABEL_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let palette = color::generate_palette(labels.len());
    let box_width = (size.0 / (labels.len() as u32 * 2).max(1)).clamp(10, 120);

    for ((label, group), colour) in labels.iter().zip(&groups).zip(&palette) {
        let quartiles = Quartiles::new(&group.values[..]);
        let [lower_fence, .., upper_fence] = quartiles.values();

        chart
            .draw_series(std::iter::once(
                Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
                    .width(box_width)
                    .whisker_width(0.5)
                    .style(colour.stroke_width(2)),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let outliers = group
            .values
            .iter()
            .map(|&v| v as f32)
            .filter(|&v| v < lower_fence || v > upper_fence);
        chart
            .draw_series(
                outliers.map(|v| Circle::new((SegmentValue::CenterOf(label), v), 4, colour.filled())),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    debug!(
        "wrote box plot of {} categories to {}",
        labels.len(),
        output_path.display()
    );
    Ok(())
}
