use anyhow::{Context, Result};
use log::info;

use crate::config::{AnalysisConfig, BILL_COLUMN, DAY_COLUMN, REQUIRED_COLUMNS, TIP_COLUMN};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::plot::categorical::plot_categorical_plot;
use crate::plot::relational::plot_relational_plot;
use crate::plot::statistical::plot_statistical_plot;
use crate::report;
use crate::stats::moments::{statistical_analysis, Moments};
use crate::stats::shape::Shape;
use crate::stats::summary::{correlation_matrix, describe};

/// Everything one run produces besides the chart files.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub column: String,
    pub moments: Moments,
    pub shape: Shape,
    /// Diagnostic tables printed before the charts were drawn.
    pub diagnostics: String,
    /// The moments paragraph.
    pub report: String,
}

/// Load, inspect, chart and analyse the configured dataset.
///
/// Output goes to stdout as each stage finishes; the same text is returned in
/// the [`Analysis`].
pub fn run(config: &AnalysisConfig) -> Result<Analysis> {
    let dataset = load_file(&config.input)?;
    dataset
        .require_columns(&REQUIRED_COLUMNS)
        .with_context(|| format!("validating {}", config.input.display()))?;

    let diagnostics = preprocessing(&dataset, config.preview_rows)?;
    println!("{diagnostics}");

    draw_charts(&dataset, config)?;

    info!("computing moments for '{}'", config.column);
    let moments = statistical_analysis(&dataset, &config.column)
        .with_context(|| format!("analysing column '{}'", config.column))?;
    let shape = Shape::of(&moments);
    let report = report::writing(&moments, &shape, &config.column);
    println!("{report}");

    Ok(Analysis {
        column: config.column.clone(),
        moments,
        shape,
        diagnostics,
        report,
    })
}

/// Head of the table, per-column summary and correlation matrix.
pub fn preprocessing(dataset: &Dataset, preview_rows: usize) -> Result<String> {
    let head = report::preview(dataset, preview_rows).context("formatting preview")?;
    let summary = describe(dataset)?;
    let described = report::describe_table(&summary).context("formatting summary")?;
    let corr = correlation_matrix(dataset)?;
    let correlations = report::correlation_table(&corr).context("formatting correlations")?;
    Ok(format!("{head}\n{described}\n{correlations}"))
}

/// The three fixed charts, overwriting earlier output.
pub fn draw_charts(dataset: &Dataset, config: &AnalysisConfig) -> Result<()> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let path = config.relational_plot_path();
    info!("drawing relational plot to {}", path.display());
    plot_relational_plot(
        dataset,
        BILL_COLUMN,
        TIP_COLUMN,
        "Total Bill vs Tip (Relational Plot)",
        config.chart_size,
        &path,
    )
    .context("drawing relational plot")?;

    let path = config.statistical_plot_path();
    info!("drawing statistical plot to {}", path.display());
    plot_statistical_plot(
        dataset,
        BILL_COLUMN,
        config.bins,
        "Distribution of Total Bill (Statistical Plot)",
        config.chart_size,
        &path,
    )
    .context("drawing statistical plot")?;

    let path = config.categorical_plot_path();
    info!("drawing categorical plot to {}", path.display());
    plot_categorical_plot(
        dataset,
        DAY_COLUMN,
        TIP_COLUMN,
        "Tip Amount by Day (Categorical Plot)",
        config.chart_size,
        &path,
    )
    .context("drawing categorical plot")?;

    Ok(())
}
