use std::path::{Path, PathBuf};

/// Bill total column: the analysis column and the scatter/histogram x axis.
pub const BILL_COLUMN: &str = "total_bill";
/// Gratuity column: scatter y axis and box plot values.
pub const TIP_COLUMN: &str = "tip";
/// Categorical column the box plot groups by.
pub const DAY_COLUMN: &str = "day";

/// Columns every run needs; checked before anything is plotted.
pub const REQUIRED_COLUMNS: [&str; 3] = [BILL_COLUMN, TIP_COLUMN, DAY_COLUMN];

pub const RELATIONAL_PLOT_FILE: &str = "relational_plot.png";
pub const CATEGORICAL_PLOT_FILE: &str = "categorical_plot.png";
pub const STATISTICAL_PLOT_FILE: &str = "statistical_plot.png";

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Fixed settings for one report run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Input table (`.csv`, `.json` or `.parquet`).
    pub input: PathBuf,
    /// Numeric column the moments are computed for.
    pub column: String,
    /// Directory the three charts are written into.
    pub output_dir: PathBuf,
    /// Chart size in pixels (width, height).
    pub chart_size: (u32, u32),
    /// Histogram bin count.
    pub bins: usize,
    /// Rows shown in the preview table.
    pub preview_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            column: BILL_COLUMN.to_string(),
            output_dir: PathBuf::from("."),
            chart_size: (1200, 800),
            bins: 20,
            preview_rows: 5,
        }
    }
}

impl AnalysisConfig {
    /// Default settings reading `input` and writing charts to `output_dir`.
    pub fn with_paths(input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn relational_plot_path(&self) -> PathBuf {
        self.output_dir.join(RELATIONAL_PLOT_FILE)
    }

    pub fn categorical_plot_path(&self) -> PathBuf {
        self.output_dir.join(CATEGORICAL_PLOT_FILE)
    }

    pub fn statistical_plot_path(&self) -> PathBuf {
        self.output_dir.join(STATISTICAL_PLOT_FILE)
    }
}
