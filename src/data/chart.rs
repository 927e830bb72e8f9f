use serde::Serialize;

use super::error::ExploreError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Chart kinds and requests
// ---------------------------------------------------------------------------

/// The supported chart kinds, handled exhaustively everywhere so an
/// unrecognized kind can never reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Pie,
    Histogram,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Histogram,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Bar => "Bar",
            ChartKind::Scatter => "Scatter",
            ChartKind::Pie => "Pie",
            ChartKind::Histogram => "Histogram",
        }
    }
}

/// One user-configured chart: kind, axis columns and cosmetic options.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// X-axis column (category labels for Pie, binned values for Histogram).
    pub x: String,
    /// Y-axis columns. Exactly one for Pie; ignored by Histogram.
    pub y: Vec<String>,
    /// Title override; empty means none.
    pub title: String,
    /// Uniform series color override (sRGB).
    pub color: Option<[u8; 3]>,
}

// ---------------------------------------------------------------------------
// Chart descriptors: declarative render input, no drawing here
// ---------------------------------------------------------------------------

/// One named y-series resolved from the table.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub name: String,
    pub values: Vec<Value>,
}

/// The resolved data slice of a chart, by kind family.
#[derive(Debug, Clone, Serialize)]
pub enum ChartData {
    /// Line / Bar / Scatter: every y-series plotted against a shared x.
    Series {
        x_name: String,
        x: Vec<Value>,
        series: Vec<SeriesData>,
    },
    /// Pie: one wedge per row, labelled by x, sized by the single y column.
    /// Non-numeric or negative sizes contribute an empty wedge.
    Pie { labels: Vec<String>, values: Vec<f64> },
    /// Histogram: the numeric values of x, to be binned by the renderer.
    Histogram { x_name: String, values: Vec<f64> },
}

/// The resolved, renderable output of a [`ChartRequest`] against a table.
/// Recomputed on every interaction, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub title: String,
    pub color: Option<[u8; 3]>,
    pub data: ChartData,
}

// ---------------------------------------------------------------------------
// specify: (table, request) → descriptor
// ---------------------------------------------------------------------------

/// Resolve a chart request against a table.
///
/// Fails with [`ExploreError::InvalidChartRequest`] when the x or any y
/// column is missing, when a Pie request does not carry exactly one y
/// column, or when a non-Histogram request carries no y columns at all.
/// Each request is resolved independently; the host reports failures
/// per chart without aborting the rest.
pub fn specify(table: &Table, request: &ChartRequest) -> Result<ChartDescriptor, ExploreError> {
    let x_values = table.column_values(&request.x).ok_or_else(|| {
        ExploreError::InvalidChartRequest(format!("x column '{}' not in table", request.x))
    })?;

    for y in &request.y {
        if table.column_index(y).is_none() {
            return Err(ExploreError::InvalidChartRequest(format!(
                "y column '{y}' not in table"
            )));
        }
    }

    let data = match request.kind {
        ChartKind::Line | ChartKind::Bar | ChartKind::Scatter => {
            if request.y.is_empty() {
                return Err(ExploreError::InvalidChartRequest(format!(
                    "{} chart needs at least one y column",
                    request.kind.label()
                )));
            }
            let series = request
                .y
                .iter()
                .map(|name| SeriesData {
                    name: name.clone(),
                    // Column existence checked above.
                    values: table.column_values(name).unwrap_or_default(),
                })
                .collect();
            ChartData::Series {
                x_name: request.x.clone(),
                x: x_values,
                series,
            }
        }
        ChartKind::Pie => {
            if request.y.len() != 1 {
                return Err(ExploreError::InvalidChartRequest(format!(
                    "Pie chart needs exactly one y column, got {}",
                    request.y.len()
                )));
            }
            let sizes = table.column_values(&request.y[0]).unwrap_or_default();
            ChartData::Pie {
                labels: x_values.iter().map(|v| v.to_string()).collect(),
                values: sizes
                    .iter()
                    .map(|v| v.as_f64().unwrap_or(0.0).max(0.0))
                    .collect(),
            }
        }
        ChartKind::Histogram => ChartData::Histogram {
            x_name: request.x.clone(),
            values: x_values.iter().filter_map(|v| v.as_f64()).collect(),
        },
    };

    Ok(ChartDescriptor {
        kind: request.kind,
        title: request.title.clone(),
        color: request.color,
        data,
    })
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins over `[min, max]` as `(start, end, count)` triples.
/// NaN values are dropped; a constant input collapses to a single bin.
pub fn histogram_bins(values: &[f64], n_bins: usize) -> Vec<(f64, f64, usize)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || n_bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![(min, max, finite.len())];
    }

    let width = (max - min) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for v in &finite {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = min + i as f64 * width;
            (start, start + width, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales_table() -> Table {
        Table::new(
            vec!["date".into(), "region".into(), "sales".into()],
            vec![
                vec![
                    Value::String("2024-01-01".into()),
                    Value::String("West".into()),
                    Value::Integer(120),
                ],
                vec![
                    Value::String("2024-01-02".into()),
                    Value::String("East".into()),
                    Value::Integer(80),
                ],
                vec![
                    Value::String("2024-01-03".into()),
                    Value::String("West".into()),
                    Value::Float(95.5),
                ],
            ],
        )
    }

    fn request(kind: ChartKind, x: &str, y: &[&str]) -> ChartRequest {
        ChartRequest {
            kind,
            x: x.into(),
            y: y.iter().map(|s| s.to_string()).collect(),
            title: String::new(),
            color: None,
        }
    }

    #[test]
    fn line_chart_resolves_multiple_series_over_shared_x() {
        let t = sales_table();
        let d = specify(&t, &request(ChartKind::Line, "date", &["sales", "sales"])).unwrap();
        match d.data {
            ChartData::Series { x_name, x, series } => {
                assert_eq!(x_name, "date");
                assert_eq!(x.len(), 3);
                assert_eq!(series.len(), 2);
                assert_eq!(series[0].name, "sales");
                assert_eq!(series[0].values[0], Value::Integer(120));
            }
            other => panic!("expected Series data, got {other:?}"),
        }
    }

    #[test]
    fn missing_x_column_fails() {
        let t = sales_table();
        let err = specify(&t, &request(ChartKind::Bar, "profit", &["sales"])).unwrap_err();
        assert!(matches!(err, ExploreError::InvalidChartRequest(_)));
    }

    #[test]
    fn missing_y_column_fails() {
        let t = sales_table();
        let err = specify(&t, &request(ChartKind::Scatter, "date", &["profit"])).unwrap_err();
        assert!(matches!(err, ExploreError::InvalidChartRequest(_)));
    }

    #[test]
    fn empty_y_fails_for_non_histogram_kinds() {
        let t = sales_table();
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Scatter] {
            let err = specify(&t, &request(kind, "date", &[])).unwrap_err();
            assert!(matches!(err, ExploreError::InvalidChartRequest(_)));
        }
    }

    #[test]
    fn pie_requires_exactly_one_y_column() {
        let t = sales_table();
        assert!(specify(&t, &request(ChartKind::Pie, "region", &["sales"])).is_ok());
        for bad in [&[][..], &["sales", "date"][..]] {
            let err = specify(&t, &request(ChartKind::Pie, "region", bad)).unwrap_err();
            assert!(matches!(err, ExploreError::InvalidChartRequest(_)));
        }
    }

    #[test]
    fn pie_labels_come_from_x_and_sizes_from_y() {
        let t = sales_table();
        let d = specify(&t, &request(ChartKind::Pie, "region", &["sales"])).unwrap();
        match d.data {
            ChartData::Pie { labels, values } => {
                assert_eq!(labels, vec!["West", "East", "West"]);
                assert_eq!(values, vec![120.0, 80.0, 95.5]);
            }
            other => panic!("expected Pie data, got {other:?}"),
        }
    }

    #[test]
    fn histogram_ignores_y_and_keeps_numeric_x() {
        let t = sales_table();
        let d = specify(&t, &request(ChartKind::Histogram, "sales", &[])).unwrap();
        match d.data {
            ChartData::Histogram { x_name, values } => {
                assert_eq!(x_name, "sales");
                assert_eq!(values, vec![120.0, 80.0, 95.5]);
            }
            other => panic!("expected Histogram data, got {other:?}"),
        }
        // y, when present, is ignored rather than rejected.
        assert!(specify(&t, &request(ChartKind::Histogram, "sales", &["date"])).is_ok());
    }

    #[test]
    fn histogram_bins_cover_range_and_count_all_values() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 9.9, 10.0];
        let bins = histogram_bins(&values, 5);
        assert_eq!(bins.len(), 5);
        let total: usize = bins.iter().map(|&(_, _, c)| c).sum();
        assert_eq!(total, values.len());
        assert_eq!(bins[0].0, 0.0);
        assert!((bins[4].1 - 10.0).abs() < 1e-9);
        // Max value lands in the last bin, not past it.
        assert!(bins[4].2 >= 2);
    }

    #[test]
    fn histogram_bins_constant_input_collapses_to_one_bin() {
        let bins = histogram_bins(&[3.0, 3.0, 3.0], 10);
        assert_eq!(bins, vec![(3.0, 3.0, 3)]);
    }

    #[test]
    fn histogram_bins_empty_input() {
        assert!(histogram_bins(&[], 10).is_empty());
        assert!(histogram_bins(&[f64::NAN], 10).is_empty());
    }
}
