use std::collections::BTreeSet;

use crate::data::chart::{specify, ChartDescriptor, ChartKind, ChartRequest};
use crate::data::error::ExploreError;
use crate::data::filter::{filter_and_sort, FilterSpec, SortSpec};
use crate::data::ingest::ingest;
use crate::data::model::{Table, Value};
use crate::data::project::project;

// ---------------------------------------------------------------------------
// Per-chart configuration (widget state behind one chart section)
// ---------------------------------------------------------------------------

/// Option values for one of the 1–10 configurable charts.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub x: String,
    pub y: Vec<String>,
    pub title: String,
    /// Whether the uniform color override below is applied.
    pub color_enabled: bool,
    pub color: [u8; 3],
}

impl ChartConfig {
    pub fn new(default_x: String) -> Self {
        Self {
            kind: ChartKind::Line,
            x: default_x,
            y: Vec::new(),
            title: String::new(),
            color_enabled: false,
            color: [100, 150, 250],
        }
    }

    pub fn request(&self) -> ChartRequest {
        ChartRequest {
            kind: self.kind,
            x: self.x.clone(),
            y: self.y.clone(),
            title: self.title.clone(),
            color: self.color_enabled.then_some(self.color),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Widgets mutate the option
/// fields; [`AppState::recompute`] re-runs the whole pipeline off the
/// immutable table into the cached output fields.
pub struct AppState {
    /// Ingested table (None until a file is uploaded successfully).
    pub table: Option<Table>,

    // -- Interactive table options --
    /// Columns to display, in selection order.
    pub selected_columns: Vec<String>,
    /// Head-N row limit for the interactive table.
    pub row_limit: usize,

    // -- Chart options --
    pub charts: Vec<ChartConfig>,

    // -- Filter & sort options --
    pub filters: FilterSpec,
    pub sort_column: Option<String>,
    pub sort_ascending: bool,

    // -- Sidebar display hints, no pipeline effect --
    pub x_axis_variation: bool,
    pub trend_analysis: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    // -- Pipeline outputs, recomputed after any option change --
    /// Projected head-N table (None while no columns are selected).
    pub projected: Option<Table>,
    /// One result per configured chart; failures are isolated per chart.
    pub descriptors: Vec<Result<ChartDescriptor, ExploreError>>,
    /// Filtered and sorted view of the full table.
    pub filtered: Option<Result<Table, ExploreError>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            selected_columns: Vec::new(),
            row_limit: 10,
            charts: Vec::new(),
            filters: FilterSpec::default(),
            sort_column: None,
            sort_ascending: true,
            x_axis_variation: false,
            trend_analysis: false,
            status_message: None,
            projected: None,
            descriptors: Vec::new(),
            filtered: None,
        }
    }
}

impl AppState {
    /// Ingest uploaded bytes. On success the new table replaces the old one
    /// and all options reset; on failure the previous table and its views
    /// stay untouched.
    pub fn upload(&mut self, bytes: &[u8]) {
        match ingest(bytes) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.n_rows(),
                    table.columns
                );
                self.set_table(table);
                self.status_message = Some("CSV file uploaded successfully!".to_string());
            }
            Err(e) => {
                log::error!("Failed to parse upload: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Install a freshly ingested table and reset all option state.
    pub fn set_table(&mut self, table: Table) {
        self.selected_columns.clear();
        self.row_limit = 10;
        self.charts = vec![ChartConfig::new(
            table.columns.first().cloned().unwrap_or_default(),
        )];
        self.filters = FilterSpec::default();
        self.sort_column = table.columns.first().cloned();
        self.sort_ascending = true;
        self.table = Some(table);
        self.status_message = None;
        self.recompute();
    }

    /// Re-run projection, chart specification and filter+sort off the
    /// current table and options. Stage failures land in the cached
    /// outputs (or the status line) without aborting the other stages.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            self.projected = None;
            self.descriptors.clear();
            self.filtered = None;
            return;
        };

        self.projected = match project(table, &self.selected_columns, self.row_limit) {
            Ok(view) => view,
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        };

        self.descriptors = self
            .charts
            .iter()
            .map(|config| specify(table, &config.request()))
            .collect();

        self.filtered = self.sort_column.as_ref().map(|column| {
            filter_and_sort(
                table,
                &self.filters,
                &SortSpec {
                    column: column.clone(),
                    ascending: self.sort_ascending,
                },
            )
        });
    }

    /// Grow or shrink the chart list to `n`, keeping existing configs.
    pub fn set_chart_count(&mut self, n: usize) {
        let default_x = self
            .table
            .as_ref()
            .and_then(|t| t.columns.first().cloned())
            .unwrap_or_default();
        self.charts.resize_with(n, || ChartConfig::new(default_x.clone()));
        self.recompute();
    }

    /// Toggle a column in the interactive-table selection, preserving
    /// selection order.
    pub fn toggle_selected_column(&mut self, column: &str) {
        if let Some(pos) = self.selected_columns.iter().position(|c| c == column) {
            self.selected_columns.remove(pos);
        } else {
            self.selected_columns.push(column.to_string());
        }
        self.recompute();
    }

    /// Toggle a single value in a column's accepted-value filter set.
    pub fn toggle_filter_value(&mut self, column: &str, value: &Value) {
        let accepted = self.filters.entry(column.to_string()).or_default();
        if accepted.contains(value) {
            accepted.remove(value);
        } else {
            accepted.insert(value.clone());
        }
        self.recompute();
    }

    /// Clear a column's filter (empty set = unfiltered).
    pub fn clear_filter(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALES: &str = "\
date,region,sales
2024-01-01,West,120
2024-01-02,East,80
2024-01-03,West,95
";

    #[test]
    fn upload_resets_options_and_runs_pipeline() {
        let mut state = AppState::default();
        state.upload(SALES.as_bytes());
        assert!(state.table.is_some());
        assert_eq!(state.charts.len(), 1);
        assert_eq!(state.sort_column.as_deref(), Some("date"));
        // No columns selected yet → no projected table.
        assert!(state.projected.is_none());
        assert!(state.filtered.as_ref().unwrap().is_ok());
    }

    #[test]
    fn failed_upload_keeps_previous_table() {
        let mut state = AppState::default();
        state.upload(SALES.as_bytes());
        state.upload(b"");
        assert!(state.table.is_some());
        assert_eq!(state.table.as_ref().unwrap().n_rows(), 3);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }

    #[test]
    fn invalid_chart_does_not_abort_the_others() {
        let mut state = AppState::default();
        state.upload(SALES.as_bytes());
        state.set_chart_count(2);
        state.charts[0].y = vec!["sales".to_string()];
        state.charts[1].kind = ChartKind::Pie;
        state.charts[1].y = vec!["sales".to_string(), "region".to_string()];
        state.recompute();
        assert!(state.descriptors[0].is_ok());
        assert!(matches!(
            state.descriptors[1],
            Err(ExploreError::InvalidChartRequest(_))
        ));
    }

    #[test]
    fn toggling_columns_projects_in_selection_order() {
        let mut state = AppState::default();
        state.upload(SALES.as_bytes());
        state.toggle_selected_column("sales");
        state.toggle_selected_column("region");
        let view = state.projected.as_ref().unwrap();
        assert_eq!(view.columns, vec!["sales", "region"]);
        state.toggle_selected_column("sales");
        let view = state.projected.as_ref().unwrap();
        assert_eq!(view.columns, vec!["region"]);
    }

    #[test]
    fn filter_toggle_flows_into_filtered_view() {
        let mut state = AppState::default();
        state.upload(SALES.as_bytes());
        state.sort_column = Some("sales".to_string());
        state.sort_ascending = false;
        state.toggle_filter_value("region", &Value::String("West".into()));
        let view = state.filtered.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(view.n_rows(), 2);
        assert_eq!(view.rows[0][2], Value::Integer(120));
        // Clearing the filter restores every row.
        state.clear_filter("region");
        let view = state.filtered.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(view.n_rows(), 3);
    }
}
