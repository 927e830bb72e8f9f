use std::path::Path;

use anyhow::Context;
use eframe::egui::{self, Color32, DragValue, RichText, Ui};

use crate::data::chart::{ChartDescriptor, ChartKind};
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(t) = &state.table {
            ui.label(format!("{} rows × {} columns", t.n_rows(), t.n_cols()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – user guide and display-hint flags
// ---------------------------------------------------------------------------

/// Render the sidebar: a short user guide plus the two feature checkboxes.
/// The checkboxes only toggle the help text below them; they feed nothing
/// into the pipeline.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("User Guide");
    ui.separator();
    ui.label("1. Upload a CSV file via File → Open…");
    ui.label("2. Explore the data overview and column list.");
    ui.label("3. Pick columns and a row count for the interactive table.");
    ui.label("4. Generate charts by choosing a chart type, X-axis column and Y-axis column(s).");
    ui.label("5. Customize each chart's title and color, and export its spec as JSON.");
    ui.label("6. Use filtering and sorting to focus on subsets of the data.");

    ui.add_space(8.0);
    ui.heading("Additional Features");
    ui.separator();
    ui.checkbox(&mut state.x_axis_variation, "Enable X-Axis Variation");
    ui.checkbox(&mut state.trend_analysis, "Enable Trend Analysis");

    if state.x_axis_variation {
        ui.label("Vary the X-axis using the slicer-like feature in each chart.");
    }
    if state.trend_analysis {
        ui.label("Add trends (linear, exponential, polynomial, etc.) to each chart.");
    }
}

// ---------------------------------------------------------------------------
// Central panel – the four exploration sections
// ---------------------------------------------------------------------------

/// Render overview, interactive table, chart generation and filter & sort.
/// Any widget change triggers one full pipeline recompute at the end.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file to begin  (File → Open…)");
        });
        return;
    };

    // Clone what we need so we can mutate state inside the loops.
    let columns = dataset.columns.clone();
    let unique = dataset.unique_values.clone();
    let n_rows = dataset.n_rows();
    let n_cols = dataset.n_cols();

    let mut changed = false;
    let mut export_request: Option<usize> = None;

    // ---- Data overview ----
    ui.heading("Data Overview");
    ui.label(format!("Total Rows: {n_rows}"));
    ui.label(format!("Total Columns: {n_cols}"));
    ui.label(format!("Columns: {}", columns.join(", ")));
    ui.separator();

    // ---- Interactive table ----
    ui.heading("Interactive Table");
    ui.label("Select columns to display");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for col in &columns {
            let mut selected = state.selected_columns.contains(col);
            if ui.checkbox(&mut selected, col).changed() {
                state.toggle_selected_column(col);
            }
        }
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Number of rows to display");
        changed |= ui
            .add(DragValue::new(&mut state.row_limit).range(1..=100_000))
            .changed();
    });
    // Empty selection suppresses the table entirely instead of rendering
    // an empty one.
    if let Some(view) = &state.projected {
        table::data_table(ui, "projected", view);
    }
    ui.separator();

    // ---- Chart generation ----
    ui.heading("Chart Generation");
    let mut n_charts = state.charts.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Number of charts to generate");
        if ui.add(DragValue::new(&mut n_charts).range(1..=10)).changed() {
            state.set_chart_count(n_charts);
        }
    });

    for i in 0..state.charts.len() {
        egui::CollapsingHeader::new(RichText::new(format!("Chart {}", i + 1)).strong())
            .id_salt(("chart_config", i))
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                changed |= chart_config_widgets(ui, state, i, &columns);

                match state.descriptors.get(i) {
                    Some(Ok(descriptor)) => {
                        plot::chart_view(ui, i, descriptor);
                        if ui.button("Export chart spec (JSON)…").clicked() {
                            export_request = Some(i);
                        }
                    }
                    Some(Err(e)) => {
                        ui.label(RichText::new(e.to_string()).color(Color32::RED));
                    }
                    None => {}
                }
            });
    }
    ui.separator();

    // ---- Filter & sort ----
    ui.heading("Data Filtering and Sorting");
    for col in &columns {
        let Some(all_values) = unique.get(col) else {
            continue;
        };
        let n_selected = state.filters.get(col).map_or(0, |s| s.len());
        let header_text = format!("{col}  ({n_selected}/{} selected)", all_values.len());

        egui::CollapsingHeader::new(RichText::new(header_text).strong())
            .id_salt(("filter", col))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_filter(col);
                }
                for val in all_values {
                    let is_selected = state
                        .filters
                        .get(col)
                        .is_some_and(|s| s.contains(val));
                    let mut checked = is_selected;
                    if ui.checkbox(&mut checked, val.to_string()).changed() {
                        state.toggle_filter_value(col, val);
                    }
                }
            });
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Sort by");
        let current = state.sort_column.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("sort_column")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    if ui.selectable_label(current == *col, col).clicked() {
                        state.sort_column = Some(col.clone());
                        changed = true;
                    }
                }
            });
        changed |= ui
            .radio_value(&mut state.sort_ascending, true, "Ascending")
            .changed();
        changed |= ui
            .radio_value(&mut state.sort_ascending, false, "Descending")
            .changed();
    });

    match &state.filtered {
        Some(Ok(view)) => {
            ui.label(format!("{} of {n_rows} rows match", view.n_rows()));
            table::data_table(ui, "filtered", view);
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        None => {}
    }

    if let Some(idx) = export_request {
        export_descriptor(state, idx);
    }
    if changed {
        state.recompute();
    }
}

/// Widgets for one chart's kind/x/y/title/color. Returns whether anything
/// changed.
fn chart_config_widgets(
    ui: &mut Ui,
    state: &mut AppState,
    idx: usize,
    columns: &[String],
) -> bool {
    let mut changed = false;
    let config = &mut state.charts[idx];

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Chart type");
        egui::ComboBox::from_id_salt(("chart_kind", idx))
            .selected_text(config.kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    if ui
                        .selectable_label(config.kind == kind, kind.label())
                        .clicked()
                    {
                        config.kind = kind;
                        changed = true;
                    }
                }
            });

        ui.label("X-axis");
        egui::ComboBox::from_id_salt(("chart_x", idx))
            .selected_text(&config.x)
            .show_ui(ui, |ui: &mut Ui| {
                for col in columns {
                    if ui.selectable_label(config.x == *col, col).clicked() {
                        config.x = col.clone();
                        changed = true;
                    }
                }
            });
    });

    ui.label("Y-axis column(s)");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for col in columns {
            let mut selected = config.y.contains(col);
            if ui.checkbox(&mut selected, col).changed() {
                if let Some(pos) = config.y.iter().position(|c| c == col) {
                    config.y.remove(pos);
                } else {
                    config.y.push(col.clone());
                }
                changed = true;
            }
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Title");
        changed |= ui.text_edit_singleline(&mut config.title).changed();
        changed |= ui.checkbox(&mut config.color_enabled, "Uniform color").changed();
        if config.color_enabled {
            changed |= ui.color_edit_button_srgb(&mut config.color).changed();
        }
    });

    changed
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match read_upload(&path) {
            Ok(bytes) => state.upload(&bytes),
            Err(e) => {
                log::error!("Failed to read file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn read_upload(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Save one chart's resolved descriptor as JSON via a save dialog.
fn export_descriptor(state: &mut AppState, idx: usize) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export chart spec")
        .add_filter("JSON", &["json"])
        .set_file_name(format!("chart_{}.json", idx + 1))
        .save_file()
    else {
        return;
    };

    let result = match state.descriptors.get(idx) {
        Some(Ok(descriptor)) => write_descriptor(&path, descriptor),
        _ => return,
    };

    match result {
        Ok(()) => {
            log::info!("Exported chart {} spec to {}", idx + 1, path.display());
            state.status_message =
                Some(format!("Exported chart {} spec to {}", idx + 1, path.display()));
        }
        Err(e) => {
            log::error!("Failed to export chart spec: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn write_descriptor(path: &Path, descriptor: &ChartDescriptor) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(descriptor).context("serializing chart spec")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
