use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Table widget
// ---------------------------------------------------------------------------

/// Render a [`Table`] as a striped, scrollable grid.
///
/// `id` keeps multiple tables on the same page from sharing scroll state.
/// Rows are virtualized by `TableBuilder`, so large filtered views stay
/// responsive.
pub fn data_table(ui: &mut Ui, id: &str, table: &Table) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(320.0)
            .columns(Column::auto().at_least(60.0), table.n_cols())
            .header(20.0, |mut header| {
                for name in &table.columns {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, table.n_rows(), |mut row| {
                    let i = row.index();
                    for cell in &table.rows[i] {
                        row.col(|ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}
