use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::presentation::format_usd;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Work arrangement",
    "Salary (USD)",
    "Residence",
];

/// Raw rows of the current view. Only visible rows are laid out.
pub fn records_table(ui: &mut Ui, view: &FilteredView<'_>) {
    if view.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .max_scroll_height(400.0)
        .header(row_height, |mut header| {
            for name in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, view.len(), |mut row| {
                let Some(record) = view.get(row.index()) else {
                    return;
                };
                row.col(|ui: &mut Ui| {
                    ui.label(record.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.seniority);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.contract_type);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.company_size);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.role);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.remote_mode);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_usd(record.salary_usd));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&record.residence_country_code);
                });
            });
        });
}
