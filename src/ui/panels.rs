use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::{FilterColumn, FilterValue};
use crate::presentation::MetricCard;
use crate::state::Session;

// ---------------------------------------------------------------------------
// Left side panel – settings and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: theme switch, then one multi-select per column.
pub fn side_panel(ui: &mut Ui, session: &mut Session) {
    ui.heading("Settings");
    ui.separator();

    if ui.button(session.theme.toggle_label()).clicked() {
        session.toggle_theme();
    }
    ui.label(format!("Current theme: {}", session.theme.name()));

    ui.add_space(8.0);
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for column in FilterColumn::ALL {
                filter_section(ui, session, column);
            }
        });
}

/// Collapsible multi-select for one column.
fn filter_section(ui: &mut Ui, session: &mut Session, column: FilterColumn) {
    // Option lists come from the full dataset so they never shrink.
    let values: Vec<FilterValue> = session
        .dataset()
        .available_values(column)
        .iter()
        .cloned()
        .collect();

    let (n_selected, n_total) = session.selection.summary(session.dataset(), column);
    let header_text = format!("{column}  ({n_selected}/{n_total})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.label())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    session.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    session.select_none(column);
                }
            });

            for value in &values {
                let mut checked = session.selection.is_selected(column, value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    session.toggle_filter_value(column, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Row counts for the loaded dataset and the current view.
pub fn top_bar(ui: &mut Ui, loaded: usize, visible: usize) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{loaded} records loaded, {visible} visible"));
    });
}

// ---------------------------------------------------------------------------
// Central panel header and metric cards
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.heading(RichText::new("Data Industry Salary Dashboard").size(26.0));
    ui.label(
        "Explore salary data for data roles over recent years. \
         Use the filters on the left to refine the analysis.",
    );
    ui.add_space(6.0);
}

/// Four metric cards side by side.
pub fn metrics_row(ui: &mut Ui, cards: &[MetricCard]) {
    ui.strong("Overall metrics (annual salary in USD)");
    ui.add_space(4.0);
    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, card) in columns.iter_mut().zip(cards) {
            ui.label(card.label);
            ui.label(RichText::new(&card.value).size(22.0).strong());
        }
    });
}
