use eframe::egui;

use crate::data::aggregate::AggregateResult;
use crate::presentation::DashboardView;
use crate::state::Session;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub session: Session,
}

impl SalaryDashboardApp {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.session.theme.palette().visuals());

        // ---- Left side panel: settings and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session);
            });

        // Filter and aggregate from scratch for whatever the panel just set.
        let view = self.session.view();
        let result = AggregateResult::compute(&view, &self.session.options);
        let dashboard = DashboardView::build(&result, self.session.theme);

        // ---- Top panel: row counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, self.session.dataset().len(), view.len());
        });

        // ---- Central panel: metrics, charts, raw rows ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::header(ui);
                    panels::metrics_row(ui, &dashboard.metrics);
                    ui.separator();

                    ui.heading("Charts");
                    charts::chart_grid(ui, &dashboard.charts);
                    ui.separator();

                    ui.heading("Detailed data");
                    table::records_table(ui, &view);
                });
        });
    }
}
