use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::presentation::{
    format_usd, BarSpec, Chart, ChartBody, ChoroplethSpec, DonutSpec, HistogramSpec,
};

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Lay the charts out two per row.
pub fn chart_grid(ui: &mut Ui, charts: &[Chart]) {
    for (row, pair) in charts.chunks(2).enumerate() {
        ui.columns(2, |columns: &mut [Ui]| {
            for (col, (ui, chart)) in columns.iter_mut().zip(pair).enumerate() {
                chart_tile(ui, &format!("chart_{row}_{col}"), chart);
            }
        });
        ui.add_space(12.0);
    }
}

/// Draw one titled chart, or its placeholder.
pub fn chart_tile(ui: &mut Ui, id: &str, chart: &Chart) {
    ui.strong(&chart.title);
    match &chart.body {
        ChartBody::HorizontalBar(spec) => bar_chart(ui, id, spec),
        ChartBody::Histogram(spec) => histogram(ui, id, spec),
        ChartBody::Donut(spec) => donut(ui, spec),
        ChartBody::Choropleth(spec) => choropleth(ui, spec),
        ChartBody::NoData(message) => {
            let warning = ui.visuals().warn_fg_color;
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.set_min_height(CHART_HEIGHT / 4.0);
                ui.colored_label(warning, message);
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Plot-based charts
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, id: &str, spec: &BarSpec) {
    let labels: Vec<String> = spec.bars.iter().map(|(label, _)| label.clone()).collect();
    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, (label, value))| Bar::new(i as f64, *value).name(label).fill(spec.color))
        .collect();
    let chart = BarChart::new(bars).horizontal().color(spec.color);

    egui::Frame::default().fill(spec.background).show(ui, |ui: &mut Ui| {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .show_background(false)
            .x_axis_label(spec.value_axis)
            .y_axis_formatter(move |mark, _range| {
                // Only label the integer positions where bars sit.
                let slot = mark.value.round();
                if (mark.value - slot).abs() > 1e-6 || slot < 0.0 {
                    return String::new();
                }
                labels.get(slot as usize).cloned().unwrap_or_default()
            })
            .y_axis_min_width(120.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| plot_ui.bar_chart(chart));
    });
}

fn histogram(ui: &mut Ui, id: &str, spec: &HistogramSpec) {
    let bars: Vec<Bar> = spec
        .bins
        .iter()
        .map(|&(centre, width, count)| {
            Bar::new(centre, count as f64)
                .width(width)
                .fill(spec.color)
                .name(format!("{} - {}", format_usd(centre - width / 2.0), format_usd(centre + width / 2.0)))
        })
        .collect();
    let chart = BarChart::new(bars).color(spec.color);

    egui::Frame::default().fill(spec.background).show(ui, |ui: &mut Ui| {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .show_background(false)
            .x_axis_label(spec.value_axis)
            .y_axis_label("count")
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| plot_ui.bar_chart(chart));
    });
}

// ---------------------------------------------------------------------------
// Painter-based charts
// ---------------------------------------------------------------------------

/// Ring chart with a legend to its right.
fn donut(ui: &mut Ui, spec: &DonutSpec) {
    let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, spec.background);

    let outer = rect.height() * 0.45;
    let inner = outer * spec.hole;
    let center = Pos2::new(rect.left() + outer + 12.0, rect.center().y);

    let mut start = -FRAC_PI_2;
    for slice in &spec.slices {
        let sweep = slice.share as f32 * TAU;
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let step = sweep / steps as f32;
        for s in 0..steps {
            let a0 = start + step * s as f32;
            let a1 = a0 + step;
            let points = vec![
                polar(center, outer, a0),
                polar(center, outer, a1),
                polar(center, inner, a1),
                polar(center, inner, a0),
            ];
            painter.add(Shape::convex_polygon(points, slice.color, Stroke::NONE));
        }
        start += sweep;
    }

    let text_color = ui.visuals().text_color();
    let legend_x = center.x + outer + 24.0;
    let mut y = rect.top() + 24.0;
    for slice in &spec.slices {
        let swatch = egui::Rect::from_min_size(Pos2::new(legend_x, y - 6.0), egui::vec2(12.0, 12.0));
        painter.rect_filled(swatch, 2.0, slice.color);
        painter.text(
            Pos2::new(legend_x + 18.0, y),
            Align2::LEFT_CENTER,
            slice.caption(),
            FontId::proportional(13.0),
            text_color,
        );
        y += 20.0;
    }

    let tooltip = spec
        .slices
        .iter()
        .map(|s| format!("{}: {}", s.label, s.count))
        .collect::<Vec<_>>()
        .join("\n");
    response.on_hover_text(tooltip);
}

fn polar(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + radius * egui::vec2(angle.cos(), angle.sin())
}

/// Country tiles coloured by value, with a gradient legend underneath.
fn choropleth(ui: &mut Ui, spec: &ChoroplethSpec) {
    egui::Frame::default().fill(spec.background).show(ui, |ui: &mut Ui| {
        ui.set_min_height(CHART_HEIGHT);
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for region in &spec.regions {
                let (rect, response) = ui.allocate_exact_size(egui::vec2(56.0, 34.0), Sense::hover());
                ui.painter().rect_filled(rect, 3.0, region.color);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    &region.code,
                    FontId::monospace(12.0),
                    contrast_text(region.color),
                );
                response.on_hover_text(format!("{}: {}", region.code, format_usd(region.value)));
            }
        });

        ui.add_space(8.0);
        ui.label(spec.value_label);
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format_usd(spec.min));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 12.0), Sense::hover());
            let steps = 32;
            let width = rect.width() / steps as f32;
            for i in 0..steps {
                let cell = egui::Rect::from_min_size(
                    Pos2::new(rect.left() + width * i as f32, rect.top()),
                    egui::vec2(width + 0.5, rect.height()),
                );
                let t = i as f32 / (steps - 1) as f32;
                ui.painter().rect_filled(cell, 0.0, spec.scale.sample(t));
            }
            ui.label(format_usd(spec.max));
        });
    });
}

/// Black or white, whichever reads better on `fill`.
fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(contrast_text(Color32::WHITE), Color32::BLACK);
        assert_eq!(contrast_text(Color32::from_rgb(13, 8, 135)), Color32::WHITE);
        assert_eq!(contrast_text(Color32::from_rgb(240, 249, 33)), Color32::BLACK);
    }

    #[test]
    fn polar_starts_at_top_for_minus_half_pi() {
        let p = polar(Pos2::new(10.0, 10.0), 5.0, -FRAC_PI_2);
        assert!((p.x - 10.0).abs() < 1e-4);
        assert!((p.y - 5.0).abs() < 1e-4);
    }
}
