//! Turns an [`AggregateResult`] and a [`Theme`] into render-ready chart and
//! metric descriptions.
//!
//! Nothing here touches egui state: every function is a plain mapping, and
//! the widgets in `ui` only draw what they are handed. Theme-dependent
//! choices come from one [`ThemePalette`] lookup per dashboard.

use eframe::egui::Color32;

use crate::data::aggregate::{AggregateResult, SummaryMetrics};
use crate::theme::{ColorScale, Theme, ThemePalette};

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

pub fn metric_cards(metrics: &SummaryMetrics) -> [MetricCard; 4] {
    [
        MetricCard {
            label: "Mean salary",
            value: format_usd(metrics.mean_salary_usd),
        },
        MetricCard {
            label: "Max salary",
            value: format_usd(metrics.max_salary_usd),
        },
        MetricCard {
            label: "Total records",
            value: format_count(metrics.count),
        },
        MetricCard {
            label: "Most frequent role",
            value: metrics.modal_role.clone(),
        },
    ]
}

/// `$1,234,568` – whole dollars, rounded half away from zero.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// `12,345`
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// One dashboard tile: a title plus either a chart or a "no data" notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    HorizontalBar(BarSpec),
    Histogram(HistogramSpec),
    Donut(DonutSpec),
    Choropleth(ChoroplethSpec),
    NoData(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    /// `(category, value)` from bottom to top.
    pub bars: Vec<(String, f64)>,
    pub value_axis: &'static str,
    pub color: Color32,
    pub background: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    /// `(centre, width, count)` per bin.
    pub bins: Vec<(f64, f64, usize)>,
    pub value_axis: &'static str,
    pub color: Color32,
    pub background: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSlice {
    pub label: String,
    pub count: usize,
    /// Fraction of the whole, `0.0..=1.0`.
    pub share: f64,
    pub color: Color32,
}

impl DonutSlice {
    /// `remoto 42.1%`
    pub fn caption(&self) -> String {
        format!("{} {:.1}%", self.label, self.share * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonutSpec {
    pub slices: Vec<DonutSlice>,
    /// Inner radius as a fraction of the outer radius.
    pub hole: f32,
    pub background: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// ISO3 country code.
    pub code: String,
    pub value: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethSpec {
    pub regions: Vec<Region>,
    pub value_label: &'static str,
    pub min: f64,
    pub max: f64,
    /// Gradient the region colours were taken from, for the legend.
    pub scale: ColorScale,
    pub background: Color32,
}

/// Everything the central panel shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub metrics: [MetricCard; 4],
    pub charts: [Chart; 4],
}

impl DashboardView {
    pub fn build(result: &AggregateResult, theme: Theme) -> Self {
        let palette = theme.palette();
        Self {
            metrics: metric_cards(&result.metrics),
            charts: [
                role_ranking_chart(result, palette),
                salary_distribution_chart(result, palette),
                remote_share_chart(result, palette),
                country_map_chart(result, palette),
            ],
        }
    }
}

pub fn role_ranking_chart(result: &AggregateResult, palette: &ThemePalette) -> Chart {
    let title = format!("Top {} roles by mean salary", result.top_k);
    if result.top_roles.is_empty() {
        return no_data(title, "No data to display in the roles chart.");
    }
    Chart {
        title,
        body: ChartBody::HorizontalBar(BarSpec {
            bars: result
                .top_roles
                .iter()
                .map(|r| (r.role.clone(), r.mean_salary_usd))
                .collect(),
            value_axis: "Mean annual salary (USD)",
            color: palette.accent,
            background: palette.plot_background,
        }),
    }
}

pub fn salary_distribution_chart(result: &AggregateResult, palette: &ThemePalette) -> Chart {
    let title = "Annual salary distribution".to_string();
    let Some(hist) = &result.histogram else {
        return no_data(title, "No data to display in the distribution chart.");
    };
    Chart {
        title,
        body: ChartBody::Histogram(HistogramSpec {
            bins: hist.bins().collect(),
            value_axis: "Salary range (USD)",
            color: palette.accent,
            background: palette.plot_background,
        }),
    }
}

pub fn remote_share_chart(result: &AggregateResult, palette: &ThemePalette) -> Chart {
    let title = "Work arrangement share".to_string();
    let total: usize = result.remote_modes.iter().map(|c| c.count).sum();
    if total == 0 {
        return no_data(title, "No data to display in the work arrangement chart.");
    }
    let slices = result
        .remote_modes
        .iter()
        .enumerate()
        .map(|(i, c)| DonutSlice {
            label: c.label.clone(),
            count: c.count,
            share: c.count as f64 / total as f64,
            color: palette.categorical.discrete(i),
        })
        .collect();
    Chart {
        title,
        body: ChartBody::Donut(DonutSpec {
            slices,
            hole: 0.5,
            background: palette.plot_background,
        }),
    }
}

pub fn country_map_chart(result: &AggregateResult, palette: &ThemePalette) -> Chart {
    let title = format!("Mean {} salary by country", result.focus_role);
    if result.is_empty() {
        return no_data(title, "No data to display in the country chart.");
    }
    if result.country_means.is_empty() {
        let message = format!("No {} data to display on the map.", result.focus_role);
        return no_data(title, &message);
    }

    let (min, max) = result
        .country_means
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let scale = palette.continuous;
    let regions = result
        .country_means
        .iter()
        .map(|(code, &value)| Region {
            code: code.clone(),
            value,
            color: scale.map_value(value, min, max),
        })
        .collect();

    Chart {
        title,
        body: ChartBody::Choropleth(ChoroplethSpec {
            regions,
            value_label: "Mean salary (USD)",
            min,
            max,
            scale,
            background: palette.plot_background,
        }),
    }
}

fn no_data(title: String, message: &str) -> Chart {
    Chart {
        title,
        body: ChartBody::NoData(message.to_string()),
    }
}
