//! Summary metrics and grouped tables over a [`FilteredView`].
//!
//! Every function here is total: an empty view yields a sentinel (`0`,
//! `"N/A"`) or an empty table rather than an error, so the presentation
//! layer only has to decide between a chart and a placeholder.
//!
//! Grouping keeps groups in order of first appearance in the view. That order
//! is the tie-breaker for both [`modal_role`] and [`top_roles_by_mean_salary`].

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::filter::FilteredView;
use super::model::SalaryRecord;

/// Returned by [`modal_role`] for an empty view.
pub const NO_ROLE: &str = "N/A";

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
pub const DEFAULT_FOCUS_ROLE: &str = "Data Scientist";

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Arithmetic mean of `salary_usd`, `0.0` for an empty view.
pub fn mean_salary(view: &FilteredView<'_>) -> f64 {
    mean_of(view.iter().map(|r| r.salary_usd))
}

/// Largest `salary_usd`, `0.0` for an empty view.
pub fn max_salary(view: &FilteredView<'_>) -> f64 {
    view.iter()
        .map(|r| r.salary_usd)
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))))
        .unwrap_or(0.0)
}

pub fn count(view: &FilteredView<'_>) -> usize {
    view.len()
}

/// Most frequent role. Among equally frequent roles the one seen first wins.
pub fn modal_role(view: &FilteredView<'_>) -> String {
    let counts = count_by(view.iter(), |r| r.role.as_str());
    let mut best: Option<(&str, usize)> = None;
    for (role, n) in counts {
        // Strict comparison keeps the earliest of tied maxima.
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((role, n));
        }
    }
    best.map_or_else(|| NO_ROLE.to_string(), |(role, _)| role.to_string())
}

// ---------------------------------------------------------------------------
// Grouped tables
// ---------------------------------------------------------------------------

/// Mean salary of one role group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleMean {
    pub role: String,
    pub mean_salary_usd: f64,
}

/// The `k` roles with the highest mean salary, ordered low → high.
///
/// Ties on the mean are resolved in favour of the role seen first when
/// choosing which groups make the cut.
pub fn top_roles_by_mean_salary(view: &FilteredView<'_>, k: usize) -> Vec<RoleMean> {
    let mut groups: Vec<RoleMean> = mean_by(view.iter(), |r| r.role.as_str())
        .into_iter()
        .map(|(role, mean)| RoleMean {
            role: role.to_string(),
            mean_salary_usd: mean,
        })
        .collect();

    // Stable sort: equal means keep first-encounter order.
    groups.sort_by(|a, b| b.mean_salary_usd.total_cmp(&a.mean_salary_usd));
    groups.truncate(k);
    groups.reverse();
    groups
}

/// Equal-width salary histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    /// `(centre, width, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, &n)| ((edge[0] + edge[1]) / 2.0, edge[1] - edge[0], n))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Split `[min, max]` of the view's salaries into `bin_count` equal bins.
///
/// Bins are half-open except the last, which also holds `max`. When every
/// salary is identical the range collapses and a single bin holds all rows.
/// Returns `None` for an empty view or a zero `bin_count`.
pub fn salary_histogram_bins(view: &FilteredView<'_>, bin_count: usize) -> Option<Histogram> {
    if view.is_empty() || bin_count == 0 {
        return None;
    }

    let (min, max) = view.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.salary_usd), hi.max(r.salary_usd))
    });

    if max <= min {
        return Some(Histogram {
            edges: vec![min, max],
            counts: vec![view.len()],
        });
    }

    let width = (max - min) / bin_count as f64;
    let edges: Vec<f64> = (0..=bin_count)
        .map(|i| if i == bin_count { max } else { min + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bin_count];
    for r in view.iter() {
        let slot = (((r.salary_usd - min) / width) as usize).min(bin_count - 1);
        counts[slot] += 1;
    }

    Some(Histogram { edges, counts })
}

/// Occurrences of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Frequency of each `remote_mode`, most common first.
pub fn remote_mode_proportions(view: &FilteredView<'_>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = count_by(view.iter(), |r| r.remote_mode.as_str())
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Mean salary per residence country, restricted to records with `role`.
pub fn mean_salary_by_country_for_role(
    view: &FilteredView<'_>,
    role: &str,
) -> BTreeMap<String, f64> {
    mean_by(view.iter().filter(|r| r.role == role), |r| {
        r.residence_country_code.as_str()
    })
    .into_iter()
    .map(|(country, mean)| (country.to_string(), mean))
    .collect()
}

// ---------------------------------------------------------------------------
// AggregateResult – everything the dashboard displays
// ---------------------------------------------------------------------------

/// Knobs for [`AggregateResult::compute`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    pub top_k: usize,
    pub histogram_bins: usize,
    /// Role whose salaries the country map shows.
    pub focus_role: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            focus_role: DEFAULT_FOCUS_ROLE.to_string(),
        }
    }
}

/// Scalar metric cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub mean_salary_usd: f64,
    pub max_salary_usd: f64,
    pub count: usize,
    pub modal_role: String,
}

/// All derived values for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub metrics: SummaryMetrics,
    pub top_k: usize,
    pub top_roles: Vec<RoleMean>,
    pub histogram: Option<Histogram>,
    pub remote_modes: Vec<CategoryCount>,
    pub focus_role: String,
    pub country_means: BTreeMap<String, f64>,
}

impl AggregateResult {
    pub fn compute(view: &FilteredView<'_>, options: &AggregateOptions) -> Self {
        Self {
            metrics: SummaryMetrics {
                mean_salary_usd: mean_salary(view),
                max_salary_usd: max_salary(view),
                count: count(view),
                modal_role: modal_role(view),
            },
            top_k: options.top_k,
            top_roles: top_roles_by_mean_salary(view, options.top_k),
            histogram: salary_histogram_bins(view, options.histogram_bins),
            remote_modes: remote_mode_proportions(view),
            focus_role: options.focus_role.clone(),
            country_means: mean_salary_by_country_for_role(view, &options.focus_role),
        }
    }

    /// Whether the underlying view had no rows.
    pub fn is_empty(&self) -> bool {
        self.metrics.count == 0
    }
}

// -- Grouping helpers --

fn mean_of(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Count records per key, keys in first-encounter order.
fn count_by<'r, K, I>(records: I, key: K) -> Vec<(&'r str, usize)>
where
    I: Iterator<Item = &'r SalaryRecord>,
    K: Fn(&'r SalaryRecord) -> &'r str,
{
    let mut slots: HashMap<&'r str, usize> = HashMap::new();
    let mut groups: Vec<(&'r str, usize)> = Vec::new();
    for r in records {
        let k = key(r);
        match slots.get(k) {
            Some(&i) => groups[i].1 += 1,
            None => {
                slots.insert(k, groups.len());
                groups.push((k, 1));
            }
        }
    }
    groups
}

/// Mean salary per key, keys in first-encounter order.
fn mean_by<'r, K, I>(records: I, key: K) -> Vec<(&'r str, f64)>
where
    I: Iterator<Item = &'r SalaryRecord>,
    K: Fn(&'r SalaryRecord) -> &'r str,
{
    let mut slots: HashMap<&'r str, usize> = HashMap::new();
    let mut sums: Vec<(&'r str, f64, usize)> = Vec::new();
    for r in records {
        let k = key(r);
        match slots.get(k) {
            Some(&i) => {
                sums[i].1 += r.salary_usd;
                sums[i].2 += 1;
            }
            None => {
                slots.insert(k, sums.len());
                sums.push((k, r.salary_usd, 1));
            }
        }
    }
    sums.into_iter()
        .map(|(k, sum, n)| (k, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::fixtures::{record, three_rows};
    use crate::data::model::{FilterColumn, FilterValue, SalaryDataset};

    #[test]
    fn three_row_scenario() {
        let ds = SalaryDataset::from_records(three_rows());
        let view = apply(&ds, &FilterSelection::all(&ds));

        assert_eq!(mean_salary(&view), 120_000.0);
        assert_eq!(max_salary(&view), 140_000.0);
        assert_eq!(count(&view), 3);
        assert_eq!(modal_role(&view), "Data Scientist");

        let by_country = mean_salary_by_country_for_role(&view, "Data Scientist");
        assert_eq!(
            by_country,
            BTreeMap::from([("BRA".to_string(), 140_000.0), ("USA".to_string(), 100_000.0)])
        );
    }

    #[test]
    fn absent_seniority_gives_sentinels() {
        let ds = SalaryDataset::from_records(three_rows());
        let mut sel = FilterSelection::all(&ds);
        sel.set(
            FilterColumn::Seniority,
            BTreeSet::from([FilterValue::Label("estagiario".into())]),
        );
        let view = apply(&ds, &sel);
        let result = AggregateResult::compute(&view, &AggregateOptions::default());

        assert!(result.is_empty());
        assert_eq!(result.metrics.mean_salary_usd, 0.0);
        assert_eq!(result.metrics.max_salary_usd, 0.0);
        assert_eq!(result.metrics.count, 0);
        assert_eq!(result.metrics.modal_role, NO_ROLE);
        assert!(result.top_roles.is_empty());
        assert!(result.histogram.is_none());
        assert!(result.remote_modes.is_empty());
        assert!(result.country_means.is_empty());
    }

    #[test]
    fn modal_role_tie_goes_to_first_seen() {
        let ds = SalaryDataset::from_records(vec![
            record("ML Engineer", 1.0, "USA"),
            record("Data Analyst", 1.0, "USA"),
            record("Data Analyst", 1.0, "USA"),
            record("ML Engineer", 1.0, "USA"),
        ]);
        let view = FilteredView::full(&ds);
        assert_eq!(modal_role(&view), "ML Engineer");
    }

    #[test]
    fn top_roles_ascending_and_capped() {
        let ds = SalaryDataset::from_records(vec![
            record("A", 10.0, "USA"),
            record("B", 50.0, "USA"),
            record("C", 30.0, "USA"),
            record("D", 40.0, "USA"),
            record("B", 70.0, "USA"),
        ]);
        let view = FilteredView::full(&ds);
        let top = top_roles_by_mean_salary(&view, 3);
        let roles: Vec<&str> = top.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(roles, vec!["C", "D", "B"]);
        assert_eq!(top[2].mean_salary_usd, 60.0);
    }

    #[test]
    fn top_roles_tie_keeps_earlier_group() {
        let ds = SalaryDataset::from_records(vec![
            record("First", 10.0, "USA"),
            record("Second", 10.0, "USA"),
            record("Top", 90.0, "USA"),
        ]);
        let view = FilteredView::full(&ds);
        let top = top_roles_by_mean_salary(&view, 2);
        let roles: Vec<&str> = top.iter().map(|r| r.role.as_str()).collect();
        assert_eq!(roles, vec!["First", "Top"]);
    }

    #[test]
    fn histogram_spans_min_to_max() {
        let ds = SalaryDataset::from_records(vec![
            record("A", 0.0, "USA"),
            record("A", 25.0, "USA"),
            record("A", 50.0, "USA"),
            record("A", 100.0, "USA"),
        ]);
        let view = FilteredView::full(&ds);
        let hist = salary_histogram_bins(&view, 4).expect("non-empty view");
        assert_eq!(hist.edges, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(hist.counts, vec![1, 1, 1, 1]);
        assert_eq!(hist.bin_width(), 25.0);
        let centres: Vec<f64> = hist.bins().map(|(c, _, _)| c).collect();
        assert_eq!(centres, vec![12.5, 37.5, 62.5, 87.5]);
    }

    #[test]
    fn histogram_of_identical_salaries_is_one_bin() {
        let ds = SalaryDataset::from_records(vec![
            record("A", 42.0, "USA"),
            record("B", 42.0, "BRA"),
        ]);
        let view = FilteredView::full(&ds);
        let hist = salary_histogram_bins(&view, 30).expect("non-empty view");
        assert_eq!(hist.counts, vec![2]);
        assert_eq!(hist.edges, vec![42.0, 42.0]);
    }

    #[test]
    fn remote_modes_count_every_row() {
        let mut rows = three_rows();
        rows[0].remote_mode = "presencial".into();
        let ds = SalaryDataset::from_records(rows);
        let view = FilteredView::full(&ds);
        let modes = remote_mode_proportions(&view);
        assert_eq!(
            modes,
            vec![
                CategoryCount { label: "remoto".into(), count: 2 },
                CategoryCount { label: "presencial".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn country_means_empty_when_role_missing() {
        let ds = SalaryDataset::from_records(three_rows());
        let view = FilteredView::full(&ds);
        assert!(mean_salary_by_country_for_role(&view, "Data Architect").is_empty());
    }

    #[test]
    fn aggregate_result_serialises_with_stable_field_names() {
        let ds = SalaryDataset::from_records(three_rows());
        let view = FilteredView::full(&ds);
        let result = AggregateResult::compute(&view, &AggregateOptions::default());
        let json = serde_json::to_value(&result).expect("serialise");
        assert_eq!(json["metrics"]["count"], 3);
        assert_eq!(json["metrics"]["modal_role"], "Data Scientist");
        assert_eq!(json["country_means"]["USA"], 100_000.0);
        // Equal means: the earlier group ranks higher, so it lands last.
        assert_eq!(json["top_roles"][0]["role"], "Data Engineer");
        assert_eq!(json["top_roles"][1]["role"], "Data Scientist");
    }

    fn arb_rows() -> impl Strategy<Value = Vec<SalaryRecord>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]),
                0u32..300_000,
                prop::sample::select(vec!["USA", "BRA", "DEU"]),
            )
                .prop_map(|(role, salary, country)| record(role, salary as f64, country)),
            0..60,
        )
    }

    proptest! {
        #[test]
        fn top_roles_are_bounded_sorted_and_present(rows in arb_rows(), k in 1usize..8) {
            let ds = SalaryDataset::from_records(rows);
            let view = FilteredView::full(&ds);
            let top = top_roles_by_mean_salary(&view, k);

            prop_assert!(top.len() <= k);
            prop_assert!(top.windows(2).all(|w| w[0].mean_salary_usd <= w[1].mean_salary_usd));
            for entry in &top {
                prop_assert!(view.iter().any(|r| r.role == entry.role));
            }
        }

        #[test]
        fn aggregates_are_idempotent(rows in arb_rows()) {
            let ds = SalaryDataset::from_records(rows);
            let view = FilteredView::full(&ds);
            let options = AggregateOptions::default();
            prop_assert_eq!(
                AggregateResult::compute(&view, &options),
                AggregateResult::compute(&view, &options)
            );
        }

        #[test]
        fn histogram_accounts_for_every_row(rows in arb_rows(), bins in 1usize..40) {
            let ds = SalaryDataset::from_records(rows);
            let view = FilteredView::full(&ds);
            match salary_histogram_bins(&view, bins) {
                Some(hist) => {
                    prop_assert_eq!(hist.total(), view.len());
                    prop_assert_eq!(hist.edges.len(), hist.counts.len() + 1);
                }
                None => prop_assert!(view.is_empty()),
            }
        }

        #[test]
        fn mean_lies_within_salary_range(rows in arb_rows()) {
            let ds = SalaryDataset::from_records(rows);
            let view = FilteredView::full(&ds);
            let mean = mean_salary(&view);
            prop_assert!(mean >= 0.0);
            prop_assert!(mean <= max_salary(&view) + 1e-6);
        }
    }
}
