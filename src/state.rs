use crate::data::aggregate::{AggregateOptions, AggregateResult};
use crate::data::filter::{self, FilterSelection, FilteredView};
use crate::data::model::{FilterColumn, FilterValue, SalaryDataset};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one user session owns, independent of rendering.
///
/// The dataset is loaded before the window opens and never changes; only the
/// selection and theme move with user input. Views and aggregates are derived
/// on demand rather than stored.
pub struct Session {
    dataset: SalaryDataset,
    pub selection: FilterSelection,
    pub theme: Theme,
    pub options: AggregateOptions,
}

impl Session {
    /// Start with every filter value selected and the light theme.
    pub fn new(dataset: SalaryDataset, options: AggregateOptions) -> Self {
        Self {
            selection: FilterSelection::all(&dataset),
            dataset,
            theme: Theme::default(),
            options,
        }
    }

    pub fn dataset(&self) -> &SalaryDataset {
        &self.dataset
    }

    /// Rows passing the current selection.
    pub fn view(&self) -> FilteredView<'_> {
        filter::apply(&self.dataset, &self.selection)
    }

    /// Metrics and tables for the current selection.
    pub fn aggregate(&self) -> AggregateResult {
        AggregateResult::compute(&self.view(), &self.options)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        log::debug!("theme switched to {}", self.theme.name());
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: FilterColumn, value: &FilterValue) {
        self.selection.toggle(column, value);
        log::debug!("{column}: toggled {value}");
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: FilterColumn) {
        self.selection.select_all(&self.dataset, column);
        log::debug!("{column}: all selected");
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.selection.select_none(column);
        log::debug!("{column}: none selected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::three_rows;

    fn session() -> Session {
        Session::new(
            SalaryDataset::from_records(three_rows()),
            AggregateOptions::default(),
        )
    }

    #[test]
    fn starts_unfiltered_and_light() {
        let s = session();
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.view().len(), s.dataset().len());
        assert_eq!(s.aggregate().metrics.count, 3);
    }

    #[test]
    fn select_none_then_all_restores_view() {
        let mut s = session();
        s.select_none(FilterColumn::CompanySize);
        assert!(s.view().is_empty());
        assert_eq!(s.aggregate().metrics.modal_role, "N/A");

        s.select_all(FilterColumn::CompanySize);
        assert_eq!(s.view().len(), 3);
    }

    #[test]
    fn toggling_a_value_twice_is_a_no_op() {
        let mut s = session();
        let value = FilterValue::Year(2024);
        s.toggle_filter_value(FilterColumn::Year, &value);
        assert!(s.view().is_empty());
        s.toggle_filter_value(FilterColumn::Year, &value);
        assert_eq!(s.view().len(), 3);
    }

    #[test]
    fn theme_toggle_does_not_touch_selection() {
        let mut s = session();
        let before = s.selection.clone();
        s.toggle_theme();
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.selection, before);
    }
}
