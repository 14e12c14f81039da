use std::collections::{BTreeMap, BTreeSet};

use super::model::{FilterColumn, FilterValue, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per column
// ---------------------------------------------------------------------------

/// Per-column selection state: column → set of allowed values.
///
/// Every [`FilterColumn`] always has an entry. An empty set means nothing is
/// selected for that column, which hides every row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    allowed: BTreeMap<FilterColumn, BTreeSet<FilterValue>>,
}

impl FilterSelection {
    /// Initialise a selection with all values selected (i.e., show everything).
    pub fn all(dataset: &SalaryDataset) -> Self {
        let allowed = FilterColumn::ALL
            .iter()
            .map(|&col| (col, dataset.available_values(col).clone()))
            .collect();
        Self { allowed }
    }

    /// A selection with nothing selected in any column.
    pub fn none() -> Self {
        let allowed = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();
        Self { allowed }
    }

    /// Currently allowed values for `column`.
    pub fn allowed(&self, column: FilterColumn) -> &BTreeSet<FilterValue> {
        &self.allowed[&column]
    }

    pub fn is_selected(&self, column: FilterColumn, value: &FilterValue) -> bool {
        self.allowed(column).contains(value)
    }

    /// Replace the allowed set of one column.
    pub fn set(&mut self, column: FilterColumn, values: BTreeSet<FilterValue>) {
        self.allowed.insert(column, values);
    }

    /// Flip a single value in a column's selection.
    pub fn toggle(&mut self, column: FilterColumn, value: &FilterValue) {
        let selected = self.allowed.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
    }

    /// Select every value the dataset offers for `column`.
    pub fn select_all(&mut self, dataset: &SalaryDataset, column: FilterColumn) {
        self.set(column, dataset.available_values(column).clone());
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: FilterColumn) {
        self.set(column, BTreeSet::new());
    }

    /// `(selected, total)` counts for a column header.
    pub fn summary(&self, dataset: &SalaryDataset, column: FilterColumn) -> (usize, usize) {
        (
            self.allowed(column).len(),
            dataset.available_values(column).len(),
        )
    }

    /// Whether a record passes every column's selection.
    pub fn admits(&self, record: &SalaryRecord) -> bool {
        self.allowed
            .iter()
            .all(|(col, allowed)| col.matches(record, allowed))
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The rows of a dataset that pass a [`FilterSelection`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a SalaryDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row of `dataset`.
    pub fn full(dataset: &'a SalaryDataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Indices into the underlying dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the visible records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a SalaryRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Record at position `row` of the view.
    pub fn get(&self, row: usize) -> Option<&'a SalaryRecord> {
        self.indices
            .get(row)
            .map(|&i| &self.dataset.records()[i])
    }
}

/// Return the view of records that pass all column selections.
///
/// A record passes when, for every filter column, its value is in the
/// selected set. A column with an empty set therefore rejects every record.
pub fn apply<'a>(dataset: &'a SalaryDataset, selection: &FilterSelection) -> FilteredView<'a> {
    if FilterColumn::ALL
        .iter()
        .any(|&col| selection.allowed(col).is_empty())
    {
        return FilteredView {
            dataset,
            indices: Vec::new(),
        };
    }

    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| selection.admits(record))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}
