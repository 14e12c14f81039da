use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single salary observation.
///
/// Field renames follow the headers of the published CSV; any extra columns
/// in the file are ignored during deserialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract_type: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "remoto")]
    pub remote_mode: String,
    /// Annual salary converted to US dollars.
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    /// ISO 3166-1 alpha-3 code of the employee's country of residence.
    #[serde(rename = "residencia_iso3")]
    pub residence_country_code: String,
}

// ---------------------------------------------------------------------------
// FilterColumn / FilterValue – the sidebar's multi-select dimensions
// ---------------------------------------------------------------------------

/// Columns the user can narrow the dataset by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl FilterColumn {
    /// All filterable columns in sidebar order.
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::ContractType,
        FilterColumn::CompanySize,
    ];

    /// Human-readable widget label.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::ContractType => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }

    /// Extract this column's value from a record.
    pub fn value_of(self, record: &SalaryRecord) -> FilterValue {
        match self {
            FilterColumn::Year => FilterValue::Year(record.year),
            FilterColumn::Seniority => FilterValue::Label(record.seniority.clone()),
            FilterColumn::ContractType => FilterValue::Label(record.contract_type.clone()),
            FilterColumn::CompanySize => FilterValue::Label(record.company_size.clone()),
        }
    }

    /// Membership test without allocating a [`FilterValue`] for text columns.
    pub fn matches(self, record: &SalaryRecord, allowed: &BTreeSet<FilterValue>) -> bool {
        match self {
            FilterColumn::Year => allowed.contains(&FilterValue::Year(record.year)),
            FilterColumn::Seniority => contains_label(allowed, &record.seniority),
            FilterColumn::ContractType => contains_label(allowed, &record.contract_type),
            FilterColumn::CompanySize => contains_label(allowed, &record.company_size),
        }
    }
}

fn contains_label(allowed: &BTreeSet<FilterValue>, label: &str) -> bool {
    allowed
        .iter()
        .any(|v| matches!(v, FilterValue::Label(l) if l == label))
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable value of a [`FilterColumn`].
///
/// Years order numerically, labels lexically; a column only ever holds one
/// kind, so the cross-variant order never matters in practice.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterValue {
    Year(i32),
    Label(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Year(y) => write!(f, "{y}"),
            FilterValue::Label(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed option lists.
#[derive(Debug, Clone)]
pub struct SalaryDataset {
    records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of distinct values.
    available: BTreeMap<FilterColumn, BTreeSet<FilterValue>>,
}

impl SalaryDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut available: BTreeMap<FilterColumn, BTreeSet<FilterValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for record in &records {
            for col in FilterColumn::ALL {
                available
                    .entry(col)
                    .or_default()
                    .insert(col.value_of(record));
            }
        }

        SalaryDataset { records, available }
    }

    pub fn records(&self) -> &[SalaryRecord] {
        &self.records
    }

    /// Distinct values of `column` across the whole dataset, ascending.
    pub fn available_values(&self, column: FilterColumn) -> &BTreeSet<FilterValue> {
        // `from_records` seeds every column, so the entry always exists.
        &self.available[&column]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::SalaryRecord;

    pub fn record(role: &str, salary_usd: f64, country: &str) -> SalaryRecord {
        SalaryRecord {
            year: 2024,
            seniority: "senior".to_string(),
            contract_type: "integral".to_string(),
            company_size: "media".to_string(),
            role: role.to_string(),
            remote_mode: "remoto".to_string(),
            salary_usd,
            residence_country_code: country.to_string(),
        }
    }

    /// The three-row scenario used across the aggregate tests.
    pub fn three_rows() -> Vec<SalaryRecord> {
        vec![
            record("Data Scientist", 100_000.0, "USA"),
            record("Data Engineer", 120_000.0, "USA"),
            record("Data Scientist", 140_000.0, "BRA"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn available_values_are_sorted_and_distinct() {
        let mut a = record("A", 1.0, "USA");
        a.year = 2025;
        a.seniority = "pleno".into();
        let mut b = record("B", 2.0, "USA");
        b.year = 2021;
        let c = record("C", 3.0, "BRA");

        let ds = SalaryDataset::from_records(vec![a, b, c]);
        let years: Vec<_> = ds.available_values(FilterColumn::Year).iter().cloned().collect();
        assert_eq!(
            years,
            vec![FilterValue::Year(2021), FilterValue::Year(2024), FilterValue::Year(2025)]
        );
        let seniority: Vec<String> = ds
            .available_values(FilterColumn::Seniority)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(seniority, vec!["pleno", "senior"]);
    }

    #[test]
    fn empty_dataset_still_has_every_column() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for col in FilterColumn::ALL {
            assert!(ds.available_values(col).is_empty());
        }
    }

    #[test]
    fn matches_agrees_with_value_of() {
        let r = record("A", 1.0, "USA");
        for col in FilterColumn::ALL {
            let mut allowed = BTreeSet::new();
            assert!(!col.matches(&r, &allowed));
            allowed.insert(col.value_of(&r));
            assert!(col.matches(&r, &allowed));
        }
    }
}
