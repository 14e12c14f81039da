use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use thiserror::Error;

use super::model::{SalaryDataset, SalaryRecord};

/// Public salary survey published alongside the original dashboard.
pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why the dataset could not be loaded. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV at data row {row}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("invalid record at data row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// Where the CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceLocation {
    Remote(String),
    File(PathBuf),
}

impl DataSourceLocation {
    /// `http(s)://` strings are URLs; anything else is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSourceLocation::Remote(raw.to_string())
        } else {
            DataSourceLocation::File(PathBuf::from(raw))
        }
    }
}

impl Default for DataSourceLocation {
    fn default() -> Self {
        DataSourceLocation::Remote(DEFAULT_DATASET_URL.to_string())
    }
}

impl fmt::Display for DataSourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSourceLocation::Remote(url) => write!(f, "{url}"),
            DataSourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the salary dataset once.
pub fn load(location: &DataSourceLocation, timeout: Duration) -> Result<SalaryDataset, IngestError> {
    let records = match location {
        DataSourceLocation::Remote(url) => fetch_remote(url, timeout)?,
        DataSourceLocation::File(path) => {
            let file = std::fs::File::open(path).map_err(|source| IngestError::Read {
                path: path.clone(),
                source,
            })?;
            parse_csv(file)?
        }
    };
    Ok(SalaryDataset::from_records(records))
}

fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<SalaryRecord>, IngestError> {
    let fetch_err = |source: reqwest::Error| IngestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;

    log::debug!("GET {url}");
    let response = client
        .get(url)
        .header(USER_AGENT, concat!("salary-dashboard/", env!("CARGO_PKG_VERSION")))
        .send()
        .map_err(fetch_err)?;

    if !response.status().is_success() {
        return Err(IngestError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response.bytes().map_err(fetch_err)?;
    log::debug!("received {} bytes", body.len());
    parse_csv(body.as_ref())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse records from a CSV stream with a header row.
///
/// Rows are numbered from 1 after the header in error messages. Only the
/// columns mapped on [`SalaryRecord`] are read; the rest are ignored.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<SalaryRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| IngestError::Csv { row, source })?;
        validate(&record).map_err(|reason| IngestError::InvalidRecord { row, reason })?;
        records.push(record);
    }
    Ok(records)
}

/// Reject rows the aggregations cannot use.
fn validate(record: &SalaryRecord) -> Result<(), String> {
    if !record.salary_usd.is_finite() || record.salary_usd < 0.0 {
        return Err(format!("salary {} is not a non-negative number", record.salary_usd));
    }
    let text_fields = [
        ("seniority", &record.seniority),
        ("contract type", &record.contract_type),
        ("company size", &record.company_size),
        ("role", &record.role),
        ("remote mode", &record.remote_mode),
        ("residence country", &record.residence_country_code),
    ];
    for (name, value) in text_fields {
        if value.is_empty() {
            return Err(format!("{name} is empty"));
        }
    }
    Ok(())
}
