use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::data::aggregate::{AggregateOptions, DEFAULT_FOCUS_ROLE, DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_K};
use crate::data::loader::DataSourceLocation;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    NotPositive { var: &'static str, value: String },
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source: DataSourceLocation,
    pub fetch_timeout: Duration,
    pub aggregate: AggregateOptions,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSourceLocation::default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            aggregate: AggregateOptions::default(),
        }
    }
}

impl DashboardConfig {
    /// Read `SALARY_DASHBOARD_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank variables fall
    /// back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = get("SALARY_DASHBOARD_SOURCE")
            .map(|raw| DataSourceLocation::parse(&raw))
            .unwrap_or_default();

        let focus_role = get("SALARY_DASHBOARD_FOCUS_ROLE")
            .map(|role| role.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FOCUS_ROLE.to_string());

        let top_k = positive(get("SALARY_DASHBOARD_TOP_ROLES"), "SALARY_DASHBOARD_TOP_ROLES", DEFAULT_TOP_K)?;
        let histogram_bins = positive(
            get("SALARY_DASHBOARD_HISTOGRAM_BINS"),
            "SALARY_DASHBOARD_HISTOGRAM_BINS",
            DEFAULT_HISTOGRAM_BINS,
        )?;
        let timeout_secs = positive(
            get("SALARY_DASHBOARD_FETCH_TIMEOUT_SECS"),
            "SALARY_DASHBOARD_FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS as usize,
        )?;

        Ok(Self {
            source,
            fetch_timeout: Duration::from_secs(timeout_secs as u64),
            aggregate: AggregateOptions {
                top_k,
                histogram_bins,
                focus_role,
            },
        })
    }
}

fn positive(raw: Option<String>, var: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::NotPositive { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config_from(&[]).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("SALARY_DASHBOARD_SOURCE", "./salaries.csv"),
            ("SALARY_DASHBOARD_FOCUS_ROLE", " Data Engineer "),
            ("SALARY_DASHBOARD_TOP_ROLES", "5"),
            ("SALARY_DASHBOARD_HISTOGRAM_BINS", "12"),
            ("SALARY_DASHBOARD_FETCH_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(cfg.source, DataSourceLocation::File(PathBuf::from("./salaries.csv")));
        assert_eq!(cfg.aggregate.focus_role, "Data Engineer");
        assert_eq!(cfg.aggregate.top_k, 5);
        assert_eq!(cfg.aggregate.histogram_bins, 12);
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_fall_back() {
        let cfg = config_from(&[("SALARY_DASHBOARD_SOURCE", "  "), ("SALARY_DASHBOARD_TOP_ROLES", "")]).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }

    #[test]
    fn zero_or_garbage_counts_are_rejected() {
        assert_eq!(
            config_from(&[("SALARY_DASHBOARD_TOP_ROLES", "0")]).unwrap_err(),
            ConfigError::NotPositive {
                var: "SALARY_DASHBOARD_TOP_ROLES",
                value: "0".into()
            }
        );
        assert!(config_from(&[("SALARY_DASHBOARD_HISTOGRAM_BINS", "many")]).is_err());
    }
}
