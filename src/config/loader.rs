//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading jurisdiction
//! configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AllowanceDefaults, EngineConfig, JurisdictionMetadata, TaxSchedule};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/iran/
/// ├── jurisdiction.yaml        # Jurisdiction metadata
/// ├── defaults.yaml            # Statutory fixed-allowance floors
/// └── tax_schedules/
///     └── 2025-03-21.yaml      # Tax brackets effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use tce_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/iran").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let schedule = loader.get_tax_schedule(date).unwrap();
/// println!("Using tax schedule {}", schedule.version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any tax schedule violates the bracket invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<JurisdictionMetadata>(&path.join("jurisdiction.yaml"))?;
        let defaults = Self::load_yaml::<AllowanceDefaults>(&path.join("defaults.yaml"))?;
        let tax_schedules = Self::load_tax_schedules(&path.join("tax_schedules"))?;

        Ok(Self::from_config(EngineConfig::new(
            metadata,
            defaults,
            tax_schedules,
        )))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates all schedule files from the tax schedule directory.
    fn load_tax_schedules(schedules_dir: &Path) -> EngineResult<Vec<TaxSchedule>> {
        let schedules_dir_str = schedules_dir.display().to_string();

        let entries = fs::read_dir(schedules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: schedules_dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: schedules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let schedule = Self::load_yaml::<TaxSchedule>(&path)?;
                schedule.validate()?;
                schedules.push(schedule);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax schedule files found)", schedules_dir_str),
            });
        }

        Ok(schedules)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        self.config.jurisdiction()
    }

    /// Returns the fixed-allowance defaults.
    pub fn defaults(&self) -> &AllowanceDefaults {
        self.config.defaults()
    }

    /// Gets the tax schedule in force on a given date.
    ///
    /// The most recent schedule whose effective date is on or before `date`
    /// is returned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tce_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/iran")?;
    /// let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    /// let schedule = loader.get_tax_schedule(date)?;
    /// assert_eq!(schedule.version, "2025-03-21");
    /// # Ok::<(), tce_engine::error::EngineError>(())
    /// ```
    pub fn get_tax_schedule(&self, date: NaiveDate) -> EngineResult<&TaxSchedule> {
        self.config
            .tax_schedules()
            .iter()
            .rev()
            .find(|schedule| schedule.effective_date <= date)
            .ok_or(EngineError::TaxScheduleNotFound { date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config_path() -> &'static str {
        "./config/iran"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.jurisdiction().code, "IR");
        assert_eq!(loader.jurisdiction().currency, "IRR");
    }

    #[test]
    fn test_loaded_schedule_matches_builtin_default() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let schedule = loader.get_tax_schedule(date).unwrap();
        assert_eq!(schedule, &TaxSchedule::default());
    }

    #[test]
    fn test_schedule_effective_on_its_first_day() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();

        assert!(loader.get_tax_schedule(date).is_ok());
    }

    #[test]
    fn test_schedule_not_found_before_first_effective_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        match loader.get_tax_schedule(date) {
            Err(EngineError::TaxScheduleNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected TaxScheduleNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.defaults().housing_allowance, dec!(9000000));
        assert_eq!(loader.defaults().grocery_allowance, dec!(22000000));
        assert_eq!(loader.defaults().children_allowance, dec!(0));
        assert_eq!(loader.defaults().overtime_base_hours, dec!(176));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("jurisdiction.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_newer_schedule_wins_after_its_effective_date() {
        let older = TaxSchedule::default();
        let newer = TaxSchedule::new(
            "2026-03-21",
            NaiveDate::from_ymd_opt(2026, 3, 21).unwrap(),
            older.brackets().to_vec(),
        )
        .unwrap();
        let loader = ConfigLoader::from_config(EngineConfig::new(
            ConfigLoader::load(config_path())
                .unwrap()
                .jurisdiction()
                .clone(),
            AllowanceDefaults::default(),
            vec![newer, older],
        ));

        let before = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let after = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        assert_eq!(loader.get_tax_schedule(before).unwrap().version, "2025-03-21");
        assert_eq!(loader.get_tax_schedule(after).unwrap().version, "2026-03-21");
    }
}
