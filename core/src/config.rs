use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    calendar::DateRange,
    error::{GenError, GenResult},
};

pub const DEFAULT_OUTPUT_PATH: &str = "synthetic_inventory_dataset.csv";

/// Run-level parameters. Everything else is a fixed formula constant
/// owned by the stage that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub store_count:          u32,
    pub product_count:        u32,
    pub weeks:                u32,
    pub start_date:           NaiveDate,
    /// Probability that a given product is stocked at a given store.
    pub presence_probability: f64,
    /// Master seed; every stage stream is derived from it.
    pub seed:                 u64,
    pub output_path:          PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            store_count:          2,
            product_count:        100,
            weeks:                156,
            start_date:           NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid literal date"),
            presence_probability: 0.65,
            seed:                 42,
            output_path:          PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file. Fields missing from the file keep their defaults.
    /// In tests, use GeneratorConfig::default_test().
    pub fn load(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Small, fast configuration for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            store_count:          3,
            product_count:        10,
            weeks:                4,
            start_date:           NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid literal date"),
            presence_probability: 0.7,
            seed:                 42,
            output_path:          std::env::temp_dir().join("panelgen-test.csv"),
        }
    }

    /// Reject configurations that cannot describe a panel.
    /// Called by the engine before any generation starts.
    pub fn validate(&self) -> GenResult<()> {
        if self.store_count == 0 {
            return Err(GenError::config("store_count", "must be at least 1"));
        }
        if self.product_count == 0 {
            return Err(GenError::config("product_count", "must be at least 1"));
        }
        if self.weeks == 0 {
            return Err(GenError::config("weeks", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.presence_probability) {
            return Err(GenError::config(
                "presence_probability",
                format!("must be within [0, 1], got {}", self.presence_probability),
            ));
        }
        if self.date_range().checked_end().is_none() {
            return Err(GenError::config(
                "weeks",
                format!("{} weeks from {} overflows the calendar", self.weeks, self.start_date),
            ));
        }
        Ok(())
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.weeks)
    }
}
