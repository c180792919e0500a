//! Heuristic cut-offs used by the evaluator. These are UX thresholds, not biological
//! constants, so every one of them can be overridden from a YAML file or in tests.

use crate::error::TankPlanError;
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_CAPACITY_WARNING_PERCENT: u32 = 85;
pub const DEFAULT_CAPACITY_ERROR_PERCENT: u32 = 100;
pub const DEFAULT_TEMPERATURE_MARGIN: f64 = 1.5;
pub const DEFAULT_PH_MARGIN: f64 = 0.3;
pub const DEFAULT_HARDNESS_MARGIN: f64 = 1.0;
pub const DEFAULT_MIN_SCHOOL_SIZE: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Usage at or above this percentage is a warning.
    pub capacity_warning_percent: u32,
    /// Usage above this percentage is an error.
    pub capacity_error_percent: u32,
    /// Distance from an ideal-range bound, in °C, that counts as "near the edge".
    pub temperature_margin: f64,
    pub ph_margin: f64,
    /// In dGH.
    pub hardness_margin: f64,
    pub default_min_school_size: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            capacity_warning_percent: DEFAULT_CAPACITY_WARNING_PERCENT,
            capacity_error_percent: DEFAULT_CAPACITY_ERROR_PERCENT,
            temperature_margin: DEFAULT_TEMPERATURE_MARGIN,
            ph_margin: DEFAULT_PH_MARGIN,
            hardness_margin: DEFAULT_HARDNESS_MARGIN,
            default_min_school_size: DEFAULT_MIN_SCHOOL_SIZE,
        }
    }
}

impl Thresholds {
    pub fn from_yaml_str(source: &str, origin: &str) -> Result<Self, TankPlanError> {
        let thresholds: Thresholds = serde_yaml::from_str(source)
            .map_err(|e| TankPlanError::YamlParsing(origin.to_string(), e))?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn load(path: &str) -> Result<Self, TankPlanError> {
        let source =
            fs::read_to_string(path).map_err(|e| TankPlanError::FileIO(path.to_string(), e))?;
        Self::from_yaml_str(&source, path)
    }

    fn validate(&self) -> Result<(), TankPlanError> {
        if self.capacity_warning_percent > self.capacity_error_percent {
            return Err(TankPlanError::ConfigError(format!(
                "capacity_warning_percent ({}) must not exceed capacity_error_percent ({})",
                self.capacity_warning_percent, self.capacity_error_percent
            )));
        }
        let margins = [
            ("temperature_margin", self.temperature_margin),
            ("ph_margin", self.ph_margin),
            ("hardness_margin", self.hardness_margin),
        ];
        for (name, margin) in margins {
            if !margin.is_finite() || margin < 0.0 {
                return Err(TankPlanError::ConfigError(format!(
                    "{} must be a non-negative number, got {}",
                    name, margin
                )));
            }
        }
        Ok(())
    }
}
