//! The simulated tank the user is planning: its volume and current water readings.

use crate::organism::ToleranceRange;
use serde::{Deserialize, Serialize};

/// A water reading held by the tank, either a single set point or a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TankReading {
    Value(f64),
    Range(ToleranceRange),
}

impl TankReading {
    /// Lowest and highest value the tank may sit at.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            TankReading::Value(v) => (*v, *v),
            TankReading::Range(r) => (r.min, r.max),
        }
    }
}

impl From<f64> for TankReading {
    fn from(value: f64) -> Self {
        TankReading::Value(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Co2Level {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Co2Level {
    pub fn is_supplemented(&self) -> bool {
        !matches!(self, Co2Level::None)
    }
}

/// Current tank state. All volumes share one unit with the organisms' `tank_size` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankParameters {
    #[serde(alias = "size")]
    pub volume: f64,
    #[serde(default)]
    pub temperature: Option<TankReading>,
    #[serde(default, alias = "pH")]
    pub ph: Option<TankReading>,
    #[serde(default)]
    pub hardness: Option<TankReading>,
    #[serde(default)]
    pub co2: Option<Co2Level>,
}

impl TankParameters {
    pub fn new(volume: f64, temperature: f64, ph: f64) -> Self {
        Self {
            volume,
            temperature: Some(TankReading::Value(temperature)),
            ph: Some(TankReading::Value(ph)),
            hardness: None,
            co2: None,
        }
    }

    pub fn with_hardness(mut self, hardness: f64) -> Self {
        self.hardness = Some(TankReading::Value(hardness));
        self
    }

    pub fn with_co2(mut self, co2: Co2Level) -> Self {
        self.co2 = Some(co2);
        self
    }
}

/// Inside dimensions of a rectangular tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankDimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl TankDimensions {
    pub fn volume_liters(&self) -> f64 {
        self.length_cm * self.width_cm * self.height_cm / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_accepts_value_or_range() {
        let params: TankParameters = serde_yaml::from_str(
            "size: 100\ntemperature: 25\npH: { min: 6.8, max: 7.2 }\nco2: low\n",
        )
        .unwrap();
        assert_eq!(params.volume, 100.0);
        assert_eq!(params.temperature.unwrap().bounds(), (25.0, 25.0));
        assert_eq!(params.ph.unwrap().bounds(), (6.8, 7.2));
        assert_eq!(params.hardness, None);
        assert!(params.co2.unwrap().is_supplemented());
    }

    #[test]
    fn test_builders_fill_optional_readings() {
        let params = TankParameters::new(120.0, 24.0, 6.8)
            .with_hardness(6.0)
            .with_co2(Co2Level::Medium);
        assert_eq!(params.hardness, Some(TankReading::Value(6.0)));
        assert_eq!(params.co2, Some(Co2Level::Medium));
    }

    #[test]
    fn test_dimensions_volume() {
        let ten_gallon = TankDimensions {
            length_cm: 50.0,
            width_cm: 25.0,
            height_cm: 30.0,
        };
        assert!((ten_gallon.volume_liters() - 37.5).abs() < 1e-9);
    }
}
