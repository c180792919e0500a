use serde::{Deserialize, Serialize};

pub const LITERS_PER_GALLON: f64 = 3.78541;
pub const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    #[serde(alias = "l")]
    Liters,
    #[serde(alias = "gal")]
    Gallons,
}

impl VolumeUnit {
    pub fn to_liters(&self, value: f64) -> f64 {
        match self {
            VolumeUnit::Liters => value,
            VolumeUnit::Gallons => gallons_to_liters(value),
        }
    }
}

/// Unit for tank dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    #[serde(alias = "cm")]
    Centimeters,
    #[serde(alias = "in")]
    Inches,
}

impl LengthUnit {
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Centimeters => value,
            LengthUnit::Inches => inches_to_cm(value),
        }
    }
}

pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * LITERS_PER_GALLON
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / LITERS_PER_GALLON
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}
