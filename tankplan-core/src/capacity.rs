//! Bioload model: how much of the tank the selected fish use up.
//!
//! Only fish count towards capacity. Plants and invertebrates are left out of the sum, but
//! plants still carry minimum and recommended tank sizes that are checked against the tank.

use crate::{issue::Issue, selection::Selection, thresholds::Thresholds};
use serde::{Deserialize, Serialize};

/// Suggested maintenance rhythm for a given stocking level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterChangeSchedule {
    pub frequency_days: u32,
    pub change_percent: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    pub required_volume: f64,
    pub usage_percent: u32,
    pub water_change: WaterChangeSchedule,
    pub issues: Vec<Issue>,
    pub omissions: Vec<String>,
}

/// Sum of `recommended × quantity` over present fish. Fish without a usable recommended
/// size are skipped and named in the returned omissions.
pub fn required_volume(selection: &Selection) -> (f64, Vec<String>) {
    let mut total = 0.0;
    let mut omissions = Vec::new();
    for entry in selection.present_fish() {
        match entry.organism.tank_size.recommended {
            Some(recommended) if recommended.is_finite() && recommended >= 0.0 => {
                total += recommended * f64::from(entry.quantity);
            }
            _ => omissions.push(format!(
                "{} has no recommended tank size and is left out of the capacity estimate",
                entry.name()
            )),
        }
    }
    (total, omissions)
}

/// `round(required / volume × 100)`. Zero when the tank volume is unusable.
pub fn usage_percent(required: f64, tank_volume: f64) -> u32 {
    if !(tank_volume.is_finite() && tank_volume > 0.0) {
        return 0;
    }
    (required / tank_volume * 100.0).round() as u32
}

pub fn water_change_schedule(usage_ratio: f64) -> WaterChangeSchedule {
    if usage_ratio > 0.8 {
        WaterChangeSchedule {
            frequency_days: 3,
            change_percent: 50,
        }
    } else if usage_ratio > 0.5 {
        WaterChangeSchedule {
            frequency_days: 7,
            change_percent: 30,
        }
    } else {
        WaterChangeSchedule {
            frequency_days: 14,
            change_percent: 25,
        }
    }
}

pub fn assess_capacity(
    selection: &Selection,
    tank_volume: f64,
    thresholds: &Thresholds,
) -> CapacityReport {
    let (required, omissions) = required_volume(selection);
    let mut issues = Vec::new();
    let volume_usable = tank_volume.is_finite() && tank_volume > 0.0;

    if !volume_usable {
        if selection.present_fish().next().is_some() {
            issues.push(Issue::error("Tank volume must be greater than zero"));
        }
        return CapacityReport {
            required_volume: required,
            usage_percent: 0,
            water_change: water_change_schedule(0.0),
            issues,
            omissions,
        };
    }

    let usage = usage_percent(required, tank_volume);
    if usage > thresholds.capacity_error_percent {
        issues.push(Issue::error(format!("Tank is overcrowded ({}% capacity)", usage)));
    } else if usage >= thresholds.capacity_warning_percent {
        issues.push(Issue::warning(format!("Tank is approaching maximum capacity ({}%)", usage)));
    }

    for entry in selection.present_fish().chain(selection.present_plants()) {
        let size = &entry.organism.tank_size;
        match (size.minimum, size.recommended) {
            (Some(minimum), _) if minimum.is_finite() && minimum > tank_volume => {
                issues.push(Issue::error(format!(
                    "{} requires a minimum tank size of {}L, but your tank is only {}L",
                    entry.name(),
                    minimum,
                    tank_volume
                )));
            }
            // Fish below their recommended size already show up in the bioload.
            (_, Some(recommended))
                if entry.organism.is_plant()
                    && recommended.is_finite()
                    && recommended > tank_volume =>
            {
                issues.push(Issue::warning(format!(
                    "{} grows best in a tank of at least {}L, but your tank is only {}L",
                    entry.name(),
                    recommended,
                    tank_volume
                )));
            }
            _ => {}
        }
    }

    CapacityReport {
        required_volume: required,
        usage_percent: usage,
        water_change: water_change_schedule(required / tank_volume),
        issues,
        omissions,
    }
}
