//! Water parameter evaluation: the ideal range shared by every selected organism and where
//! the tank's current reading sits against it.

use crate::{
    issue::Issue,
    range::{intersect_all, near_edge},
    selection::Selection,
    thresholds::Thresholds,
};
use serde::{Deserialize, Serialize};
use tankplan_schemas::{
    environment::{TankParameters, TankReading},
    organism::{ToleranceRange, WaterParameters},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterParameter {
    Temperature,
    Ph,
    Hardness,
}

impl WaterParameter {
    pub fn label(&self) -> &'static str {
        match self {
            WaterParameter::Temperature => "Temperature",
            WaterParameter::Ph => "pH",
            WaterParameter::Hardness => "Hardness",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            WaterParameter::Temperature => "temperature",
            WaterParameter::Ph => "pH",
            WaterParameter::Hardness => "hardness",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            WaterParameter::Temperature => "°C",
            WaterParameter::Ph => "",
            WaterParameter::Hardness => " dGH",
        }
    }

    pub fn range_of<'a>(&self, params: &'a WaterParameters) -> Option<&'a ToleranceRange> {
        match self {
            WaterParameter::Temperature => params.temperature.as_ref(),
            WaterParameter::Ph => params.ph.as_ref(),
            WaterParameter::Hardness => params.hardness.as_ref(),
        }
    }

    pub fn reading(&self, tank: &TankParameters) -> Option<TankReading> {
        match self {
            WaterParameter::Temperature => tank.temperature,
            WaterParameter::Ph => tank.ph,
            WaterParameter::Hardness => tank.hardness,
        }
    }

    pub fn margin(&self, thresholds: &Thresholds) -> f64 {
        match self {
            WaterParameter::Temperature => thresholds.temperature_margin,
            WaterParameter::Ph => thresholds.ph_margin,
            WaterParameter::Hardness => thresholds.hardness_margin,
        }
    }

    fn format_value(&self, value: f64) -> String {
        format!("{}{}", value, self.unit())
    }

    fn format_reading(&self, reading: &TankReading) -> String {
        match reading {
            TankReading::Value(v) => self.format_value(*v),
            TankReading::Range(r) => format!("{}-{}{}", r.min, r.max, self.unit()),
        }
    }
}

/// Sub-report for one water parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterCompatibility {
    pub is_compatible: bool,
    pub ideal_range: Option<ToleranceRange>,
    pub description: String,
}

impl ParameterCompatibility {
    fn new(
        is_compatible: bool,
        ideal_range: Option<ToleranceRange>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            is_compatible,
            ideal_range,
            description: description.into(),
        }
    }

    pub fn unconstrained() -> Self {
        Self::new(true, None, "no constraint")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterReport {
    pub compatibility: ParameterCompatibility,
    pub issues: Vec<Issue>,
    pub omissions: Vec<String>,
}

/// Evaluates one parameter across the present organisms. A missing or malformed range on an
/// organism only removes that organism from this check.
pub fn evaluate_parameter(
    parameter: WaterParameter,
    selection: &Selection,
    reading: Option<TankReading>,
    margin: f64,
) -> ParameterReport {
    let mut omissions = Vec::new();
    let mut ranges = Vec::new();
    for entry in selection.present() {
        if let Some(range) = parameter.range_of(&entry.organism.water_parameters) {
            if range.is_well_formed() {
                ranges.push(*range);
            } else {
                omissions.push(format!(
                    "{} has a malformed {} range ({} to {}); ignored",
                    entry.name(),
                    parameter.noun(),
                    range.min,
                    range.max
                ));
            }
        }
    }

    if ranges.is_empty() {
        return ParameterReport {
            compatibility: ParameterCompatibility::unconstrained(),
            issues: Vec::new(),
            omissions,
        };
    }

    let Some(ideal) = intersect_all(&ranges) else {
        return ParameterReport {
            compatibility: ParameterCompatibility::new(
                false,
                None,
                "ranges do not overlap between selected species",
            ),
            issues: vec![Issue::warning(format!(
                "{} ranges do not overlap between selected species",
                parameter.label()
            ))],
            omissions,
        };
    };

    let reading = reading.filter(|r| {
        let (lo, hi) = r.bounds();
        lo.is_finite() && hi.is_finite()
    });
    let Some(reading) = reading else {
        return ParameterReport {
            compatibility: ParameterCompatibility::new(true, Some(ideal), "tank reading not set"),
            issues: Vec::new(),
            omissions,
        };
    };

    let (lo, hi) = reading.bounds();
    let (compatibility, issues) = if lo < ideal.min {
        (
            ParameterCompatibility::new(
                false,
                Some(ideal),
                format!("Current {} is too low", parameter.noun()),
            ),
            vec![Issue::error(format!(
                "{} is too low ({} < {})",
                parameter.label(),
                parameter.format_value(lo),
                parameter.format_value(ideal.min)
            ))],
        )
    } else if hi > ideal.max {
        (
            ParameterCompatibility::new(
                false,
                Some(ideal),
                format!("Current {} is too high", parameter.noun()),
            ),
            vec![Issue::error(format!(
                "{} is too high ({} > {})",
                parameter.label(),
                parameter.format_value(hi),
                parameter.format_value(ideal.max)
            ))],
        )
    } else if near_edge(&ideal, lo, margin) || near_edge(&ideal, hi, margin) {
        (
            ParameterCompatibility::new(
                true,
                Some(ideal),
                format!("{} is near the edge of safe range", parameter.label()),
            ),
            vec![Issue::warning(format!(
                "{} ({}) is close to the edge of the safe range",
                parameter.label(),
                parameter.format_reading(&reading)
            ))],
        )
    } else {
        (
            ParameterCompatibility::new(
                true,
                Some(ideal),
                format!("{} is ideal for all selected species", parameter.label()),
            ),
            Vec::new(),
        )
    };

    ParameterReport {
        compatibility,
        issues,
        omissions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::issue::Severity;

    fn pair(t1: (f64, f64), t2: (f64, f64)) -> Selection {
        Selection::new(
            vec![
                entry(with_ranges(fish("a-fish", None), t1, (6.0, 8.0)), 1),
                entry(with_ranges(fish("b-fish", None), t2, (6.0, 8.0)), 1),
            ],
            vec![],
        )
    }

    fn temperature(selection: &Selection, reading: f64) -> ParameterReport {
        evaluate_parameter(WaterParameter::Temperature, selection, Some(reading.into()), 1.5)
    }

    #[test]
    fn test_ideal_range_is_intersection() {
        let report = temperature(&pair((22.0, 26.0), (24.0, 28.0)), 25.0);
        assert_eq!(report.compatibility.ideal_range, Some(ToleranceRange::new(24.0, 26.0)));
    }

    #[test]
    fn test_disjoint_ranges_warn() {
        let report = temperature(&pair((22.0, 24.0), (26.0, 28.0)), 25.0);
        assert!(!report.compatibility.is_compatible);
        assert_eq!(report.compatibility.ideal_range, None);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].severity, Severity::Warning);
        assert!(report.issues[0].message.contains("do not overlap"));
    }

    #[test]
    fn test_near_edge_and_ideal() {
        let selection = pair((24.0, 28.0), (22.0, 30.0));
        let near = temperature(&selection, 24.4);
        assert!(near.compatibility.is_compatible);
        assert_eq!(
            near.issues,
            vec![Issue::warning(
                "Temperature (24.4°C) is close to the edge of the safe range"
            )]
        );

        let ideal = temperature(&selection, 26.0);
        assert!(ideal.issues.is_empty());
        assert_eq!(
            ideal.compatibility.description,
            "Temperature is ideal for all selected species"
        );
    }

    #[test]
    fn test_out_of_range_errors_carry_values() {
        let selection = pair((24.0, 28.0), (22.0, 30.0));
        let low = temperature(&selection, 22.0);
        assert!(!low.compatibility.is_compatible);
        assert_eq!(low.issues, vec![Issue::error("Temperature is too low (22°C < 24°C)")]);

        let high = temperature(&selection, 29.5);
        assert_eq!(
            high.issues,
            vec![Issue::error("Temperature is too high (29.5°C > 28°C)")]
        );
    }

    #[test]
    fn test_ph_uses_its_own_margin() {
        let selection = pair((20.0, 30.0), (20.0, 30.0));
        let report = evaluate_parameter(WaterParameter::Ph, &selection, Some(6.2.into()), 0.3);
        assert_eq!(
            report.issues,
            vec![Issue::warning("pH (6.2) is close to the edge of the safe range")]
        );
        let report = evaluate_parameter(WaterParameter::Ph, &selection, Some(6.4.into()), 0.3);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_range_reading_checked_at_both_ends() {
        let selection = pair((24.0, 28.0), (22.0, 30.0));
        let reading = TankReading::Range(ToleranceRange::new(25.0, 28.5));
        let report =
            evaluate_parameter(WaterParameter::Temperature, &selection, Some(reading), 1.5);
        assert_eq!(
            report.issues,
            vec![Issue::error("Temperature is too high (28.5°C > 28°C)")]
        );
    }

    #[test]
    fn test_no_ranges_means_no_constraint() {
        let selection = Selection::new(vec![entry(fish("plain", None), 1)], vec![]);
        let report =
            evaluate_parameter(WaterParameter::Hardness, &selection, Some(8.0.into()), 1.0);
        assert_eq!(report.compatibility, ParameterCompatibility::unconstrained());
        assert!(report.issues.is_empty());
    }

    fn hard_water_pair() -> Selection {
        let mut platy = fish("platy", None);
        platy.water_parameters.hardness = Some(ToleranceRange::new(10.0, 25.0));
        let mut molly = fish("molly", None);
        molly.water_parameters.hardness = Some(ToleranceRange::new(12.0, 30.0));
        Selection::new(vec![entry(platy, 4), entry(molly, 3)], vec![])
    }

    fn hardness(selection: &Selection, reading: f64, margin: f64) -> ParameterReport {
        evaluate_parameter(WaterParameter::Hardness, selection, Some(reading.into()), margin)
    }

    #[test]
    fn test_hardness_classification() {
        let selection = hard_water_pair();

        let ideal = hardness(&selection, 18.0, 1.0);
        assert_eq!(ideal.compatibility.ideal_range, Some(ToleranceRange::new(12.0, 25.0)));
        assert!(ideal.issues.is_empty());
        assert_eq!(ideal.compatibility.description, "Hardness is ideal for all selected species");

        let soft = hardness(&selection, 8.0, 1.0);
        assert!(!soft.compatibility.is_compatible);
        assert_eq!(soft.compatibility.description, "Current hardness is too low");
        assert_eq!(
            soft.issues,
            vec![Issue::error("Hardness is too low (8 dGH < 12 dGH)")]
        );

        let hard = hardness(&selection, 26.0, 1.0);
        assert_eq!(
            hard.issues,
            vec![Issue::error("Hardness is too high (26 dGH > 25 dGH)")]
        );
    }

    #[test]
    fn test_hardness_near_edge_follows_margin() {
        let selection = hard_water_pair();
        let near = hardness(&selection, 12.5, 1.0);
        assert!(near.compatibility.is_compatible);
        assert_eq!(
            near.issues,
            vec![Issue::warning(
                "Hardness (12.5 dGH) is close to the edge of the safe range"
            )]
        );
        assert!(hardness(&selection, 12.5, 0.4).issues.is_empty());
    }

    #[test]
    fn test_plants_contribute_ranges() {
        let selection = Selection::new(
            vec![entry(with_ranges(fish("tetra", None), (20.0, 28.0), (6.0, 7.5)), 6)],
            vec![entry(with_ranges(plant("fern"), (23.0, 30.0), (6.0, 7.5)), 1)],
        );
        let report = temperature(&selection, 25.5);
        assert_eq!(report.compatibility.ideal_range, Some(ToleranceRange::new(23.0, 28.0)));
    }

    #[test]
    fn test_malformed_range_is_skipped() {
        let selection = pair((28.0, 22.0), (24.0, 28.0));
        let report = temperature(&selection, 26.0);
        assert_eq!(report.compatibility.ideal_range, Some(ToleranceRange::new(24.0, 28.0)));
        assert_eq!(report.omissions.len(), 1);
        assert!(report.omissions[0].contains("A Fish"));
    }

    #[test]
    fn test_missing_reading() {
        let selection = pair((22.0, 26.0), (24.0, 28.0));
        let report = evaluate_parameter(WaterParameter::Temperature, &selection, None, 1.5);
        assert!(report.compatibility.is_compatible);
        assert_eq!(report.compatibility.description, "tank reading not set");
    }
}
