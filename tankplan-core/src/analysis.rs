//! Builds the single compatibility result for a selection and tank snapshot.
//!
//! Evaluation is a pure function of its inputs. Checks run in a fixed order (capacity,
//! temperature, pH, hardness, livestock pairs, plant pairs, livestock × plant pairs) and
//! messages keep that detection order.

use crate::{
    capacity::{assess_capacity, WaterChangeSchedule},
    conflicts::{
        caution_warnings, cross_conflicts, livestock_conflicts, plant_conflicts,
        plant_requirement_warnings, schooling_shortfalls, Conflict, SchoolingShortfall,
    },
    issue::{Issue, Severity},
    parameters::{evaluate_parameter, ParameterCompatibility, WaterParameter},
    selection::Selection,
    thresholds::Thresholds,
};
use serde::{Deserialize, Serialize};
use tankplan_schemas::environment::TankParameters;

pub const PARAMETERS_NOT_SET: &str = "Tank parameters not set";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCompatibility {
    pub is_compatible: bool,
    pub incompatible_pairs: Vec<Conflict>,
}

impl PairCompatibility {
    fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            is_compatible: conflicts.iter().all(|c| c.severity() != Severity::Error),
            incompatible_pairs: conflicts,
        }
    }

    fn compatible() -> Self {
        Self {
            is_compatible: true,
            incompatible_pairs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub is_compatible: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub tank_usage_percent: u32,
    pub temperature_compatibility: ParameterCompatibility,
    pub ph_compatibility: ParameterCompatibility,
    pub hardness_compatibility: ParameterCompatibility,
    /// Livestock pairs, including livestock × plant pairs.
    pub fish_compatibility: PairCompatibility,
    pub plant_compatibility: PairCompatibility,
    pub under_schooled: Vec<SchoolingShortfall>,
    pub water_change: Option<WaterChangeSchedule>,
    /// Data gaps that made the engine skip part of a check. Never affects compatibility.
    pub omissions: Vec<String>,
}

impl CompatibilityResult {
    fn empty() -> Self {
        Self {
            is_compatible: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            tank_usage_percent: 0,
            temperature_compatibility: ParameterCompatibility::unconstrained(),
            ph_compatibility: ParameterCompatibility::unconstrained(),
            hardness_compatibility: ParameterCompatibility::unconstrained(),
            fish_compatibility: PairCompatibility::compatible(),
            plant_compatibility: PairCompatibility::compatible(),
            under_schooled: Vec::new(),
            water_change: None,
            omissions: Vec::new(),
        }
    }

    fn parameters_not_set() -> Self {
        let unknown = ParameterCompatibility {
            is_compatible: false,
            ideal_range: None,
            description: "tank parameters not set".to_string(),
        };
        let no_pairs = PairCompatibility {
            is_compatible: false,
            incompatible_pairs: Vec::new(),
        };
        Self {
            is_compatible: false,
            errors: vec![PARAMETERS_NOT_SET.to_string()],
            temperature_compatibility: unknown.clone(),
            ph_compatibility: unknown.clone(),
            hardness_compatibility: unknown,
            fish_compatibility: no_pairs.clone(),
            plant_compatibility: no_pairs,
            ..Self::empty()
        }
    }
}

/// Splits issues into the error and warning lists, preserving detection order.
#[derive(Default)]
struct IssueLog {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl IssueLog {
    fn record<I: IntoIterator<Item = Issue>>(&mut self, issues: I) {
        for issue in issues {
            match issue.severity {
                Severity::Error => self.errors.push(issue.message),
                Severity::Warning => self.warnings.push(issue.message),
            }
        }
    }

    fn record_conflicts(&mut self, conflicts: &[Conflict]) {
        self.record(conflicts.iter().map(Conflict::to_issue));
    }
}

/// Evaluates selections against tanks with a fixed set of thresholds. Holds no state
/// between calls.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityEngine {
    thresholds: Thresholds,
}

impl CompatibilityEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn evaluate(
        &self,
        selection: &Selection,
        parameters: Option<&TankParameters>,
    ) -> CompatibilityResult {
        if selection.is_empty() {
            return CompatibilityResult::empty();
        }
        let Some(tank) = parameters else {
            return CompatibilityResult::parameters_not_set();
        };

        let mut log = IssueLog::default();
        let mut omissions = Vec::new();

        let capacity = assess_capacity(selection, tank.volume, &self.thresholds);
        log.record(capacity.issues);
        omissions.extend(capacity.omissions);

        let [temperature_compatibility, ph_compatibility, hardness_compatibility] = [
            WaterParameter::Temperature,
            WaterParameter::Ph,
            WaterParameter::Hardness,
        ]
        .map(|parameter| {
            let report = evaluate_parameter(
                parameter,
                selection,
                parameter.reading(tank),
                parameter.margin(&self.thresholds),
            );
            log.record(report.issues);
            omissions.extend(report.omissions);
            report.compatibility
        });

        let livestock = livestock_conflicts(selection);
        log.record_conflicts(&livestock);
        let under_schooled =
            schooling_shortfalls(selection, self.thresholds.default_min_school_size);
        log.record(under_schooled.iter().map(SchoolingShortfall::to_issue));
        log.record(caution_warnings(selection));

        let plants = plant_conflicts(selection);
        log.record_conflicts(&plants);
        log.record(plant_requirement_warnings(selection, tank.co2, tank.volume));

        let cross = cross_conflicts(selection);
        log.record_conflicts(&cross);

        let has_fish = selection.present_fish().next().is_some();
        let mut fish_pairs = livestock;
        fish_pairs.extend(cross);

        CompatibilityResult {
            is_compatible: log.errors.is_empty(),
            errors: log.errors,
            warnings: log.warnings,
            tank_usage_percent: capacity.usage_percent,
            temperature_compatibility,
            ph_compatibility,
            hardness_compatibility,
            fish_compatibility: PairCompatibility::from_conflicts(fish_pairs),
            plant_compatibility: PairCompatibility::from_conflicts(plants),
            under_schooled,
            water_change: has_fish.then_some(capacity.water_change),
            omissions,
        }
    }
}

/// Evaluates with the default thresholds.
pub fn evaluate(selection: &Selection, parameters: Option<&TankParameters>) -> CompatibilityResult {
    CompatibilityEngine::default().evaluate(selection, parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use tankplan_schemas::{
        environment::Co2Level,
        organism::{Co2Requirement, CompatibilityFlag, OrganismKind, Temperament, ToleranceRange},
    };

    fn tank() -> TankParameters {
        TankParameters::new(200.0, 25.0, 7.0)
    }

    #[test]
    fn test_empty_selection_is_compatible() {
        let result = evaluate(&Selection::default(), Some(&tank()));
        assert!(result.is_compatible);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
        assert_eq!(result.tank_usage_percent, 0);
        assert_eq!(result.temperature_compatibility.ideal_range, None);
        assert_eq!(result.ph_compatibility.ideal_range, None);
    }

    #[test]
    fn test_empty_selection_wins_over_missing_parameters() {
        let result = evaluate(&Selection::default(), None);
        assert!(result.is_compatible);
    }

    #[test]
    fn test_missing_parameters() {
        let selection = Selection::new(vec![entry(fish("tetra", None), 6)], vec![]);
        let result = evaluate(&selection, None);
        assert!(!result.is_compatible);
        assert_eq!(result.errors, vec![PARAMETERS_NOT_SET.to_string()]);
        assert!(result.warnings.is_empty());
        assert_eq!(result.temperature_compatibility.description, "tank parameters not set");
        assert_eq!(result.ph_compatibility.description, "tank parameters not set");
    }

    #[test]
    fn test_detection_order() {
        // Overcrowded, too cold, and a temperament clash.
        let oscar = with_ranges(
            fish("oscar", Some(Temperament::Aggressive)),
            (24.0, 28.0),
            (6.0, 8.0),
        );
        let mut neon = with_ranges(
            fish("neon-tetra", Some(Temperament::Peaceful)),
            (22.0, 26.0),
            (6.0, 7.5),
        );
        neon.tank_size.recommended = Some(100.0);
        let selection = Selection::new(vec![entry(oscar, 1), entry(neon, 2)], vec![]);
        let tank = TankParameters::new(100.0, 23.0, 7.0);

        let result = evaluate(&selection, Some(&tank));
        assert_eq!(
            result.errors,
            vec![
                "Tank is overcrowded (210% capacity)".to_string(),
                "Temperature is too low (23°C < 24°C)".to_string(),
                "Oscar and Neon Tetra: aggressive fish may harm peaceful fish".to_string(),
            ]
        );
        assert!(!result.fish_compatibility.is_compatible);
    }

    #[test]
    fn test_plant_damage_is_advisory() {
        let mut pleco = fish("common-pleco", Some(Temperament::Peaceful));
        pleco.compatibility.plants = CompatibilityFlag::No;
        let selection = Selection::new(vec![entry(pleco, 1)], vec![entry(plant("java-fern"), 3)]);
        let result = evaluate(&selection, Some(&tank()));
        assert!(result.is_compatible);
        assert_eq!(
            result.warnings,
            vec!["Common Pleco and Java Fern: fish may eat or damage plants".to_string()]
        );
        assert_eq!(result.fish_compatibility.incompatible_pairs.len(), 1);
        assert!(result.fish_compatibility.is_compatible);
        assert!(result.plant_compatibility.incompatible_pairs.is_empty());
    }

    #[test]
    fn test_only_plants_have_no_water_change_schedule() {
        let selection = Selection::new(vec![], vec![entry(plant("anubias"), 2)]);
        let result = evaluate(&selection, Some(&tank()));
        assert!(result.is_compatible);
        assert_eq!(result.water_change, None);
    }

    #[test]
    fn test_engine_thresholds_override() {
        let selection = Selection::new(
            vec![entry(with_ranges(fish("tetra", None), (24.0, 28.0), (6.0, 8.0)), 6)],
            vec![],
        );
        let tank = TankParameters::new(200.0, 24.4, 7.0);
        assert_eq!(evaluate(&selection, Some(&tank)).warnings.len(), 1);

        let lenient = CompatibilityEngine::new(Thresholds {
            temperature_margin: 0.1,
            ..Thresholds::default()
        });
        assert!(lenient.evaluate(&selection, Some(&tank)).warnings.is_empty());
        assert_eq!(lenient.thresholds().temperature_margin, 0.1);
    }

    #[test]
    fn test_hardness_reading_is_checked() {
        let mut platy = fish("platy", None);
        platy.water_parameters.hardness = Some(ToleranceRange::new(10.0, 25.0));
        let selection = Selection::new(vec![entry(platy, 6)], vec![]);

        let soft = tank().with_hardness(8.0);
        let result = evaluate(&selection, Some(&soft));
        assert!(!result.is_compatible);
        assert_eq!(result.errors, vec!["Hardness is too low (8 dGH < 10 dGH)".to_string()]);
        assert!(!result.hardness_compatibility.is_compatible);

        let result = evaluate(&selection, Some(&tank().with_hardness(15.0)));
        assert!(result.is_compatible);
        assert!(result.hardness_compatibility.is_compatible);
        assert_eq!(
            result.hardness_compatibility.ideal_range,
            Some(ToleranceRange::new(10.0, 25.0))
        );
    }

    #[test]
    fn test_co2_reading_silences_the_co2_advisory() {
        let mut glosso = plant("glossostigma");
        if let OrganismKind::Plant(profile) = &mut glosso.kind {
            profile.co2 = Some(Co2Requirement::Required);
        }
        let selection = Selection::new(vec![], vec![entry(glosso, 3)]);
        let co2_warning = "Some plants require CO2 supplementation for optimal growth".to_string();

        let result = evaluate(&selection, Some(&tank()));
        assert_eq!(result.warnings, vec![co2_warning]);

        let result = evaluate(&selection, Some(&tank().with_co2(Co2Level::Medium)));
        assert!(result.warnings.is_empty());
    }
}
