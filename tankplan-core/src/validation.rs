//! Sanity checks for user-entered tank settings and catalog records. Both return
//! human-readable problems instead of failing, so callers can decide what to do with them.

use tankplan_schemas::{
    environment::{TankParameters, TankReading},
    organism::{Organism, ToleranceRange},
};

pub const TEMPERATURE_LIMITS: (f64, f64) = (18.0, 32.0);
pub const PH_LIMITS: (f64, f64) = (6.0, 8.5);

fn reading_within(reading: &TankReading, (lo, hi): (f64, f64)) -> bool {
    let (min, max) = reading.bounds();
    min >= lo && max <= hi
}

/// Checks that the tank settings sit inside the ranges the planner supports.
pub fn validate_tank_parameters(params: &TankParameters) -> Vec<String> {
    let mut errors = Vec::new();

    if !(params.volume.is_finite() && params.volume > 0.0) {
        errors.push(format!("Tank volume must be a positive number, got {}", params.volume));
    }
    if let Some(temperature) = &params.temperature {
        if !reading_within(temperature, TEMPERATURE_LIMITS) {
            errors.push(format!(
                "Temperature must be between {} and {}°C",
                TEMPERATURE_LIMITS.0, TEMPERATURE_LIMITS.1
            ));
        }
    }
    if let Some(ph) = &params.ph {
        if !reading_within(ph, PH_LIMITS) {
            errors.push(format!("pH must be between {} and {}", PH_LIMITS.0, PH_LIMITS.1));
        }
    }

    errors
}

fn check_range(issues: &mut Vec<String>, slug: &str, label: &str, range: Option<&ToleranceRange>) {
    if let Some(range) = range {
        if !range.is_well_formed() {
            issues.push(format!(
                "{}: {} range must be ordered finite numbers, got {} to {}",
                slug, label, range.min, range.max
            ));
        }
    }
}

fn is_binomial(name: &str) -> bool {
    let mut words = name.split_whitespace();
    let genus = words.next();
    let species = words.next();
    let binomial = |w: &str| w.chars().all(|c| c.is_alphanumeric() || c == '_');
    matches!((genus, species, words.next()), (Some(g), Some(s), None) if binomial(g) && binomial(s))
}

/// Checks a catalog record. An empty list means the record is usable as-is.
pub fn validate_organism(organism: &Organism) -> Vec<String> {
    let mut issues = Vec::new();
    let slug = organism.slug.as_str();

    if slug.trim().is_empty() {
        issues.push("organism slug must not be empty".to_string());
    }
    if organism.name.trim().is_empty() {
        issues.push(format!("{}: name must be a non-empty string", slug));
    }
    if organism.is_fish() {
        match organism.scientific_name.as_deref() {
            Some(name) if is_binomial(name) => {}
            Some(name) => issues.push(format!(
                "{}: scientific name '{}' must be in 'Genus species' format",
                slug, name
            )),
            None => issues.push(format!("{}: scientific name is missing", slug)),
        }
    }

    let params = &organism.water_parameters;
    check_range(&mut issues, slug, "temperature", params.temperature.as_ref());
    check_range(&mut issues, slug, "pH", params.ph.as_ref());
    check_range(&mut issues, slug, "hardness", params.hardness.as_ref());

    let size = &organism.tank_size;
    if let (Some(minimum), Some(recommended)) = (size.minimum, size.recommended) {
        if minimum > recommended {
            issues.push(format!(
                "{}: minimum tank size ({}) exceeds recommended ({})",
                slug, minimum, recommended
            ));
        }
    }
    for value in [size.minimum, size.recommended].into_iter().flatten() {
        if !(value.is_finite() && value >= 0.0) {
            issues.push(format!(
                "{}: tank size must be a non-negative number, got {}",
                slug, value
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_tank_parameters_within_limits() {
        assert!(validate_tank_parameters(&TankParameters::new(100.0, 25.0, 7.0)).is_empty());
    }

    #[test]
    fn test_tank_parameters_out_of_limits() {
        let errors = validate_tank_parameters(&TankParameters::new(0.0, 35.0, 5.5));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[1], "Temperature must be between 18 and 32°C");
        assert_eq!(errors[2], "pH must be between 6 and 8.5");
    }

    #[test]
    fn test_fish_needs_binomial_name() {
        let mut tetra = fish("neon-tetra", None);
        assert_eq!(
            validate_organism(&tetra),
            vec!["neon-tetra: scientific name is missing".to_string()]
        );
        tetra.scientific_name = Some("Paracheirodon innesi".to_string());
        assert!(validate_organism(&tetra).is_empty());
        tetra.scientific_name = Some("Paracheirodon".to_string());
        assert_eq!(validate_organism(&tetra).len(), 1);
    }

    #[test]
    fn test_plants_do_not_need_scientific_names() {
        assert!(validate_organism(&plant("java-fern")).is_empty());
    }

    #[test]
    fn test_inconsistent_sizes_and_ranges() {
        let mut fern = with_ranges(plant("java-fern"), (30.0, 20.0), (6.0, 7.0));
        fern.tank_size.minimum = Some(80.0);
        fern.tank_size.recommended = Some(40.0);
        let issues = validate_organism(&fern);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("temperature range"));
        assert!(issues[1].contains("exceeds recommended"));
    }
}
