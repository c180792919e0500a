//! Pairwise conflict detection between selected organisms.
//!
//! Every unordered pair is run through each rule in turn: explicit declarations first,
//! then temperament, then predation. A pair may be reported once per rule that fires;
//! the same pair is never reported twice under the same rule.

use crate::{
    issue::{Issue, Severity},
    selection::{Selection, SelectionEntry},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tankplan_schemas::{
    environment::Co2Level,
    organism::{Co2Requirement, CompatibilityFlag, LightingLevel, Organism, Temperament},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictRule {
    ExplicitIncompatibility,
    Temperament,
    PlantDamage,
    ShrimpPredation,
}

impl ConflictRule {
    pub fn severity(&self) -> Severity {
        match self {
            ConflictRule::ExplicitIncompatibility | ConflictRule::Temperament => Severity::Error,
            ConflictRule::PlantDamage | ConflictRule::ShrimpPredation => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub item_a: String,
    pub item_b: String,
    pub reason: String,
    pub rule: ConflictRule,
}

impl Conflict {
    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    pub fn to_issue(&self) -> Issue {
        Issue {
            severity: self.severity(),
            message: format!("{} and {}: {}", self.item_a, self.item_b, self.reason),
        }
    }
}

/// A schooling fish kept in a smaller group than it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolingShortfall {
    pub name: String,
    pub quantity: u32,
    pub minimum: u32,
}

impl SchoolingShortfall {
    pub fn to_issue(&self) -> Issue {
        Issue::warning(format!(
            "{} is a schooling fish and needs at least {} individuals ({} selected)",
            self.name, self.minimum, self.quantity
        ))
    }
}

/// Collects conflicts, dropping repeats of the same (pair, rule).
#[derive(Default)]
struct ConflictSink {
    seen: HashSet<(String, String, ConflictRule)>,
    conflicts: Vec<Conflict>,
}

impl ConflictSink {
    fn push(&mut self, a: &Organism, b: &Organism, rule: ConflictRule, reason: String) {
        let key = if a.slug <= b.slug {
            (a.slug.clone(), b.slug.clone(), rule)
        } else {
            (b.slug.clone(), a.slug.clone(), rule)
        };
        if self.seen.insert(key) {
            self.conflicts.push(Conflict {
                item_a: a.name.clone(),
                item_b: b.name.clone(),
                reason,
                rule,
            });
        }
    }
}

fn explicit_reason(a: &Organism, b: &Organism) -> Option<String> {
    if let Some(identity) = a.declared_incompatibility_with(b) {
        return Some(format!("{} is declared incompatible with {}", a.name, identity));
    }
    b.declared_incompatibility_with(a)
        .map(|identity| format!("{} is declared incompatible with {}", b.name, identity))
}

fn temperament_of(organism: &Organism) -> Option<Temperament> {
    organism.fish_profile().and_then(|p| p.temperament)
}

fn check_explicit(sink: &mut ConflictSink, a: &Organism, b: &Organism) {
    if let Some(reason) = explicit_reason(a, b) {
        sink.push(a, b, ConflictRule::ExplicitIncompatibility, reason);
    }
}

/// Only aggressive against peaceful conflicts. Semi-aggressive fish never trigger this rule.
fn check_temperament(sink: &mut ConflictSink, a: &Organism, b: &Organism) {
    let (aggressor, victim) = match (temperament_of(a), temperament_of(b)) {
        (Some(Temperament::Aggressive), Some(Temperament::Peaceful)) => (a, b),
        (Some(Temperament::Peaceful), Some(Temperament::Aggressive)) => (b, a),
        _ => return,
    };
    sink.push(
        aggressor,
        victim,
        ConflictRule::Temperament,
        "aggressive fish may harm peaceful fish".to_string(),
    );
}

fn check_shrimp_predation(sink: &mut ConflictSink, a: &Organism, b: &Organism) {
    let (predator, prey) = if a.is_fish() && b.is_invertebrate() {
        (a, b)
    } else if b.is_fish() && a.is_invertebrate() {
        (b, a)
    } else {
        return;
    };
    if predator.compatibility.shrimp == CompatibilityFlag::No {
        sink.push(
            predator,
            prey,
            ConflictRule::ShrimpPredation,
            "fish may prey on shrimp and other invertebrates".to_string(),
        );
    }
}

fn unordered_pairs<'a>(
    entries: &'a [&'a SelectionEntry],
) -> impl Iterator<Item = (&'a Organism, &'a Organism)> + 'a {
    entries.iter().enumerate().flat_map(move |(i, a)| {
        entries[i + 1..].iter().map(move |b| (&a.organism, &b.organism))
    })
}

/// Livestock × livestock: explicit declarations, temperament, shrimp predation.
pub fn livestock_conflicts(selection: &Selection) -> Vec<Conflict> {
    let livestock: Vec<&SelectionEntry> =
        selection.present().filter(|e| !e.organism.is_plant()).collect();
    let mut sink = ConflictSink::default();
    for (a, b) in unordered_pairs(&livestock) {
        check_explicit(&mut sink, a, b);
        check_temperament(&mut sink, a, b);
        check_shrimp_predation(&mut sink, a, b);
    }
    sink.conflicts
}

/// Plant × plant. Plants only conflict through explicit data: a declared list, or a plant
/// flagged as unsuitable for sharing the tank with other plants.
pub fn plant_conflicts(selection: &Selection) -> Vec<Conflict> {
    let plants: Vec<&SelectionEntry> = selection.present_plants().collect();
    let mut sink = ConflictSink::default();
    for (a, b) in unordered_pairs(&plants) {
        check_explicit(&mut sink, a, b);
        for (loner, other) in [(a, b), (b, a)] {
            if loner.compatibility.plants == CompatibilityFlag::No {
                sink.push(
                    loner,
                    other,
                    ConflictRule::ExplicitIncompatibility,
                    format!("{} is declared incompatible with other plants", loner.name),
                );
            }
        }
    }
    sink.conflicts
}

/// Livestock × plant: explicit declarations for any livestock, then plant damage for fish.
/// A plant-eating fish is paired with every selected plant.
pub fn cross_conflicts(selection: &Selection) -> Vec<Conflict> {
    let plants: Vec<&SelectionEntry> = selection.present_plants().collect();
    let mut sink = ConflictSink::default();
    for animal in selection.present().filter(|e| !e.organism.is_plant()) {
        for plant in &plants {
            let (a, b) = (&animal.organism, &plant.organism);
            check_explicit(&mut sink, a, b);
            if a.is_fish() && a.compatibility.plants == CompatibilityFlag::No {
                sink.push(
                    a,
                    b,
                    ConflictRule::PlantDamage,
                    "fish may eat or damage plants".to_string(),
                );
            }
        }
    }
    sink.conflicts
}

/// Schooling fish kept below their minimum group size.
pub fn schooling_shortfalls(
    selection: &Selection,
    default_minimum: u32,
) -> Vec<SchoolingShortfall> {
    selection
        .present_fish()
        .filter_map(|entry| {
            let profile = entry.organism.fish_profile()?;
            if !profile.schooling {
                return None;
            }
            let minimum = profile.min_school_size.unwrap_or(default_minimum);
            (entry.quantity < minimum).then(|| SchoolingShortfall {
                name: entry.name().to_string(),
                quantity: entry.quantity,
                minimum,
            })
        })
        .collect()
}

/// Tanks larger than this make high-light plants hard to serve.
pub const HIGH_LIGHT_MAX_LITERS: f64 = 200.0;
/// Tanks smaller than this can overgrow with low-light plants.
pub const LOW_LIGHT_MIN_LITERS: f64 = 50.0;

/// Advisory pairings: `other_fish` grades of "caution", and "caution" on the shrimp or
/// plant flags. None of these block a plan.
pub fn caution_warnings(selection: &Selection) -> Vec<Issue> {
    let livestock: Vec<&SelectionEntry> =
        selection.present().filter(|e| !e.organism.is_plant()).collect();
    let mut issues: Vec<Issue> = unordered_pairs(&livestock)
        .filter(|(a, b)| a.declares_caution_with(b) || b.declares_caution_with(a))
        .map(|(a, b)| {
            Issue::warning(format!(
                "{} and {} need careful monitoring when kept together",
                a.name, b.name
            ))
        })
        .collect();

    for fish in selection.present_fish() {
        let fish = &fish.organism;
        if fish.compatibility.shrimp == CompatibilityFlag::Caution {
            for invertebrate in selection.present_invertebrates() {
                issues.push(Issue::warning(format!(
                    "{} may pick at {}, watch them closely when kept together",
                    fish.name, invertebrate.organism.name
                )));
            }
        }
        if fish.compatibility.plants == CompatibilityFlag::Caution {
            for plant in selection.present_plants() {
                issues.push(Issue::warning(format!(
                    "{} may nibble on {}, watch for damaged leaves",
                    fish.name, plant.organism.name
                )));
            }
        }
    }

    let plants: Vec<&SelectionEntry> = selection.present_plants().collect();
    for (a, b) in unordered_pairs(&plants) {
        let cautious = [a, b]
            .into_iter()
            .any(|p| p.compatibility.plants == CompatibilityFlag::Caution);
        if cautious {
            issues.push(Issue::warning(format!(
                "{} and {} may compete when planted together",
                a.name, b.name
            )));
        }
    }

    issues
}

/// Advisories about growing conditions across the selected plants, given the tank's CO2
/// supplementation and volume in liters.
pub fn plant_requirement_warnings(
    selection: &Selection,
    tank_co2: Option<Co2Level>,
    tank_volume: f64,
) -> Vec<Issue> {
    let plants: Vec<_> = selection
        .present_plants()
        .filter_map(|e| e.organism.plant_profile().map(|p| (e.name(), p)))
        .collect();
    let mut issues = Vec::new();
    if plants.is_empty() {
        return issues;
    }

    let lighting: BTreeSet<_> = plants.iter().filter_map(|(_, p)| p.lighting).collect();
    if lighting.len() > 1 {
        issues.push(Issue::warning(
            "Plants with different lighting requirements may not thrive in the same conditions",
        ));
    }

    if tank_volume.is_finite() && tank_volume > 0.0 {
        for (name, profile) in &plants {
            match profile.lighting {
                Some(LightingLevel::High) if tank_volume > HIGH_LIGHT_MAX_LITERS => {
                    issues.push(Issue::warning(format!(
                        "{} needs high light, which may be difficult in a {}L tank",
                        name, tank_volume
                    )));
                }
                Some(LightingLevel::Low) if tank_volume < LOW_LIGHT_MIN_LITERS => {
                    issues.push(Issue::warning(format!(
                        "{} prefers low light but may grow too fast in a small {}L tank",
                        name, tank_volume
                    )));
                }
                _ => {}
            }
        }
    }

    let co2_supplemented = tank_co2.map_or(false, |c| c.is_supplemented());
    if !co2_supplemented && plants.iter().any(|(_, p)| p.co2 == Some(Co2Requirement::Required)) {
        issues.push(Issue::warning(
            "Some plants require CO2 supplementation for optimal growth",
        ));
    }

    let mut substrate_sets = plants
        .iter()
        .filter(|(_, p)| !p.substrate.is_empty())
        .map(|(_, p)| p.substrate.iter().copied().collect::<BTreeSet<_>>());
    if let Some(first) = substrate_sets.next() {
        let mut declared = 1;
        let common = substrate_sets.fold(first, |acc, set| {
            declared += 1;
            acc.intersection(&set).copied().collect()
        });
        if declared > 1 && common.is_empty() {
            issues.push(Issue::warning(
                "Selected plants have no common substrate - plan separate substrate zones",
            ));
        }
    }

    issues
}
