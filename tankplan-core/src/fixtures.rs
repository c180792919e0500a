//! Catalog records for unit tests.

use crate::selection::SelectionEntry;
use tankplan_schemas::organism::{
    Compatibility, CompatibilityFlag, FishProfile, InvertebrateProfile, Organism, OrganismKind,
    PlantProfile, TankSize, Temperament, ToleranceRange, WaterParameters,
};

pub fn fish(slug: &str, temperament: Option<Temperament>) -> Organism {
    Organism {
        slug: slug.to_string(),
        name: display_name(slug),
        scientific_name: None,
        water_parameters: WaterParameters::default(),
        tank_size: TankSize {
            minimum: None,
            recommended: Some(10.0),
        },
        compatibility: Compatibility::default(),
        kind: OrganismKind::Fish(FishProfile {
            temperament,
            ..FishProfile::default()
        }),
    }
}

pub fn plant(slug: &str) -> Organism {
    Organism {
        slug: slug.to_string(),
        name: display_name(slug),
        scientific_name: None,
        water_parameters: WaterParameters::default(),
        tank_size: TankSize::default(),
        compatibility: Compatibility::default(),
        kind: OrganismKind::Plant(PlantProfile::default()),
    }
}

pub fn shrimp(slug: &str) -> Organism {
    Organism {
        kind: OrganismKind::Invertebrate(InvertebrateProfile::default()),
        ..plant(slug)
    }
}

pub fn plant_eater(slug: &str) -> Organism {
    let mut organism = fish(slug, Some(Temperament::SemiAggressive));
    organism.compatibility.plants = CompatibilityFlag::No;
    organism
}

pub fn with_ranges(mut organism: Organism, temperature: (f64, f64), ph: (f64, f64)) -> Organism {
    organism.water_parameters.temperature = Some(ToleranceRange::new(temperature.0, temperature.1));
    organism.water_parameters.ph = Some(ToleranceRange::new(ph.0, ph.1));
    organism
}

pub fn entry(organism: Organism, quantity: u32) -> SelectionEntry {
    SelectionEntry::new(organism, quantity)
}

fn display_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
