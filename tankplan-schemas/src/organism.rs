//! Defines the data structures for representing livestock and plants in the tank planner catalog.
//! An organism record is static reference data: water parameter tolerances, space requirements,
//! behaviour and declared compatibility. How many of each organism a user keeps belongs to a
//! selection, never to the record itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A closed interval `[min, max]` describing an acceptable range for one water parameter.
///
/// Catalog files may write a range either as `{ min: 22, max: 26 }` or as the tuple `[22, 26]`;
/// both forms deserialize into the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RangeRepr")]
pub struct ToleranceRange {
    pub min: f64,
    pub max: f64,
}

impl ToleranceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A range is usable only when both bounds are finite and ordered.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RangeRepr {
    Object { min: f64, max: f64 },
    Tuple(f64, f64),
}

impl From<RangeRepr> for ToleranceRange {
    fn from(repr: RangeRepr) -> Self {
        match repr {
            RangeRepr::Object { min, max } | RangeRepr::Tuple(min, max) => Self { min, max },
        }
    }
}

/// Acceptable water chemistry for an organism. A missing range means the organism places no
/// constraint on that parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParameters {
    /// Temperature in °C.
    pub temperature: Option<ToleranceRange>,
    #[serde(alias = "pH")]
    pub ph: Option<ToleranceRange>,
    /// General hardness in dGH.
    pub hardness: Option<ToleranceRange>,
}

/// Space requirements, in the same volume unit as the tank they are compared against.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TankSize {
    pub minimum: Option<f64>,
    pub recommended: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Temperament {
    Peaceful,
    SemiAggressive,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    #[serde(alias = "easy")]
    Beginner,
    #[serde(alias = "moderate")]
    Intermediate,
    #[serde(alias = "difficult")]
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Co2Requirement {
    None,
    Optional,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthRate {
    Slow,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubstrateType {
    #[serde(rename = "sand")]
    Sand,
    #[serde(rename = "gravel")]
    Gravel,
    #[serde(rename = "aqua soil")]
    AquaSoil,
    #[serde(rename = "clay")]
    Clay,
    #[serde(rename = "bare bottom")]
    BareBottom,
    #[serde(rename = "none")]
    None,
}

/// A declared yes / no / "caution" relationship. Catalog files write it as `true`, `false`
/// or the string `"caution"`. An undeclared flag is treated as `Yes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "FlagRepr", into = "FlagRepr")]
pub enum CompatibilityFlag {
    #[default]
    Yes,
    No,
    Caution,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Word(CautionWord),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CautionWord {
    Caution,
}

impl From<FlagRepr> for CompatibilityFlag {
    fn from(repr: FlagRepr) -> Self {
        match repr {
            FlagRepr::Bool(true) => Self::Yes,
            FlagRepr::Bool(false) => Self::No,
            FlagRepr::Word(CautionWord::Caution) => Self::Caution,
        }
    }
}

impl From<CompatibilityFlag> for FlagRepr {
    fn from(flag: CompatibilityFlag) -> Self {
        match flag {
            CompatibilityFlag::Yes => FlagRepr::Bool(true),
            CompatibilityFlag::No => FlagRepr::Bool(false),
            CompatibilityFlag::Caution => FlagRepr::Word(CautionWord::Caution),
        }
    }
}

/// Pairwise compatibility grade declared against another specific organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompatibilityLevel {
    HighlyCompatible,
    Compatible,
    Caution,
    Incompatible,
    Unknown,
}

/// Declared relationships between this organism and others.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Compatibility {
    /// Whether the organism leaves plants alone. For plants, `No` marks a plant that
    /// should not share the tank with other plants.
    pub plants: CompatibilityFlag,
    /// Whether the organism is safe with shrimp and other invertebrates.
    pub shrimp: CompatibilityFlag,
    /// Identities (slug, scientific name or name) this organism must not be kept with.
    pub incompatible_with: Vec<String>,
    /// Per-organism grades keyed by identity.
    pub other_fish: BTreeMap<String, CompatibilityLevel>,
}

/// Behavioural data specific to fish.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FishProfile {
    pub temperament: Option<Temperament>,
    pub schooling: bool,
    /// Smallest group this species should be kept in. Falls back to the engine default.
    pub min_school_size: Option<u32>,
    pub care_level: Option<CareLevel>,
}

/// Growing requirements specific to plants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantProfile {
    pub lighting: Option<LightingLevel>,
    pub co2: Option<Co2Requirement>,
    pub growth_rate: Option<GrowthRate>,
    pub substrate: Vec<SubstrateType>,
    pub care_level: Option<CareLevel>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvertebrateProfile {
    pub care_level: Option<CareLevel>,
}

/// The explicit subtype of an organism, fixed when the record is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrganismKind {
    Fish(FishProfile),
    Plant(PlantProfile),
    Invertebrate(InvertebrateProfile),
}

/// Coarse category used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fish,
    Plant,
    Invertebrate,
}

/// The top-level struct representing a complete catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    /// Stable catalog key.
    pub slug: String,
    /// Display name.
    #[serde(alias = "common_name")]
    pub name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub water_parameters: WaterParameters,
    #[serde(default)]
    pub tank_size: TankSize,
    #[serde(default)]
    pub compatibility: Compatibility,
    #[serde(flatten)]
    pub kind: OrganismKind,
}

impl Organism {
    pub fn category(&self) -> Category {
        match self.kind {
            OrganismKind::Fish(_) => Category::Fish,
            OrganismKind::Plant(_) => Category::Plant,
            OrganismKind::Invertebrate(_) => Category::Invertebrate,
        }
    }

    pub fn fish_profile(&self) -> Option<&FishProfile> {
        match &self.kind {
            OrganismKind::Fish(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn plant_profile(&self) -> Option<&PlantProfile> {
        match &self.kind {
            OrganismKind::Plant(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_fish(&self) -> bool {
        matches!(self.kind, OrganismKind::Fish(_))
    }

    pub fn is_plant(&self) -> bool {
        matches!(self.kind, OrganismKind::Plant(_))
    }

    pub fn is_invertebrate(&self) -> bool {
        matches!(self.kind, OrganismKind::Invertebrate(_))
    }

    /// True when `identity` names this organism by slug, scientific name or display name.
    /// Comparison ignores case and surrounding whitespace.
    pub fn is_identified_by(&self, identity: &str) -> bool {
        let identity = identity.trim();
        if identity.is_empty() {
            return false;
        }
        self.slug.eq_ignore_ascii_case(identity)
            || self.name.eq_ignore_ascii_case(identity)
            || self
                .scientific_name
                .as_deref()
                .map_or(false, |s| s.trim().eq_ignore_ascii_case(identity))
    }

    /// The declared incompatibility that names `other`, if any. Returns the identity as written.
    pub fn declared_incompatibility_with(&self, other: &Organism) -> Option<&str> {
        self.compatibility
            .incompatible_with
            .iter()
            .map(String::as_str)
            .chain(
                self.compatibility
                    .other_fish
                    .iter()
                    .filter(|(_, level)| **level == CompatibilityLevel::Incompatible)
                    .map(|(id, _)| id.as_str()),
            )
            .find(|id| other.is_identified_by(id))
    }

    /// True when this organism grades `other` as needing caution.
    pub fn declares_caution_with(&self, other: &Organism) -> bool {
        self.compatibility
            .other_fish
            .iter()
            .any(|(id, level)| *level == CompatibilityLevel::Caution && other.is_identified_by(id))
    }
}
