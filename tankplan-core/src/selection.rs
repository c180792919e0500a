use serde::{Deserialize, Serialize};
use tankplan_schemas::organism::Organism;

/// One organism in the plan and how many of it are kept. A quantity of zero means the
/// organism is not part of the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub organism: Organism,
    pub quantity: u32,
}

impl SelectionEntry {
    pub fn new(organism: Organism, quantity: u32) -> Self {
        Self { organism, quantity }
    }

    pub fn name(&self) -> &str {
        &self.organism.name
    }
}

/// The user's stocking plan, split for reporting. `fish` holds all livestock (fish and
/// invertebrates); `plants` holds plants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub fish: Vec<SelectionEntry>,
    #[serde(default)]
    pub plants: Vec<SelectionEntry>,
}

impl Selection {
    pub fn new(fish: Vec<SelectionEntry>, plants: Vec<SelectionEntry>) -> Self {
        Self { fish, plants }
    }

    /// Entries actually present (quantity above zero), livestock first.
    pub fn present(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.fish.iter().chain(self.plants.iter()).filter(|e| e.quantity > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Present entries whose organism is a fish, whichever list they were put in.
    pub fn present_fish(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.present().filter(|e| e.organism.is_fish())
    }

    pub fn present_plants(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.present().filter(|e| e.organism.is_plant())
    }

    pub fn present_invertebrates(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.present().filter(|e| e.organism.is_invertebrate())
    }
}
