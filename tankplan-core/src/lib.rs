//! Compatibility evaluation for aquarium stocking plans.
//!
//! Given a [`Selection`] of fish, invertebrates and plants and the current
//! [`TankParameters`](tankplan_schemas::environment::TankParameters), [`evaluate`] returns one
//! [`CompatibilityResult`] covering tank capacity, water parameter fit and pairwise conflicts.

pub mod analysis;
pub mod builder;
pub mod capacity;
pub mod conflicts;
pub mod error;
pub mod issue;
pub mod logger;
pub mod parameters;
pub mod range;
pub mod selection;
pub mod thresholds;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use analysis::{evaluate, CompatibilityEngine, CompatibilityResult};
pub use builder::SelectionBuilder;
pub use error::TankPlanError;
pub use selection::{Selection, SelectionEntry};
pub use thresholds::Thresholds;
