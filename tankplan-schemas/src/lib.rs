//! Catalog and tank data model shared by the tank planner crates.

pub mod environment;
pub mod file_formats;
pub mod organism;
pub mod units;
