use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tankplan_core::validation::validate_organism;
use tankplan_schemas::{
    environment::{Co2Level, TankDimensions, TankParameters, TankReading},
    file_formats::OrganismFile,
    organism::Organism,
    units::{LengthUnit, VolumeUnit},
};

const CATALOG_SECTIONS: [&str; 3] = ["fish", "plants", "invertebrates"];

/// Every organism the planner knows about, keyed by slug.
pub struct Catalog {
    pub organisms: HashMap<String, Organism>,
}

impl Catalog {
    /// Loads every YAML file under the `fish/`, `plants/` and `invertebrates/` subdirectories
    /// of `base_path`. Sections that do not exist are skipped.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading catalog from '{}'...", base_path);

        let mut organisms = HashMap::new();
        for section in CATALOG_SECTIONS {
            let dir = Path::new(base_path).join(section);
            if !dir.is_dir() {
                println!("  - no '{}' section, skipping", section);
                continue;
            }
            let loaded = load_yaml_files_into_map(
                &dir,
                |file: OrganismFile| file.organisms,
                |item: &Organism| item.slug.clone(),
            )?;
            println!("  - {} records from '{}'", loaded.len(), section);
            organisms.extend(loaded);
        }

        if organisms.is_empty() {
            bail!("Catalog at '{}' contains no organisms", base_path);
        }
        println!("Catalog loaded: {} organisms.", organisms.len());
        Ok(Self { organisms })
    }

    /// Runs the record checks over the whole catalog, sorted by slug.
    pub fn validation_issues(&self) -> Vec<String> {
        let mut slugs: Vec<&String> = self.organisms.keys().collect();
        slugs.sort();
        slugs
            .into_iter()
            .flat_map(|slug| validate_organism(&self.organisms[slug]))
            .collect()
    }
}

/// Generic helper to load all YAML files in a directory into a HashMap.
/// Files are read in name order so a duplicated key resolves the same way on every run.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<HashMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> Deserialize<'de>,
    E: Fn(F) -> Vec<T>,
    K: Fn(&T) -> String,
{
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut map = HashMap::new();
    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let file_wrapper: F = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?;
        for item in extract_vec(file_wrapper) {
            map.insert(get_key(&item), item);
        }
    }
    Ok(map)
}

/// One line of a plan: how many of which organism.
#[derive(Debug, Clone, Deserialize)]
pub struct Pick {
    pub slug: String,
    pub quantity: i64,
}

/// Inside tank dimensions as written in a plan, in centimeters unless `unit` says otherwise.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DimensionsSection {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl DimensionsSection {
    pub fn to_dimensions(&self) -> TankDimensions {
        TankDimensions {
            length_cm: self.unit.to_cm(self.length),
            width_cm: self.unit.to_cm(self.width),
            height_cm: self.unit.to_cm(self.height),
        }
    }
}

/// The tank section of a plan. Volume is either given directly or derived from dimensions.
#[derive(Debug, Clone, Deserialize)]
pub struct TankSection {
    #[serde(default, alias = "size")]
    pub volume: Option<f64>,
    #[serde(default)]
    pub unit: VolumeUnit,
    #[serde(default)]
    pub dimensions: Option<DimensionsSection>,
    #[serde(default)]
    pub temperature: Option<TankReading>,
    #[serde(default, alias = "pH")]
    pub ph: Option<TankReading>,
    #[serde(default)]
    pub hardness: Option<TankReading>,
    #[serde(default)]
    pub co2: Option<Co2Level>,
}

impl TankSection {
    /// Resolves the tank into liters-based parameters.
    pub fn to_parameters(&self) -> Result<TankParameters> {
        let volume = match (self.volume, self.dimensions) {
            (Some(volume), None) => self.unit.to_liters(volume),
            (None, Some(dimensions)) => dimensions.to_dimensions().volume_liters(),
            (Some(_), Some(_)) => bail!("Tank gives both a volume and dimensions; use one"),
            (None, None) => bail!("Tank needs either a volume or dimensions"),
        };
        Ok(TankParameters {
            volume,
            temperature: self.temperature,
            ph: self.ph,
            hardness: self.hardness,
            co2: self.co2,
        })
    }
}

/// A stocking plan read from YAML.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tank: Option<TankSection>,
    #[serde(default)]
    pub fish: Vec<Pick>,
    #[serde(default)]
    pub plants: Vec<Pick>,
}

impl Plan {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse plan file: {}", path))
    }

    /// The plan's name, falling back to the file stem.
    pub fn id(&self, path: &str) -> String {
        self.name.clone().unwrap_or_else(|| {
            Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string())
        })
    }

    /// All picks, livestock first. Kinds are re-checked against the catalog when building.
    pub fn picks(&self) -> impl Iterator<Item = (String, i64)> + '_ {
        self.fish.iter().chain(&self.plants).map(|p| (p.slug.clone(), p.quantity))
    }
}
