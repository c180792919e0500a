use crate::organism::Organism;
use serde::Deserialize;

/// One catalog document: a schema version and a list of organism records.
#[derive(Debug, Deserialize)]
pub struct OrganismFile {
    pub schema_version: String,
    pub organisms: Vec<Organism>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organism::Category;

    #[test]
    fn test_mixed_catalog_document() {
        let doc = r#"
schema_version: "1.0"
organisms:
  - slug: cherry-shrimp
    name: Cherry Shrimp
    kind: invertebrate
    water_parameters:
      temperature: [18, 28]
  - slug: anubias
    name: Anubias
    kind: plant
    lighting: low
"#;
        let file: OrganismFile = serde_yaml::from_str(doc).unwrap();
        assert_eq!(file.schema_version, "1.0");
        let categories: Vec<Category> = file.organisms.iter().map(|o| o.category()).collect();
        assert_eq!(categories, vec![Category::Invertebrate, Category::Plant]);
    }
}
