use crate::{
    error::TankPlanError,
    selection::{Selection, SelectionEntry},
};
use std::collections::HashMap;
use tankplan_schemas::organism::Organism;

/// A fluent builder for turning catalog picks into a `Selection`.
///
/// Picks name organisms by slug. Picking the same slug twice adds the quantities together,
/// and each organism is routed to the livestock or plant list by its declared kind.
pub struct SelectionBuilder<'a> {
    catalog: &'a HashMap<String, Organism>,
    picks: Vec<(String, i64)>,
}

impl<'a> SelectionBuilder<'a> {
    /// Creates a builder that resolves slugs against `catalog`.
    pub fn new(catalog: &'a HashMap<String, Organism>) -> Self {
        Self { catalog, picks: Vec::new() }
    }

    /// Adds `quantity` of the organism with this slug.
    pub fn with(mut self, slug: &str, quantity: i64) -> Self {
        self.picks.push((slug.to_string(), quantity));
        self
    }

    /// Adds every `(slug, quantity)` pick in order.
    pub fn with_picks<I, S>(mut self, picks: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        self.picks.extend(picks.into_iter().map(|(slug, qty)| (slug.into(), qty)));
        self
    }

    /// Consumes the builder and returns the selection.
    ///
    /// # Errors
    ///
    /// Returns a `TankPlanError` if a slug is not in the catalog or a quantity is negative
    /// or too large.
    pub fn build(self) -> Result<Selection, TankPlanError> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, u32> = HashMap::new();

        for (slug, quantity) in self.picks {
            if !self.catalog.contains_key(&slug) {
                return Err(TankPlanError::OrganismNotFound(slug));
            }
            let quantity = u32::try_from(quantity)
                .map_err(|_| TankPlanError::InvalidQuantity(slug.clone(), quantity))?;
            match totals.get_mut(&slug) {
                Some(total) => {
                    *total = total.checked_add(quantity).ok_or_else(|| {
                        TankPlanError::InvalidQuantity(slug.clone(), i64::from(quantity))
                    })?;
                }
                None => {
                    order.push(slug.clone());
                    totals.insert(slug, quantity);
                }
            }
        }

        let mut selection = Selection::default();
        for slug in order {
            let organism = &self.catalog[&slug];
            let entry = SelectionEntry::new(organism.clone(), totals[&slug]);
            if organism.is_plant() {
                selection.plants.push(entry);
            } else {
                selection.fish.push(entry);
            }
        }
        Ok(selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn catalog() -> HashMap<String, Organism> {
        [fish("neon-tetra", None), plant("java-fern"), shrimp("cherry-shrimp")]
            .into_iter()
            .map(|o| (o.slug.clone(), o))
            .collect()
    }

    #[test]
    fn test_routes_by_kind_and_merges_quantities() {
        let catalog = catalog();
        let selection = SelectionBuilder::new(&catalog)
            .with("java-fern", 2)
            .with("neon-tetra", 4)
            .with_picks([("cherry-shrimp", 10), ("neon-tetra", 3)])
            .build()
            .unwrap();
        let fish: Vec<(&str, u32)> = selection
            .fish
            .iter()
            .map(|e| (e.organism.slug.as_str(), e.quantity))
            .collect();
        assert_eq!(fish, vec![("neon-tetra", 7), ("cherry-shrimp", 10)]);
        assert_eq!(selection.plants.len(), 1);
        assert_eq!(selection.plants[0].quantity, 2);
    }

    #[test]
    fn test_unknown_slug() {
        let catalog = catalog();
        let err = SelectionBuilder::new(&catalog).with("oscar", 1).build().unwrap_err();
        assert!(matches!(err, TankPlanError::OrganismNotFound(slug) if slug == "oscar"));
    }

    #[test]
    fn test_negative_quantity() {
        let catalog = catalog();
        let err = SelectionBuilder::new(&catalog).with("neon-tetra", -2).build().unwrap_err();
        assert!(matches!(err, TankPlanError::InvalidQuantity(_, -2)));
    }
}
