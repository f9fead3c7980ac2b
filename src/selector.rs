//! Random target selection without repeats.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::FilteredCatalog;
use crate::error::{QuizError, QuizResult};

/// Picks target cities uniformly among the indices not used yet.
///
/// Eligible indices are enumerated up front, so selection either succeeds in
/// one draw or reports exhaustion.
#[derive(Debug, Clone)]
pub struct CitySelector {
    rng: StdRng,
}

impl CitySelector {
    /// Reproducible selector for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Pick an index into `catalog` that is not in `used`.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::CatalogExhausted`] if every index is already used.
    pub fn next(&mut self, catalog: &FilteredCatalog, used: &HashSet<usize>) -> QuizResult<usize> {
        let eligible: Vec<usize> = (0..catalog.len()).filter(|i| !used.contains(i)).collect();

        eligible
            .choose(&mut self.rng)
            .copied()
            .ok_or(QuizError::CatalogExhausted {
                catalog_len: catalog.len(),
            })
    }
}

impl Default for CitySelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CapitalCatalog, CapitalEntry};
    use std::collections::BTreeSet;

    #[allow(clippy::cast_precision_loss)]
    fn catalog(n: usize) -> FilteredCatalog {
        let entries = (0..n)
            .map(|i| CapitalEntry {
                city: format!("City {i}"),
                country: format!("Country {i}"),
                continent: "Europe".to_string(),
                latitude: 40.0,
                longitude: i as f64,
            })
            .collect();
        CapitalCatalog::from_entries(entries)
            .unwrap()
            .filter_by_continents(&BTreeSet::from(["Europe".to_string()]))
            .unwrap()
    }

    #[test]
    fn test_never_returns_used_index() {
        let catalog = catalog(5);
        let mut selector = CitySelector::seeded(7);
        let used: HashSet<usize> = [0, 1, 3, 4].into_iter().collect();
        for _ in 0..50 {
            assert_eq!(selector.next(&catalog, &used).unwrap(), 2);
        }
    }

    #[test]
    fn test_exhaustion_is_reported() {
        let catalog = catalog(3);
        let mut selector = CitySelector::seeded(1);
        let used: HashSet<usize> = (0..3).collect();
        assert_eq!(
            selector.next(&catalog, &used),
            Err(QuizError::CatalogExhausted { catalog_len: 3 })
        );
    }

    #[test]
    fn test_draining_visits_every_index_once() {
        let catalog = catalog(12);
        let mut selector = CitySelector::seeded(99);
        let mut used = HashSet::new();
        for _ in 0..12 {
            let index = selector.next(&catalog, &used).unwrap();
            assert!(index < 12);
            assert!(used.insert(index), "index {index} repeated");
        }
        assert!(selector.next(&catalog, &used).is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = catalog(50);
        let used = HashSet::new();
        let mut a = CitySelector::seeded(42);
        let mut b = CitySelector::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.next(&catalog, &used).unwrap(), b.next(&catalog, &used).unwrap());
        }
    }

    #[test]
    fn test_roughly_uniform() {
        let catalog = catalog(4);
        let mut selector = CitySelector::seeded(2024);
        let used = HashSet::new();
        let mut counts = [0u32; 4];
        for _ in 0..4000 {
            counts[selector.next(&catalog, &used).unwrap()] += 1;
        }
        for count in counts {
            assert!((800..1200).contains(&count), "counts: {counts:?}");
        }
    }
}
