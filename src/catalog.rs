//! Capital city catalog and continent filtering.
//!
//! The catalog is loaded once at start-up and passed by reference to whoever
//! needs it. Filtering never touches the source; it produces an owned
//! [`FilteredCatalog`] whose order is the catalog's insertion order.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult, StoreError};
use crate::geo::GeoPoint;

/// Catalog shipped with the crate.
const BUILTIN_CAPITALS: &str = include_str!("../data/capitals.json");

/// A single capital city.
///
/// Accepts the English field names as well as German ones
/// (`Hauptstadt`, `Land`, `Kontinent`, `Breitengrad`, `Längengrad`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalEntry {
    /// City name.
    #[serde(alias = "Hauptstadt")]
    pub city: String,
    /// Country the city is the capital of.
    #[serde(alias = "Land")]
    pub country: String,
    /// Continent of the country.
    #[serde(alias = "Kontinent")]
    pub continent: String,
    /// Latitude in degrees.
    #[serde(alias = "Breitengrad")]
    pub latitude: f64,
    /// Longitude in degrees.
    #[serde(alias = "Längengrad")]
    pub longitude: f64,
}

impl CapitalEntry {
    /// Position of the city.
    #[must_use]
    pub const fn position(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The full list of capitals.
#[derive(Debug, Clone, Default)]
pub struct CapitalCatalog {
    entries: Vec<CapitalEntry>,
}

impl CapitalCatalog {
    /// Build a catalog from entries, validating every coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidEntry`] for the first entry whose
    /// coordinates are off the map.
    pub fn from_entries(entries: Vec<CapitalEntry>) -> Result<Self, StoreError> {
        for (index, entry) in entries.iter().enumerate() {
            GeoPoint::new(entry.latitude, entry.longitude)
                .map_err(|source| StoreError::InvalidEntry { index, source })?;
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an entry is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let entries = serde_json::from_str(json).map_err(|source| StoreError::Json {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_entries(entries)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = serde_json::from_str(&json).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_entries(entries)?;
        log::debug!("loaded {} capitals from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is corrupt.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_json_str(BUILTIN_CAPITALS)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CapitalEntry] {
        &self.entries
    }

    /// Distinct continent names, sorted.
    #[must_use]
    pub fn continents(&self) -> Vec<String> {
        self.continent_counts().into_keys().collect()
    }

    /// Number of capitals per continent, sorted by continent name.
    #[must_use]
    pub fn continent_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.continent.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Select the entries whose continent is in `continents`.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::EmptySelection`] when nothing matches.
    pub fn filter_by_continents(&self, continents: &BTreeSet<String>) -> QuizResult<FilteredCatalog> {
        let entries: Vec<CapitalEntry> = self
            .entries
            .iter()
            .filter(|e| continents.contains(&e.continent))
            .cloned()
            .collect();

        if entries.is_empty() {
            return Err(QuizError::EmptySelection {
                continents: continents.iter().cloned().collect(),
            });
        }

        Ok(FilteredCatalog {
            continents: continents.clone(),
            entries,
        })
    }
}

/// The capitals eligible for one session. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCatalog {
    continents: BTreeSet<String>,
    entries: Vec<CapitalEntry>,
}

impl FilteredCatalog {
    /// Number of eligible capitals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the subset is empty; never true for a built subset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CapitalEntry> {
        self.entries.get(index)
    }

    /// All eligible entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CapitalEntry] {
        &self.entries
    }

    /// The continent selection this subset was built from.
    #[must_use]
    pub const fn continents(&self) -> &BTreeSet<String> {
        &self.continents
    }
}
