//! Reference dataset loading and lookup tables.
//!
//! The dataset is parsed from a TOML file into [`DatasetFile`] and compiled
//! into [`ReferenceDataset`], which precomputes every slug so request-time
//! resolution never re-normalizes dataset entries. The compiled dataset is
//! immutable for the process lifetime and safe to share across threads.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::slug::{fold, slugify};

/// Raw dataset file as parsed from TOML.
///
/// List order is preserved: it drives directory listings and is the
/// tie-break for folded specialty matches.
#[derive(Debug, Deserialize)]
pub struct DatasetFile {
    /// Canonical specialty display names.
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Canonical disease display names.
    #[serde(default)]
    pub diseases: Vec<String>,
    /// Descriptive text per specialty; absent entries get generated text.
    #[serde(default)]
    pub specialty_descriptions: HashMap<String, String>,
    /// States with their cities.
    #[serde(default)]
    pub states: Vec<StateEntry>,
}

/// A state and its cities, in dataset order.
#[derive(Debug, Deserialize)]
pub struct StateEntry {
    /// Unique state slug (e.g. `"nuevo-leon"`). Must already be in slug form.
    pub slug: String,
    /// City display names.
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Error loading or validating the reference dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file could not be read.
    #[error("failed to read dataset file {path}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset file is not valid TOML.
    #[error("failed to parse dataset file")]
    Parse(#[from] toml::de::Error),
    /// Two states share a slug.
    #[error("duplicate state slug: {0}")]
    DuplicateState(String),
    /// A state slug is not in canonical slug form.
    #[error("state slug {given:?} is not canonical (expected {expected:?})")]
    InvalidStateSlug {
        /// Slug as written in the file.
        given: String,
        /// Its canonical form.
        expected: String,
    },
}

#[derive(Debug)]
pub(crate) struct CityRecord {
    pub(crate) name: String,
    pub(crate) slug: String,
}

#[derive(Debug)]
pub(crate) struct StateRecord {
    pub(crate) slug: String,
    pub(crate) cities: Vec<CityRecord>,
    /// Index into `cities` of the city whose slug equals the state slug.
    pub(crate) self_named: Option<usize>,
}

impl StateRecord {
    pub(crate) fn self_named_city(&self) -> Option<&CityRecord> {
        self.self_named.and_then(|idx| self.cities.get(idx))
    }
}

#[derive(Debug)]
pub(crate) struct SpecialtyRecord {
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) folded: String,
}

#[derive(Debug)]
pub(crate) struct DiseaseRecord {
    pub(crate) name: String,
    pub(crate) slug: String,
}

/// Immutable reference tables driving slug resolution and link generation.
///
/// Constructed once at startup via [`ReferenceDataset::load`] (or
/// [`ReferenceDataset::from_toml_str`] in tests) and shared by reference;
/// no interior mutability.
#[derive(Debug)]
pub struct ReferenceDataset {
    pub(crate) states: Vec<StateRecord>,
    state_index: HashMap<String, usize>,
    pub(crate) specialties: Vec<SpecialtyRecord>,
    pub(crate) diseases: Vec<DiseaseRecord>,
    specialty_descriptions: HashMap<String, String>,
}

impl ReferenceDataset {
    /// Compile a parsed dataset file into lookup tables.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DuplicateState`] if two states share a slug
    /// and [`DatasetError::InvalidStateSlug`] if a state slug is not already
    /// in canonical form. City and specialty slug collisions are a
    /// data-quality constraint, not validated here: the first entry in
    /// dataset order wins.
    pub fn new(file: DatasetFile) -> Result<Self, DatasetError> {
        let mut states = Vec::with_capacity(file.states.len());
        let mut state_index = HashMap::with_capacity(file.states.len());

        for entry in file.states {
            let expected = slugify(&entry.slug);
            if entry.slug != expected {
                return Err(DatasetError::InvalidStateSlug {
                    given: entry.slug,
                    expected,
                });
            }

            let cities: Vec<CityRecord> = entry
                .cities
                .into_iter()
                .map(|name| CityRecord {
                    slug: slugify(&name),
                    name,
                })
                .collect();
            let self_named = cities.iter().position(|city| city.slug == entry.slug);

            if state_index
                .insert(entry.slug.clone(), states.len())
                .is_some()
            {
                return Err(DatasetError::DuplicateState(entry.slug));
            }
            states.push(StateRecord {
                slug: entry.slug,
                cities,
                self_named,
            });
        }

        let specialties = file
            .specialties
            .into_iter()
            .map(|name| SpecialtyRecord {
                slug: slugify(&name),
                folded: fold(&name),
                name,
            })
            .collect();
        let diseases = file
            .diseases
            .into_iter()
            .map(|name| DiseaseRecord {
                slug: slugify(&name),
                name,
            })
            .collect();

        Ok(Self {
            states,
            state_index,
            specialties,
            diseases,
            specialty_descriptions: file.specialty_descriptions,
        })
    }

    /// Parse and compile a dataset from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] on malformed TOML, plus the
    /// validation errors of [`ReferenceDataset::new`].
    pub fn from_toml_str(text: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = toml::from_str(text)?;
        Self::new(file)
    }

    /// Read and compile a dataset from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Io`] if the file cannot be read, plus the
    /// errors of [`ReferenceDataset::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub(crate) fn state(&self, state_slug: &str) -> Option<&StateRecord> {
        self.state_index
            .get(state_slug)
            .and_then(|&idx| self.states.get(idx))
    }

    /// Whether the dataset contains a state with this slug.
    #[must_use]
    pub fn contains_state(&self, state_slug: &str) -> bool {
        self.state_index.contains_key(state_slug)
    }

    /// State slugs in dataset order.
    pub fn state_slugs(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|state| state.slug.as_str())
    }

    /// City display names of a state, in dataset order.
    ///
    /// `None` for an unknown state.
    pub fn city_names(&self, state_slug: &str) -> Option<impl Iterator<Item = &str>> {
        self.state(state_slug)
            .map(|state| state.cities.iter().map(|city| city.name.as_str()))
    }

    /// The city (if any) whose slug equals the state's own slug.
    #[must_use]
    pub fn self_named_city(&self, state_slug: &str) -> Option<&str> {
        self.state(state_slug)?
            .self_named_city()
            .map(|city| city.name.as_str())
    }

    /// Canonical specialty display names, in dataset order.
    pub fn specialty_names(&self) -> impl Iterator<Item = &str> {
        self.specialties.iter().map(|s| s.name.as_str())
    }

    /// Canonical disease display names, in dataset order.
    pub fn disease_names(&self) -> impl Iterator<Item = &str> {
        self.diseases.iter().map(|d| d.name.as_str())
    }

    /// Configured description for a specialty, if any.
    #[must_use]
    pub fn specialty_description(&self, name: &str) -> Option<&str> {
        self.specialty_descriptions.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FIXTURE: &str = r#"
specialties = ["Cardiólogo", "Pediatra"]
diseases = ["Diabetes", "Hipertensión Arterial"]

[specialty_descriptions]
"Cardiólogo" = "Especialista en el corazón."

[[states]]
slug = "ciudad-de-mexico"
cities = ["Ciudad de México", "Tlalpan"]

[[states]]
slug = "nuevo-leon"
cities = ["Monterrey", "San Pedro Garza García"]
"#;

    #[test]
    fn from_toml_builds_lookup_tables() {
        let dataset = ReferenceDataset::from_toml_str(FIXTURE).unwrap();

        assert!(dataset.contains_state("ciudad-de-mexico"));
        assert!(dataset.contains_state("nuevo-leon"));
        assert!(!dataset.contains_state("xx-unknown"));

        let cities: Vec<&str> = dataset.city_names("nuevo-leon").unwrap().collect();
        assert_eq!(cities, vec!["Monterrey", "San Pedro Garza García"]);
    }

    #[test]
    fn self_named_city_detected() {
        let dataset = ReferenceDataset::from_toml_str(FIXTURE).unwrap();

        assert_eq!(
            dataset.self_named_city("ciudad-de-mexico"),
            Some("Ciudad de México")
        );
        assert_eq!(dataset.self_named_city("nuevo-leon"), None);
        assert_eq!(dataset.self_named_city("xx-unknown"), None);
    }

    #[test]
    fn state_order_is_preserved() {
        let dataset = ReferenceDataset::from_toml_str(FIXTURE).unwrap();

        let slugs: Vec<&str> = dataset.state_slugs().collect();
        assert_eq!(slugs, vec!["ciudad-de-mexico", "nuevo-leon"]);
    }

    #[test]
    fn duplicate_state_slug_is_rejected() {
        let toml = r#"
[[states]]
slug = "sonora"

[[states]]
slug = "sonora"
"#;
        let err = ReferenceDataset::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateState(slug) if slug == "sonora"));
    }

    #[test]
    fn non_canonical_state_slug_is_rejected() {
        let toml = r#"
[[states]]
slug = "Nuevo León"
"#;
        let err = ReferenceDataset::from_toml_str(toml).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidStateSlug { expected, .. } if expected == "nuevo-leon"
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ReferenceDataset::from_toml_str("states = 3").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn specialty_description_lookup() {
        let dataset = ReferenceDataset::from_toml_str(FIXTURE).unwrap();

        assert_eq!(
            dataset.specialty_description("Cardiólogo"),
            Some("Especialista en el corazón.")
        );
        assert_eq!(dataset.specialty_description("Pediatra"), None);
    }

    #[test]
    fn empty_dataset_is_valid() {
        let dataset = ReferenceDataset::from_toml_str("").unwrap();

        assert_eq!(dataset.state_slugs().count(), 0);
        assert_eq!(dataset.specialty_names().count(), 0);
        assert_eq!(dataset.disease_names().count(), 0);
    }
}
