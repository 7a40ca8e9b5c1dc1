//! Path-segment resolution.
//!
//! A two-segment listing URL (`/doctores/{estado}/{segundo}`) is ambiguous:
//! the second segment may name a city of the state or a specialty. The
//! resolver decides which, applies the canonicalization redirect for
//! self-named cities, and reports everything else as `NotFound`.
//!
//! All matching is against precomputed slugs; the functions here are pure,
//! never panic, and treat malformed input as a plain non-match.

use crate::dataset::ReferenceDataset;
use crate::slug::display_name_from_slug;

/// URL prefix under which doctor listing pages live.
pub const DOCTORS_PREFIX: &str = "/doctores";

/// The resolved meaning of a URL path.
///
/// Exactly one variant holds for any input. The caller picks the downstream
/// data query and view from the variant; `NotFound` maps to a 404 response
/// and `Redirect` to a permanent redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageIntent {
    /// Doctor listing for one city of a state.
    City {
        /// Slug of the containing state.
        state_slug: String,
        /// City display name as stored in the dataset.
        city_name: String,
    },
    /// State landing page.
    State {
        /// Slug of the state.
        state_slug: String,
        /// City (if any) whose slug equals the state slug.
        self_named_city: Option<String>,
    },
    /// Specialty listing scoped to the state's self-named city.
    StateSpecialty {
        /// Slug of the state.
        state_slug: String,
        /// The self-named city's display name.
        city_name: String,
        /// Canonical specialty display name.
        specialty_name: String,
    },
    /// Informational disease page.
    Disease {
        /// Disease display name.
        disease_name: String,
    },
    /// Canonicalization redirect to the single canonical URL for the entity.
    Redirect {
        /// Absolute path to redirect to.
        target: String,
    },
    /// No entity matches the path.
    NotFound,
}

impl ReferenceDataset {
    /// Resolve a single-segment listing path (`/doctores/{estado}`).
    ///
    /// Unknown state slug → [`PageIntent::NotFound`]; otherwise a
    /// [`PageIntent::State`] carrying the self-named city, if the state has
    /// one.
    #[must_use]
    pub fn resolve_state(&self, state_slug: &str) -> PageIntent {
        match self.state(state_slug) {
            Some(state) => PageIntent::State {
                state_slug: state.slug.clone(),
                self_named_city: state.self_named_city().map(|city| city.name.clone()),
            },
            None => PageIntent::NotFound,
        }
    }

    /// Resolve a two-segment listing path (`/doctores/{estado}/{segundo}`).
    ///
    /// Priority order, first match wins:
    ///
    /// 1. unknown state → `NotFound`;
    /// 2. second segment matches a city slug of the state → `City`, except
    ///    for the self-named city, which redirects to the state URL so the
    ///    same entity is never reachable under two paths;
    /// 3. second segment canonicalizes to a specialty and the state has a
    ///    self-named city → `StateSpecialty` for that city;
    /// 4. otherwise `NotFound`.
    ///
    /// A city match always beats a specialty match when the second segment
    /// could be either.
    #[must_use]
    pub fn resolve_state_and_city(&self, state_slug: &str, second: &str) -> PageIntent {
        let Some(state) = self.state(state_slug) else {
            return PageIntent::NotFound;
        };
        if second.is_empty() {
            return PageIntent::NotFound;
        }

        if let Some(city) = state.cities.iter().find(|city| city.slug == second) {
            if city.slug == state.slug {
                return PageIntent::Redirect {
                    target: format!("{DOCTORS_PREFIX}/{}", state.slug),
                };
            }
            return PageIntent::City {
                state_slug: state.slug.clone(),
                city_name: city.name.clone(),
            };
        }

        if let Some(self_named) = state.self_named_city()
            && let Some(specialty) = self.canonicalize_specialty(second)
        {
            return PageIntent::StateSpecialty {
                state_slug: state.slug.clone(),
                city_name: self_named.name.clone(),
                specialty_name: specialty.to_owned(),
            };
        }

        PageIntent::NotFound
    }

    /// Map free-text input to a canonical specialty name.
    ///
    /// Exact slug equality first; if nothing matches, falls back to
    /// accent/case-insensitive equality against the folded form of each
    /// canonical specialty. Total: absence is `None`, never an error.
    ///
    /// If two canonical specialties fold to the same form, the first in
    /// dataset order wins (data-quality constraint, see the dataset docs).
    #[must_use]
    pub fn canonicalize_specialty(&self, input: &str) -> Option<&str> {
        if input.is_empty() {
            return None;
        }
        let slug = crate::slug::slugify(input);
        if let Some(hit) = self.specialties.iter().find(|s| s.slug == slug) {
            return Some(&hit.name);
        }
        let folded = crate::slug::fold(input);
        self.specialties
            .iter()
            .find(|s| s.folded == folded)
            .map(|s| s.name.as_str())
    }

    /// Resolve a disease path segment (`/enfermedades/{enfermedad}`).
    ///
    /// A slug matching a canonical disease resolves directly. Otherwise the
    /// caller-supplied predicate decides: it receives the display form
    /// derived from the slug and reports whether rich informational content
    /// or external records exist for it. When the predicate also says no,
    /// the result is `NotFound`.
    ///
    /// The predicate is the only external collaborator of this crate; it is
    /// treated as opaque and invoked at most once.
    pub fn resolve_disease<F>(&self, disease_slug: &str, exists: F) -> PageIntent
    where
        F: FnOnce(&str) -> bool,
    {
        if disease_slug.is_empty() {
            return PageIntent::NotFound;
        }
        if let Some(disease) = self.diseases.iter().find(|d| d.slug == disease_slug) {
            return PageIntent::Disease {
                disease_name: disease.name.clone(),
            };
        }
        let display = display_name_from_slug(disease_slug);
        if exists(&display) {
            return PageIntent::Disease {
                disease_name: display,
            };
        }
        PageIntent::NotFound
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::slug::slugify;

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::from_toml_str(
            r#"
specialties = ["Cardiólogo", "Pediatra", "Médico General"]
diseases = ["Diabetes", "Hipertensión Arterial"]

[[states]]
slug = "ciudad-de-mexico"
cities = ["Ciudad de México", "Tlalpan", "Coyoacán"]

[[states]]
slug = "nuevo-leon"
cities = ["Monterrey", "San Pedro Garza García"]

[[states]]
slug = "colima"
cities = ["Colima", "Manzanillo", "Pediatra"]
"#,
        )
        .unwrap()
    }

    #[test]
    fn resolve_state_known() {
        let intent = dataset().resolve_state("nuevo-leon");

        assert_eq!(
            intent,
            PageIntent::State {
                state_slug: "nuevo-leon".to_owned(),
                self_named_city: None,
            }
        );
    }

    #[test]
    fn resolve_state_reports_self_named_city() {
        let intent = dataset().resolve_state("ciudad-de-mexico");

        assert_eq!(
            intent,
            PageIntent::State {
                state_slug: "ciudad-de-mexico".to_owned(),
                self_named_city: Some("Ciudad de México".to_owned()),
            }
        );
    }

    #[test]
    fn resolve_state_unknown_is_not_found() {
        assert_eq!(dataset().resolve_state("xx-unknown"), PageIntent::NotFound);
    }

    #[test]
    fn resolve_state_and_city_unknown_state_is_not_found() {
        let ds = dataset();

        assert_eq!(
            ds.resolve_state_and_city("xx-unknown", "monterrey"),
            PageIntent::NotFound
        );
        assert_eq!(
            ds.resolve_state_and_city("xx-unknown", "cardiologo"),
            PageIntent::NotFound
        );
    }

    #[test]
    fn resolve_state_and_city_matches_city() {
        let intent = dataset().resolve_state_and_city("nuevo-leon", "san-pedro-garza-garcia");

        assert_eq!(
            intent,
            PageIntent::City {
                state_slug: "nuevo-leon".to_owned(),
                city_name: "San Pedro Garza García".to_owned(),
            }
        );
    }

    #[test]
    fn every_fixture_city_resolves() {
        let ds = dataset();

        for state_slug in ["ciudad-de-mexico", "nuevo-leon", "colima"] {
            let cities: Vec<String> = ds
                .city_names(state_slug)
                .unwrap()
                .map(str::to_owned)
                .collect();
            for city in cities {
                let slug = slugify(&city);
                let intent = ds.resolve_state_and_city(state_slug, &slug);
                if slug == state_slug {
                    assert!(
                        matches!(intent, PageIntent::Redirect { .. }),
                        "{state_slug}/{slug} should redirect"
                    );
                } else {
                    assert!(
                        matches!(intent, PageIntent::City { .. }),
                        "{state_slug}/{slug} should be a city page"
                    );
                }
            }
        }
    }

    #[test]
    fn self_named_city_redirects_to_state_url() {
        let intent = dataset().resolve_state_and_city("ciudad-de-mexico", "ciudad-de-mexico");

        assert_eq!(
            intent,
            PageIntent::Redirect {
                target: "/doctores/ciudad-de-mexico".to_owned(),
            }
        );
    }

    #[test]
    fn specialty_in_self_named_city() {
        let intent = dataset().resolve_state_and_city("ciudad-de-mexico", "cardiologo");

        assert_eq!(
            intent,
            PageIntent::StateSpecialty {
                state_slug: "ciudad-de-mexico".to_owned(),
                city_name: "Ciudad de México".to_owned(),
                specialty_name: "Cardiólogo".to_owned(),
            }
        );
    }

    #[test]
    fn specialty_without_self_named_city_is_not_found() {
        // Nuevo León has no self-named city, so a specialty segment has no
        // principal city to scope to.
        let intent = dataset().resolve_state_and_city("nuevo-leon", "cardiologo");

        assert_eq!(intent, PageIntent::NotFound);
    }

    #[test]
    fn city_wins_over_specialty() {
        // Colima has a city literally named "Pediatra", colliding with the
        // canonical specialty slug.
        let intent = dataset().resolve_state_and_city("colima", "pediatra");

        assert_eq!(
            intent,
            PageIntent::City {
                state_slug: "colima".to_owned(),
                city_name: "Pediatra".to_owned(),
            }
        );
    }

    #[test]
    fn empty_second_segment_is_not_found() {
        assert_eq!(
            dataset().resolve_state_and_city("nuevo-leon", ""),
            PageIntent::NotFound
        );
    }

    #[test]
    fn canonicalize_specialty_exact_slug() {
        let ds = dataset();

        assert_eq!(ds.canonicalize_specialty("cardiologo"), Some("Cardiólogo"));
        assert_eq!(
            ds.canonicalize_specialty("medico-general"),
            Some("Médico General")
        );
    }

    #[test]
    fn canonicalize_specialty_accent_fold_fallback() {
        let ds = dataset();

        // Accented input and exact-slug input land on the same canonical name.
        assert_eq!(ds.canonicalize_specialty("Cardiólogo"), Some("Cardiólogo"));
        assert_eq!(ds.canonicalize_specialty("pediatra"), Some("Pediatra"));
        assert_eq!(
            ds.canonicalize_specialty("pediatra"),
            ds.canonicalize_specialty("Pediatra")
        );
    }

    #[test]
    fn canonicalize_specialty_unknown_is_none() {
        let ds = dataset();

        assert_eq!(ds.canonicalize_specialty("astrologo"), None);
        assert_eq!(ds.canonicalize_specialty(""), None);
    }

    #[test]
    fn resolve_disease_canonical_hit_skips_predicate() {
        let intent = dataset().resolve_disease("diabetes", |_| {
            panic!("predicate must not run for canonical diseases")
        });

        assert_eq!(
            intent,
            PageIntent::Disease {
                disease_name: "Diabetes".to_owned(),
            }
        );
    }

    #[test]
    fn resolve_disease_accented_canonical_name() {
        let intent = dataset().resolve_disease("hipertension-arterial", |_| false);

        assert_eq!(
            intent,
            PageIntent::Disease {
                disease_name: "Hipertensión Arterial".to_owned(),
            }
        );
    }

    #[test]
    fn resolve_disease_falls_back_to_existence_check() {
        let intent = dataset().resolve_disease("gastritis-cronica", |name| {
            assert_eq!(name, "Gastritis Cronica");
            true
        });

        assert_eq!(
            intent,
            PageIntent::Disease {
                disease_name: "Gastritis Cronica".to_owned(),
            }
        );
    }

    #[test]
    fn resolve_disease_unknown_everywhere_is_not_found() {
        let intent = dataset().resolve_disease("no-existe", |_| false);

        assert_eq!(intent, PageIntent::NotFound);
    }

    #[test]
    fn resolve_disease_empty_slug_is_not_found() {
        let intent = dataset().resolve_disease("", |_| true);

        assert_eq!(intent, PageIntent::NotFound);
    }
}
