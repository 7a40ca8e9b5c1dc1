//! Mock store implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without network access.

use crate::query::DoctorQuery;
use crate::record::Doctor;
use crate::store::{DirectoryStore, DoctorPage, ErrorStatus, StoreError, StoreErrorKind};

/// Mock store for testing.
///
/// Holds doctor records in memory and evaluates [`DoctorQuery`] filters the
/// way the hosted backend does: conjunctive filters with membership matching
/// on multi-valued fields. Use the builder methods to configure test data.
///
/// # Example
///
/// ```
/// use mb_store::{DirectoryStore, Doctor, DoctorQuery, MockStore};
///
/// let store = MockStore::new().with_doctor(Doctor {
///     name: "Dra. Ana Ruiz".to_owned(),
///     state_slug: "nuevo-leon".to_owned(),
///     cities: vec!["Monterrey".to_owned()],
///     specialties: vec!["Pediatra".to_owned()],
///     diseases: Vec::new(),
///     address: None,
///     phone: None,
/// });
///
/// let page = store.find(&DoctorQuery::new().state("nuevo-leon")).unwrap();
/// assert_eq!(page.total, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    doctors: Vec<Doctor>,
    unavailable: bool,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a doctor record.
    #[must_use]
    pub fn with_doctor(mut self, doctor: Doctor) -> Self {
        self.doctors.push(doctor);
        self
    }

    /// Add several doctor records.
    #[must_use]
    pub fn with_doctors(mut self, doctors: impl IntoIterator<Item = Doctor>) -> Self {
        self.doctors.extend(doctors);
        self
    }

    /// Make every operation fail with an `Unavailable` error.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check_available(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::new(StoreErrorKind::Unavailable)
                .with_status(ErrorStatus::Persistent)
                .with_backend("Mock")
                .with_operation(operation));
        }
        Ok(())
    }

    fn matches(doctor: &Doctor, query: &DoctorQuery) -> bool {
        if let Some(state) = &query.state_slug
            && doctor.state_slug != *state
        {
            return false;
        }
        if let Some(city) = &query.city
            && !doctor.cities.iter().any(|c| c == city)
        {
            return false;
        }
        if let Some(specialty) = &query.specialty
            && !doctor.specialties.iter().any(|s| s == specialty)
        {
            return false;
        }
        if let Some(disease) = &query.disease
            && !doctor.diseases.iter().any(|d| d == disease)
        {
            return false;
        }
        if let Some(prefix) = &query.name_prefix
            && !doctor
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
        {
            return false;
        }
        true
    }
}

impl DirectoryStore for MockStore {
    fn find(&self, query: &DoctorQuery) -> Result<DoctorPage, StoreError> {
        self.check_available("find")?;

        let matching: Vec<&Doctor> = self
            .doctors
            .iter()
            .filter(|doctor| Self::matches(doctor, query))
            .collect();
        let total = matching.len() as u64;

        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);
        let doctors = matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        Ok(DoctorPage { doctors, total })
    }

    fn count(&self, query: &DoctorQuery) -> Result<u64, StoreError> {
        self.check_available("count")?;

        Ok(self
            .doctors
            .iter()
            .filter(|doctor| Self::matches(doctor, query))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doctor(name: &str, state: &str, city: &str, specialty: &str) -> Doctor {
        Doctor {
            name: name.to_owned(),
            state_slug: state.to_owned(),
            cities: vec![city.to_owned()],
            specialties: vec![specialty.to_owned()],
            diseases: vec!["Diabetes".to_owned()],
            address: None,
            phone: None,
        }
    }

    fn store() -> MockStore {
        MockStore::new().with_doctors([
            doctor("Dra. Ana Ruiz", "nuevo-leon", "Monterrey", "Pediatra"),
            doctor(
                "Dr. Luis Soto",
                "ciudad-de-mexico",
                "Ciudad de México",
                "Cardiólogo",
            ),
            doctor("Dra. Marta Vega", "nuevo-leon", "Monterrey", "Cardiólogo"),
        ])
    }

    #[test]
    fn find_filters_by_state() {
        let page = store()
            .find(&DoctorQuery::new().state("nuevo-leon"))
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.doctors.len(), 2);
    }

    #[test]
    fn find_filters_conjunctively() {
        let page = store()
            .find(
                &DoctorQuery::new()
                    .state("nuevo-leon")
                    .specialty("Cardiólogo"),
            )
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.doctors[0].name, "Dra. Marta Vega");
    }

    #[test]
    fn find_matches_city_membership() {
        let page = store()
            .find(&DoctorQuery::new().city("Ciudad de México"))
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.doctors[0].name, "Dr. Luis Soto");
    }

    #[test]
    fn find_name_prefix_is_case_insensitive() {
        let page = store().find(&DoctorQuery::new().name_prefix("dra.")).unwrap();

        assert_eq!(page.total, 2);
    }

    #[test]
    fn find_paginates_and_reports_full_total() {
        let page = store()
            .find(&DoctorQuery::new().per_page(2).page(2))
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.doctors.len(), 1);
        assert_eq!(page.doctors[0].name, "Dra. Marta Vega");
    }

    #[test]
    fn find_empty_result_is_not_an_error() {
        let page = store().find(&DoctorQuery::new().state("xx")).unwrap();

        assert_eq!(page.total, 0);
        assert!(page.doctors.is_empty());
    }

    #[test]
    fn count_matches_find_total() {
        let mock = store();
        let query = DoctorQuery::new().disease("Diabetes");

        assert_eq!(mock.count(&query).unwrap(), 3);
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let mock = MockStore::new().unavailable();

        let err = mock.find(&DoctorQuery::new()).unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::Unavailable);
        assert!(mock.count(&DoctorQuery::new()).is_err());
    }
}
