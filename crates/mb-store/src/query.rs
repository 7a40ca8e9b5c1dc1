//! Doctor query construction.

use serde::Serialize;

/// Default listing page size.
const DEFAULT_PER_PAGE: u64 = 20;

/// Filter and pagination parameters for a doctor lookup.
///
/// All filters are conjunctive. Multi-valued record fields (`cities`,
/// `specialties`, `diseases`) match on membership: `city("Tlalpan")` selects
/// doctors whose city list contains `"Tlalpan"`.
///
/// Built with chained setters:
///
/// ```
/// use mb_store::DoctorQuery;
///
/// let query = DoctorQuery::new()
///     .state("ciudad-de-mexico")
///     .specialty("Cardiólogo")
///     .page(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorQuery {
    /// State slug filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_slug: Option<String>,
    /// City display-name membership filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Specialty display-name membership filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Disease display-name membership filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease: Option<String>,
    /// Case-insensitive doctor-name prefix filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_prefix: Option<String>,
    /// 1-based page number.
    pub page: u64,
    /// Page size.
    pub per_page: u64,
}

impl Default for DoctorQuery {
    fn default() -> Self {
        Self {
            state_slug: None,
            city: None,
            specialty: None,
            disease: None,
            name_prefix: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl DoctorQuery {
    /// Create an unfiltered first-page query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by state slug.
    #[must_use]
    pub fn state(mut self, state_slug: impl Into<String>) -> Self {
        self.state_slug = Some(state_slug.into());
        self
    }

    /// Filter by city display name.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Filter by specialty display name.
    #[must_use]
    pub fn specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    /// Filter by disease display name.
    #[must_use]
    pub fn disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = Some(disease.into());
        self
    }

    /// Filter by case-insensitive name prefix.
    #[must_use]
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    /// Select a 1-based page. Page 0 is normalized to 1.
    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Override the page size.
    #[must_use]
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Number of records to skip for the selected page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Maximum number of records to return.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}
