//! Doctor record types.

use serde::{Deserialize, Serialize};

/// A doctor record as stored in the hosted collection.
///
/// Geographic and clinical fields are multi-valued: a doctor may attend in
/// several cities and treat several diseases. City, specialty and disease
/// values are display names; `state_slug` is the containing state's slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Full display name.
    pub name: String,
    /// Slug of the state the doctor practices in.
    #[serde(default)]
    pub state_slug: String,
    /// Cities where the doctor attends (display names).
    #[serde(default)]
    pub cities: Vec<String>,
    /// Specialties (canonical display names).
    #[serde(default)]
    pub specialties: Vec<String>,
    /// Diseases the doctor treats (display names).
    #[serde(default)]
    pub diseases: Vec<String>,
    /// Practice address, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone, if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
