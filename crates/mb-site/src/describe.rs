//! Specialty description text.

use mb_directory::ReferenceDataset;

/// Description paragraph for a specialty page.
///
/// Uses the dataset's configured text when present, otherwise generates a
/// generic sentence from the specialty name.
#[must_use]
pub fn specialty_description(dataset: &ReferenceDataset, name: &str) -> String {
    dataset
        .specialty_description(name)
        .map_or_else(|| generated_description(name), str::to_owned)
}

fn generated_description(name: &str) -> String {
    format!(
        "Encuentra {name} cerca de ti: consulta perfiles, direcciones y \
         teléfonos de especialistas, y elige al indicado para tu caso."
    )
}
