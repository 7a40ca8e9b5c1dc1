//! URL slug normalization.
//!
//! A slug is the canonical URL form of a display name: lowercase, diacritics
//! stripped, whitespace collapsed to single hyphens. Link generation and
//! incoming-segment matching share the same function, which guarantees the
//! round trip `slugify(name)` → resolve → `name`.

use deunicode::deunicode_char;

/// Normalize a display name or raw path segment into a URL slug.
///
/// Lowercases, transliterates accented letters to their unaccented base
/// form, collapses whitespace and hyphen runs into a single `-`, drops every
/// other character outside `[a-z0-9_-]`, and trims leading and trailing
/// hyphens.
///
/// Pure and idempotent: `slugify(slugify(s)) == slugify(s)`.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        for ascii in deunicode_char(ch).unwrap_or("").chars() {
            match ascii.to_ascii_lowercase() {
                c @ ('a'..='z' | '0'..='9' | '_') => {
                    if pending_hyphen && !out.is_empty() {
                        out.push('-');
                    }
                    pending_hyphen = false;
                    out.push(c);
                }
                c if c == '-' || c.is_ascii_whitespace() => pending_hyphen = true,
                _ => {}
            }
        }
    }

    out
}

/// Accent-stripped lowercase form of a string.
///
/// Unlike [`slugify`], separators and punctuation are preserved; only case
/// and diacritics are folded: `fold("Cardiólogo") == "cardiologo"`,
/// `fold("médico general") == "medico general"`. Used for the fallback
/// specialty match when an input slugifies differently than the canonical
/// form but is the same word once accents are stripped.
#[must_use]
pub fn fold(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        for ascii in deunicode_char(ch).unwrap_or("").chars() {
            out.push(ascii.to_ascii_lowercase());
        }
    }
    out
}

/// Derive a display name from a slug: split on hyphens and capitalize each
/// token's first letter (`"nuevo-leon"` → `"Nuevo Leon"`).
///
/// Presentation helper for generated titles; resolution never depends on it.
#[must_use]
pub fn display_name_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|token| !token.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
