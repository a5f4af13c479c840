//! Saga label normalization.
//!
//! Two derived forms of a free-text saga label:
//!
//! - the canonical key (`"HALF LIFE"`), used to decide whether two labels
//!   name the same saga and shown as the group heading;
//! - the slug (`"half-life"`), used as a URL path segment.
//!
//! Both strip accents, treat separator punctuation as word breaks and drop
//! everything that is not an ASCII letter or digit, so the slug of a label
//! is always the lower-cased, hyphen-joined form of its canonical key.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Display name of the bucket holding games without a saga.
pub const UNGROUPED_NAME: &str = "JEUX";
/// Slug of the bucket holding games without a saga.
pub const UNGROUPED_SLUG: &str = "jeux";
/// Slug of a real saga whose key is [`UNGROUPED_NAME`]. [`slugify`] never
/// emits a double hyphen, so no other label can produce it.
pub const SAGA_JEUX_SLUG: &str = "jeux--saga";

/// Display name of the to-do list.
pub const BACKLOG_NAME: &str = "À FAIRE";
/// Slug of the to-do list.
pub const BACKLOG_SLUG: &str = "a-faire";

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | '/' | '\\' | ':' | '|')
}

/// Split a label into its accent-free ASCII words.
fn words(raw: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(raw.len());

    for c in raw.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            cleaned.push(c);
        } else if is_separator(c) || c.is_whitespace() {
            cleaned.push(' ');
        }
        // Anything else ("'", "!", "&", non-Latin letters) is dropped.
    }

    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Canonical comparison key for a saga label.
///
/// Absent, empty and whitespace-only labels yield `""`, which callers treat
/// as "ungrouped".
///
/// ```
/// use sagashelf_core::saga::normalize;
///
/// assert_eq!(normalize("Half-Life"), "HALF LIFE");
/// assert_eq!(normalize("hâlf_life"), "HALF LIFE");
/// assert_eq!(normalize("Crash: Bandicoot"), "CRASH BANDICOOT");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize<'a>(label: impl Into<Option<&'a str>>) -> String {
    let Some(label) = label.into() else {
        return String::new();
    };

    words(label).join(" ").to_ascii_uppercase()
}

/// URL-safe slug for a label: lower-case words joined by hyphens.
///
/// ```
/// use sagashelf_core::saga::slugify;
///
/// assert_eq!(slugify("HALF LIFE"), "half-life");
/// assert_eq!(slugify("Pokémon: Rouge/Bleu"), "pokemon-rouge-bleu");
/// ```
pub fn slugify<'a>(label: impl Into<Option<&'a str>>) -> String {
    let Some(label) = label.into() else {
        return String::new();
    };

    words(label).join("-").to_ascii_lowercase()
}

/// Human-readable label recovered from a slug (`"half-life"` -> `"half life"`).
///
/// Only the word boundaries survive a round trip; feed the result through
/// [`normalize`] to get the canonical key back.
pub fn from_slug(slug: &str) -> String {
    slug.replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
