//! Tag normalization for note headers.

use serde::{Deserialize, Serialize};

/// Casing applied to entry tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCase {
    /// Keep the tag as exported.
    #[default]
    Preserve,
    Lowercase,
    /// `road trip` becomes `road-trip`.
    Kebab,
    /// `road trip` becomes `road_trip`.
    Snake,
}

/// Normalize tags: trim, case, drop empties and duplicates (first seen wins).
pub fn apply_tag_case(tags: &[String], case: TagCase) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let cased = case_tag(tag.trim(), case);
        if cased.is_empty() || out.contains(&cased) {
            continue;
        }
        out.push(cased);
    }
    out
}

fn case_tag(tag: &str, case: TagCase) -> String {
    match case {
        TagCase::Preserve => tag.to_string(),
        TagCase::Lowercase => tag.to_lowercase(),
        TagCase::Kebab => join_words(tag, '-'),
        TagCase::Snake => join_words(tag, '_'),
    }
}

fn join_words(tag: &str, separator: char) -> String {
    tag.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}
