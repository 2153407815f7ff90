//! Tag string parsing
//!
//! Guideline files store tags as one comma-delimited string
//! (`"standard-strength, pale-color, top-fermented"`).

use super::Style;
use std::collections::BTreeSet;

/// Delimiter between tags in the raw string
pub const TAG_DELIMITER: char = ',';

/// Split a raw tag string into discrete tags
///
/// Pieces are trimmed and empty pieces dropped. Order is preserved and
/// duplicates are kept.
///
/// # Examples
/// ```
/// use stylebook::styles::parse_tags;
///
/// assert_eq!(parse_tags(" Hoppy ,Dark,, Strong"), vec!["Hoppy", "Dark", "Strong"]);
/// assert!(parse_tags("").is_empty());
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Check whether a raw tag string contains `tag` exactly
#[must_use]
pub fn has_tag(raw: &str, tag: &str) -> bool {
    raw.split(TAG_DELIMITER).map(str::trim).any(|t| !t.is_empty() && t == tag)
}

/// Sorted, de-duplicated union of every tag in the collection
#[must_use]
pub fn all_tags(styles: &[Style]) -> Vec<String> {
    styles
        .iter()
        .flat_map(|style| parse_tags(&style.tags))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
