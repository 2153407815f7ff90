//! Faceted style filtering
//!
//! Three stages run in a fixed order over a style collection:
//!
//! 1. **Category**: exact `category_id` match, `None` passes everything
//! 2. **Tags**: every requested tag must be present (AND), empty passes everything
//! 3. **Text**: case-insensitive substring over [`Style::searchable_fields`],
//!    blank query passes everything
//!
//! Each stage is a pure filter, so the result is an order-preserving
//! subsequence of the input and running the pipeline twice changes nothing.
//!
//! # Iterator Adapters
//!
//! [`StyleFilterExt`] exposes the stages as chainable methods:
//!
//! ```
//! use stylebook::filters::StyleFilterExt;
//! # use stylebook::styles::Style;
//! # let styles: Vec<Style> = Vec::new();
//!
//! let visible = styles
//!     .iter()
//!     .in_category(Some("21"))
//!     .with_all_tags(&["bitter".to_string()])
//!     .matching_text("citrus");
//! # assert!(visible.is_empty());
//! ```

pub mod cache;

pub use cache::{FilterCache, FilterKey};

use crate::styles::Style;
use crate::styles::tags::has_tag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Query, category and tag selection applied together
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query; blank means no text filter
    #[serde(default)]
    pub query: String,

    /// Exact category id; `None` means every category
    #[serde(default)]
    pub category_id: Option<String>,

    /// Tags that must all be present
    #[serde(default)]
    pub tags: Vec<String>,
}

impl FilterCriteria {
    /// Create empty criteria (identity filter)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restrict to one category
    #[must_use]
    pub fn category(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Require a tag
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether these criteria let every style through
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.query.trim().is_empty()
            && self.category_id.as_deref().is_none_or(str::is_empty)
            && self.tags.is_empty()
    }

    /// Whether a single style passes all three stages
    #[must_use]
    pub fn matches(&self, style: &Style) -> bool {
        in_category(style, self.category_id.as_deref())
            && has_all_tags(style, &self.tags)
            && matches_text(style, text_needle(&self.query).as_deref())
    }

    /// Run the pipeline over a collection
    #[must_use]
    pub fn apply<'a>(&self, styles: &'a [Style]) -> Vec<&'a Style> {
        filter_styles(styles, &self.query, self.category_id.as_deref(), &self.tags)
    }
}

/// An empty id selects every category
fn in_category(style: &Style, category_id: Option<&str>) -> bool {
    category_id.is_none_or(|id| id.is_empty() || style.category_id == id)
}

fn has_all_tags(style: &Style, tags: &[String]) -> bool {
    tags.iter().all(|tag| has_tag(&style.tags, tag))
}

/// Lowercased query, or `None` when it is blank
///
/// Only the blank check trims; surrounding spaces are part of the needle.
fn text_needle(query: &str) -> Option<String> {
    (!query.trim().is_empty()).then(|| query.to_lowercase())
}

fn matches_text(style: &Style, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| {
        style
            .searchable_fields()
            .iter()
            .any(|field| !field.is_empty() && field.to_lowercase().contains(needle))
    })
}

/// Filter styles by category, tags and text query
///
/// # Arguments
/// * `styles` - Collection to filter
/// * `query` - Free-text query; blank disables the text stage
/// * `category_id` - Exact category id; `None` disables the category stage
/// * `tags` - Tags that must all be present; empty disables the tag stage
///
/// # Returns
/// The matching styles in input order
#[must_use]
pub fn filter_styles<'a>(
    styles: &'a [Style],
    query: &str,
    category_id: Option<&str>,
    tags: &[String],
) -> Vec<&'a Style> {
    styles
        .iter()
        .in_category(category_id)
        .with_all_tags(tags)
        .matching_text(query)
}

/// Filter the favorites lens
///
/// Restricts the collection to `favorites` and then applies the text and tag
/// stages. Category selection never applies in this lens.
#[must_use]
pub fn favorites_view<'a>(
    styles: &'a [Style],
    favorites: &BTreeSet<String>,
    query: &str,
    tags: &[String],
) -> Vec<&'a Style> {
    styles
        .iter()
        .filter(|style| favorites.contains(&style.style_id))
        .with_all_tags(tags)
        .matching_text(query)
}

/// Extension trait adding the filter stages to iterators of `&Style`
pub trait StyleFilterExt<'a>: IntoIterator<Item = &'a Style> + Sized {
    /// Keep styles in the given category; `None` keeps everything
    fn in_category(self, category_id: Option<&str>) -> Vec<&'a Style> {
        self.into_iter()
            .filter(|style| in_category(style, category_id))
            .collect()
    }

    /// Keep styles carrying every tag in `tags`
    fn with_all_tags(self, tags: &[String]) -> Vec<&'a Style> {
        self.into_iter()
            .filter(|style| has_all_tags(style, tags))
            .collect()
    }

    /// Keep styles whose searchable text contains `query`, ignoring case
    fn matching_text(self, query: &str) -> Vec<&'a Style> {
        let needle = text_needle(query);
        self.into_iter()
            .filter(|style| matches_text(style, needle.as_deref()))
            .collect()
    }
}

impl<'a, I> StyleFilterExt<'a> for I where I: IntoIterator<Item = &'a Style> {}
