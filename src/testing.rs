//! Testing utilities for stylebook
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management and a
//! small fixture collection of styles.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::Database;
use crate::styles::{RangeValue, Style};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

/// Wrapper for a temporary test database that cleans up on drop
///
/// The database lives inside a [`TempDir`], so tests never leave artifacts
/// behind.
pub struct TestDb {
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create an empty database in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the directory holding the database
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for test styles; unset fields stay empty
#[derive(Debug, Clone)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    #[must_use]
    pub fn new(style_id: &str) -> Self {
        Self {
            style: Style {
                style_id: style_id.to_string(),
                ..Style::default()
            },
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.style.name = name.to_string();
        self
    }

    #[must_use]
    pub fn category(mut self, id: &str, name: &str) -> Self {
        self.style.category_id = id.to_string();
        self.style.category_name = name.to_string();
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: &str) -> Self {
        self.style.tags = tags.to_string();
        self
    }

    #[must_use]
    pub fn aroma(mut self, aroma: &str) -> Self {
        self.style.aroma = aroma.to_string();
        self
    }

    #[must_use]
    pub fn flavor(mut self, flavor: &str) -> Self {
        self.style.flavor = flavor.to_string();
        self
    }

    #[must_use]
    pub fn examples(mut self, examples: &str) -> Self {
        self.style.examples = examples.to_string();
        self
    }

    #[must_use]
    pub fn entry_instructions(mut self, text: &str) -> Self {
        self.style.entry_instructions = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn abv(mut self, min: f64, max: f64) -> Self {
        self.style.abv = Some(RangeValue::new(min, max, "%"));
        self
    }

    #[must_use]
    pub fn ibu(mut self, min: f64, max: f64) -> Self {
        self.style.ibu = Some(RangeValue::new(min, max, "IBUs"));
        self
    }

    #[must_use]
    pub fn color(mut self, min: f64, max: f64) -> Self {
        self.style.color = Some(RangeValue::new(min, max, "SRM"));
        self
    }

    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

/// A small collection spanning five categories, in guideline order
#[must_use]
pub fn sample_styles() -> Vec<Style> {
    vec![
        StyleBuilder::new("1A")
            .name("American Light Lager")
            .category("1", "Standard American Beer")
            .tags("session-strength, pale-color, bottom-fermented, lagered, north-america")
            .flavor("Relatively neutral palate with a crisp, dry finish.")
            .abv(2.8, 4.2)
            .ibu(8.0, 12.0)
            .color(2.0, 3.0)
            .build(),
        StyleBuilder::new("1B")
            .name("American Lager")
            .category("1", "Standard American Beer")
            .tags("standard-strength, pale-color, bottom-fermented, lagered, north-america")
            .flavor("Low grainy malt flavor.")
            .abv(4.2, 5.3)
            .ibu(8.0, 18.0)
            .color(2.0, 3.5)
            .build(),
        StyleBuilder::new("2A")
            .name("International Pale Lager")
            .category("2", "International Lager")
            .tags("standard-strength, pale-color, bottom-fermented, lagered")
            .abv(4.6, 6.0)
            .color(2.0, 6.0)
            .build(),
        StyleBuilder::new("10A")
            .name("Weissbier")
            .category("10", "German Wheat Beer")
            .tags("standard-strength, pale-color, top-fermented, central-europe, wheat-beer-family")
            .aroma("Moderate to strong banana and clove.")
            .abv(4.3, 5.6)
            .color(2.0, 6.0)
            .build(),
        StyleBuilder::new("20C")
            .name("Imperial Stout")
            .category("20", "American Porter and Stout")
            .tags("very-high-strength, dark-color, top-fermented, british-isles, stout-family")
            .flavor("Rich, deep, complex roasted malt flavors.")
            .abv(8.0, 12.0)
            .ibu(50.0, 90.0)
            .color(30.0, 40.0)
            .build(),
        StyleBuilder::new("21A")
            .name("American IPA")
            .category("21", "IPA")
            .tags("high-strength, pale-color, top-fermented, north-america, bitter, hoppy")
            .flavor("Hop flavor is medium to very high over a clean malt backbone.")
            .examples("Bell's Two Hearted Ale, Russian River Blind Pig IPA")
            .abv(5.5, 7.5)
            .ibu(40.0, 70.0)
            .color(6.0, 14.0)
            .build(),
        StyleBuilder::new("21B")
            .name("Specialty IPA")
            .category("21", "IPA")
            .tags("high-strength, top-fermented, specialty-family, bitter, hoppy")
            .entry_instructions("Entrant must specify a strength and the type of Specialty IPA.")
            .build(),
    ]
}

/// Source record for a style, using the guideline file's field names
#[must_use]
pub fn source_record(style: &Style) -> Value {
    let range = |r: &Option<RangeValue>| r.as_ref().map_or(Value::Null, |r| json!(r));
    json!({
        "style_id": style.style_id,
        "name": style.name,
        "category": style.category_name,
        "category_id": style.category_id,
        "aroma": style.aroma,
        "flavor": style.flavor,
        "examples": style.examples,
        "entry_instructions": style.entry_instructions,
        "tags": style.tags,
        "alcohol_by_volume": range(&style.abv),
        "international_bitterness_units": range(&style.ibu),
        "color": range(&style.color),
    })
}

/// [`sample_styles`] as a `beerjson` document
#[must_use]
pub fn sample_document() -> Value {
    let styles: Vec<Value> = sample_styles().iter().map(source_record).collect();
    json!({"beerjson": {"version": 1.0, "styles": styles}})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::normalize_document;

    #[test]
    fn test_sample_document_normalizes_to_samples() {
        let (styles, report) = normalize_document(&sample_document()).unwrap();
        assert_eq!(styles, sample_styles());
        assert_eq!(report.skipped(), 0);
    }
}
