//! Style guideline records
//!
//! A [`Style`] is one guideline entry as the rest of the crate sees it: every
//! text section is present (possibly empty), the tag string is kept raw and
//! the five vital statistics are optional [`RangeValue`]s.
//!
//! Submodules turn a collection of styles into derived views:
//!
//! - [`normalize`]: shapes a loosely-typed JSON document into `Vec<Style>`
//! - [`tags`]: splits the raw tag string and builds the tag universe
//! - [`category`]: groups styles into numerically ordered categories
//! - [`color`]: maps the color range to a display palette entry

pub mod category;
pub mod color;
pub mod normalize;
pub mod tags;

pub use category::{Category, group_by_category};
pub use color::{average_scale, color_for_range, color_for_scale, format_range};
pub use normalize::{NormalizeError, NormalizeReport, normalize_document};
pub use tags::{all_tags, parse_tags};

use serde::{Deserialize, Serialize};

/// One bound of a [`RangeValue`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

impl Measurement {
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Closed numeric interval with a unit
///
/// `minimum <= maximum` is expected but not checked. An absent range is
/// modelled as `Option::None` on the owning [`Style`], never as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeValue {
    pub minimum: Measurement,
    pub maximum: Measurement,
}

impl RangeValue {
    /// Build a range whose bounds share one unit
    #[must_use]
    pub fn new(minimum: f64, maximum: f64, unit: &str) -> Self {
        Self {
            minimum: Measurement::new(minimum, unit),
            maximum: Measurement::new(maximum, unit),
        }
    }

    /// Midpoint of the range
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.minimum.value + self.maximum.value) / 2.0
    }
}

/// The five vital statistics every guideline entry may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    OriginalGravity,
    FinalGravity,
    Abv,
    Ibu,
    Color,
}

impl Metric {
    /// Display order used by detail and comparison views
    pub const ALL: [Self; 5] = [
        Self::Abv,
        Self::Ibu,
        Self::OriginalGravity,
        Self::FinalGravity,
        Self::Color,
    ];

    /// Short column label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OriginalGravity => "OG",
            Self::FinalGravity => "FG",
            Self::Abv => "ABV",
            Self::Ibu => "IBU",
            Self::Color => "SRM",
        }
    }
}

/// A single style guideline entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Style {
    /// Unique key within one dataset (e.g. `21A`)
    pub style_id: String,
    pub name: String,
    pub category_id: String,
    pub category_name: String,
    pub category_description: String,

    pub overall_impression: String,
    pub aroma: String,
    pub appearance: String,
    pub flavor: String,
    pub mouthfeel: String,
    pub comments: String,
    pub history: String,
    pub style_comparison: String,
    pub ingredients: String,
    pub examples: String,
    pub entry_instructions: Option<String>,
    pub notes: Option<String>,
    pub currently_defined_types: Option<String>,
    pub strength_classifications: Option<String>,
    /// Guideline the entry belongs to (e.g. `BJCP2021`)
    pub style_guide: Option<String>,
    /// Beverage kind (`beer`, `mead`, `cider`)
    pub kind: Option<String>,

    /// Raw comma-delimited tag string, parsed on demand
    pub tags: String,

    pub original_gravity: Option<RangeValue>,
    pub final_gravity: Option<RangeValue>,
    pub abv: Option<RangeValue>,
    pub ibu: Option<RangeValue>,
    pub color: Option<RangeValue>,
}

impl Style {
    /// Range for one of the vital statistics
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> Option<&RangeValue> {
        match metric {
            Metric::OriginalGravity => self.original_gravity.as_ref(),
            Metric::FinalGravity => self.final_gravity.as_ref(),
            Metric::Abv => self.abv.as_ref(),
            Metric::Ibu => self.ibu.as_ref(),
            Metric::Color => self.color.as_ref(),
        }
    }

    /// Parsed tag list, in source order
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        parse_tags(&self.tags)
    }

    /// Fields the text filter searches, in a fixed order
    ///
    /// Category description, entry instructions and notes are not searched.
    #[must_use]
    pub fn searchable_fields(&self) -> [&str; 14] {
        [
            self.name.as_str(),
            self.category_name.as_str(),
            self.style_id.as_str(),
            self.overall_impression.as_str(),
            self.aroma.as_str(),
            self.appearance.as_str(),
            self.flavor.as_str(),
            self.mouthfeel.as_str(),
            self.comments.as_str(),
            self.history.as_str(),
            self.style_comparison.as_str(),
            self.tags.as_str(),
            self.ingredients.as_str(),
            self.examples.as_str(),
        ]
    }

    /// Labelled descriptive sections for detail views, skipping empty ones
    #[must_use]
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        let mut sections = vec![
            ("Overall Impression", self.overall_impression.as_str()),
            ("Aroma", self.aroma.as_str()),
            ("Appearance", self.appearance.as_str()),
            ("Flavor", self.flavor.as_str()),
            ("Mouthfeel", self.mouthfeel.as_str()),
            ("Comments", self.comments.as_str()),
            ("History", self.history.as_str()),
            ("Characteristic Ingredients", self.ingredients.as_str()),
            ("Style Comparison", self.style_comparison.as_str()),
            ("Commercial Examples", self.examples.as_str()),
        ];
        if let Some(entry) = &self.entry_instructions {
            sections.push(("Entry Instructions", entry.as_str()));
        }
        let optional = [
            ("Currently Defined Types", &self.currently_defined_types),
            ("Strength Classifications", &self.strength_classifications),
            ("Notes", &self.notes),
        ];
        sections.extend(
            optional
                .into_iter()
                .filter_map(|(label, text)| text.as_deref().map(|t| (label, t))),
        );
        sections.retain(|(_, text)| !text.trim().is_empty());
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StyleBuilder;

    #[test]
    fn test_range_midpoint() {
        let range = RangeValue::new(4.0, 7.0, "SRM");
        assert!((range.midpoint() - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_lookup() {
        let style = StyleBuilder::new("1A")
            .abv(3.0, 4.2)
            .color(2.0, 3.0)
            .build();

        assert!(style.metric(Metric::Abv).is_some());
        assert!(style.metric(Metric::Color).is_some());
        assert!(style.metric(Metric::Ibu).is_none());
    }

    #[test]
    fn test_sections_skip_empty() {
        let style = StyleBuilder::new("1A")
            .aroma("Light grainy malt")
            .entry_instructions("Specify the fruit")
            .build();

        let labels: Vec<_> = style.sections().into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Aroma", "Entry Instructions"]);
    }

    #[test]
    fn test_searchable_fields_include_tags_and_id() {
        let style = StyleBuilder::new("21A").tags("bitter, hoppy").build();
        let fields = style.searchable_fields();
        assert!(fields.contains(&"21A"));
        assert!(fields.contains(&"bitter, hoppy"));
    }
}
