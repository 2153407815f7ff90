//! Record normalization
//!
//! Guideline files are loosely typed: fields go missing, ids are sometimes
//! numbers, and ranges occasionally carry strings. This module shapes such a
//! document into a clean `Vec<Style>`.
//!
//! # Accepted shapes
//!
//! - `{"beerjson": {"styles": [...]}}`
//! - `{"styles": [...]}`
//! - `[...]`
//!
//! # Rules
//!
//! - Records that are not objects, or lack a non-empty `style_id`, are skipped
//! - A repeated `style_id` keeps the first record and skips the rest
//! - Missing or non-string text fields become empty strings
//! - A range exists only when both bounds carry a numeric `value`

use super::{Measurement, RangeValue, Style};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised when a document has no recognizable record list
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Document does not contain a style list (expected an array, `styles` or `beerjson.styles`)")]
    UnrecognizedShape,
}

/// Counts of records dropped during normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Records accepted into the collection
    pub accepted: usize,
    /// Records that were not objects or had no `style_id`
    pub malformed: usize,
    /// Records whose `style_id` was already taken
    pub duplicates: usize,
}

impl NormalizeReport {
    /// Number of records skipped for any reason
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.malformed + self.duplicates
    }
}

/// Locate the record array inside a document
fn records(document: &Value) -> Option<&Vec<Value>> {
    match document {
        Value::Array(items) => Some(items),
        Value::Object(root) => root
            .get("beerjson")
            .and_then(|inner| inner.get("styles"))
            .or_else(|| root.get("styles"))
            .and_then(Value::as_array),
        _ => None,
    }
}

/// Normalize a whole document into styles
///
/// # Errors
///
/// Returns `NormalizeError::UnrecognizedShape` if no record array can be found.
/// Individual bad records never fail the document; they are counted in the
/// returned [`NormalizeReport`].
pub fn normalize_document(document: &Value) -> Result<(Vec<Style>, NormalizeReport), NormalizeError> {
    let items = records(document).ok_or(NormalizeError::UnrecognizedShape)?;

    let mut report = NormalizeReport::default();
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut styles = Vec::with_capacity(items.len());

    for item in items {
        let Some(style) = item.as_object().and_then(normalize_record) else {
            report.malformed += 1;
            continue;
        };
        if !seen.insert(style.style_id.clone()) {
            report.duplicates += 1;
            tracing::debug!(style_id = %style.style_id, "skipping duplicate style id");
            continue;
        }
        styles.push(style);
    }

    report.accepted = styles.len();
    Ok((styles, report))
}

/// Normalize one record; `None` if it has no usable `style_id`
#[must_use]
pub fn normalize_record(record: &Map<String, Value>) -> Option<Style> {
    let style_id = text(record, "style_id");
    if style_id.trim().is_empty() {
        return None;
    }

    Some(Style {
        style_id,
        name: text(record, "name"),
        category_id: text(record, "category_id"),
        category_name: text(record, "category"),
        category_description: text(record, "category_description"),
        overall_impression: text(record, "overall_impression"),
        aroma: text(record, "aroma"),
        appearance: text(record, "appearance"),
        flavor: text(record, "flavor"),
        mouthfeel: text(record, "mouthfeel"),
        comments: text(record, "comments"),
        history: text(record, "history"),
        style_comparison: text(record, "style_comparison"),
        ingredients: text(record, "ingredients"),
        examples: text(record, "examples"),
        entry_instructions: optional_text(record, "entry_instructions"),
        notes: optional_text(record, "notes"),
        currently_defined_types: optional_text(record, "currently_defined_types"),
        strength_classifications: optional_text(record, "strength_classifications"),
        style_guide: optional_text(record, "style_guide"),
        kind: optional_text(record, "type"),
        tags: text(record, "tags"),
        original_gravity: range(record, "original_gravity"),
        final_gravity: range(record, "final_gravity"),
        abv: range(record, "alcohol_by_volume"),
        ibu: range(record, "international_bitterness_units"),
        color: range(record, "color"),
    })
}

/// String-ish field; numbers are stringified, anything else is empty
fn text(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn optional_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    Some(text(record, key)).filter(|s| !s.trim().is_empty())
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|v: &f64| v.is_finite())
}

fn measurement(bound: &Value) -> Option<Measurement> {
    let value = number(bound.get("value")?)?;
    let unit = bound
        .get("unit")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Some(Measurement::new(value, unit))
}

fn range(record: &Map<String, Value>, key: &str) -> Option<RangeValue> {
    let raw = record.get(key)?;
    Some(RangeValue {
        minimum: measurement(raw.get("minimum")?)?,
        maximum: measurement(raw.get("maximum")?)?,
    })
}
