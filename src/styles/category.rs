//! Category indexing
//!
//! Categories are not stored in the guideline files; they are derived by
//! grouping styles on `category_id`. The first style seen for an id supplies
//! the category name and description.

use super::Style;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A group of styles sharing a `category_id`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub styles: Vec<Style>,
}

impl Category {
    fn seed(style: &Style) -> Self {
        Self {
            id: style.category_id.clone(),
            name: style.category_name.clone(),
            description: style.category_description.clone(),
            styles: Vec::new(),
        }
    }
}

/// Numeric sort key for a category id
///
/// Reads an optional sign and the leading ASCII digits after surrounding
/// whitespace, so `"10"` is 10, `"26A"` is 26 and `"-1"` is -1. Ids without
/// leading digits yield `None`.
#[must_use]
pub fn numeric_key(id: &str) -> Option<i64> {
    let id = id.trim();
    let (negative, rest) = match id.as_bytes().first() {
        Some(b'-') => (true, &id[1..]),
        Some(b'+') => (false, &id[1..]),
        _ => (false, id),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Numeric ids ascending, then every non-numeric id
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Group styles into categories ordered by numeric id
///
/// Styles keep their encounter order inside each category. The sort is
/// stable, so categories with equal keys stay in first-seen order.
#[must_use]
pub fn group_by_category(styles: &[Style]) -> Vec<Category> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut categories: Vec<Category> = Vec::new();

    for style in styles {
        let index = *positions.entry(style.category_id.as_str()).or_insert_with(|| {
            categories.push(Category::seed(style));
            categories.len() - 1
        });
        categories[index].styles.push(style.clone());
    }

    categories.sort_by(|a, b| compare_ids(&a.id, &b.id));
    categories
}
