//! Memoized filter results
//!
//! Filtering is recomputed only when the inputs that affect the result set
//! change: the loaded collection (tracked by a revision number), the
//! criteria, or the favorites restriction. Results are stored as positions
//! into the collection so the cache never holds style data.

use super::FilterCriteria;
use crate::styles::Style;
use moka::sync::Cache;
use std::collections::HashSet;
use std::sync::Arc;

/// Everything that determines a filter result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterKey {
    /// Revision of the loaded style collection
    pub revision: u64,
    /// Query, category and tags
    pub criteria: FilterCriteria,
    /// Sorted favorite ids when the favorites lens is active
    pub favorites: Option<Vec<String>>,
}

impl FilterKey {
    /// Key for the regular (category) lens
    #[must_use]
    pub const fn regular(revision: u64, criteria: FilterCriteria) -> Self {
        Self {
            revision,
            criteria,
            favorites: None,
        }
    }

    /// Key for the favorites lens; the category in `criteria` is dropped
    #[must_use]
    pub fn favorites<'a>(
        revision: u64,
        mut criteria: FilterCriteria,
        favorites: impl IntoIterator<Item = &'a String>,
    ) -> Self {
        criteria.category_id = None;
        let mut ids: Vec<String> = favorites.into_iter().cloned().collect();
        ids.sort();
        Self {
            revision,
            criteria,
            favorites: Some(ids),
        }
    }
}

/// Filter result cache
pub struct FilterCache {
    cache: Cache<FilterKey, Arc<Vec<usize>>>,
}

impl FilterCache {
    /// Create a cache holding the 64 most recent results
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a cache with a custom capacity
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_capacity).build(),
        }
    }

    /// Positions of matching styles, computing them on a miss
    ///
    /// `styles` must be the collection identified by `key.revision`.
    pub fn positions(&self, key: &FilterKey, styles: &[Style]) -> Arc<Vec<usize>> {
        if let Some(hit) = self.cache.get(key) {
            return hit;
        }

        let positions = Arc::new(compute_positions(key, styles));
        tracing::trace!(
            revision = key.revision,
            matches = positions.len(),
            "filter cache miss"
        );
        self.cache.insert(key.clone(), Arc::clone(&positions));
        positions
    }

    /// Resolve matching styles
    pub fn visible<'a>(&self, key: &FilterKey, styles: &'a [Style]) -> Vec<&'a Style> {
        self.positions(key, styles)
            .iter()
            .filter_map(|&i| styles.get(i))
            .collect()
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of cached results (approximate until pending tasks run)
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_positions(key: &FilterKey, styles: &[Style]) -> Vec<usize> {
    let favorites: Option<HashSet<&str>> = key
        .favorites
        .as_ref()
        .map(|ids| ids.iter().map(String::as_str).collect());

    styles
        .iter()
        .enumerate()
        .filter(|(_, style)| {
            favorites
                .as_ref()
                .is_none_or(|ids| ids.contains(style.style_id.as_str()))
        })
        .filter(|(_, style)| key.criteria.matches(style))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_styles;

    #[test]
    fn test_positions_match_direct_filter() {
        let styles = sample_styles();
        let cache = FilterCache::new();
        let key = FilterKey::regular(1, FilterCriteria::new().category(Some("21".into())));

        let visible = cache.visible(&key, &styles);
        let direct = key.criteria.apply(&styles);
        assert_eq!(visible, direct);
    }

    #[test]
    fn test_hit_returns_same_allocation() {
        let styles = sample_styles();
        let cache = FilterCache::new();
        let key = FilterKey::regular(1, FilterCriteria::new().query("lager"));

        let first = cache.positions(&key, &styles);
        let second = cache.positions(&key, &styles);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_revision_changes_key() {
        let styles = sample_styles();
        let cache = FilterCache::new();
        let criteria = FilterCriteria::new().query("lager");

        let first = cache.positions(&FilterKey::regular(1, criteria.clone()), &styles);
        let second = cache.positions(&FilterKey::regular(2, criteria), &styles);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_favorites_key_ignores_category_and_order() {
        let a = ["21A".to_string(), "1A".to_string()];
        let b = ["1A".to_string(), "21A".to_string()];
        let with_category = FilterCriteria::new().category(Some("5".into()));

        assert_eq!(
            FilterKey::favorites(3, with_category, &a),
            FilterKey::favorites(3, FilterCriteria::new(), &b)
        );
    }

    #[test]
    fn test_favorites_lens() {
        let styles = sample_styles();
        let cache = FilterCache::new();
        let favorites = ["21A".to_string()];
        let key = FilterKey::favorites(1, FilterCriteria::new(), &favorites);

        let visible = cache.visible(&key, &styles);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].style_id, "21A");
    }

    #[test]
    fn test_clear() {
        let styles = sample_styles();
        let cache = FilterCache::new();
        cache.positions(&FilterKey::regular(1, FilterCriteria::new()), &styles);
        cache.clear();
        assert_eq!(cache.entry_count(), 0);
    }
}
