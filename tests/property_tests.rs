//! Property-based tests for filtering, the selection reducer and color mapping.

use proptest::prelude::*;
use std::collections::BTreeSet;
use stylebook::{
    filters::{favorites_view, filter_styles},
    state::{Action, COMPARE_LIMIT, SelectionState, ViewMode, reduce},
    styles::{RangeValue, Style, color_for_range, color_for_scale, group_by_category, parse_tags},
};

// ============================================================================
// Strategies
// ============================================================================

const TAG_POOL: &[&str] = &["bitter", "hoppy", "malty", "pale-color", "dark-color", "lagered", "top-fermented"];
const CATEGORY_POOL: &[&str] = &["1", "2", "10", "21", "M1", "X"];
const WORDS: &[&str] = &["American", "Lager", "IPA", "Stout", "Wheat", "Mead", "Brown", "Hoppy"];
const ID_POOL: &[&str] = &["1A", "1B", "21A", "21B", "10A", "M1A"];
const DATASET_POOL: &[&str] = &["bjcp-2021", "bjcp-2015-mead"];

fn style_strategy() -> impl Strategy<Value = Style> {
    (
        "[0-9]{1,2}[A-F]",
        prop::sample::select(CATEGORY_POOL),
        prop::sample::subsequence(WORDS, 1..3),
        prop::sample::subsequence(TAG_POOL, 0..4),
        prop::option::of((0.0f64..50.0, 0.0f64..50.0)),
    )
        .prop_map(|(id, category, words, tags, color)| Style {
            style_id: id,
            name: words.join(" "),
            category_id: category.to_string(),
            category_name: format!("Category {category}"),
            tags: tags.join(", "),
            color: color.map(|(a, b)| RangeValue::new(a.min(b), a.max(b), "SRM")),
            ..Style::default()
        })
}

fn styles_strategy() -> impl Strategy<Value = Vec<Style>> {
    prop::collection::vec(style_strategy(), 0..30)
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        prop::sample::select(WORDS).prop_map(|w| w.to_lowercase()),
        "[a-z ]{0,6}",
    ]
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(TAG_POOL, 0..3).prop_map(|t| t.into_iter().map(str::to_string).collect())
}

fn id_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(ID_POOL).prop_map(str::to_string)
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        query_strategy().prop_map(Action::SetSearch),
        prop::option::of(prop::sample::select(CATEGORY_POOL).prop_map(str::to_string)).prop_map(Action::SetCategory),
        Just(Action::ShowFavorites),
        prop::sample::select(TAG_POOL).prop_map(|t| Action::ToggleTag(t.to_string())),
        tags_strategy().prop_map(Action::SetTags),
        prop_oneof![Just(ViewMode::Card), Just(ViewMode::List)].prop_map(Action::SetViewMode),
        id_strategy().prop_map(Action::AddToCompare),
        id_strategy().prop_map(Action::RemoveFromCompare),
        Just(Action::ClearCompare),
        id_strategy().prop_map(Action::ToggleFavorite),
        Just(Action::ClearFilters),
        prop::sample::select(DATASET_POOL).prop_map(|d| Action::SetDataSource(d.to_string())),
    ]
}

fn ids(styles: &[&Style]) -> Vec<String> {
    styles.iter().map(|s| s.style_id.clone()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Empty criteria return the collection unchanged.
    #[test]
    fn empty_criteria_is_identity(styles in styles_strategy()) {
        let result = filter_styles(&styles, "", None, &[]);
        prop_assert_eq!(result.len(), styles.len());
        prop_assert!(result.iter().zip(&styles).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    /// Filtering twice with the same criteria changes nothing.
    #[test]
    fn filter_is_idempotent(
        styles in styles_strategy(),
        query in query_strategy(),
        category in prop::option::of(prop::sample::select(CATEGORY_POOL)),
        tags in tags_strategy(),
    ) {
        let once: Vec<Style> = filter_styles(&styles, &query, category, &tags)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_styles(&once, &query, category, &tags);
        prop_assert_eq!(ids(&twice), once.iter().map(|s| s.style_id.clone()).collect::<Vec<_>>());
    }

    /// Results are an order-preserving subsequence satisfying every criterion.
    #[test]
    fn filter_result_is_ordered_subsequence(
        styles in styles_strategy(),
        category in prop::option::of(prop::sample::select(CATEGORY_POOL)),
        tags in tags_strategy(),
    ) {
        let result = filter_styles(&styles, "", category, &tags);
        let mut remaining = styles.iter();
        for style in &result {
            prop_assert!(remaining.any(|s| std::ptr::eq(s, *style)));
            prop_assert!(category.is_none_or(|c| style.category_id == c));
            let parsed = style.tag_list();
            prop_assert!(tags.iter().all(|t| parsed.contains(t)));
        }
    }

    /// The favorites lens only ever shows favorites.
    #[test]
    fn favorites_view_is_subset_of_favorites(
        styles in styles_strategy(),
        favorites in prop::collection::btree_set(id_strategy(), 0..4),
        query in query_strategy(),
    ) {
        let favorites: BTreeSet<String> = favorites;
        for style in favorites_view(&styles, &favorites, &query, &[]) {
            prop_assert!(favorites.contains(&style.style_id));
        }
    }

    /// No sequence of actions grows the compare list past its limit or
    /// introduces duplicates.
    #[test]
    fn compare_list_stays_bounded(actions in prop::collection::vec(action_strategy(), 0..60)) {
        let mut state = SelectionState::default();
        for action in actions {
            state = reduce(state, action);
            prop_assert!(state.compare_list.len() <= COMPARE_LIMIT);
            let unique: BTreeSet<_> = state.compare_list.iter().collect();
            prop_assert_eq!(unique.len(), state.compare_list.len());
        }
    }

    /// Toggling the same favorite or tag twice restores the state.
    #[test]
    fn toggles_are_involutions(
        actions in prop::collection::vec(action_strategy(), 0..20),
        id in id_strategy(),
        tag in prop::sample::select(TAG_POOL),
    ) {
        let start = actions.into_iter().fold(SelectionState::default(), reduce);

        let favorite = reduce(reduce(start.clone(), Action::ToggleFavorite(id.clone())), Action::ToggleFavorite(id));
        prop_assert_eq!(&favorite, &start);

        let tagged = reduce(reduce(start.clone(), Action::ToggleTag(tag.to_string())), Action::ToggleTag(tag.to_string()));
        prop_assert_eq!(tagged.selected_tags.iter().collect::<BTreeSet<_>>(), start.selected_tags.iter().collect::<BTreeSet<_>>());
    }

    /// Parsed tags are trimmed and never empty.
    #[test]
    fn parsed_tags_are_clean(raw in "[a-z ,]{0,40}") {
        for tag in parse_tags(&raw) {
            prop_assert!(!tag.is_empty());
            prop_assert_eq!(tag.trim(), tag.as_str());
        }
    }

    /// Every style lands in exactly one category group.
    #[test]
    fn grouping_partitions_styles(styles in styles_strategy()) {
        let groups = group_by_category(&styles);
        let total: usize = groups.iter().map(|g| g.styles.len()).sum();
        prop_assert_eq!(total, styles.len());
        let unique: BTreeSet<_> = groups.iter().map(|g| g.id.as_str()).collect();
        prop_assert_eq!(unique.len(), groups.len());
    }

    /// Any scale value maps to a palette color; ranges use their midpoint.
    #[test]
    fn color_mapping_is_total(value in any::<f64>(), a in 0.0f64..60.0, b in 0.0f64..60.0) {
        let token = color_for_scale(value);
        prop_assert!(token.starts_with('#') && token.len() == 7);

        let range = RangeValue::new(a.min(b), a.max(b), "SRM");
        prop_assert_eq!(color_for_range(Some(&range)), color_for_scale((a + b) / 2.0));
    }
}
