//! Selection actions and the transition function

use super::{COMPARE_LIMIT, Scope, SelectionState, ViewMode};

/// A named transition of the selection state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the text query
    SetSearch(String),
    /// Select a category, `None` for all styles
    SetCategory(Option<String>),
    /// Switch to the favorites lens
    ShowFavorites,
    /// Add the tag if absent, remove it if present
    ToggleTag(String),
    /// Replace the whole tag selection
    SetTags(Vec<String>),
    SetViewMode(ViewMode),
    /// Append to the compare list unless full or already present
    AddToCompare(String),
    RemoveFromCompare(String),
    ClearCompare,
    ToggleFavorite(String),
    /// Reset query, category and tags
    ClearFilters,
    /// Switch dataset and reset everything dataset-specific except favorites
    SetDataSource(String),
}

impl Action {
    /// Returns whether this action can change the persisted preferences.
    #[must_use]
    pub const fn touches_preferences(&self) -> bool {
        matches!(self, Self::SetViewMode(_) | Self::SetDataSource(_))
    }

    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::SetSearch(_) => "Set search query",
            Self::SetCategory(_) => "Select category",
            Self::ShowFavorites => "Show favorites",
            Self::ToggleTag(_) => "Toggle tag",
            Self::SetTags(_) => "Set tags",
            Self::SetViewMode(_) => "Set view mode",
            Self::AddToCompare(_) => "Add to compare",
            Self::RemoveFromCompare(_) => "Remove from compare",
            Self::ClearCompare => "Clear compare list",
            Self::ToggleFavorite(_) => "Toggle favorite",
            Self::ClearFilters => "Clear filters",
            Self::SetDataSource(_) => "Switch dataset",
        }
    }
}

/// Apply one action to a state, producing the next state
///
/// Every action is total: requests that cannot be honoured (a full compare
/// list, a duplicate id) leave the state unchanged instead of failing.
#[must_use]
pub fn reduce(mut state: SelectionState, action: Action) -> SelectionState {
    match action {
        Action::SetSearch(query) => state.search_query = query,
        Action::SetCategory(category) => {
            state.scope = category
                .filter(|id| !id.is_empty())
                .map_or(Scope::All, Scope::Category);
        }
        Action::ShowFavorites => state.scope = Scope::Favorites,
        Action::ToggleTag(tag) => {
            if let Some(pos) = state.selected_tags.iter().position(|t| *t == tag) {
                state.selected_tags.remove(pos);
            } else {
                state.selected_tags.push(tag);
            }
        }
        Action::SetTags(tags) => {
            let mut unique: Vec<String> = Vec::with_capacity(tags.len());
            for tag in tags {
                if !unique.contains(&tag) {
                    unique.push(tag);
                }
            }
            state.selected_tags = unique;
        }
        Action::SetViewMode(mode) => state.view_mode = mode,
        Action::AddToCompare(id) => {
            if state.compare_list.len() < COMPARE_LIMIT && !state.compare_list.contains(&id) {
                state.compare_list.push(id);
            }
        }
        Action::RemoveFromCompare(id) => state.compare_list.retain(|c| *c != id),
        Action::ClearCompare => state.compare_list.clear(),
        Action::ToggleFavorite(id) => {
            if !state.favorites.remove(&id) {
                state.favorites.insert(id);
            }
        }
        Action::ClearFilters => clear_filters(&mut state),
        Action::SetDataSource(id) => {
            state.active_data_source_id = id;
            clear_filters(&mut state);
            state.compare_list.clear();
        }
    }
    state
}

fn clear_filters(state: &mut SelectionState) {
    state.search_query.clear();
    state.scope = Scope::All;
    state.selected_tags.clear();
}

impl SelectionState {
    /// Apply an action in place
    pub fn apply(&mut self, action: Action) {
        *self = reduce(std::mem::take(self), action);
    }
}
