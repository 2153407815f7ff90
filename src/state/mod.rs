//! Selection state
//!
//! [`SelectionState`] is the single mutable entity of a browsing session. It
//! only changes through [`actions::reduce`], which maps one state and one
//! [`Action`] to the next state.
//!
//! Only [`Preferences`] (view mode and active dataset) outlive a session; the
//! query, filters, favorites and compare list are session-local.

pub mod actions;

pub use actions::{Action, reduce};

use crate::dataset::DEFAULT_DATASET_ID;
use crate::filters::FilterCriteria;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Maximum number of styles in the compare list
pub const COMPARE_LIMIT: usize = 4;

/// How the visible styles are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Detailed cards with stats and tags
    #[default]
    Card,
    /// One compact row per style
    List,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::List => "list",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" | "cards" => Ok(Self::Card),
            "list" => Ok(Self::List),
            other => Err(format!("Unknown view mode '{other}'. Use 'card' or 'list'")),
        }
    }
}

/// Which lens the style collection is viewed through
///
/// A category selection and the favorites view are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every style
    #[default]
    All,
    /// Styles of one category
    Category(String),
    /// Favorite styles only
    Favorites,
}

/// Persisted subset of the selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_dataset_id")]
    pub active_data_source_id: String,
}

fn default_dataset_id() -> String {
    DEFAULT_DATASET_ID.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            active_data_source_id: default_dataset_id(),
        }
    }
}

/// The complete selection state of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub search_query: String,
    pub scope: Scope,
    /// Selected tags in selection order, without duplicates
    pub selected_tags: Vec<String>,
    pub view_mode: ViewMode,
    pub favorites: BTreeSet<String>,
    /// At most [`COMPARE_LIMIT`] ids in insertion order, without duplicates
    pub compare_list: Vec<String>,
    pub active_data_source_id: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::from_preferences(Preferences::default())
    }
}

impl SelectionState {
    /// Initial state with persisted preferences merged in
    #[must_use]
    pub fn from_preferences(preferences: Preferences) -> Self {
        Self {
            search_query: String::new(),
            scope: Scope::All,
            selected_tags: Vec::new(),
            view_mode: preferences.view_mode,
            favorites: BTreeSet::new(),
            compare_list: Vec::new(),
            active_data_source_id: preferences.active_data_source_id,
        }
    }

    /// The persisted subset of this state
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        Preferences {
            view_mode: self.view_mode,
            active_data_source_id: self.active_data_source_id.clone(),
        }
    }

    /// Selected category id, `None` for all styles and for the favorites lens
    #[must_use]
    pub fn selected_category(&self) -> Option<&str> {
        match &self.scope {
            Scope::Category(id) => Some(id.as_str()),
            Scope::All | Scope::Favorites => None,
        }
    }

    #[must_use]
    pub const fn showing_favorites(&self) -> bool {
        matches!(self.scope, Scope::Favorites)
    }

    #[must_use]
    pub fn is_favorite(&self, style_id: &str) -> bool {
        self.favorites.contains(style_id)
    }

    #[must_use]
    pub fn is_compared(&self, style_id: &str) -> bool {
        self.compare_list.iter().any(|id| id == style_id)
    }

    #[must_use]
    pub fn compare_is_full(&self) -> bool {
        self.compare_list.len() >= COMPARE_LIMIT
    }

    /// Whether any of query, category or tags is set
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.search_query.trim().is_empty()
            || !matches!(self.scope, Scope::All)
            || !self.selected_tags.is_empty()
    }

    /// Filter criteria for the current selection
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.search_query.clone(),
            category_id: self.selected_category().map(ToString::to_string),
            tags: self.selected_tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SelectionState::default();
        assert_eq!(state.view_mode, ViewMode::Card);
        assert_eq!(state.active_data_source_id, DEFAULT_DATASET_ID);
        assert!(state.compare_list.is_empty());
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_from_preferences() {
        let state = SelectionState::from_preferences(Preferences {
            view_mode: ViewMode::List,
            active_data_source_id: "bjcp-2015-mead".into(),
        });

        assert_eq!(state.view_mode, ViewMode::List);
        assert_eq!(state.preferences().active_data_source_id, "bjcp-2015-mead");
    }

    #[test]
    fn test_selected_category_by_scope() {
        let mut state = SelectionState::default();
        assert_eq!(state.selected_category(), None);

        state.scope = Scope::Category("21".into());
        assert_eq!(state.selected_category(), Some("21"));
        assert_eq!(state.criteria().category_id.as_deref(), Some("21"));

        state.scope = Scope::Favorites;
        assert_eq!(state.selected_category(), None);
        assert!(state.showing_favorites());
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("card".parse::<ViewMode>(), Ok(ViewMode::Card));
        assert_eq!(" LIST ".parse::<ViewMode>(), Ok(ViewMode::List));
        assert!("grid".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_preferences_deserialize_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, Preferences::default());

        let prefs: Preferences = serde_json::from_str(r#"{"view_mode":"list"}"#).unwrap();
        assert_eq!(prefs.view_mode, ViewMode::List);
        assert_eq!(prefs.active_data_source_id, DEFAULT_DATASET_ID);
    }
}
