//! Browsing session
//!
//! A [`Session`] owns everything that changes while a user browses: the
//! [`SelectionState`], the loaded style collection and the indices derived
//! from it. It is the single writer for all of them.
//!
//! # Workflow
//!
//! ```text
//! Session::open (preferences merged into defaults)
//!     ↓
//! begin_load ──→ loader (inline or worker thread)
//!     ↓                      ↓
//! dispatch(Action)      LoadMessage { ticket, result }
//!     │                      ↓
//!     │              complete_load: stale ticket? → discard
//!     │                      ↓
//!     │              collection + index replaced, revision bumped
//!     ↓
//! visible_styles (memoized on revision + criteria)
//! ```

use crate::dataset::{
    self, DataSource, DatasetLoader, LoadError, LoadMessage, LoadStatus, LoadTicket,
    load_dataset, spawn_load,
};
use crate::db::{PreferenceStore, load_or};
use crate::filters::{FilterCache, FilterKey};
use crate::state::{Action, Preferences, SelectionState};
use crate::styles::{Category, Style, all_tags, group_by_category};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Indices derived once per loaded collection
#[derive(Debug, Clone, Default)]
pub struct StyleIndex {
    pub categories: Vec<Category>,
    pub tags: Vec<String>,
}

impl StyleIndex {
    #[must_use]
    pub fn build(styles: &[Style]) -> Self {
        Self {
            categories: group_by_category(styles),
            tags: all_tags(styles),
        }
    }

    /// Category with the given id
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// What happened to a completed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection now holds `count` styles
    Applied { count: usize },
    /// The load failed; the collection is now empty
    Failed(String),
    /// A newer request superseded this one; nothing changed
    Stale,
}

/// State, collection and derived data of one browsing session
pub struct Session {
    state: SelectionState,
    styles: Arc<Vec<Style>>,
    index: StyleIndex,
    /// Bumped whenever `styles` is replaced
    revision: u64,
    /// Latest ticket generation issued
    generation: u64,
    status: LoadStatus,
    cache: FilterCache,
    store: Box<dyn PreferenceStore>,
    loader: Arc<dyn DatasetLoader>,
    sender: Sender<LoadMessage>,
    receiver: Receiver<LoadMessage>,
}

impl Session {
    /// Create a session with persisted preferences merged into the defaults
    ///
    /// No dataset is loaded yet; call [`Session::load_blocking`] or
    /// [`Session::load_in_background`].
    #[must_use]
    pub fn open(store: Box<dyn PreferenceStore>, loader: Arc<dyn DatasetLoader>) -> Self {
        Self::open_with_defaults(store, loader, Preferences::default())
    }

    /// Create a session, using `defaults` when nothing usable is persisted
    #[must_use]
    pub fn open_with_defaults(
        store: Box<dyn PreferenceStore>,
        loader: Arc<dyn DatasetLoader>,
        defaults: Preferences,
    ) -> Self {
        let preferences = load_or(store.as_ref(), defaults);
        let (sender, receiver) = mpsc::channel();
        Self {
            state: SelectionState::from_preferences(preferences),
            styles: Arc::new(Vec::new()),
            index: StyleIndex::default(),
            revision: 0,
            generation: 0,
            status: LoadStatus::Idle,
            cache: FilterCache::new(),
            store,
            loader,
            sender,
            receiver,
        }
    }

    // ---- Accessors ----

    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The loaded collection
    #[must_use]
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    #[must_use]
    pub const fn index(&self) -> &StyleIndex {
        &self.index
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.index.categories
    }

    /// Every tag in the loaded collection, sorted
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.index.tags
    }

    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Catalog entry of the active dataset, if the id is known
    #[must_use]
    pub fn active_source(&self) -> Option<&'static DataSource> {
        dataset::find(&self.state.active_data_source_id)
    }

    // ---- Actions ----

    /// Apply an action
    ///
    /// Preference changes are written through to the store; a failed write
    /// is logged and the session continues in memory. Switching to a
    /// different dataset starts a background load whose ticket is returned.
    pub fn dispatch(&mut self, action: Action) -> Option<LoadTicket> {
        tracing::debug!(action = action.description(), "dispatch");
        if !action.touches_preferences() {
            self.state.apply(action);
            return None;
        }

        let before = self.state.preferences();
        self.state.apply(action);
        let after = self.state.preferences();

        if before == after {
            return None;
        }

        if let Err(e) = self.store.save(&after) {
            tracing::warn!(error = %e, "failed to persist preferences");
        }

        (before.active_data_source_id != after.active_data_source_id)
            .then(|| self.load_in_background())
    }

    /// Switch dataset for this session without writing preferences
    ///
    /// Selection is reset as for [`Action::SetDataSource`]. No load is
    /// started.
    pub fn use_dataset_transiently(&mut self, dataset_id: &str) {
        tracing::debug!(dataset = dataset_id, "transient dataset override");
        self.state.apply(Action::SetDataSource(dataset_id.to_string()));
    }

    /// Apply several actions in order
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    // ---- Loading ----

    /// Issue a ticket for loading the active dataset
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        LoadTicket {
            generation: self.generation,
            dataset_id: self.state.active_data_source_id.clone(),
        }
    }

    /// Apply a load result if its ticket is still current
    ///
    /// Failure empties the collection and surfaces [`LoadStatus::Failed`].
    pub fn complete_load(&mut self, message: LoadMessage) -> LoadOutcome {
        let LoadMessage { ticket, result } = message;
        if ticket.generation != self.generation
            || ticket.dataset_id != self.state.active_data_source_id
        {
            tracing::debug!(
                dataset = %ticket.dataset_id,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale load"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(loaded) => {
                let count = loaded.styles.len();
                tracing::info!(dataset = %ticket.dataset_id, styles = count, "dataset loaded");
                self.replace_styles(loaded.styles);
                self.status = LoadStatus::Ready { count };
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                tracing::warn!(dataset = %ticket.dataset_id, error = %e, "dataset failed to load");
                self.replace_styles(Vec::new());
                let message = e.to_string();
                self.status = LoadStatus::Failed(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Load the active dataset on the calling thread
    pub fn load_blocking(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = load_dataset(self.loader.as_ref(), &ticket.dataset_id);
        self.complete_load(LoadMessage { ticket, result })
    }

    /// Load the active dataset on a worker thread
    ///
    /// The result is picked up by [`Session::poll_loads`] or
    /// [`Session::wait_for_load`].
    pub fn load_in_background(&mut self) -> LoadTicket {
        let ticket = self.begin_load();
        spawn_load(Arc::clone(&self.loader), ticket.clone(), self.sender.clone());
        ticket
    }

    /// Apply every load result that has already arrived
    pub fn poll_loads(&mut self) -> Vec<LoadOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            outcomes.push(self.complete_load(message));
        }
        outcomes
    }

    /// Block until the current load resolves or `timeout` elapses
    ///
    /// Stale results arriving in the meantime are discarded. Returns `None`
    /// on timeout or when no load is in flight.
    pub fn wait_for_load(&mut self, timeout: Duration) -> Option<LoadOutcome> {
        let deadline = std::time::Instant::now() + timeout;
        while self.status.is_loading() {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(message) => match self.complete_load(message) {
                    LoadOutcome::Stale => {}
                    outcome => return Some(outcome),
                },
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn replace_styles(&mut self, styles: Vec<Style>) {
        self.index = StyleIndex::build(&styles);
        self.styles = Arc::new(styles);
        self.revision += 1;
        self.cache.clear();
    }

    // ---- Derived views ----

    /// Cache key for the current selection
    #[must_use]
    pub fn filter_key(&self) -> FilterKey {
        let criteria = self.state.criteria();
        if self.state.showing_favorites() {
            FilterKey::favorites(self.revision, criteria, &self.state.favorites)
        } else {
            FilterKey::regular(self.revision, criteria)
        }
    }

    /// Styles matching the current selection, in collection order
    #[must_use]
    pub fn visible_styles(&self) -> Vec<&Style> {
        self.cache.visible(&self.filter_key(), &self.styles)
    }

    /// Look up a style by id
    #[must_use]
    pub fn find_style(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    /// Styles in the compare list, in compare order
    ///
    /// Ids missing from the loaded collection are skipped.
    #[must_use]
    pub fn compare_styles(&self) -> Vec<&Style> {
        self.state
            .compare_list
            .iter()
            .filter_map(|id| self.find_style(id))
            .collect()
    }

    /// One-line summary such as `Showing 3 of 118 styles in IPA`
    #[must_use]
    pub fn result_summary(&self) -> String {
        let visible = self.visible_styles().len();
        let total = self.styles.len();
        let mut summary = format!("Showing {visible} of {total} styles");
        if self.state.showing_favorites() {
            summary.push_str(" (Favorites)");
        } else if let Some(category) = self
            .state
            .selected_category()
            .and_then(|id| self.index.category(id))
        {
            summary.push_str(" in ");
            summary.push_str(&category.name);
        }
        summary
    }

    /// Error from the last load, if it failed
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Thread-safe handle to a session
///
/// Every mutation takes the lock exclusively, so actions are applied one at a
/// time and never observe each other's intermediate state.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Other` if a previous holder panicked.
    pub fn lock(&self) -> Result<MutexGuard<'_, Session>, LoadError> {
        self.inner
            .lock()
            .map_err(|_| LoadError::Other("session lock poisoned".to_string()))
    }

    /// Apply an action under the lock
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Other` if the lock is poisoned.
    pub fn dispatch(&self, action: Action) -> Result<Option<LoadTicket>, LoadError> {
        Ok(self.lock()?.dispatch(action))
    }

    /// Read a value derived from the session under the lock
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Other` if the lock is poisoned.
    pub fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> Result<T, LoadError> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }
}
