//! The user's favorite movies, unique by id and kept in insertion order.
//!
//! Every mutating call re-serializes the whole collection into a single
//! durable slot (last write wins). Storage failures never reach the caller
//! as errors: a corrupt slot is discarded and the store starts empty, and a
//! failed write leaves the in-memory collection intact until the next
//! successful persist. Both paths are reported through typed outcomes.

use crate::storage::KeyValueStorage;
use cinescope_models::Movie;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// How the collection was rehydrated from its slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    /// Slot absent
    Empty,
    /// Slot content failed to decode and was discarded
    Recovered { reason: String },
    /// Slot could not be read; starting empty without touching it
    ReadFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub change: Change,
    pub persist: PersistOutcome,
}

impl MutationOutcome {
    /// Whether the collection differs from before the call
    pub fn changed(&self) -> bool {
        !matches!(self.change, Change::AlreadyPresent | Change::NotPresent)
    }

    pub fn persisted(&self) -> bool {
        self.persist == PersistOutcome::Persisted
    }
}

pub type SubscriptionId = u64;

type Observer = Box<dyn FnMut(&[Movie])>;

pub struct FavoritesStore<S: KeyValueStorage> {
    key: String,
    storage: S,
    favorites: Vec<Movie>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

impl<S: KeyValueStorage> FavoritesStore<S> {
    /// Create a store over `storage` and rehydrate it from slot `key`
    pub fn open(key: impl Into<String>, storage: S) -> (Self, LoadOutcome) {
        let mut store = Self {
            key: key.into(),
            storage,
            favorites: Vec::new(),
            observers: Vec::new(),
            next_subscription: 0,
        };
        let outcome = store.load();
        (store, outcome)
    }

    /// Replace the in-memory collection with the slot's content.
    ///
    /// Observers are not notified; loading is not a mutation.
    pub fn load(&mut self) -> LoadOutcome {
        self.favorites.clear();

        let content = match self.storage.read(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("No favorites stored under {}", self.key);
                return LoadOutcome::Empty;
            }
            Err(e) => {
                warn!(operation = "favorites_load", slot = %self.key, "Failed to read favorites: {}", e);
                return LoadOutcome::ReadFailed { reason: e.to_string() };
            }
        };

        match serde_json::from_str::<Vec<Movie>>(&content) {
            Ok(movies) => {
                let mut seen = HashSet::new();
                self.favorites = movies.into_iter().filter(|m| seen.insert(m.id)).collect();
                info!(operation = "favorites_load", slot = %self.key, count = self.favorites.len(), "Loaded favorites");
                LoadOutcome::Loaded { count: self.favorites.len() }
            }
            Err(e) => {
                warn!(
                    operation = "favorites_load",
                    slot = %self.key,
                    "Stored favorites are corrupt: {}. Discarding slot.",
                    e
                );
                if let Err(rm_err) = self.storage.remove(&self.key) {
                    warn!("Failed to discard corrupt favorites slot: {}", rm_err);
                }
                LoadOutcome::Recovered { reason: e.to_string() }
            }
        }
    }

    /// Append `movie` unless its id is already present
    pub fn add(&mut self, movie: Movie) -> MutationOutcome {
        let change = if self.is_favorite(movie.id) {
            Change::AlreadyPresent
        } else {
            self.favorites.push(movie);
            Change::Added
        };
        self.commit(change)
    }

    pub fn remove(&mut self, id: u64) -> MutationOutcome {
        let before = self.favorites.len();
        self.favorites.retain(|m| m.id != id);
        let change = if self.favorites.len() < before {
            Change::Removed
        } else {
            Change::NotPresent
        };
        self.commit(change)
    }

    /// Remove `movie` if it is a favorite, add it otherwise
    pub fn toggle(&mut self, movie: Movie) -> MutationOutcome {
        if self.is_favorite(movie.id) {
            self.remove(movie.id)
        } else {
            self.add(movie)
        }
    }

    pub fn clear(&mut self) -> MutationOutcome {
        self.favorites.clear();
        self.commit(Change::Cleared)
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.iter().any(|m| m.id == id)
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    pub fn get(&self, id: u64) -> Option<&Movie> {
        self.favorites.iter().find(|m| m.id == id)
    }

    pub fn favorites(&self) -> &[Movie] {
        &self.favorites
    }

    pub fn snapshot(&self) -> Vec<Movie> {
        self.favorites.clone()
    }

    pub fn slot(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Call `observer` with the new collection after every change
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&[Movie]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < before
    }

    fn commit(&mut self, change: Change) -> MutationOutcome {
        let persist = self.persist();
        let outcome = MutationOutcome { change, persist };
        if outcome.changed() {
            for (_, observer) in self.observers.iter_mut() {
                observer(&self.favorites);
            }
        }
        outcome
    }

    /// Overwrite the slot with the full collection
    fn persist(&mut self) -> PersistOutcome {
        let json = match serde_json::to_string(&self.favorites) {
            Ok(json) => json,
            Err(e) => {
                warn!(operation = "favorites_persist", slot = %self.key, "Failed to serialize favorites: {}", e);
                return PersistOutcome::Failed { reason: e.to_string() };
            }
        };

        match self.storage.write(&self.key, &json) {
            Ok(()) => {
                debug!(operation = "favorites_persist", slot = %self.key, count = self.favorites.len(), "Persisted favorites");
                PersistOutcome::Persisted
            }
            Err(e) => {
                warn!(operation = "favorites_persist", slot = %self.key, "Failed to persist favorites: {}", e);
                PersistOutcome::Failed { reason: e.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SLOT: &str = "cinescope_favorites";

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            release_date: "2001-01-01".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            ..Movie::new(id, title)
        }
    }

    fn ids(store: &FavoritesStore<MemoryStorage>) -> Vec<u64> {
        store.favorites().iter().map(|m| m.id).collect()
    }

    fn empty_store() -> FavoritesStore<MemoryStorage> {
        let (store, outcome) = FavoritesStore::open(SLOT, MemoryStorage::new());
        assert_eq!(outcome, LoadOutcome::Empty);
        store
    }

    /// Storage whose writes can be switched off
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: bool,
        fail_reads: bool,
    }

    impl KeyValueStorage for FlakyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Io {
                    key: key.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
                });
            }
            self.inner.write(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_add_marks_favorite() {
        let mut store = empty_store();
        let outcome = store.add(movie(5, "Heat"));
        assert_eq!(outcome.change, Change::Added);
        assert!(outcome.persisted());
        assert!(store.is_favorite(5));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_add_twice_keeps_single_entry() {
        let mut store = empty_store();
        store.add(movie(5, "Heat"));
        let outcome = store.add(movie(5, "Heat (re-release)"));

        assert_eq!(outcome.change, Change::AlreadyPresent);
        assert!(!outcome.changed());
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(5).unwrap().title, "Heat");
    }

    #[test]
    fn test_re_add_preserves_position() {
        let mut store = empty_store();
        store.add(movie(1, "A"));
        store.add(movie(2, "B"));
        store.add(movie(3, "C"));
        store.add(movie(1, "A"));
        assert_eq!(ids(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove() {
        let mut store = empty_store();
        store.add(movie(1, "A"));
        store.add(movie(2, "B"));

        assert_eq!(store.remove(1).change, Change::Removed);
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.remove(1).change, Change::NotPresent);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut store = empty_store();
        store.add(movie(1, "A"));
        store.add(movie(2, "B"));
        let before = store.snapshot();

        assert_eq!(store.toggle(movie(3, "C")).change, Change::Added);
        assert_eq!(store.toggle(movie(3, "C")).change, Change::Removed);
        assert_eq!(store.snapshot(), before);

        assert_eq!(store.toggle(movie(1, "A")).change, Change::Removed);
        assert_eq!(store.toggle(movie(1, "A")).change, Change::Added);
        // Re-adding after removal appends
        assert_eq!(ids(&store), vec![2, 1]);
    }

    #[test]
    fn test_clear() {
        let mut store = empty_store();
        for id in 1..=4 {
            store.add(movie(id, "M"));
        }
        let outcome = store.clear();
        assert_eq!(outcome.change, Change::Cleared);
        assert_eq!(store.count(), 0);
        assert!((1..=4).all(|id| !store.is_favorite(id)));
        assert_eq!(store.storage().get(SLOT), Some("[]"));
    }

    #[test]
    fn test_every_mutation_persists_whole_collection() {
        let mut store = empty_store();
        store.add(movie(1, "A"));
        store.add(movie(2, "B"));

        let (reopened, outcome) = FavoritesStore::open(SLOT, store.storage().clone());
        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        assert_eq!(reopened.favorites(), store.favorites());
    }

    #[test]
    fn test_corrupt_slot_recovers_empty_and_clears_slot() {
        let storage = MemoryStorage::with_slot(SLOT, "{not json");
        let (store, outcome) = FavoritesStore::open(SLOT, storage);

        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert_eq!(store.count(), 0);
        assert_eq!(store.storage().get(SLOT), None);
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let json = serde_json::to_string(&vec![movie(1, "A"), movie(2, "B"), movie(1, "A again")]).unwrap();
        let (store, outcome) = FavoritesStore::open(SLOT, MemoryStorage::with_slot(SLOT, &json));
        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        assert_eq!(store.get(1).unwrap().title, "A");
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_state() {
        let storage = FlakyStorage {
            fail_writes: true,
            ..FlakyStorage::default()
        };
        let (mut store, _) = FavoritesStore::open(SLOT, storage);

        let outcome = store.add(movie(7, "Se7en"));
        assert_eq!(outcome.change, Change::Added);
        assert!(matches!(outcome.persist, PersistOutcome::Failed { .. }));
        assert!(store.is_favorite(7));
        assert_eq!(store.storage().inner.get(SLOT), None);
    }

    #[test]
    fn test_next_successful_persist_reconciles() {
        let storage = FlakyStorage {
            fail_writes: true,
            ..FlakyStorage::default()
        };
        let (mut store, _) = FavoritesStore::open(SLOT, storage);
        store.add(movie(1, "A"));
        store.storage.fail_writes = false;
        store.add(movie(2, "B"));

        let stored: Vec<Movie> = serde_json::from_str(store.storage().inner.get(SLOT).unwrap()).unwrap();
        assert_eq!(stored.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_read_failure_starts_empty() {
        let storage = FlakyStorage {
            fail_reads: true,
            inner: MemoryStorage::with_slot(SLOT, "[]"),
            ..FlakyStorage::default()
        };
        let (store, outcome) = FavoritesStore::open(SLOT, storage);
        assert!(matches!(outcome, LoadOutcome::ReadFailed { .. }));
        assert_eq!(store.count(), 0);
        // The unreadable slot is left alone
        assert_eq!(store.storage().inner.get(SLOT), Some("[]"));
    }

    #[test]
    fn test_observers_notified_on_change_only() {
        let mut store = empty_store();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |favorites| sink.borrow_mut().push(favorites.len()));

        store.add(movie(1, "A"));
        store.add(movie(1, "A"));
        store.remove(42);
        store.toggle(movie(2, "B"));
        store.clear();
        assert_eq!(*seen.borrow(), vec![1, 2, 0]);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add(movie(3, "C"));
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_independent_slots() {
        let dir = tempfile::TempDir::new().unwrap();
        let (mut first, _) = FavoritesStore::open("first", FileStorage::new(dir.path()));
        let (mut second, _) = FavoritesStore::open("second", FileStorage::new(dir.path()));

        first.add(movie(1, "A"));
        second.add(movie(2, "B"));

        let (reopened, _) = FavoritesStore::open("first", FileStorage::new(dir.path()));
        assert!(reopened.is_favorite(1));
        assert!(!reopened.is_favorite(2));
    }
}
