pub mod browse;
pub mod favorites;
pub mod listing;
pub mod pagination;
pub mod storage;

pub use browse::{Browse, BrowseError, GenrePage, MoviePage, SearchPage, SearchRequest};
pub use favorites::{Change, FavoritesStore, LoadOutcome, MutationOutcome, PersistOutcome, SubscriptionId};
pub use listing::{apply, FilterCriteria, SortDirection, SortField, SortKey};
pub use pagination::{parse_page, PageInfo, MAX_PAGES};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
