pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, FavoritesConfig, ListingConfig, LoggingConfig, TmdbConfig, DEFAULT_FAVORITES_SLOT, is_valid_slot_key};
pub use credentials::{CredentialStore, mask_secret, TMDB_TOKEN_ENV};
pub use paths::{PathManager, HOME_ENV};
