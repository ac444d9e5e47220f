use crate::output::Output;
use cinescope_config::{Config, CredentialStore, PathManager};
use cinescope_core::{Browse, FavoritesStore, FileStorage, LoadOutcome, SortKey};
use cinescope_tmdb::{TmdbClient, TmdbError};
use color_eyre::Result;
use tracing::warn;

/// Everything a command needs that comes from disk
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    pub fn with_defaults() -> Self {
        Self {
            paths: PathManager::default(),
            config: Config::default(),
        }
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let credentials_file = self.paths.credentials_file();
        let mut store = CredentialStore::new(credentials_file.clone());
        store
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
        Ok(store)
    }

    pub fn browse(&self) -> Result<Browse<TmdbClient>> {
        let token = self.credentials()?.resolve_tmdb_token().ok_or(TmdbError::MissingToken)?;
        let client = TmdbClient::new(&self.config.tmdb, token)?;
        Ok(Browse::new(client))
    }

    /// Open the favorites store, telling the user when stored data had to be dropped
    pub fn favorites(&self, output: &Output) -> FavoritesStore<FileStorage> {
        let storage = FileStorage::new(self.paths.storage_dir());
        let (store, outcome) = FavoritesStore::open(self.config.favorites.slot.clone(), storage);
        match outcome {
            LoadOutcome::Recovered { reason } => {
                output.warn(format!("Stored favorites were unreadable and have been reset ({})", reason));
            }
            LoadOutcome::ReadFailed { reason } => {
                output.warn(format!("Could not read stored favorites, starting empty ({})", reason));
            }
            LoadOutcome::Loaded { .. } | LoadOutcome::Empty => {}
        }
        store
    }

    /// Configured default listing sort, falling back to popularity when unparsable
    pub fn default_sort(&self) -> SortKey {
        self.config.listing.default_sort.parse().unwrap_or_else(|e| {
            warn!("Ignoring listing.default_sort: {}", e);
            SortKey::default()
        })
    }
}
