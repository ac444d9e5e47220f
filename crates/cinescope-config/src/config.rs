use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Slot name the favorites list is persisted under unless configured otherwise
pub const DEFAULT_FAVORITES_SLOT: &str = "cinescope_favorites";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FavoritesConfig {
    /// Durable slot name the favorites list is stored under
    #[serde(default = "default_favorites_slot")]
    pub slot: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListingConfig {
    /// Sort applied to genre listings when `--sort` is not given
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_favorites_slot() -> String {
    DEFAULT_FAVORITES_SLOT.to_string()
}

fn default_sort() -> String {
    "popularity.desc".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            slot: default_favorites_slot(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
        }
    }
}

/// Slot keys double as file names, so keep them to a portable alphabet
pub fn is_valid_slot_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or defaults if it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if !self.tmdb.base_url.starts_with("http://") && !self.tmdb.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("tmdb.base_url must be an http(s) URL: {}", self.tmdb.base_url));
        }
        if self.tmdb.image_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.image_base_url cannot be empty"));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_secs must be greater than zero"));
        }
        if !is_valid_slot_key(&self.favorites.slot) {
            return Err(anyhow::anyhow!(
                "favorites.slot may only contain letters, digits, '_' and '-': {:?}",
                self.favorites.slot
            ));
        }
        Ok(())
    }
}
