use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDB returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode TMDB response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No TMDB token configured (set TMDB_TOKEN or run `cinescope config token`)")]
    MissingToken,
}

impl TmdbError {
    /// True when TMDB answered 404 for the requested resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, TmdbError::Api { status: 404, .. })
    }
}
