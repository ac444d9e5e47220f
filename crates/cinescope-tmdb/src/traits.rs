use async_trait::async_trait;
use cinescope_models::{GenreList, Movie, MovieDetails, Paginated};

/// Read-only access to a movie metadata catalog.
///
/// `TmdbClient` is the production implementation; the browse service only
/// depends on this trait so views can be exercised against in-memory data.
#[async_trait]
pub trait MovieSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn source_name(&self) -> &str;

    /// Whether `error` means the requested resource does not exist
    fn is_not_found(_error: &Self::Error) -> bool {
        false
    }

    async fn trending_week(&self) -> Result<Paginated<Movie>, Self::Error>;
    async fn popular(&self, page: u32) -> Result<Paginated<Movie>, Self::Error>;
    async fn discover_by_genre(&self, genre_id: u64, page: u32, sort_by: &str) -> Result<Paginated<Movie>, Self::Error>;
    async fn search(&self, query: &str, page: u32, genre_id: Option<u64>) -> Result<Paginated<Movie>, Self::Error>;
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, Self::Error>;
    async fn genres(&self) -> Result<GenreList, Self::Error>;
}
