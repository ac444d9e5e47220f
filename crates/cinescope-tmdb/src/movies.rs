use crate::client::TmdbClient;
use crate::error::TmdbError;
use crate::traits::MovieSource;
use async_trait::async_trait;
use cinescope_models::{GenreList, Movie, MovieDetails, Paginated};

/// TMDB `sort_by` value used for genre discovery
pub const POPULARITY_DESC: &str = "popularity.desc";

fn page_param(page: u32) -> (&'static str, String) {
    ("page", page.max(1).to_string())
}

#[async_trait]
impl MovieSource for TmdbClient {
    type Error = TmdbError;

    fn source_name(&self) -> &str {
        "tmdb"
    }

    fn is_not_found(error: &TmdbError) -> bool {
        error.is_not_found()
    }

    /// GET /trending/movie/week
    async fn trending_week(&self) -> Result<Paginated<Movie>, TmdbError> {
        self.get("/trending/movie/week", &[]).await
    }

    /// GET /movie/popular
    async fn popular(&self, page: u32) -> Result<Paginated<Movie>, TmdbError> {
        self.get("/movie/popular", &[page_param(page)]).await
    }

    /// GET /discover/movie?with_genres={id}
    async fn discover_by_genre(
        &self,
        genre_id: u64,
        page: u32,
        sort_by: &str,
    ) -> Result<Paginated<Movie>, TmdbError> {
        let query = [
            ("with_genres", genre_id.to_string()),
            page_param(page),
            ("sort_by", sort_by.to_string()),
        ];
        self.get("/discover/movie", &query).await
    }

    /// GET /search/movie?query=...
    async fn search(
        &self,
        query: &str,
        page: u32,
        genre_id: Option<u64>,
    ) -> Result<Paginated<Movie>, TmdbError> {
        let mut params = vec![("query", query.to_string()), page_param(page)];
        if let Some(genre_id) = genre_id {
            params.push(("with_genres", genre_id.to_string()));
        }
        self.get("/search/movie", &params).await
    }

    /// GET /movie/{movie_id}
    async fn movie_details(&self, id: u64) -> Result<MovieDetails, TmdbError> {
        self.get(&format!("/movie/{}", id), &[]).await
    }

    /// GET /genre/movie/list
    async fn genres(&self) -> Result<GenreList, TmdbError> {
        self.get("/genre/movie/list", &[]).await
    }
}
