use crate::pagination::PageInfo;
use cinescope_models::{Genre, Movie, MovieDetails, Paginated};
use cinescope_tmdb::{MovieSource, POPULARITY_DESC};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("Genre {0} not found")]
    GenreNotFound(u64),

    #[error("Movie {0} not found")]
    MovieNotFound(u64),

    #[error("{source_name} request failed: {error}")]
    Source {
        source_name: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_results: u64,
    pub page: PageInfo,
}

impl From<Paginated<Movie>> for MoviePage {
    fn from(paginated: Paginated<Movie>) -> Self {
        Self {
            page: PageInfo::new(paginated.page, paginated.total_pages),
            total_results: paginated.total_results,
            movies: paginated.results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenrePage {
    pub genre: Genre,
    #[serde(flatten)]
    pub listing: MoviePage,
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: String,
    pub genre_id: Option<u64>,
    pub page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub genre_id: Option<u64>,
    /// Empty when no genre was requested or its name could not be looked up
    pub genre_name: String,
    #[serde(flatten)]
    pub listing: MoviePage,
}

/// Composes catalog calls into the data each view needs.
///
/// Fetch failures are returned as errors, never as empty pages, so callers
/// can tell "request failed" apart from "no results".
pub struct Browse<S: MovieSource> {
    source: S,
}

impl<S: MovieSource> Browse<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn source_error(&self, error: S::Error) -> BrowseError {
        BrowseError::Source {
            source_name: self.source.source_name().to_string(),
            error: Box::new(error),
        }
    }

    pub async fn trending(&self) -> Result<Vec<Movie>, BrowseError> {
        let page = self
            .source
            .trending_week()
            .await
            .map_err(|e| self.source_error(e))?;
        Ok(page.results)
    }

    pub async fn popular(&self, page: u32) -> Result<MoviePage, BrowseError> {
        let paginated = self
            .source
            .popular(page.max(1))
            .await
            .map_err(|e| self.source_error(e))?;
        Ok(paginated.into())
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, BrowseError> {
        let list = self.source.genres().await.map_err(|e| self.source_error(e))?;
        Ok(list.genres)
    }

    /// Movies of one genre by popularity; unknown genre ids are `GenreNotFound`
    pub async fn genre_page(&self, genre_id: u64, page: u32) -> Result<GenrePage, BrowseError> {
        let page = page.max(1);
        let (genres, movies) = futures::future::try_join(
            async { self.source.genres().await.map_err(|e| self.source_error(e)) },
            async {
                self.source
                    .discover_by_genre(genre_id, page, POPULARITY_DESC)
                    .await
                    .map_err(|e| self.source_error(e))
            },
        )
        .await?;

        let genre = genres
            .find(genre_id)
            .cloned()
            .ok_or(BrowseError::GenreNotFound(genre_id))?;

        debug!(
            operation = "genre_page",
            genre = %genre.name,
            page = page,
            results = movies.results.len(),
            "Loaded genre page"
        );

        Ok(GenrePage {
            genre,
            listing: movies.into(),
        })
    }

    /// Text search when the query is not blank, otherwise discovery by
    /// genre, otherwise popular movies
    pub async fn search_page(&self, request: &SearchRequest) -> Result<SearchPage, BrowseError> {
        let page = request.page.max(1);
        let query = request.query.trim();

        let movies = async {
            if !query.is_empty() {
                self.source.search(query, page, request.genre_id).await
            } else if let Some(genre_id) = request.genre_id {
                self.source.discover_by_genre(genre_id, page, POPULARITY_DESC).await
            } else {
                self.source.popular(page).await
            }
        };
        let genre_name = async {
            match request.genre_id {
                Some(genre_id) => self.genre_name(genre_id).await,
                None => String::new(),
            }
        };

        let (movies, genre_name) = futures::join!(movies, genre_name);
        let movies = movies.map_err(|e| self.source_error(e))?;

        Ok(SearchPage {
            query: request.query.clone(),
            genre_id: request.genre_id,
            genre_name,
            listing: movies.into(),
        })
    }

    /// Best-effort genre name; lookup failures only cost the label
    async fn genre_name(&self, genre_id: u64) -> String {
        match self.source.genres().await {
            Ok(list) => list
                .find(genre_id)
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            Err(e) => {
                warn!(operation = "genre_lookup", genre_id = genre_id, "Failed to fetch genre name: {}", e);
                String::new()
            }
        }
    }

    pub async fn movie(&self, id: u64) -> Result<MovieDetails, BrowseError> {
        self.source.movie_details(id).await.map_err(|e| {
            if S::is_not_found(&e) {
                BrowseError::MovieNotFound(id)
            } else {
                self.source_error(e)
            }
        })
    }
}
