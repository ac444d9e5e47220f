use crate::genre::Genre;
use crate::movie::{null_as_default, Movie};
use serde::{Deserialize, Serialize};

/// Response body of `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tagline: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl MovieDetails {
    /// Rating on a five point scale, one decimal (TMDB rates out of ten)
    pub fn rating_out_of_five(&self) -> String {
        format!("{:.1}", self.movie.vote_average / 2.0)
    }

    /// Runtime as `2h 15m`; `None` when TMDB has no runtime (or reports zero)
    pub fn formatted_runtime(&self) -> Option<String> {
        let minutes = self.runtime.filter(|m| *m > 0)?;
        Some(format!("{}h {}m", minutes / 60, minutes % 60))
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// The list-shaped movie, with genre ids filled from the detail genres
    pub fn into_movie(self) -> Movie {
        let mut movie = self.movie;
        if movie.genre_ids.is_empty() {
            movie.genre_ids = self.genres.iter().map(|g| g.id).collect();
        }
        movie
    }
}
