pub mod browse;
pub mod clear;
pub mod config;
pub mod favorites;
pub mod prompts;

use cinescope_models::Movie;
use serde::Serialize;

/// A movie in JSON listings, flagged when it is a favorite
#[derive(Serialize)]
pub struct ListedMovie<'a> {
    #[serde(flatten)]
    pub movie: &'a Movie,
    pub favorite: bool,
}

pub fn listed<'a>(movies: &'a [Movie], is_favorite: impl Fn(u64) -> bool) -> Vec<ListedMovie<'a>> {
    movies
        .iter()
        .map(|movie| ListedMovie {
            movie,
            favorite: is_favorite(movie.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_movie_json_is_flat() {
        let movies = vec![Movie::new(7, "Se7en"), Movie::new(8, "Eight")];
        let value = serde_json::to_value(listed(&movies, |id| id == 7)).unwrap();
        assert_eq!(value[0]["id"], 7);
        assert_eq!(value[0]["title"], "Se7en");
        assert_eq!(value[0]["favorite"], true);
        assert_eq!(value[1]["favorite"], false);
    }
}
