use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Response body of `/genre/movie/list`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl GenreList {
    pub fn find(&self, id: u64) -> Option<&Genre> {
        self.genres.iter().find(|g| g.id == id)
    }
}
