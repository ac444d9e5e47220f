use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Poster width used by list and detail views
pub const POSTER_SIZE: &str = "w500";

/// A movie as returned by TMDB list endpoints.
///
/// Only `id` is required when decoding; TMDB omits or nulls the other fields
/// for sparse entries, so they fall back to empty values instead of failing
/// the whole page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// `YYYY-MM-DD`, possibly partial or empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u64>,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            overview: String::new(),
            release_date: String::new(),
            vote_average: 0.0,
            popularity: 0.0,
            genre_ids: Vec::new(),
        }
    }

    /// Year component of `release_date`, if its first four characters are digits
    pub fn release_year(&self) -> Option<i32> {
        let year = self.release_date.trim().get(..4)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }

    /// Parse `release_date` into a calendar day.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM` (first of the month) and `YYYY`
    /// (first of January). Anything else is unparsable.
    pub fn release_day(&self) -> Option<NaiveDate> {
        let raw = self.release_date.trim();
        match raw.len() {
            10 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
            7 => NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok(),
            4 => self
                .release_year()
                .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
            _ => None,
        }
    }

    pub fn poster_url(&self, image_base_url: &str, size: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, p))
    }
}

/// TMDB sends `null` for some text fields; treat that the same as absent
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
