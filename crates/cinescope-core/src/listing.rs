//! Filter and sort a fetched movie list for display.
//!
//! `apply` is a pure, total function: it never fails and never mutates its
//! input. Filters run in a fixed order (search text, year, minimum rating)
//! and the survivors are stable-sorted by the chosen key.

use cinescope_models::Movie;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Popularity,
    Rating,
    ReleaseDate,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort order, written the way TMDB spells `sort_by` (`popularity.desc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub const POPULARITY_DESC: SortKey = SortKey::new(SortField::Popularity, SortDirection::Desc);
    pub const POPULARITY_ASC: SortKey = SortKey::new(SortField::Popularity, SortDirection::Asc);
    pub const RATING_DESC: SortKey = SortKey::new(SortField::Rating, SortDirection::Desc);
    pub const RATING_ASC: SortKey = SortKey::new(SortField::Rating, SortDirection::Asc);
    pub const DATE_DESC: SortKey = SortKey::new(SortField::ReleaseDate, SortDirection::Desc);
    pub const DATE_ASC: SortKey = SortKey::new(SortField::ReleaseDate, SortDirection::Asc);
    pub const TITLE_ASC: SortKey = SortKey::new(SortField::Title, SortDirection::Asc);
    pub const TITLE_DESC: SortKey = SortKey::new(SortField::Title, SortDirection::Desc);

    pub const ALL: [SortKey; 8] = [
        Self::POPULARITY_DESC,
        Self::POPULARITY_ASC,
        Self::RATING_DESC,
        Self::RATING_ASC,
        Self::DATE_DESC,
        Self::DATE_ASC,
        Self::TITLE_ASC,
        Self::TITLE_DESC,
    ];

    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Ascending comparison for the field; direction is applied by the caller
    fn compare(&self, a: &Movie, b: &Movie) -> Ordering {
        match self.field {
            SortField::Popularity => a.popularity.total_cmp(&b.popularity),
            SortField::Rating => a.vote_average.total_cmp(&b.vote_average),
            // None orders before Some, so unparsable dates are the earliest
            SortField::ReleaseDate => a.release_day().cmp(&b.release_day()),
            SortField::Title => compare_titles(&a.title, &b.title),
        }
    }

    pub fn ordering(&self, a: &Movie, b: &Movie) -> Ordering {
        match self.direction {
            SortDirection::Asc => self.compare(a, b),
            SortDirection::Desc => self.compare(b, a),
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::POPULARITY_DESC
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Popularity => "popularity",
            SortField::Rating => "vote_average",
            SortField::ReleaseDate => "release_date",
            SortField::Title => "title",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}.{}", field, direction)
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts `field.direction` or `field-direction`; `rating` and `date`
    /// are aliases for `vote_average` and `release_date`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let (field, direction) = normalized
            .split_once(|c: char| c == '.' || c == '-')
            .ok_or_else(|| format!("Invalid sort key: {}. Expected e.g. 'popularity.desc'", s))?;

        let field = match field {
            "popularity" => SortField::Popularity,
            "vote_average" | "rating" => SortField::Rating,
            "release_date" | "primary_release_date" | "date" => SortField::ReleaseDate,
            "title" | "original_title" => SortField::Title,
            _ => return Err(format!("Unknown sort field '{}' in {}", field, s)),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(format!("Unknown sort direction '{}' in {}", direction, s)),
        };
        Ok(Self::new(field, direction))
    }
}

/// Title with diacritics stripped and case folded: "Léon" -> "leon"
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Base letters first so "Ágora" sorts with the A's, then case-folded with
/// accents, then the raw titles to keep the order total
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub year: Option<i32>,
    pub min_rating: Option<f64>,
    pub sort: SortKey,
}

impl FilterCriteria {
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// True when no filter would drop anything
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.trim().is_empty() && self.year.is_none() && self.min_rating.is_none()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty() && !movie.title.to_lowercase().contains(&needle) {
            return false;
        }
        if let Some(year) = self.year {
            if movie.release_year() != Some(year) {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if !(movie.vote_average >= min_rating) {
                return false;
            }
        }
        true
    }
}

/// Derive the display list for `movies` under `criteria`
pub fn apply(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    let mut view: Vec<Movie> = movies
        .iter()
        .filter(|m| criteria.matches(m))
        .cloned()
        .collect();
    view.sort_by(|a, b| criteria.sort.ordering(a, b));
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, popularity: f64, vote_average: f64, release_date: &str) -> Movie {
        Movie {
            popularity,
            vote_average,
            release_date: release_date.to_string(),
            ..Movie::new(id, title)
        }
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie(1, "Alien", 40.0, 8.5, "1979-05-25"),
            movie(2, "aliens", 35.0, 8.0, "1986-07-18"),
            movie(3, "Blade Runner", 50.0, 8.1, "1982-06-25"),
            movie(4, "Arrival", 60.0, 7.6, "2016-11-11"),
            movie(5, "Upcoming", 5.0, 0.0, ""),
            movie(6, "Dune", 90.0, 7.8, "2021-09-15"),
        ]
    }

    fn ids(movies: &[Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_popularity_desc_scenario() {
        let movies = vec![movie(1, "Alpha", 10.0, 0.0, ""), movie(2, "Beta", 50.0, 0.0, "")];
        let criteria = FilterCriteria::sorted_by("popularity.desc".parse().unwrap());
        let view = apply(&movies, &criteria);
        assert_eq!(view.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_search_without_matches_is_empty() {
        let criteria = FilterCriteria {
            search_text: "zz".to_string(),
            ..FilterCriteria::default()
        };
        assert!(apply(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let criteria = FilterCriteria {
            search_text: "  ALIEN ".to_string(),
            sort: SortKey::TITLE_ASC,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply(&sample(), &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_min_rating_is_inclusive() {
        let movies = vec![movie(1, "Low", 1.0, 6.9, ""), movie(2, "Edge", 1.0, 7.0, "")];
        let criteria = FilterCriteria {
            min_rating: Some(7.0),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply(&movies, &criteria)), vec![2]);
    }

    #[test]
    fn test_year_filter() {
        let criteria = FilterCriteria {
            year: Some(1982),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&apply(&sample(), &criteria)), vec![3]);

        let criteria = FilterCriteria {
            year: Some(1950),
            ..FilterCriteria::default()
        };
        assert!(apply(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_filters_combine_in_order() {
        let criteria = FilterCriteria {
            search_text: "a".to_string(),
            year: Some(1986),
            min_rating: Some(7.9),
            sort: SortKey::RATING_DESC,
        };
        assert_eq!(ids(&apply(&sample(), &criteria)), vec![2]);
    }

    #[test]
    fn test_empty_input() {
        let criteria = FilterCriteria {
            search_text: "alien".to_string(),
            year: Some(1979),
            min_rating: Some(5.0),
            sort: SortKey::DATE_DESC,
        };
        assert!(apply(&[], &criteria).is_empty());
    }

    #[test]
    fn test_unfiltered_only_reorders() {
        let input = sample();
        for sort in SortKey::ALL {
            let criteria = FilterCriteria::sorted_by(sort);
            assert!(criteria.is_unfiltered());
            let view = apply(&input, &criteria);
            assert_eq!(view.len(), input.len());
            let mut expected = ids(&input);
            let mut actual = ids(&view);
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "sort {} changed membership", sort);
        }
    }

    #[test]
    fn test_output_is_subset_of_input() {
        let input = sample();
        let criteria = FilterCriteria {
            search_text: "e".to_string(),
            min_rating: Some(7.7),
            ..FilterCriteria::default()
        };
        let view = apply(&input, &criteria);
        assert!(view.len() <= input.len());
        assert!(view.iter().all(|m| input.contains(m)));
    }

    #[test]
    fn test_title_sort_ignores_accents() {
        let input = vec![
            movie(1, "Zorro", 0.0, 0.0, ""),
            movie(2, "Ágora", 0.0, 0.0, ""),
            movie(3, "Leopard", 0.0, 0.0, ""),
            movie(4, "Léon", 0.0, 0.0, ""),
        ];
        let view = apply(&input, &FilterCriteria::sorted_by(SortKey::TITLE_ASC));
        let titles: Vec<&str> = view.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Ágora", "Léon", "Leopard", "Zorro"]);
    }

    #[test]
    fn test_title_ties_on_base_letters_break_on_accent_then_case() {
        assert_eq!(compare_titles("Leon", "Léon"), Ordering::Less);
        assert_eq!(compare_titles("alien", "Alien"), Ordering::Greater);
        assert_eq!(compare_titles("Alien", "Alien"), Ordering::Equal);
    }

    #[test]
    fn test_title_asc_and_desc_are_reversed() {
        let input = sample();
        let asc = apply(&input, &FilterCriteria::sorted_by(SortKey::TITLE_ASC));
        let mut desc = apply(&input, &FilterCriteria::sorted_by(SortKey::TITLE_DESC));
        desc.reverse();
        assert_eq!(ids(&asc), ids(&desc));
        assert_eq!(ids(&asc), vec![1, 2, 4, 3, 6, 5]);
    }

    #[test]
    fn test_unparsable_dates_sort_earliest() {
        let input = sample();
        let asc = apply(&input, &FilterCriteria::sorted_by(SortKey::DATE_ASC));
        assert_eq!(ids(&asc), vec![5, 1, 3, 2, 4, 6]);

        let desc = apply(&input, &FilterCriteria::sorted_by(SortKey::DATE_DESC));
        assert_eq!(ids(&desc), vec![6, 4, 2, 3, 1, 5]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let movies = vec![
            movie(1, "First", 10.0, 7.0, ""),
            movie(2, "Second", 10.0, 7.0, ""),
            movie(3, "Third", 10.0, 7.0, ""),
        ];
        for sort in [SortKey::POPULARITY_DESC, SortKey::RATING_ASC, SortKey::DATE_DESC] {
            assert_eq!(ids(&apply(&movies, &FilterCriteria::sorted_by(sort))), vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_apply_is_deterministic_and_leaves_input_untouched() {
        let input = sample();
        let copy = input.clone();
        let criteria = FilterCriteria::sorted_by(SortKey::POPULARITY_ASC);
        let first = apply(&input, &criteria);
        let second = apply(&input, &criteria);
        assert_eq!(first, second);
        assert_eq!(input, copy);
        assert_eq!(ids(&first), vec![5, 2, 1, 3, 4, 6]);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("popularity.desc".parse::<SortKey>().unwrap(), SortKey::POPULARITY_DESC);
        assert_eq!("rating-asc".parse::<SortKey>().unwrap(), SortKey::RATING_ASC);
        assert_eq!("vote_average.desc".parse::<SortKey>().unwrap(), SortKey::RATING_DESC);
        assert_eq!("Date.Asc".parse::<SortKey>().unwrap(), SortKey::DATE_ASC);
        assert_eq!("title.desc".parse::<SortKey>().unwrap(), SortKey::TITLE_DESC);
        assert!("title".parse::<SortKey>().is_err());
        assert!("budget.desc".parse::<SortKey>().is_err());
        assert!("title.up".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_display_round_trips() {
        for sort in SortKey::ALL {
            assert_eq!(sort.to_string().parse::<SortKey>().unwrap(), sort);
        }
    }
}
