//! Terminal views for movie lists, details and genres.
//!
//! Renderers return strings so commands decide where they go; nothing here
//! touches stdout.

use cinescope_core::PageInfo;
use cinescope_models::{Genre, Movie, MovieDetails, POSTER_SIZE};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;

pub const FAVORITE_MARK: &str = "★";
pub const NO_MOVIES: &str = "No movies found";

fn year_label(movie: &Movie) -> String {
    movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

pub fn movie_table(movies: &[Movie], is_favorite: impl Fn(u64) -> bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&["", "ID", "Title", "Year", "Rating", "Popularity"]));

    for movie in movies {
        let mark = if is_favorite(movie.id) { FAVORITE_MARK } else { "" };
        table.add_row(vec![
            Cell::new(mark).fg(Color::Yellow),
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(year_label(movie)),
            Cell::new(format!("{:.1}", movie.vote_average)),
            Cell::new(format!("{:.1}", movie.popularity)),
        ]);
    }
    table
}

/// A table of movies, or an explicit "no movies" line when there are none
pub fn movie_list(movies: &[Movie], is_favorite: impl Fn(u64) -> bool) -> String {
    if movies.is_empty() {
        return NO_MOVIES.to_string();
    }
    movie_table(movies, is_favorite).to_string()
}

pub fn page_footer(page: &PageInfo, total_results: u64) -> String {
    let mut footer = format!("Page {} of {} ({} results)", page.current, page.total, total_results);
    if let Some(previous) = page.previous() {
        footer.push_str(&format!("  previous: --page {}", previous));
    }
    if let Some(next) = page.next() {
        footer.push_str(&format!("  next: --page {}", next));
    }
    footer
}

pub fn genre_table(genres: &[Genre]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL).set_header(header(&["ID", "Genre"]));
    for genre in genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    table
}

pub fn movie_details(details: &MovieDetails, is_favorite: bool, image_base_url: &str) -> String {
    let movie = &details.movie;
    let mut lines = Vec::new();

    let mark = if is_favorite {
        format!(" {}", FAVORITE_MARK.yellow())
    } else {
        String::new()
    };
    lines.push(format!("{} ({}){}", movie.title.bold(), year_label(movie), mark));
    if !details.tagline.is_empty() {
        lines.push(details.tagline.italic().to_string());
    }
    lines.push(String::new());

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.add_row(vec![Cell::new("ID"), Cell::new(movie.id)]);
    table.add_row(vec![
        Cell::new("Rating"),
        Cell::new(format!("{} / 5 ({:.1} / 10)", details.rating_out_of_five(), movie.vote_average)),
    ]);
    if let Some(runtime) = details.formatted_runtime() {
        table.add_row(vec![Cell::new("Runtime"), Cell::new(runtime)]);
    }
    if !movie.release_date.is_empty() {
        table.add_row(vec![Cell::new("Released"), Cell::new(&movie.release_date)]);
    }
    let genres = details.genre_names();
    if !genres.is_empty() {
        table.add_row(vec![Cell::new("Genres"), Cell::new(genres.join(", "))]);
    }
    if let Some(poster) = movie.poster_url(image_base_url, POSTER_SIZE) {
        table.add_row(vec![Cell::new("Poster"), Cell::new(poster)]);
    }
    lines.push(table.to_string());

    if !movie.overview.is_empty() {
        lines.push(String::new());
        lines.push(movie.overview.clone());
    }
    lines.join("\n")
}
