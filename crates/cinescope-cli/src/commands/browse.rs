use super::listed;
use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::ui::with_spinner;
use crate::FilterArgs;
use cinescope_core::{apply, FavoritesStore, FileStorage, MoviePage, SearchRequest};
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;

fn print_listing(store: &FavoritesStore<FileStorage>, title: &str, page: &MoviePage, output: &Output) {
    output.data(&json!({
        "title": title,
        "page": page.page,
        "total_results": page.total_results,
        "movies": listed(&page.movies, |id| store.is_favorite(id)),
    }));

    output.println(title.bold().to_string());
    output.println(render::movie_list(&page.movies, |id| store.is_favorite(id)));
    output.println(render::page_footer(&page.page, page.total_results).dimmed().to_string());
}

pub async fn run_trending(ctx: &AppContext, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let movies = with_spinner("Fetching trending movies...", output.is_human(), browse.trending()).await?;
    let store = ctx.favorites(output);

    output.data(&json!({ "movies": listed(&movies, |id| store.is_favorite(id)) }));
    output.println("Trending this week".bold().to_string());
    output.println(render::movie_list(&movies, |id| store.is_favorite(id)));
    Ok(())
}

pub async fn run_popular(ctx: &AppContext, page: u32, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let listing = with_spinner("Fetching popular movies...", output.is_human(), browse.popular(page)).await?;
    let store = ctx.favorites(output);
    print_listing(&store, "Popular movies", &listing, output);
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let genres = with_spinner("Fetching genres...", output.is_human(), browse.genres()).await?;

    output.data(&json!({ "genres": genres }));
    output.println(render::genre_table(&genres).to_string());
    Ok(())
}

/// One genre page run through the filter/sort pipeline
pub async fn run_genre(ctx: &AppContext, id: u64, page: u32, filters: &FilterArgs, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let genre_page = with_spinner("Fetching genre...", output.is_human(), browse.genre_page(id, page)).await?;
    let store = ctx.favorites(output);

    let criteria = filters.criteria(ctx.default_sort());
    let fetched = genre_page.listing.movies.len();
    let movies = apply(&genre_page.listing.movies, &criteria);
    tracing::debug!(
        operation = "genre_listing",
        genre_id = id,
        fetched = fetched,
        shown = movies.len(),
        sort = %criteria.sort,
        "Applied listing filters"
    );

    output.data(&json!({
        "genre": genre_page.genre,
        "page": genre_page.listing.page,
        "total_results": genre_page.listing.total_results,
        "sort": criteria.sort.to_string(),
        "movies": listed(&movies, |id| store.is_favorite(id)),
    }));

    output.println(format!("{} movies", genre_page.genre.name).bold().to_string());
    output.println(render::movie_list(&movies, |id| store.is_favorite(id)));
    if !criteria.is_unfiltered() {
        output.println(format!("Showing {} of {} movies on this page", movies.len(), fetched));
    }
    output.println(
        render::page_footer(&genre_page.listing.page, genre_page.listing.total_results)
            .dimmed()
            .to_string(),
    );
    Ok(())
}

pub async fn run_search(ctx: &AppContext, query: String, genre_id: Option<u64>, page: u32, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let request = SearchRequest { query, genre_id, page };
    let search = with_spinner("Searching...", output.is_human(), browse.search_page(&request)).await?;
    let store = ctx.favorites(output);

    let query = search.query.trim();
    let title = match (query.is_empty(), search.genre_name.is_empty()) {
        (false, true) => format!("Results for \"{}\"", query),
        (false, false) => format!("Results for \"{}\" in {}", query, search.genre_name),
        (true, false) => format!("{} movies", search.genre_name),
        (true, true) => match search.genre_id {
            Some(genre_id) => format!("Genre {} movies", genre_id),
            None => "Popular movies".to_string(),
        },
    };

    output.data(&json!({
        "query": search.query,
        "genre_id": search.genre_id,
        "genre_name": search.genre_name,
        "page": search.listing.page,
        "total_results": search.listing.total_results,
        "movies": listed(&search.listing.movies, |id| store.is_favorite(id)),
    }));
    if output.is_human() {
        print_listing(&store, &title, &search.listing, output);
    }
    Ok(())
}

pub async fn run_movie(ctx: &AppContext, id: u64, output: &Output) -> Result<()> {
    let browse = ctx.browse()?;
    let details = with_spinner("Fetching movie...", output.is_human(), browse.movie(id)).await?;
    let favorite = ctx.favorites(output).is_favorite(id);

    output.data(&json!({ "movie": details, "favorite": favorite }));
    output.println(render::movie_details(&details, favorite, &ctx.config.tmdb.image_base_url));
    Ok(())
}
