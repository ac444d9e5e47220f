use super::{listed, prompts};
use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use crate::ui::{is_interactive, with_spinner};
use crate::{FavoritesCommands, FilterArgs};
use cinescope_core::{apply, Change, FavoritesStore, FileStorage, MutationOutcome, PersistOutcome};
use cinescope_models::Movie;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;

pub async fn run_favorites(ctx: &AppContext, cmd: FavoritesCommands, output: &Output) -> Result<()> {
    let mut store = ctx.favorites(output);
    store.subscribe(|movies: &[Movie]| {
        debug!(operation = "favorites_changed", count = movies.len(), "Favorites changed");
    });

    match cmd {
        FavoritesCommands::List { filters } => list(ctx, &store, &filters, output),
        FavoritesCommands::Add { id } => {
            let movie = match store.get(id).cloned() {
                Some(movie) => movie,
                None => fetch_movie(ctx, id, output).await?,
            };
            let title = movie.title.clone();
            let outcome = store.add(movie);
            report(&outcome, id, &title, &store, output);
            Ok(())
        }
        FavoritesCommands::Remove { id } => {
            let title = store.get(id).map(|m| m.title.clone()).unwrap_or_else(|| format!("Movie {}", id));
            let outcome = store.remove(id);
            report(&outcome, id, &title, &store, output);
            Ok(())
        }
        FavoritesCommands::Toggle { id } => {
            let movie = match store.get(id).cloned() {
                Some(movie) => movie,
                None => fetch_movie(ctx, id, output).await?,
            };
            let title = movie.title.clone();
            let outcome = store.toggle(movie);
            report(&outcome, id, &title, &store, output);
            Ok(())
        }
        FavoritesCommands::Count => {
            output.data(&json!({ "count": store.count() }));
            output.println(store.count().to_string());
            Ok(())
        }
        FavoritesCommands::Clear { yes } => clear(&mut store, yes, output),
    }
}

async fn fetch_movie(ctx: &AppContext, id: u64, output: &Output) -> Result<Movie> {
    let browse = ctx.browse()?;
    let details = with_spinner("Fetching movie...", output.is_human(), browse.movie(id)).await?;
    Ok(details.into_movie())
}

/// Favorites in insertion order, or through the pipeline when any filter or sort is given
fn list(ctx: &AppContext, store: &FavoritesStore<FileStorage>, filters: &FilterArgs, output: &Output) -> Result<()> {
    let movies = if filters.is_empty() {
        store.snapshot()
    } else {
        apply(store.favorites(), &filters.criteria(ctx.default_sort()))
    };

    output.data(&json!({
        "count": store.count(),
        "movies": listed(&movies, |_| true),
    }));

    if store.count() == 0 {
        output.println("No favorites yet. Add one with `cinescope favorites add <ID>`");
        return Ok(());
    }
    output.println("Favorites".bold().to_string());
    output.println(render::movie_list(&movies, |_| true));
    if movies.len() < store.count() {
        output.println(format!("Showing {} of {} favorites", movies.len(), store.count()).dimmed().to_string());
    }
    Ok(())
}

/// Clearing always rewrites the slot; confirmation is only asked when something would be lost
fn clear(store: &mut FavoritesStore<FileStorage>, yes: bool, output: &Output) -> Result<()> {
    if !yes && store.count() > 0 {
        if !is_interactive() {
            return Err(color_eyre::eyre::eyre!("Refusing to clear favorites without confirmation; pass --yes"));
        }
        let prompt = format!("Remove all {} favorites?", store.count());
        if !prompts::prompt_yes_no(&prompt, false)? {
            output.info("Cancelled");
            return Ok(());
        }
    }

    let outcome = store.clear();
    report(&outcome, 0, "", store, output);
    Ok(())
}

fn change_message(change: Change, title: &str, id: u64) -> String {
    match change {
        Change::Added => format!("Added \"{}\" ({}) to favorites", title, id),
        Change::AlreadyPresent => format!("\"{}\" ({}) is already a favorite", title, id),
        Change::Removed => format!("Removed \"{}\" ({}) from favorites", title, id),
        Change::NotPresent => format!("{} is not a favorite", id),
        Change::Cleared => "Cleared all favorites".to_string(),
    }
}

fn report(outcome: &MutationOutcome, id: u64, title: &str, store: &FavoritesStore<FileStorage>, output: &Output) {
    let message = change_message(outcome.change, title, id);
    if outcome.changed() {
        output.success(message);
    } else {
        output.info(message);
    }

    if let PersistOutcome::Failed { reason } = &outcome.persist {
        output.warn(format!(
            "Favorites could not be saved ({}); the change is kept for this run only",
            reason
        ));
    }

    output.data(&json!({
        "change": format!("{:?}", outcome.change),
        "persisted": outcome.persisted(),
        "count": store.count(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use cinescope_core::KeyValueStorage;
    use tempfile::TempDir;

    const SLOT: &str = "cinescope_favorites";

    fn open_store(dir: &TempDir) -> FavoritesStore<FileStorage> {
        FavoritesStore::open(SLOT, FileStorage::new(dir.path())).0
    }

    #[test]
    fn test_clear_on_empty_store_still_writes_slot() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        assert_eq!(store.storage().read(SLOT).unwrap(), None);

        clear(&mut store, false, &Output::new(OutputFormat::Human, true)).unwrap();

        assert_eq!(store.count(), 0);
        let saved = store.storage().read(SLOT).unwrap().unwrap();
        let movies: Vec<Movie> = serde_json::from_str(&saved).unwrap();
        assert!(movies.is_empty());
    }

    #[test]
    fn test_clear_with_yes_empties_saved_favorites() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add(Movie::new(949, "Heat"));
        store.add(Movie::new(8489, "Casino"));

        clear(&mut store, true, &Output::new(OutputFormat::Json, true)).unwrap();

        let reopened = open_store(&dir);
        assert_eq!(reopened.count(), 0);
    }

    #[test]
    fn test_change_messages() {
        assert_eq!(change_message(Change::Added, "Heat", 949), "Added \"Heat\" (949) to favorites");
        assert_eq!(change_message(Change::NotPresent, "Movie 3", 3), "3 is not a favorite");
        assert_eq!(change_message(Change::Cleared, "", 0), "Cleared all favorites");
    }
}
