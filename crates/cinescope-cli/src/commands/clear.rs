use crate::context::AppContext;
use crate::output::Output;
use cinescope_core::PersistOutcome;
use color_eyre::Result;
use std::fs;

pub fn run_clear(ctx: &AppContext, all: bool, favorites: bool, credentials: bool, output: &Output) -> Result<()> {
    if !(all || favorites || credentials) {
        output.warn("No clear option specified. Use --favorites, --credentials, or --all");
        output.println("\nExample: cinescope clear --favorites");
        return Ok(());
    }

    if all || favorites {
        clear_favorites(ctx, output);
    }
    if all || credentials {
        clear_credentials(ctx, output)?;
    }
    Ok(())
}

fn clear_favorites(ctx: &AppContext, output: &Output) {
    let mut store = ctx.favorites(output);
    let count = store.count();
    let outcome = store.clear();
    match outcome.persist {
        PersistOutcome::Persisted => output.success(format!("Cleared {} favorites", count)),
        PersistOutcome::Failed { reason } => {
            output.warn(format!("Favorites could not be cleared on disk: {}", reason));
        }
    }
}

fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
