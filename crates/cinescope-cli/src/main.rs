use clap::{ArgAction, Args, Parser, Subcommand};
use cinescope_core::{parse_page, FilterCriteria, SortKey};
use commands::{browse, clear, config, favorites};

mod commands;
mod context;
mod logging;
mod output;
mod render;
mod ui;

#[derive(Parser)]
#[command(name = "cinescope")]
#[command(about = "CineScope - Discover movies and keep track of your favorites")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movies trending this week
    Trending,
    /// Popular movies
    Popular {
        #[arg(long, default_value = "1", value_parser = page_arg)]
        page: u32,
    },
    /// List movie genres
    Genres,
    /// Browse one genre, optionally filtered and re-sorted
    #[command(long_about = "Browse the most popular movies of a genre. The fetched page can be narrowed with --search, --year and --min-rating and re-ordered with --sort (e.g. popularity.desc, vote_average.asc, release_date.desc, title.asc).")]
    Genre {
        /// Genre id (see `cinescope genres`)
        id: u64,

        #[arg(long, default_value = "1", value_parser = page_arg)]
        page: u32,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Search movies by title; without a query, browse by genre or popularity
    Search {
        query: Option<String>,

        /// Restrict to a genre id
        #[arg(long)]
        genre: Option<u64>,

        #[arg(long, default_value = "1", value_parser = page_arg)]
        page: u32,
    },
    /// Show movie details
    Movie {
        id: u64,
    },
    /// Manage favorite movies (lists them when no subcommand is given)
    Favorites {
        #[command(subcommand)]
        cmd: Option<FavoritesCommands>,
    },
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    #[command(long_about = "Clear stored data. Use --favorites to empty the favorites list, --credentials to remove the stored TMDB token, or --all for both.")]
    Clear {
        /// Clear favorites and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Empty the favorites list
        #[arg(long, action = ArgAction::SetTrue)]
        favorites: bool,

        /// Remove the stored TMDB token
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List favorites (insertion order unless --sort is given)
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Add a movie by id
    Add { id: u64 },
    /// Remove a movie by id
    Remove { id: u64 },
    /// Add the movie if it is not a favorite, remove it otherwise
    Toggle { id: u64 },
    /// Number of favorites
    Count,
    /// Remove every favorite
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the token)
    Show,
    /// Store the TMDB API read access token
    Token {
        /// Token value (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,
    },
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Keep titles containing this text (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// Keep movies released in this year
    #[arg(long)]
    year: Option<i32>,

    /// Keep movies rated at least this (0-10)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Sort order, e.g. popularity.desc, vote_average.asc, release_date.desc, title.asc
    #[arg(long)]
    sort: Option<SortKey>,
}

impl FilterArgs {
    pub fn criteria(&self, default_sort: SortKey) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            year: self.year,
            min_rating: self.min_rating,
            sort: self.sort.unwrap_or(default_sort),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.year.is_none() && self.min_rating.is_none() && self.sort.is_none()
    }
}

fn page_arg(raw: &str) -> Result<u32, String> {
    Ok(parse_page(raw))
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // `config init` must work even when the existing file does not parse
    let ctx = if matches!(cli.command, Commands::Config { cmd: Some(ConfigCommands::Init { .. }) }) {
        context::AppContext::with_defaults()
    } else {
        context::AppContext::load()?
    };

    logging::init_logging_with_file(cli.verbose, cli.quiet, ctx.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Trending => browse::run_trending(&ctx, &output).await,
        Commands::Popular { page } => browse::run_popular(&ctx, page, &output).await,
        Commands::Genres => browse::run_genres(&ctx, &output).await,
        Commands::Genre { id, page, filters } => browse::run_genre(&ctx, id, page, &filters, &output).await,
        Commands::Search { query, genre, page } => {
            browse::run_search(&ctx, query.unwrap_or_default(), genre, page, &output).await
        }
        Commands::Movie { id } => browse::run_movie(&ctx, id, &output).await,
        Commands::Favorites { cmd } => {
            let cmd = cmd.unwrap_or(FavoritesCommands::List { filters: FilterArgs::default() });
            favorites::run_favorites(&ctx, cmd, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(&ctx, cmd, &output)
        }
        Commands::Clear { all, favorites, credentials } => clear::run_clear(&ctx, all, favorites, credentials, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_genre_filters_parse() {
        let cli = Cli::try_parse_from([
            "cinescope", "genre", "28", "--page", "0", "--search", "man", "--year", "2008",
            "--min-rating", "7", "--sort", "vote_average.desc",
        ])
        .unwrap();

        match cli.command {
            Commands::Genre { id, page, filters } => {
                assert_eq!(id, 28);
                assert_eq!(page, 1);
                let criteria = filters.criteria(SortKey::default());
                assert_eq!(criteria.search_text, "man");
                assert_eq!(criteria.year, Some(2008));
                assert_eq!(criteria.min_rating, Some(7.0));
                assert_eq!(criteria.sort, SortKey::RATING_DESC);
            }
            _ => panic!("expected genre command"),
        }
    }

    #[test]
    fn test_invalid_sort_is_rejected() {
        assert!(Cli::try_parse_from(["cinescope", "genre", "28", "--sort", "budget"]).is_err());
    }

    #[test]
    fn test_filter_defaults_to_configured_sort() {
        let filters = FilterArgs::default();
        assert!(filters.is_empty());
        assert_eq!(filters.criteria(SortKey::TITLE_ASC).sort, SortKey::TITLE_ASC);
    }
}
