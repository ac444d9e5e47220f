use super::prompts;
use crate::context::AppContext;
use crate::output::Output;
use crate::ConfigCommands;
use cinescope_config::{mask_secret, Config, TMDB_TOKEN_ENV};
use color_eyre::Result;
use comfy_table::{presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(ctx: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Token { token } => set_token(ctx, token, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn section(title: &str, rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL).set_header(vec![
        Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table
}

fn show_config(ctx: &AppContext, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let credentials = ctx.credentials()?;
    let token_source = if std::env::var(TMDB_TOKEN_ENV).map(|t| !t.trim().is_empty()).unwrap_or(false) {
        TMDB_TOKEN_ENV
    } else {
        "credentials.toml"
    };
    let token_display = credentials
        .resolve_tmdb_token()
        .map(|t| format!("{} (from {})", mask_secret(&t), token_source))
        .unwrap_or_else(|| "not set".red().to_string());

    output.data(&json!({
        "config_file": ctx.paths.config_file(),
        "credentials_file": ctx.paths.credentials_file(),
        "storage_dir": ctx.paths.storage_dir(),
        "tmdb": config.tmdb,
        "favorites": config.favorites,
        "listing": config.listing,
        "logging": config.logging,
        "token": credentials.resolve_tmdb_token().map(|t| mask_secret(&t)),
    }));

    if !output.is_human() {
        return Ok(());
    }

    let config_file = ctx.paths.config_file();
    let file_state = if config_file.exists() { "" } else { " (not created, using defaults)" };
    output.println(section(
        "Files",
        &[
            ("Config File", format!("{}{}", config_file.display(), file_state)),
            ("Credentials", ctx.paths.credentials_file().display().to_string()),
            ("Storage", ctx.paths.storage_dir().display().to_string()),
        ],
    )
    .to_string());
    output.println(section(
        "TMDB",
        &[
            ("API URL", config.tmdb.base_url.clone()),
            ("Image URL", config.tmdb.image_base_url.clone()),
            ("Language", config.tmdb.language.clone()),
            ("Timeout", format!("{}s", config.tmdb.timeout_secs)),
            ("Token", token_display),
        ],
    )
    .to_string());
    output.println(section(
        "Favorites & Listing",
        &[
            ("Favorites Slot", config.favorites.slot.clone()),
            ("Default Sort", config.listing.default_sort.clone()),
            (
                "Log File",
                config
                    .logging
                    .file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "stderr".to_string()),
            ),
        ],
    )
    .to_string());
    Ok(())
}

fn set_token(ctx: &AppContext, token: Option<String>, output: &Output) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => prompts::prompt_secret("TMDB API read access token: ")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Token must not be empty"));
    }

    let mut credentials = ctx.credentials()?;
    credentials.set_tmdb_token(token.clone());
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "Saved TMDB token {} to {}",
        mask_secret(&token),
        ctx.paths.credentials_file().display()
    ));
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}; use --force to overwrite",
            config_file.display()
        ));
        return Ok(());
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
