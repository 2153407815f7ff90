//! Stylebook CLI application entry point
//!
//! This is the main executable for browsing style guidelines. It provides a
//! command-line interface for filtering, inspecting and comparing styles, and
//! an interactive browse loop.
//!
//! # Usage
//!
//! ```bash
//! # Interactive browsing (default command)
//! stylebook
//! stylebook browse -c 21
//!
//! # Filter styles
//! stylebook list citrus -t bitter
//! stylebook ls --view list -c 1
//!
//! # Inspect and compare
//! stylebook show 21A
//! stylebook compare 21A 21B 22A --csv
//!
//! # Switch dataset (persisted) or peek at another one
//! stylebook use bjcp-2015-mead
//! stylebook --dataset bjcp-2015-cider categories
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/stylebook/config.toml` on Linux) and created with defaults on
//! first run. Guideline files are read from `data_dir`.

use clap::CommandFactory;
use std::io;
use std::sync::Arc;
use stylebook::{
    Result, StylebookError,
    cli::{Cli, Commands, ConfigCommands, parse_setting},
    commands,
    config::{ConfigKey, StylebookConfig},
    dataset::{DEFAULT_DATASET_ID, DatasetLoader, FileLoader, LoadError},
    db::{Database, MemoryStore, PreferenceStore},
    logging::{LogConfig, init_logging},
    session::{LoadOutcome, Session},
    state::Preferences,
};

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `StylebookError` if the key or value is invalid or the
/// configuration cannot be saved.
fn handle_config_command(mut config: StylebookConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).map_err(StylebookError::InvalidInput)?;
            config.set(key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {}", config.get(key));
            }
        }
        ConfigCommands::Get { key } => println!("{}", config.get(*key)),
        ConfigCommands::List => {
            for key in ConfigKey::ALL {
                println!("{key} = {}", config.get(key));
            }
        }
    }
    Ok(())
}

/// Open the preference store, falling back to memory when the state
/// directory is unavailable
fn open_store(config: &StylebookConfig) -> Box<dyn PreferenceStore> {
    let Some(dir) = config.resolved_state_dir() else {
        tracing::warn!("no state directory; preferences will not be saved");
        return Box::new(MemoryStore::new());
    };
    match Database::open(&dir) {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot open preference database");
            Box::new(MemoryStore::new())
        }
    }
}

/// Load the active dataset, turning a failed load into an error
fn require_loaded(session: &mut Session) -> Result<()> {
    match session.load_blocking() {
        LoadOutcome::Failed(message) => Err(LoadError::Other(message).into()),
        LoadOutcome::Applied { .. } | LoadOutcome::Stale => Ok(()),
    }
}

/// Main entry point for the stylebook application
///
/// Parses command-line arguments, loads configuration, opens the session and
/// dispatches to the appropriate command handler.
///
/// # Errors
///
/// Returns `StylebookError` if configuration loading fails, the dataset cannot
/// be loaded, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if let Err(e) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let command = cli.get_command();

    if let Commands::Completions { shell } = &command {
        clap_complete::generate(*shell, &mut Cli::command(), "stylebook", &mut io::stdout());
        return Ok(());
    }

    let config = StylebookConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    let data_dir = config.resolved_data_dir();
    let file_loader = FileLoader::new(&data_dir);
    let loader: Arc<dyn DatasetLoader> = Arc::new(file_loader.clone());
    let defaults = Preferences {
        active_data_source_id: config
            .default_dataset
            .clone()
            .unwrap_or_else(|| DEFAULT_DATASET_ID.to_string()),
        ..Preferences::default()
    };
    let mut session = Session::open_with_defaults(open_store(&config), loader, defaults);

    if let Some(dataset_id) = &cli.dataset {
        session.use_dataset_transiently(dataset_id);
    }

    let tag_limit = config.card_tag_limit;
    match &command {
        Commands::Datasets => commands::datasets(&session, &file_loader, quiet)?,
        Commands::View { mode } => commands::set_view(&mut session, *mode, quiet)?,
        Commands::Use { dataset_id } => commands::use_dataset(&mut session, dataset_id, quiet)?,
        Commands::Browse { filter } => {
            session.load_in_background();
            commands::browse(&mut session, filter, tag_limit, quiet)?;
        }
        Commands::List {
            filter,
            view,
            favorite_ids,
        } => {
            require_loaded(&mut session)?;
            commands::list(&mut session, filter, *view, favorite_ids, tag_limit, quiet)?;
        }
        Commands::Show { style_id } => {
            require_loaded(&mut session)?;
            commands::show(&session, style_id, quiet)?;
        }
        Commands::Compare { style_ids, csv } => {
            require_loaded(&mut session)?;
            commands::compare(&mut session, style_ids, *csv, quiet)?;
        }
        Commands::Categories => {
            require_loaded(&mut session)?;
            commands::categories(&session, quiet)?;
        }
        Commands::Tags => {
            require_loaded(&mut session)?;
            commands::tags(&session, quiet)?;
        }
        Commands::Config { .. } | Commands::Completions { .. } => {}
    }

    Ok(())
}
