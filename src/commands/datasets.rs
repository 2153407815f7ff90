//! Dataset commands - list the catalog, switch dataset, set the view mode

use crate::{
    Result, StylebookError,
    dataset::{self, CATALOG, FileLoader, LoadError},
    session::{LoadOutcome, Session},
    state::{Action, ViewMode},
};
use colored::Colorize;
use std::time::Duration;

/// How long `use` waits for the new dataset before giving up
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute the datasets command
///
/// Marks the active dataset and flags entries whose file is missing from the
/// data directory.
///
/// # Errors
/// Never fails today; returns `Result` for parity with the other commands
pub fn list(session: &Session, loader: &FileLoader, quiet: bool) -> Result<()> {
    let active = session.state().active_data_source_id.as_str();
    let available = loader.available();

    if !quiet {
        println!("Datasets (data directory: {}):", loader.data_dir().display());
    }
    for source in CATALOG {
        if quiet {
            println!("{}", source.id);
            continue;
        }
        let marker = if source.id == active { "*".green().bold().to_string() } else { " ".to_string() };
        let missing = if available.iter().any(|s| s.id == source.id) {
            String::new()
        } else {
            format!(" {}", "(file missing)".red())
        };
        println!("{marker} {:<16} {}{missing}", source.id, source.display_name.bold());
        println!("    {}", dataset::plain_description(source.description).dimmed());
    }
    Ok(())
}

/// Execute the use command: switch and persist the active dataset
///
/// # Errors
/// Returns an error if the id is not in the catalog or the new dataset fails
/// to load. The switch itself is persisted either way.
pub fn use_dataset(session: &mut Session, dataset_id: &str, quiet: bool) -> Result<()> {
    let dataset_id = dataset_id.trim();
    if !dataset::is_known(dataset_id) {
        return Err(LoadError::UnknownDataset(dataset_id.to_string()).into());
    }

    if session.state().active_data_source_id == dataset_id {
        if !quiet {
            println!("Already using {dataset_id}");
        }
        return Ok(());
    }

    session.dispatch(Action::SetDataSource(dataset_id.to_string()));
    match session.wait_for_load(LOAD_TIMEOUT) {
        Some(LoadOutcome::Applied { count }) => {
            if !quiet {
                println!("Now using {dataset_id} ({count} styles)");
            }
            Ok(())
        }
        Some(LoadOutcome::Failed(message)) => Err(LoadError::Other(message).into()),
        Some(LoadOutcome::Stale) | None => Err(StylebookError::InvalidInput(format!(
            "Timed out loading {dataset_id}"
        ))),
    }
}

/// Execute the view command: persist the default layout
///
/// # Errors
/// Never fails today; persistence errors are logged by the session
pub fn set_view(session: &mut Session, mode: ViewMode, quiet: bool) -> Result<()> {
    session.dispatch(Action::SetViewMode(mode));
    if !quiet {
        println!("View mode set to {mode}");
    }
    Ok(())
}
