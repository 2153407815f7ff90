//! Compare command - vital statistics side by side

use crate::{
    Result, StylebookError,
    commands::show,
    output,
    session::Session,
    state::{Action, COMPARE_LIMIT},
};
use colored::Colorize;

/// Execute the compare command
///
/// Ids are added to the compare list in order. Ids past the fourth are
/// ignored with a warning.
///
/// # Errors
/// Returns an error if an id is unknown or CSV output fails
pub fn execute(session: &mut Session, style_ids: &[String], csv: bool, quiet: bool) -> Result<()> {
    let lookup: &Session = session;
    let resolved = style_ids
        .iter()
        .map(|id| show::resolve(lookup, id).map(|s| s.style_id.clone()))
        .collect::<Result<Vec<_>>>()?;

    if resolved.len() > COMPARE_LIMIT && !quiet {
        eprintln!(
            "{} only the first {COMPARE_LIMIT} styles are compared",
            "Warning:".yellow()
        );
    }

    session.dispatch(Action::ClearCompare);
    for id in resolved {
        session.dispatch(Action::AddToCompare(id));
    }

    let styles = session.compare_styles();
    if styles.is_empty() {
        return Err(StylebookError::InvalidInput("No styles to compare".into()));
    }

    if csv {
        output::write_compare_csv(&styles, std::io::stdout().lock())?;
    } else {
        println!("{}", output::compare_table(&styles));
    }
    Ok(())
}
