//! List command - filter and print styles

use crate::{Result, cli::FilterArgs, output, session::Session, state::{Action, ViewMode}};

/// Execute the list command
///
/// Favorites named with `--favorite` are marked first so `--favorites` can
/// show them in the same invocation.
///
/// # Errors
/// Returns an error if the active dataset failed to load
pub fn execute(
    session: &mut Session,
    filter: &FilterArgs,
    view: Option<ViewMode>,
    favorite_ids: &[String],
    tag_limit: usize,
    quiet: bool,
) -> Result<()> {
    for id in favorite_ids {
        if !session.state().is_favorite(id) {
            session.dispatch(Action::ToggleFavorite(id.clone()));
        }
    }
    session.dispatch_all(filter.actions());

    let visible = session.visible_styles();
    if quiet {
        for style in &visible {
            println!("{}", style.style_id);
        }
        return Ok(());
    }

    if visible.is_empty() {
        println!("No styles match the current filters.");
        return Ok(());
    }

    let view_mode = view.unwrap_or(session.state().view_mode);
    println!("{}", output::style_listing(&visible, session.state(), view_mode, tag_limit));
    println!("\n{}", session.result_summary());
    Ok(())
}
