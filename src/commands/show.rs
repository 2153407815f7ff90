//! Show command - full detail for one style

use crate::{Result, StylebookError, output, session::Session};

/// Execute the show command
///
/// Ids are matched exactly first, then ignoring ASCII case (`21a` finds `21A`).
///
/// # Errors
/// Returns `StylebookError::StyleNotFound` if no style has this id
pub fn execute(session: &Session, style_id: &str, quiet: bool) -> Result<()> {
    let style = resolve(session, style_id)?;
    if quiet {
        println!("{} {}", style.style_id, style.name);
    } else {
        println!("{}", output::style_detail(style, session.state()));
    }
    Ok(())
}

/// Find a style by id, tolerating case differences
///
/// # Errors
/// Returns `StylebookError::StyleNotFound` if no style has this id
pub fn resolve<'a>(session: &'a Session, style_id: &str) -> Result<&'a crate::styles::Style> {
    let wanted = style_id.trim();
    session
        .find_style(wanted)
        .or_else(|| {
            session
                .styles()
                .iter()
                .find(|s| s.style_id.eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| StylebookError::StyleNotFound(wanted.to_string()))
}
