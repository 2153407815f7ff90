//! Categories and tags commands - print the indices of the loaded dataset

use crate::{Result, output, session::Session};

/// Execute the categories command
///
/// # Errors
/// Never fails today; returns `Result` for parity with the other commands
pub fn categories(session: &Session, quiet: bool) -> Result<()> {
    let categories = session.categories();
    if categories.is_empty() {
        if !quiet {
            println!("No categories in the active dataset.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Categories:");
    }
    let selected = session.state().selected_category();
    for category in categories {
        println!(
            "{}",
            output::category_line(category, selected == Some(category.id.as_str()), quiet)
        );
    }
    Ok(())
}

/// Execute the tags command
///
/// # Errors
/// Never fails today; returns `Result` for parity with the other commands
pub fn tags(session: &Session, quiet: bool) -> Result<()> {
    let tags = session.tags();
    if tags.is_empty() {
        if !quiet {
            println!("No tags in the active dataset.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Tags:");
    }
    let selected = &session.state().selected_tags;
    for tag in tags {
        println!("{}", output::tag_line(tag, selected.contains(tag), quiet));
    }
    Ok(())
}
