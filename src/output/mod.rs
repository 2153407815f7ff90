//! Output formatting for CLI display
//!
//! Renders styles as cards, list rows, a detail page or a side-by-side
//! comparison. Every function returns a `String` (or writes to a writer) so
//! commands decide where the text goes.

use crate::state::{SelectionState, ViewMode};
use crate::styles::color::hex_to_rgb;
use crate::styles::{Category, Metric, Style, color_for_range, format_range};
use colored::Colorize;
use std::io::Write;

const FAVORITE_MARK: &str = "★";
const COMPARE_MARK: &str = "+";
const WRAP_WIDTH: usize = 76;

/// Color swatch for a style's average color
#[must_use]
pub fn swatch(style: &Style) -> String {
    let hex = color_for_range(style.color.as_ref());
    hex_to_rgb(hex).map_or_else(
        || "██".to_string(),
        |(r, g, b)| "██".truecolor(r, g, b).to_string(),
    )
}

/// Favorite and compare markers, padded to a fixed width
#[must_use]
pub fn markers(style: &Style, state: &SelectionState) -> String {
    let favorite = if state.is_favorite(&style.style_id) {
        FAVORITE_MARK.yellow().to_string()
    } else {
        " ".to_string()
    };
    let compared = if state.is_compared(&style.style_id) {
        COMPARE_MARK.cyan().to_string()
    } else {
        " ".to_string()
    };
    format!("{favorite}{compared}")
}

fn heading(style: &Style) -> String {
    format!("{} {}", style.style_id.dimmed(), style.name.bold())
}

fn stat(style: &Style, metric: Metric) -> String {
    format!("{}: {}", metric.label().dimmed(), format_range(style.metric(metric)))
}

/// Multi-line card: heading, category, impression, four vital stats and tags
#[must_use]
pub fn style_card(style: &Style, state: &SelectionState, tag_limit: usize) -> String {
    let mut lines = vec![
        format!("{} {} {}", swatch(style), markers(style, state), heading(style)),
        format!("     {}", style.category_name.dimmed()),
    ];

    if let Some(first) = wrap(&style.overall_impression, WRAP_WIDTH - 5).first() {
        lines.push(format!("     {first}"));
    }

    lines.push(format!(
        "     {:<28}{}",
        stat(style, Metric::Abv),
        stat(style, Metric::Ibu)
    ));
    lines.push(format!(
        "     {:<28}{}",
        stat(style, Metric::OriginalGravity),
        stat(style, Metric::FinalGravity)
    ));

    let tags = style.tag_list();
    if !tags.is_empty() {
        let mut shown: Vec<String> = tags
            .iter()
            .take(tag_limit)
            .map(|t| format!("[{t}]"))
            .collect();
        if tags.len() > tag_limit {
            shown.push(format!("+{}", tags.len() - tag_limit).dimmed().to_string());
        }
        lines.push(format!("     {}", shown.join(" ")));
    }

    lines.join("\n")
}

/// One-line row: id, name, category, ABV and IBU
#[must_use]
pub fn style_row(style: &Style, state: &SelectionState) -> String {
    format!(
        "{} {} {:<6} {:<34} {:<32} ABV {:<14} IBU {}",
        swatch(style),
        markers(style, state),
        style.style_id,
        style.name,
        style.category_name.dimmed(),
        format_range(style.abv.as_ref()),
        format_range(style.ibu.as_ref())
    )
}

/// Render styles in the given view mode
#[must_use]
pub fn style_listing(
    styles: &[&Style],
    state: &SelectionState,
    view_mode: ViewMode,
    tag_limit: usize,
) -> String {
    match view_mode {
        ViewMode::Card => styles
            .iter()
            .map(|s| style_card(s, state, tag_limit))
            .collect::<Vec<_>>()
            .join("\n\n"),
        ViewMode::List => styles
            .iter()
            .map(|s| style_row(s, state))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Full detail page
#[must_use]
pub fn style_detail(style: &Style, state: &SelectionState) -> String {
    let mut out = vec![
        format!("{} {} {}", swatch(style), markers(style, state), heading(style)),
        format!("   {} ({})", style.category_name, style.category_id),
        String::new(),
    ];

    for metric in Metric::ALL {
        out.push(format!("   {:<5}{}", metric.label(), format_range(style.metric(metric))));
    }

    let tags = style.tag_list();
    if !tags.is_empty() {
        out.push(String::new());
        out.push(format!("   {} {}", "Tags:".dimmed(), tags.join(", ")));
    }

    for (label, text) in style.sections() {
        out.push(String::new());
        out.push(label.bold().underline().to_string());
        out.extend(wrap(text, WRAP_WIDTH).into_iter().map(|line| format!("   {line}")));
    }

    out.join("\n")
}

/// Compared styles side by side: vital statistics only
#[must_use]
pub fn compare_table(styles: &[&Style]) -> String {
    const LABEL_WIDTH: usize = 6;
    const COLUMN_WIDTH: usize = 22;

    let mut out = Vec::with_capacity(Metric::ALL.len() + 2);
    let header: String = styles
        .iter()
        .map(|s| format!("{:<COLUMN_WIDTH$}", truncate(&format!("{} {}", s.style_id, s.name), COLUMN_WIDTH - 1)))
        .collect();
    out.push(format!("{:<LABEL_WIDTH$}{}", "", header.bold()));

    let swatches: String = styles
        .iter()
        .map(|s| format!("{}{:<width$}", swatch(s), "", width = COLUMN_WIDTH - 2))
        .collect();
    out.push(format!("{:<LABEL_WIDTH$}{swatches}", ""));

    for metric in Metric::ALL {
        let cells: String = styles
            .iter()
            .map(|s| format!("{:<COLUMN_WIDTH$}", format_range(s.metric(metric))))
            .collect();
        out.push(format!("{:<LABEL_WIDTH$}{}", metric.label(), cells.trim_end()));
    }

    out.join("\n")
}

/// Compared styles as CSV: one row per style, one column per statistic
///
/// # Errors
///
/// Returns `csv::Error` if writing fails.
pub fn write_compare_csv<W: Write>(styles: &[&Style], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["style_id", "name", "category"];
    header.extend(Metric::ALL.iter().map(|m| m.label()));
    header.push("color_hex");
    csv.write_record(&header)?;

    for style in styles {
        let mut record = vec![
            style.style_id.clone(),
            style.name.clone(),
            style.category_name.clone(),
        ];
        record.extend(Metric::ALL.iter().map(|&m| format_range(style.metric(m))));
        record.push(color_for_range(style.color.as_ref()).to_string());
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Category line with its style count; the selected category is highlighted
#[must_use]
pub fn category_line(category: &Category, selected: bool, quiet: bool) -> String {
    if quiet {
        return category.id.clone();
    }
    let line = format!(
        "  {:>4}  {} ({})",
        category.id,
        category.name,
        category.styles.len()
    );
    if selected {
        line.green().bold().to_string()
    } else {
        line
    }
}

/// Tag line; selected tags are marked
#[must_use]
pub fn tag_line(tag: &str, selected: bool, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else if selected {
        format!("  {} {}", "✓".green(), tag.green())
    } else {
        format!("    {tag}")
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
