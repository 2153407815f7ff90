//! Browse command - interactive action loop
//!
//! Each input line is parsed into a [`BrowseCommand`]. Most commands map to a
//! single [`Action`] dispatched on the session; the rest print views of the
//! current state.
//!
//! ```text
//! stylebook> search citrus
//! stylebook> category 21
//! stylebook> tag bitter
//! stylebook> fav 21A
//! stylebook> + 21A
//! stylebook> compare
//! ```

use crate::{
    Result,
    cli::FilterArgs,
    dataset::CATALOG,
    output,
    session::{LoadOutcome, Session},
    state::{Action, ViewMode},
};
use std::io::{BufRead, Write};
use std::time::Duration;

const PROMPT: &str = "stylebook> ";
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

const HELP: &str = "\
Commands:
  list | ls                 show the visible styles
  show <ID>                 full detail of a style
  search <TEXT>             set the search query (no text clears it)
  category <ID> | all       select a category, or all categories
  favorites                 show only favorite styles
  tag <TAG>                 toggle a tag filter
  tags <TAG>...             replace the tag filters
  fav <ID>                  toggle a favorite
  + <ID> / - <ID>           add to / remove from the compare list
  compare [clear]           show or clear the comparison
  view card|list            set the layout
  use <DATASET_ID>          switch dataset
  categories | datasets     list categories or datasets
  alltags                   list every tag in the dataset
  clear                     clear query, category and tags
  help                      this text
  quit | exit | q           leave";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Dispatch(Action),
    List,
    Show(String),
    Compare,
    Categories,
    AllTags,
    Datasets,
    Help,
    Quit,
}

/// Parse one input line
///
/// A blank line lists the visible styles.
///
/// # Errors
/// Returns a message for unknown commands or missing arguments
pub fn parse_line(line: &str) -> std::result::Result<BrowseCommand, String> {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let required = |what: &str| {
        if rest.is_empty() {
            Err(format!("'{command}' needs {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => BrowseCommand::List,
        "show" => BrowseCommand::Show(required("a style id")?),
        "search" | "/" => BrowseCommand::Dispatch(Action::SetSearch(rest.to_string())),
        "category" | "cat" => match rest {
            "" | "all" => BrowseCommand::Dispatch(Action::SetCategory(None)),
            id => BrowseCommand::Dispatch(Action::SetCategory(Some(id.to_string()))),
        },
        "all" => BrowseCommand::Dispatch(Action::SetCategory(None)),
        "favorites" | "favs" => BrowseCommand::Dispatch(Action::ShowFavorites),
        "tag" => BrowseCommand::Dispatch(Action::ToggleTag(required("a tag")?)),
        "tags" => BrowseCommand::Dispatch(Action::SetTags(
            rest.split_whitespace().map(str::to_string).collect(),
        )),
        "fav" => BrowseCommand::Dispatch(Action::ToggleFavorite(required("a style id")?)),
        "+" => BrowseCommand::Dispatch(Action::AddToCompare(required("a style id")?)),
        "-" => BrowseCommand::Dispatch(Action::RemoveFromCompare(required("a style id")?)),
        "compare" => match rest {
            "" => BrowseCommand::Compare,
            "clear" => BrowseCommand::Dispatch(Action::ClearCompare),
            other => return Err(format!("Unknown compare option '{other}'")),
        },
        "view" => BrowseCommand::Dispatch(Action::SetViewMode(
            required("a mode")?.parse::<ViewMode>()?,
        )),
        "use" => BrowseCommand::Dispatch(Action::SetDataSource(required("a dataset id")?)),
        "categories" | "cats" => BrowseCommand::Categories,
        "alltags" => BrowseCommand::AllTags,
        "datasets" => BrowseCommand::Datasets,
        "clear" => BrowseCommand::Dispatch(Action::ClearFilters),
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for a list")),
    };
    Ok(parsed)
}

/// Execute the browse command on stdin/stdout
///
/// # Errors
/// Returns an error if reading input or writing output fails
pub fn execute(session: &mut Session, filter: &FilterArgs, tag_limit: usize, quiet: bool) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(session, filter, stdin.lock(), stdout.lock(), tag_limit, quiet)
}

/// Run the loop over arbitrary input and output
///
/// # Errors
/// Returns an error if reading input or writing output fails
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    filter: &FilterArgs,
    input: R,
    mut out: W,
    tag_limit: usize,
    quiet: bool,
) -> Result<()> {
    if session.status().is_loading() {
        if !quiet {
            writeln!(out, "Loading {}...", session.state().active_data_source_id)?;
        }
        report_load(session.wait_for_load(LOAD_TIMEOUT), &mut out)?;
    } else if let Some(message) = session.load_error() {
        writeln!(out, "Dataset failed to load: {message}")?;
    }

    session.dispatch_all(filter.actions());
    if !quiet {
        writeln!(out, "{}. Type 'help' for commands.", session.result_summary())?;
    }

    let mut lines = input.lines();
    loop {
        if !quiet {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;

        match parse_line(&line) {
            Ok(BrowseCommand::Quit) => break,
            Ok(command) => handle(session, command, &mut out, tag_limit, quiet)?,
            Err(message) => writeln!(out, "{message}")?,
        }
    }
    Ok(())
}

fn handle<W: Write>(
    session: &mut Session,
    command: BrowseCommand,
    out: &mut W,
    tag_limit: usize,
    quiet: bool,
) -> Result<()> {
    match command {
        BrowseCommand::Dispatch(action) => {
            let ticket = session.dispatch(action);
            if ticket.is_some() {
                report_load(session.wait_for_load(LOAD_TIMEOUT), out)?;
            }
            if !quiet {
                writeln!(out, "{}", session.result_summary())?;
            }
        }
        BrowseCommand::List => {
            let visible = session.visible_styles();
            if visible.is_empty() {
                writeln!(out, "No styles match the current filters.")?;
            } else {
                let state = session.state();
                writeln!(out, "{}", output::style_listing(&visible, state, state.view_mode, tag_limit))?;
            }
        }
        BrowseCommand::Show(id) => match super::show::resolve(session, &id) {
            Ok(style) => writeln!(out, "{}", output::style_detail(style, session.state()))?,
            Err(e) => writeln!(out, "{e}")?,
        },
        BrowseCommand::Compare => {
            let styles = session.compare_styles();
            if styles.is_empty() {
                writeln!(out, "Compare list is empty. Add styles with '+ <ID>'.")?;
            } else {
                writeln!(out, "{}", output::compare_table(&styles))?;
            }
        }
        BrowseCommand::Categories => {
            let selected = session.state().selected_category();
            for category in session.categories() {
                let line = output::category_line(category, selected == Some(category.id.as_str()), quiet);
                writeln!(out, "{line}")?;
            }
        }
        BrowseCommand::AllTags => {
            let selected = &session.state().selected_tags;
            for tag in session.tags() {
                writeln!(out, "{}", output::tag_line(tag, selected.contains(tag), quiet))?;
            }
        }
        BrowseCommand::Datasets => {
            let active = session.state().active_data_source_id.as_str();
            for source in CATALOG {
                let marker = if source.id == active { '*' } else { ' ' };
                writeln!(out, "{marker} {:<16} {}", source.id, source.display_name)?;
            }
        }
        BrowseCommand::Help => writeln!(out, "{HELP}")?,
        BrowseCommand::Quit => {}
    }
    Ok(())
}

fn report_load<W: Write>(outcome: Option<LoadOutcome>, out: &mut W) -> Result<()> {
    match outcome {
        Some(LoadOutcome::Failed(message)) => writeln!(out, "Dataset failed to load: {message}")?,
        None => writeln!(out, "Dataset is still loading")?,
        Some(LoadOutcome::Applied { .. } | LoadOutcome::Stale) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetLoader, MemoryLoader};
    use crate::db::MemoryStore;
    use crate::state::Scope;
    use crate::testing::sample_document;
    use std::io::Cursor;
    use std::sync::Arc;

    fn session() -> Session {
        let loader: Arc<dyn DatasetLoader> = Arc::new(MemoryLoader::new().with("bjcp-2021", sample_document()));
        let mut session = Session::open(Box::new(MemoryStore::new()), loader);
        session.load_blocking();
        session
    }

    fn run_script(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run(session, &FilterArgs::default(), Cursor::new(script), &mut out, 4, true).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(""), Ok(BrowseCommand::List));
        assert_eq!(
            parse_line("search  citrus hops "),
            Ok(BrowseCommand::Dispatch(Action::SetSearch("citrus hops".into())))
        );
        assert_eq!(
            parse_line("category all"),
            Ok(BrowseCommand::Dispatch(Action::SetCategory(None)))
        );
        assert_eq!(
            parse_line("tags bitter hoppy"),
            Ok(BrowseCommand::Dispatch(Action::SetTags(vec!["bitter".into(), "hoppy".into()])))
        );
        assert_eq!(
            parse_line("view list"),
            Ok(BrowseCommand::Dispatch(Action::SetViewMode(ViewMode::List)))
        );
        assert_eq!(parse_line("Q"), Ok(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("show").is_err());
        assert!(parse_line("view grid").is_err());
        assert!(parse_line("compare everything").is_err());
        assert!(parse_line("dance").unwrap_err().contains("help"));
    }

    #[test]
    fn test_script_drives_state() {
        let mut session = session();
        run_script(&mut session, "category 21\ntag bitter\nfav 21A\n+ 21A\n+ 1A\nquit\nsearch ignored\n");

        let state = session.state();
        assert_eq!(state.scope, Scope::Category("21".into()));
        assert_eq!(state.selected_tags, vec!["bitter"]);
        assert!(state.is_favorite("21A"));
        assert_eq!(state.compare_list, vec!["21A", "1A"]);
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn test_quiet_list_prints_rows() {
        let mut session = session();
        let out = run_script(&mut session, "favorites\nfav 20C\nview list\nls\n");

        assert_eq!(out.lines().filter(|l| l.contains("20C")).count(), 1);
        assert!(out.contains("Imperial Stout"));
    }

    #[test]
    fn test_unknown_style_reports_error() {
        let mut session = session();
        let out = run_script(&mut session, "show 99Z\n");
        assert!(out.contains("Style not found: 99Z"));
    }

    #[test]
    fn test_initial_filter_applied() {
        let mut session = session();
        let filter = FilterArgs {
            category: Some("1".into()),
            ..FilterArgs::default()
        };
        run(&mut session, &filter, Cursor::new(""), Vec::new(), 4, true).unwrap();
        assert_eq!(session.visible_styles().len(), 2);
    }
}
