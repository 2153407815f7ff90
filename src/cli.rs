//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for stylebook using the
//! `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive action loop over the selection state (default)
//! - **list**: Filter styles by query, category and tags
//! - **show**: Full detail for one style
//! - **compare**: Vital statistics of several styles side by side
//! - **categories** / **tags**: The indices of the loaded dataset
//! - **datasets** / **use**: The dataset catalog and the active dataset
//! - **view**: Persisted card/list layout
//!
//! # Design Features
//!
//! - Filter flags translate into the same actions the browse loop dispatches
//! - Global `--quiet` flag for scripting-friendly output
//! - Global `--dataset` to browse another dataset without persisting it
//! - Command aliases (e.g., `b` for `browse`, `ls` for `list`)

use crate::config::ConfigKey;
use crate::state::{Action, ViewMode};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "stylebook")]
#[command(about = "Browse, filter and compare beverage style guidelines", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use this dataset for the current invocation only
    #[arg(short = 'd', long = "dataset", value_name = "DATASET_ID", global = true)]
    pub dataset: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., card_tag_limit=6)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve
        #[arg(value_name = "KEY")]
        key: ConfigKey,
    },

    /// Print every configuration value
    List,
}

/// Filter arguments shared by `list` and `browse`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Free-text query over names, descriptions, ids and tags
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Restrict to one category id
    #[arg(short = 'c', long = "category", value_name = "CATEGORY_ID", conflicts_with = "favorites")]
    pub category: Option<String>,

    /// Require a tag (can specify multiple: -t tag1 -t tag2)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Only styles marked as favorite in this session
    #[arg(short = 'f', long = "favorites")]
    pub favorites: bool,
}

impl FilterArgs {
    /// Actions that put a fresh selection state into the requested filter
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(query) = &self.query {
            actions.push(Action::SetSearch(query.clone()));
        }
        if self.favorites {
            actions.push(Action::ShowFavorites);
        } else if let Some(category) = &self.category {
            actions.push(Action::SetCategory(Some(category.clone())));
        }
        if !self.tags.is_empty() {
            actions.push(Action::SetTags(self.tags.clone()));
        }
        actions
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactive browsing session (default)
    #[command(visible_alias = "b")]
    Browse {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List styles matching the filters
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Layout for this listing (defaults to the persisted view mode)
        #[arg(long = "view", value_name = "MODE")]
        view: Option<ViewMode>,

        /// Mark styles as favorite before listing (session-local)
        #[arg(long = "favorite", value_name = "STYLE_ID")]
        favorite_ids: Vec<String>,
    },

    /// Show full details of a style
    #[command(visible_alias = "s")]
    Show {
        /// Style id (e.g. 21A)
        #[arg(value_name = "STYLE_ID")]
        style_id: String,
    },

    /// Compare up to four styles side by side
    #[command(visible_alias = "cmp")]
    Compare {
        /// Style ids, in column order
        #[arg(value_name = "STYLE_ID", required = true, num_args = 1..)]
        style_ids: Vec<String>,

        /// Write the comparison as CSV
        #[arg(long = "csv")]
        csv: bool,
    },

    /// List categories of the active dataset
    #[command(visible_alias = "cats")]
    Categories,

    /// List tags of the active dataset
    Tags,

    /// List the dataset catalog
    Datasets,

    /// Switch the active dataset (persisted)
    Use {
        #[arg(value_name = "DATASET_ID")]
        dataset_id: String,
    },

    /// Set the default layout (persisted)
    View {
        #[arg(value_name = "MODE")]
        mode: ViewMode,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            filter: FilterArgs::default(),
        })
    }
}

/// Split a `KEY=VALUE` setting
///
/// # Errors
///
/// Returns a message if there is no `=` or the key is unknown.
pub fn parse_setting(setting: &str) -> Result<(ConfigKey, String), String> {
    let (key, value) = setting
        .split_once('=')
        .ok_or_else(|| "Invalid format. Use: stylebook config set key=value".to_string())?;
    let key = key.parse::<ConfigKey>().map_err(|e| e.to_string())?;
    Ok((key, value.to_string()))
}
