//! Stylebook - browse, filter and compare beverage style guidelines
//!
//! This library loads a style guideline dataset (BJCP beer, mead or cider),
//! indexes it by category and tag, and drives a small selection state machine
//! (search query, category or favorites lens, tag filters, compare list) over
//! it. View mode and the active dataset persist in an embedded database.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod db;
pub mod filters;
pub mod logging;
pub mod output;
pub mod session;
pub mod state;
pub mod styles;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum StylebookError {
    /// Preference storage error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Dataset could not be loaded
    #[error("Dataset error: {0}")]
    LoadError(#[from] dataset::LoadError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// CSV output failed
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// No style with this id in the active dataset
    #[error("Style not found: {0}")]
    StyleNotFound(String),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StylebookError>;
