//! Dataset catalog
//!
//! The set of selectable guideline files is fixed at build time. A dataset id
//! is resolved against [`CATALOG`]; the file itself is fetched through a
//! [`DatasetLoader`].

pub mod loader;

pub use loader::{
    DatasetLoader, FileLoader, LoadError, LoadMessage, LoadStatus, LoadTicket, LoadedDataset,
    MemoryLoader, load_dataset, spawn_load,
};

use serde::Serialize;

/// Dataset selected when nothing has been persisted
pub const DEFAULT_DATASET_ID: &str = "bjcp-2021";

/// One selectable dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataSource {
    /// Stable identifier used in preferences and on the command line
    pub id: &'static str,
    pub display_name: &'static str,
    /// File name, resolved against the configured data directory
    pub file_ref: &'static str,
    /// Trusted inline markup (may contain a hyperlink)
    pub description: &'static str,
}

/// Every dataset known to the application, in display order
pub const CATALOG: &[DataSource] = &[
    DataSource {
        id: "bjcp-2021",
        display_name: "BJCP 2021 Beer",
        file_ref: "bjcp_styleguide-2021.json",
        description: "The 2021 <a href=\"https://www.bjcp.org/style/2021/beer/\">BJCP Beer Style Guidelines</a>.",
    },
    DataSource {
        id: "bjcp-2015-mead",
        display_name: "BJCP 2015 Mead",
        file_ref: "bjcp_styleguide-2015-mead.json",
        description: "Mead categories from the <a href=\"https://www.bjcp.org/style/2015/mead/\">2015 BJCP guidelines</a>.",
    },
    DataSource {
        id: "bjcp-2015-cider",
        display_name: "BJCP 2015 Cider",
        file_ref: "bjcp_styleguide-2015-cider.json",
        description: "Cider and perry categories from the <a href=\"https://www.bjcp.org/style/2015/cider/\">2015 BJCP guidelines</a>.",
    },
    DataSource {
        id: "bjcp-2021-es",
        display_name: "BJCP 2021 Cerveza (ES)",
        file_ref: "bjcp_styleguide-2021-es.json",
        description: "Spanish translation of the <a href=\"https://www.bjcp.org/\">BJCP 2021</a> beer guidelines.",
    },
];

/// Look up a dataset by id
#[must_use]
pub fn find(id: &str) -> Option<&'static DataSource> {
    CATALOG.iter().find(|source| source.id == id)
}

/// Whether `id` names a catalog entry
#[must_use]
pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

/// Strip inline markup from a description for plain-text output
///
/// Tags are removed, their text content is kept.
#[must_use]
pub fn plain_description(description: &str) -> String {
    let mut out = String::with_capacity(description.len());
    let mut in_tag = false;
    for c in description.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
