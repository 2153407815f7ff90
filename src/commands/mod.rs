//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs against a loaded [`Session`](crate::session::Session).

pub mod browse;
pub mod compare;
pub mod datasets;
pub mod index;
pub mod list;
pub mod show;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use compare::execute as compare;
pub use datasets::{list as datasets, set_view, use_dataset};
pub use index::{categories, tags};
pub use list::execute as list;
pub use show::execute as show;
