//! Terminal user interface for browsing dependencies.
//!
//! The browser shows the classified dependency list, the packages of the
//! selected entry and the import chain that pulls the selected package in.

mod app;
mod format;

pub use app::{run_app, App, Focus, ImportPath, Mode};
pub use format::DisplayOptions;
