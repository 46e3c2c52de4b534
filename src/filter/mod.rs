//! Visibility filtering over the classified dependency list.
//!
//! [`EntryList`] recomputes every `visible` flag from scratch on each
//! filter call, either from a substring query or from a category priority.

mod entries;

pub use entries::{DepEntry, EntryList};
