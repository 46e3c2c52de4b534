//! Classification of external packages.
//!
//! Every package in the flattened external set gets exactly one
//! [`Category`]: the first matching custom rule, else the built-in
//! standard library category, else the vendor catch-all.

mod category;
mod classifier;

pub use category::{parse_color, Category, STDLIB_COLOR, VENDOR_COLOR};
pub use classifier::{ClassificationRule, Classifier};
