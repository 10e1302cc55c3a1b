//! # Menu
//!
//! Everything about a single dining hall's menu: the wire models of the
//! dining API, the two-hop fetch against it, and the nutrition helpers that
//! turn free-text fields into numbers.
//!
//! ## Flow
//! 1. Fetch the meal periods served on a date.
//! 2. Pick the requested period by name, or the first one of the day.
//! 3. Fetch that period's menu and hand it back unmodified.
//!
//! ## Notes
//! - Nutrient values are free text (`"12g"`, `"Less than 1g"`, `"-"`), calories
//!   may be a number or a string. Unparseable values count as zero.
//! - Dietary flags only count when their icon is set.
pub mod error;
pub mod filters;
pub mod models;
pub mod nutrients;
pub mod remote;

pub use error::DiningError;
pub use remote::DiningClient;
