//! Terminal output for runs.
//!
//! - [`Reporter`] turns progress events and summaries into lines
//! - [`Theme`] holds the terminal styles

pub mod output;
pub mod theme;

pub use output::{format_duration, OutputMode, Reporter};
pub use theme::Theme;
