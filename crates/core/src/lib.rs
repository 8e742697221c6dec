//! Context resolution and live abbreviation tracking.
//!
//! Given a document [`Snapshot`] (text plus syntax tree), this crate answers
//! where in the markup or stylesheet structure a position sits, whether an
//! abbreviation may start there and with which expansion settings. The
//! [`tracker`] follows an abbreviation as it is typed and keeps its preview
//! current; [`commit`] turns it into the edit the host applies.
//!
//! # Modules
//!
//! - [`context`] - HTML, CSS and inline `style` context at a position
//! - [`activation`] - Abbreviation settings derived from a context
//! - [`tracker`] - Abbreviation tracking across edits
//! - [`preview`] - Underline, preview popup and completion entry
//! - [`commit`] - Expansion into text and tab stops
//! - [`commands`] - Tag, comment, wrapping, edit point and number commands

pub mod activation;
pub mod commands;
pub mod commit;
pub mod config;
pub mod context;
pub mod preview;
pub mod snapshot;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use activation::{activation_context, output_options};
pub use commit::{Commit, expand_abbreviation, expand_tracker, handle_tab};
pub use config::{Config, ConfigError, EnableFor};
pub use context::{Context, CssContext, HtmlContext, resolve_context};
pub use snapshot::Snapshot;
pub use tracker::{Tracker, TrackerEvent, update};
