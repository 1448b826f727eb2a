//! Game definitions shared by the Bethesda mod packing crates.
//!
//! This crate knows which archive flavour each supported game uses and which
//! top-level directories make up a game's data layout. Both the classification
//! engine (path normalization) and the archive orchestrator (tool flags and
//! archive extensions) depend on it.

mod game;
mod known_dirs;

pub use game::{GameType, ParseGameError};
pub use known_dirs::{known_directory_names, scan_data_directory};
