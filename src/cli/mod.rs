//! CLI module
//!
//! Command-line interface over [`crate::EplClient`].
//!
//! # Commands
//!
//! - `seasons`, `season` - List seasons, resolve one to its id
//! - `clubs`, `club-info`, `club-results`, `table` - Clubs, their matches and the league table
//! - `club-rankings`, `club-stats` - Club statistics
//! - `player-rankings`, `players`, `search`, `player-id`, `player-stats` - Player data
//! - `compare` - Side-by-side player statistics
//! - `stat-types` - Known statistic keys

mod commands;
mod runner;

pub use commands::{CatalogArg, Cli, Commands, OutputFormat};
pub use runner::Runner;
