//! # eplda
//!
//! An unofficial async client for the Premier League football statistics API.
//!
//! ## Features
//!
//! - **Seasons and clubs**: Season lookup by label, first-team clubs, league table
//! - **Rankings**: Club and player leaderboards for any catalogued statistic
//! - **Player data**: Paginated player lists, name search, per-player statistics
//! - **Comparison**: Side-by-side statistics for several players
//! - **Arrow Output**: Listings as typed records or Arrow `RecordBatch` tables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eplda::{Config, EplClient, OutputFormat, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = EplClient::new(Config::default())?;
//!
//!     let season_id = client.resolve_season(Some("2024/25")).await?;
//!     let table = client.get_club_table(Some(&season_id), OutputFormat::Records).await?;
//!
//!     for row in table.into_records().unwrap_or_default() {
//!         println!("{:>2} {} {}", row.position, row.club, row.points);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         EplClient                            │
//! │  seasons · clubs · table · rankings · players · compare      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────┬───┴──────────┬──────────┬────────┐
//! │   HTTP    │  Pagination  │  Normalize   │  Output  │Catalog │
//! ├───────────┼──────────────┼──────────────┼──────────┼────────┤
//! │ GET       │ Page number  │ Wire shapes  │ Records  │ Club   │
//! │ Retry     │ Page limit   │ Id cleanup   │ Arrow    │ Player │
//! │ 429 delay │ Cancellation │ Projections  │ Parquet  │ Detail │
//! └───────────┴──────────────┴──────────────┴──────────┴────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_self)]
#![allow(clippy::match_same_arms)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Known statistic keys
pub mod catalog;

/// HTTP client with retry
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Flat output records
pub mod records;

/// Raw response normalization
pub mod normalize;

/// Record and Arrow output shapes
pub mod output;

/// Multi-player comparison
pub mod compare;

/// Caller-facing client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use catalog::StatCatalog;
pub use client::EplClient;
pub use compare::{Comparison, StatSummary};
pub use config::Config;
pub use output::{Output, StatsOutput};
pub use records::{
    Club, ClubInfo, ClubRanking, ClubResult, Player, PlayerRanking, PlayerStats, Season,
    TableEntry,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
