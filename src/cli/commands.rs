//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Premier League statistics from the command line
#[derive(Parser, Debug)]
#[command(name = "eplda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override one config value, e.g. `--set request.timeout=10`
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// Season label, e.g. 2024/25 (latest season when omitted)
    #[arg(short, long, global = true, conflicts_with = "season_id")]
    pub season: Option<String>,

    /// Season id, skipping the season lookup
    #[arg(long, global = true)]
    pub season_id: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Also write tabular results to this Parquet file
    #[arg(long, value_name = "PATH", global = true)]
    pub parquet: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every season of the competition
    Seasons,

    /// Print the id of the selected season
    Season,

    /// List first-team clubs
    Clubs,

    /// Show details of one club
    ClubInfo {
        /// Club id
        club_id: String,
    },

    /// List a club's completed matches
    ClubResults {
        /// Club id
        club_id: String,
    },

    /// Show the league table
    Table,

    /// Rank clubs by a statistic
    ClubRankings {
        /// Statistic key, see `stat-types --catalog club`
        stat: String,
    },

    /// Show a club's season statistics
    ClubStats {
        /// Club id
        club_id: String,

        /// Only this statistic
        #[arg(long)]
        stat: Option<String>,
    },

    /// Rank players by a statistic
    PlayerRankings {
        /// Statistic key, see `stat-types --catalog player`
        stat: String,
    },

    /// List players
    Players {
        /// Only players of this club id
        #[arg(long)]
        club: Option<String>,
    },

    /// Search players by name
    Search {
        /// Part of a player's name
        name: String,
    },

    /// Print the id of the first player matching a name
    PlayerId {
        /// Part of a player's name
        name: String,
    },

    /// Show a player's season statistics
    PlayerStats {
        /// Player id
        player_id: String,
    },

    /// Compare two or more players
    Compare {
        /// Player names
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,

        /// Statistics to compare (comma-separated, empty = all reported)
        #[arg(long, value_delimiter = ',')]
        stats: Vec<String>,
    },

    /// List known statistic keys
    StatTypes {
        /// Which catalog to list
        #[arg(long, default_value = "player")]
        catalog: CatalogArg,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output on one line
    Json,
    /// Indented JSON
    Pretty,
    /// Aligned text table
    Table,
}

/// Stat catalog selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CatalogArg {
    /// Club ranking keys
    Club,
    /// Player ranking keys
    Player,
    /// Club statistics keys
    ClubDetail,
}

impl From<CatalogArg> for crate::catalog::StatCatalog {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Club => Self::ClubRankings,
            CatalogArg::Player => Self::PlayerRankings,
            CatalogArg::ClubDetail => Self::ClubDetail,
        }
    }
}
