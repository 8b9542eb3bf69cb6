//! Response normalizer
//!
//! Projects nested upstream JSON into the flat records of [`crate::records`].
//! Projections are pure: they never issue requests, and any membership set
//! they filter with is passed in by the caller.

mod projections;
pub mod wire;

pub use projections::{
    club_ids, club_info, club_rankings, club_results, clubs, filter_players, league_table,
    player_rankings, player_stats, players_page, resolve_season, search_players, seasons,
    select_stat, stat_map, ClubFilter,
};
pub use wire::normalize_id;

#[cfg(test)]
mod tests;
