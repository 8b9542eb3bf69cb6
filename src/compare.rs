//! Multi-player comparison
//!
//! Names are resolved against one player-list snapshot, each player's stats
//! are fetched independently, and the comparison succeeds once at least two
//! players made it through both steps.

use crate::error::{Error, Result};
use crate::output::{json_to_arrow, with_season_metadata};
use crate::records::{Player, PlayerStats};
use crate::types::JsonValue;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Minimum number of players a comparison needs
pub const MIN_PLAYERS: usize = 2;

/// Spread of one stat across the compared players
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl StatSummary {
    /// Summary of `values`, `None` when empty
    #[allow(clippy::cast_precision_loss)]
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// A resolved player and the compared stat values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedPlayer {
    /// The name as requested
    pub query: String,
    pub player: Player,
    /// Compared stats; `None` when the player has no value for one
    pub values: BTreeMap<String, Option<f64>>,
}

/// Result of comparing players
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub season_id: String,
    pub stats: Vec<String>,
    pub players: Vec<ComparedPlayer>,
    /// Per-stat summary over the players reporting it
    pub summary: BTreeMap<String, Option<StatSummary>>,
    /// Why each unresolved name was dropped
    pub failures: Vec<String>,
}

impl Comparison {
    /// Assemble a comparison from the players that resolved with stats
    ///
    /// Without `stats`, every stat reported by any resolved player is
    /// compared, in name order.
    pub fn build(
        season_id: &str,
        resolved: Vec<(String, Player, PlayerStats)>,
        failures: Vec<String>,
        stats: Option<&[String]>,
    ) -> Result<Self> {
        if resolved.len() < MIN_PLAYERS {
            let mut failures = failures;
            if failures.is_empty() {
                failures.push(format!(
                    "only {} player(s) resolved, need {MIN_PLAYERS}",
                    resolved.len()
                ));
            }
            return Err(Error::Comparison { failures });
        }

        let stats: Vec<String> = match stats {
            Some(stats) if !stats.is_empty() => stats.to_vec(),
            _ => resolved
                .iter()
                .flat_map(|(_, _, s)| s.stats.keys().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        let players: Vec<ComparedPlayer> = resolved
            .into_iter()
            .map(|(query, player, player_stats)| ComparedPlayer {
                query,
                player,
                values: stats
                    .iter()
                    .map(|stat| (stat.clone(), player_stats.get(stat)))
                    .collect(),
            })
            .collect();

        let summary = stats
            .iter()
            .map(|stat| {
                let values: Vec<f64> = players
                    .iter()
                    .filter_map(|p| p.values.get(stat).copied().flatten())
                    .collect();
                (stat.clone(), StatSummary::of(&values))
            })
            .collect();

        Ok(Self {
            season_id: season_id.to_string(),
            stats,
            players,
            summary,
            failures,
        })
    }

    /// One row per player: name, club, then a column per compared stat
    ///
    /// A stat named like an identity column gets a `stat_` prefix.
    pub fn table(&self) -> Result<RecordBatch> {
        let rows: Vec<JsonValue> = self
            .players
            .iter()
            .map(|p| {
                let mut row = serde_json::Map::new();
                row.insert("player".to_string(), JsonValue::String(p.player.name.clone()));
                row.insert(
                    "club".to_string(),
                    p.player.club.clone().map_or(JsonValue::Null, JsonValue::String),
                );
                for stat in &self.stats {
                    let value = p
                        .values
                        .get(stat)
                        .copied()
                        .flatten()
                        .and_then(serde_json::Number::from_f64)
                        .map_or(JsonValue::Null, JsonValue::Number);
                    row.insert(stat_column(stat), value);
                }
                JsonValue::Object(row)
            })
            .collect();

        let batch = json_to_arrow(&rows, None)?;
        let schema = with_season_metadata(batch.schema().as_ref().clone(), Some(&self.season_id));
        Ok(batch.with_schema(std::sync::Arc::new(schema))?)
    }
}

/// Identity columns of [`Comparison::table`]
const IDENTITY_COLUMNS: [&str; 2] = ["player", "club"];

fn stat_column(stat: &str) -> String {
    if IDENTITY_COLUMNS.contains(&stat) {
        format!("stat_{stat}")
    } else {
        stat.to_string()
    }
}

/// Trim `names` and reject fewer than two or duplicates
pub fn validate_names(names: &[String]) -> Result<Vec<String>> {
    let names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();

    if names.len() < MIN_PLAYERS {
        return Err(Error::invalid_argument(format!(
            "At least {MIN_PLAYERS} player names are required for a comparison"
        )));
    }
    if let Some(empty) = names.iter().position(String::is_empty) {
        return Err(Error::invalid_argument(format!(
            "Player name #{} is empty",
            empty + 1
        )));
    }

    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.to_lowercase()) {
            return Err(Error::invalid_argument(format!(
                "Duplicate player name '{name}'"
            )));
        }
    }
    Ok(names)
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Find `name` in `players`
///
/// Tries an exact match, then case-insensitive, then case-insensitive with
/// whitespace removed, then a case-insensitive substring.
pub fn resolve_name<'a>(players: &'a [Player], name: &str) -> Option<&'a Player> {
    let lower = name.to_lowercase();
    let squashed = squash(name);

    players
        .iter()
        .find(|p| p.name == name)
        .or_else(|| players.iter().find(|p| p.name.to_lowercase() == lower))
        .or_else(|| players.iter().find(|p| squash(&p.name) == squashed))
        .or_else(|| {
            players
                .iter()
                .find(|p| p.name.to_lowercase().contains(&lower))
        })
}
