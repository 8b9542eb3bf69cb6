//! Flat records produced by the response projections
//!
//! Field order is the column order of the tabular rendering.

use crate::output::TableRecord;
use crate::types::StatMap;
use arrow::datatypes::{DataType, Field};
use serde::{Deserialize, Serialize};

/// A competition season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Numeric id as a string, e.g. `"777"`
    pub id: String,
    /// `YYYY/YY` label
    pub label: String,
}

impl TableRecord for Season {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("label", DataType::Utf8, false),
        ]
    }
}

/// A first-team club in a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    pub name: String,
    pub id: String,
}

impl TableRecord for Club {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("id", DataType::Utf8, false),
        ]
    }
}

/// A club's ground
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ground {
    pub name: String,
    pub city: Option<String>,
    pub capacity: Option<u64>,
}

/// Club details from `clubs/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubInfo {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
    pub grounds: Vec<Ground>,
}

/// A player on a valid club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Option<String>,
    pub club: Option<String>,
    pub club_id: Option<String>,
    /// Only set when nationality is enabled in the config
    pub nationality: Option<String>,
}

impl TableRecord for Player {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, false),
            Field::new("position", DataType::Utf8, true),
            Field::new("club", DataType::Utf8, true),
            Field::new("club_id", DataType::Utf8, true),
            Field::new("nationality", DataType::Utf8, true),
        ]
    }
}

/// One row of a club ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubRanking {
    pub rank: i64,
    pub club: String,
    pub value: f64,
}

impl TableRecord for ClubRanking {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("rank", DataType::Int64, false),
            Field::new("club", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
        ]
    }
}

/// One row of a player ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub rank: i64,
    pub player: String,
    pub club: Option<String>,
    pub nationality: Option<String>,
    pub value: f64,
}

impl TableRecord for PlayerRanking {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("rank", DataType::Int64, false),
            Field::new("player", DataType::Utf8, false),
            Field::new("club", DataType::Utf8, true),
            Field::new("nationality", DataType::Utf8, true),
            Field::new("value", DataType::Float64, false),
        ]
    }
}

/// One row of a stat/value table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: String,
    pub value: f64,
}

impl StatEntry {
    /// Rows of `stats`, sorted by stat name
    pub fn from_map(stats: &StatMap) -> Vec<Self> {
        stats
            .iter()
            .map(|(stat, value)| Self {
                stat: stat.clone(),
                value: *value,
            })
            .collect()
    }
}

impl TableRecord for StatEntry {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("stat", DataType::Utf8, false),
            Field::new("value", DataType::Float64, false),
        ]
    }
}

/// A club's league table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub position: i64,
    pub club: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_difference: i64,
    pub points: i64,
}

impl TableRecord for TableEntry {
    fn fields() -> Vec<Field> {
        let int = |name: &str| Field::new(name, DataType::Int64, false);
        vec![
            int("position"),
            Field::new("club", DataType::Utf8, false),
            int("played"),
            int("won"),
            int("drawn"),
            int("lost"),
            int("goals_for"),
            int("goals_against"),
            int("goal_difference"),
            int("points"),
        ]
    }
}

/// A completed match seen from one club's side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubResult {
    pub fixture_id: Option<String>,
    pub gameweek: Option<i64>,
    /// Kickoff label as published, e.g. `Sat 16 Aug 2025, 15:00 BST`
    pub kickoff: Option<String>,
    /// `home` or `away`
    pub venue: String,
    pub opponent: String,
    pub goals_for: i64,
    pub goals_against: i64,
    /// `W`, `D` or `L`
    pub result: String,
}

impl TableRecord for ClubResult {
    fn fields() -> Vec<Field> {
        vec![
            Field::new("fixture_id", DataType::Utf8, true),
            Field::new("gameweek", DataType::Int64, true),
            Field::new("kickoff", DataType::Utf8, true),
            Field::new("venue", DataType::Utf8, false),
            Field::new("opponent", DataType::Utf8, false),
            Field::new("goals_for", DataType::Int64, false),
            Field::new("goals_against", DataType::Int64, false),
            Field::new("result", DataType::Utf8, false),
        ]
    }
}

/// Player profile attached to `stats/player/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub position: Option<String>,
    pub shirt_number: Option<u32>,
    pub age: Option<String>,
}

/// A player's season statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: String,
    pub profile: Option<PlayerProfile>,
    pub stats: StatMap,
}

impl PlayerStats {
    /// Value of one stat, if reported
    pub fn get(&self, stat: &str) -> Option<f64> {
        self.stats.get(stat).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_entries_sorted_by_name() {
        let mut stats = StatMap::new();
        stats.insert("wins".to_string(), 20.0);
        stats.insert("goals".to_string(), 70.0);
        stats.insert("draws".to_string(), 8.0);

        let rows = StatEntry::from_map(&stats);
        let names: Vec<_> = rows.iter().map(|r| r.stat.as_str()).collect();
        assert_eq!(names, vec!["draws", "goals", "wins"]);
    }

    #[test]
    fn test_fields_follow_serialized_order() {
        let player = Player {
            id: "1".to_string(),
            name: "A".to_string(),
            position: None,
            club: None,
            club_id: None,
            nationality: None,
        };
        let value = serde_json::to_value(&player).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        let fields: Vec<_> = Player::fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(keys, fields);
    }
}
