//! Upstream response shapes
//!
//! Only the fields the projections read are modelled. Ids arrive as integers,
//! floats (`777.0`) or strings and are normalised to integer strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// An entity id normalised to an integer string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireId(pub String);

impl WireId {
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Normalise a JSON id value, `None` for anything that is not a number
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().and_then(float_id)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if s.bytes().all(|b| b.is_ascii_digit()) {
                Some(s.to_string())
            } else {
                s.parse::<f64>().ok().and_then(float_id)
            }
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_id(f: f64) -> Option<String> {
    if f.is_finite() && f.fract() == 0.0 {
        Some((f as i64).to_string())
    } else {
        None
    }
}

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        normalize_id(&value)
            .map(WireId)
            .ok_or_else(|| de::Error::custom(format!("invalid id {value}")))
    }
}

/// Deserialize an integer that may arrive as a whole float
pub fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value
        .as_i64()
        .or_else(|| normalize_id(&value).and_then(|s| s.parse().ok()))
        .ok_or_else(|| de::Error::custom(format!("expected an integer, got {value}")))
}

/// Optional form of [`whole_number`]
pub fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .or_else(|| normalize_id(&value).and_then(|s| s.parse().ok()))
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {value}"))),
    }
}

/// Display name, either `{"display": ...}` or a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireName {
    Display { display: String },
    Plain(String),
}

impl WireName {
    pub fn into_display(self) -> String {
        match self {
            Self::Display { display } | Self::Plain(display) => display,
        }
    }
}

// ============================================================================
// Seasons
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SeasonsPage {
    pub content: Option<Vec<WireSeason>>,
}

#[derive(Debug, Deserialize)]
pub struct WireSeason {
    pub id: Option<Value>,
    pub label: Option<String>,
}

// ============================================================================
// Clubs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    pub id: Option<WireId>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub team_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireClubInfo {
    pub id: WireId,
    pub name: String,
    pub short_name: Option<String>,
    pub abbr: Option<String>,
    pub club: Option<WireClubRef>,
    #[serde(default)]
    pub grounds: Vec<WireGround>,
}

#[derive(Debug, Deserialize)]
pub struct WireClubRef {
    pub abbr: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireGround {
    pub name: String,
    pub city: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub capacity: Option<i64>,
}

// ============================================================================
// Rankings
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RankingPage {
    pub stats: Option<RankingContent>,
}

#[derive(Debug, Deserialize)]
pub struct RankingContent {
    #[serde(default)]
    pub content: Vec<RankingItem>,
}

#[derive(Debug, Deserialize)]
pub struct RankingItem {
    pub rank: Option<f64>,
    #[serde(default)]
    pub owner: RankingOwner,
    pub value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingOwner {
    pub name: Option<WireName>,
    pub current_team: Option<TeamRef>,
    pub national_team: Option<NationalTeam>,
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub id: Option<Value>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NationalTeam {
    pub country: Option<String>,
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatsDocument {
    pub stats: Option<Vec<WireStat>>,
    pub entity: Option<WireEntity>,
}

#[derive(Debug, Deserialize)]
pub struct WireStat {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct WireEntity {
    pub name: Option<WireName>,
    pub info: Option<WireInfo>,
    pub age: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireInfo {
    pub position: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub shirt_num: Option<i64>,
}

// ============================================================================
// League table
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StandingsDocument {
    #[serde(default)]
    pub tables: Vec<WireTable>,
}

#[derive(Debug, Deserialize)]
pub struct WireTable {
    #[serde(default)]
    pub entries: Vec<WireTableEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WireTableEntry {
    #[serde(deserialize_with = "whole_number")]
    pub position: i64,
    pub team: TeamRef,
    pub overall: WireOverall,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOverall {
    #[serde(deserialize_with = "whole_number")]
    pub played: i64,
    #[serde(deserialize_with = "whole_number")]
    pub won: i64,
    #[serde(deserialize_with = "whole_number")]
    pub drawn: i64,
    #[serde(deserialize_with = "whole_number")]
    pub lost: i64,
    #[serde(deserialize_with = "whole_number")]
    pub goals_for: i64,
    #[serde(deserialize_with = "whole_number")]
    pub goals_against: i64,
    #[serde(deserialize_with = "whole_number")]
    pub goals_difference: i64,
    #[serde(deserialize_with = "whole_number")]
    pub points: i64,
}

// ============================================================================
// Club results
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TeamStandingDocument {
    #[serde(default)]
    pub fixtures: Vec<WireFixture>,
}

#[derive(Debug, Deserialize)]
pub struct WireFixture {
    pub id: Option<Value>,
    pub gameweek: Option<WireGameweek>,
    pub kickoff: Option<WireKickoff>,
    #[serde(default)]
    pub teams: Vec<WireFixtureTeam>,
}

#[derive(Debug, Deserialize)]
pub struct WireGameweek {
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub gameweek: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WireKickoff {
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireFixtureTeam {
    pub team: TeamRef,
    #[serde(default, deserialize_with = "optional_whole_number")]
    pub score: Option<i64>,
}

// ============================================================================
// Players
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlayersPage {
    #[serde(default)]
    pub content: Vec<WirePlayer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    /// Read only for players a filter keeps
    pub id: Option<Value>,
    pub name: Option<WireName>,
    pub info: Option<WirePlayerInfo>,
    pub current_team: Option<WirePlayerTeam>,
    pub national_team: Option<WireCountry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePlayerInfo {
    pub position: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePlayerTeam {
    pub id: Option<Value>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCountry {
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(777), Some("777") ; "integer")]
    #[test_case(json!(777.0), Some("777") ; "whole float")]
    #[test_case(json!("719"), Some("719") ; "string")]
    #[test_case(json!(" 12.0 "), Some("12") ; "float string")]
    #[test_case(json!(1.5), None ; "fractional")]
    #[test_case(json!(null), None ; "null")]
    #[test_case(json!(""), None ; "empty string")]
    fn test_normalize_id(value: Value, expected: Option<&str>) {
        assert_eq!(normalize_id(&value).as_deref(), expected);
    }

    #[test]
    fn test_wire_name_shapes() {
        let display: WireName =
            serde_json::from_value(json!({"display": "Mohamed Salah", "first": "Mohamed"}))
                .unwrap();
        let plain: WireName = serde_json::from_value(json!("Arsenal")).unwrap();
        assert_eq!(display.into_display(), "Mohamed Salah");
        assert_eq!(plain.into_display(), "Arsenal");
    }

    #[test]
    fn test_overall_accepts_whole_floats() {
        let overall: WireOverall = serde_json::from_value(json!({
            "played": 10.0, "won": 8, "drawn": 1, "lost": 1,
            "goalsFor": 25, "goalsAgainst": 8, "goalsDifference": 17, "points": 25.0
        }))
        .unwrap();
        assert_eq!(overall.played, 10);
        assert_eq!(overall.points, 25);
    }

    #[test]
    fn test_wire_id_rejects_objects() {
        let result: Result<WireId, _> = serde_json::from_value(json!({"id": 1}));
        assert!(result.is_err());
    }
}
