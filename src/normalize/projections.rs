//! Projections from raw responses to flat records

use super::wire::{
    normalize_id, PlayersPage, RankingItem, RankingPage, SeasonsPage, StandingsDocument,
    StatsDocument, TeamStandingDocument, WireClubInfo, WireFixture, WireName, WirePlayer,
    WireTeam,
};
use crate::error::{Error, Result};
use crate::records::{
    Club, ClubInfo, ClubRanking, ClubResult, Ground, Player, PlayerProfile, PlayerRanking,
    PlayerStats, Season, TableEntry,
};
use crate::types::{JsonValue, StatMap};
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::warn;

/// How many keys to quote in "not found" messages
const EXAMPLE_COUNT: usize = 5;

/// Decode `body` into a wire shape, naming `what` on failure
fn decode<T: DeserializeOwned>(body: &JsonValue, what: &str) -> Result<T> {
    T::deserialize(body).map_err(|e| Error::malformed(format!("unexpected {what} shape: {e}")))
}

// ============================================================================
// Seasons
// ============================================================================

/// Seasons listed under `content`
pub fn seasons(body: &JsonValue) -> Result<Vec<Season>> {
    let page: SeasonsPage = decode(body, "seasons")?;
    let content = page
        .content
        .ok_or_else(|| Error::malformed("seasons response has no 'content'"))?;
    Ok(content
        .into_iter()
        .filter_map(|s| match (s.id.as_ref().and_then(normalize_id), s.label) {
            (Some(id), Some(label)) => Some(Season { id, label }),
            (id, label) => {
                warn!("Skipping season with id {id:?} and label {label:?}");
                None
            }
        })
        .collect())
}

/// Pick the season matching `label`, or the one with the highest id
pub fn resolve_season(seasons: &[Season], label: Option<&str>) -> Result<String> {
    if seasons.is_empty() {
        return Err(Error::no_data("No seasons available"));
    }

    match label {
        Some(label) => seasons
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::not_found(format!("Season '{label}' not found"))),
        None => seasons
            .iter()
            .max_by_key(|s| s.id.parse::<u64>().unwrap_or(0))
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::no_data("No seasons available")),
    }
}

// ============================================================================
// Clubs
// ============================================================================

/// First-team clubs, in upstream order
pub fn clubs(body: &JsonValue, season_id: &str) -> Result<Vec<Club>> {
    if !body.is_array() {
        return Err(Error::malformed("teams response is not an array"));
    }
    let teams: Vec<WireTeam> = decode(body, "teams")?;

    let clubs: Vec<Club> = teams
        .into_iter()
        .filter(|t| t.team_type.as_deref() == Some("FIRST"))
        .filter_map(|t| {
            let id = t.id?.into_string();
            let name = t.short_name.or(t.name).unwrap_or_default();
            Some(Club { name, id })
        })
        .collect();

    if clubs.is_empty() {
        return Err(Error::no_data(format!(
            "No first-team clubs found for season {season_id}"
        )));
    }
    Ok(clubs)
}

/// Ids of `clubs` as a membership set
pub fn club_ids(clubs: &[Club]) -> HashSet<String> {
    clubs.iter().map(|c| c.id.clone()).collect()
}

/// Club details
pub fn club_info(body: &JsonValue) -> Result<ClubInfo> {
    let club: WireClubInfo = decode(body, "club")?;
    let abbreviation = club.abbr.or_else(|| club.club.and_then(|c| c.abbr));
    Ok(ClubInfo {
        id: club.id.into_string(),
        name: club.name,
        short_name: club.short_name,
        abbreviation,
        grounds: club
            .grounds
            .into_iter()
            .map(|g| Ground {
                name: g.name,
                city: g.city,
                capacity: g.capacity.and_then(|c| u64::try_from(c).ok()),
            })
            .collect(),
    })
}

// ============================================================================
// Rankings
// ============================================================================

/// Ranking items paired with their fallback rank; items without a value are skipped
fn ranking_items(body: &JsonValue) -> Result<Vec<(i64, RankingItem, f64)>> {
    let page: RankingPage = decode(body, "ranking")?;
    Ok(page
        .stats
        .map(|s| s.content)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let rank = rank_of(&item, i);
            match item.value {
                Some(value) => Some((rank, item, value)),
                None => {
                    warn!("Skipping ranking row {rank} without a value");
                    None
                }
            }
        })
        .collect())
}

#[allow(clippy::cast_possible_truncation)]
fn rank_of(item: &RankingItem, index: usize) -> i64 {
    item.rank.map_or(index as i64 + 1, |r| r as i64)
}

fn owner_name(name: Option<WireName>) -> String {
    name.map(WireName::into_display).unwrap_or_default()
}

/// Club ranking rows from `stats.content`
pub fn club_rankings(body: &JsonValue, stat: &str) -> Result<Vec<ClubRanking>> {
    let rows: Vec<ClubRanking> = ranking_items(body)?
        .into_iter()
        .map(|(rank, item, value)| ClubRanking {
            rank,
            club: owner_name(item.owner.name),
            value,
        })
        .collect();

    if rows.is_empty() {
        return Err(Error::no_data(format!("No club rankings for '{stat}'")));
    }
    Ok(rows)
}

/// Player ranking rows from `stats.content`
pub fn player_rankings(
    body: &JsonValue,
    stat: &str,
    include_nationality: bool,
) -> Result<Vec<PlayerRanking>> {
    let rows: Vec<PlayerRanking> = ranking_items(body)?
        .into_iter()
        .map(|(rank, item, value)| {
            let owner = item.owner;
            PlayerRanking {
                rank,
                player: owner_name(owner.name),
                club: owner.current_team.and_then(|t| t.name),
                nationality: if include_nationality {
                    owner.national_team.and_then(|n| n.country)
                } else {
                    None
                },
                value,
            }
        })
        .collect();

    if rows.is_empty() {
        return Err(Error::no_data(format!("No player rankings for '{stat}'")));
    }
    Ok(rows)
}

// ============================================================================
// Stats
// ============================================================================

fn stats_document(body: &JsonValue) -> Result<StatsDocument> {
    let doc: StatsDocument = decode(body, "stats")?;
    if doc.stats.is_none() {
        return Err(Error::malformed("stats response has no 'stats'"));
    }
    Ok(doc)
}

fn to_map(doc: &mut StatsDocument) -> StatMap {
    doc.stats
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(|s| (s.name, s.value))
        .collect()
}

/// Name to value map from a flat `stats` array
pub fn stat_map(body: &JsonValue) -> Result<StatMap> {
    let mut doc = stats_document(body)?;
    Ok(to_map(&mut doc))
}

/// One value from a stat map
pub fn select_stat(stats: &StatMap, stat: &str) -> Result<f64> {
    stats.get(stat).copied().ok_or_else(|| {
        let examples: Vec<&str> = stats.keys().take(EXAMPLE_COUNT).map(String::as_str).collect();
        Error::not_found(format!(
            "Statistic '{stat}' not available. Examples: {}",
            examples.join(", ")
        ))
    })
}

/// A player's stat map plus the profile attached to it
pub fn player_stats(body: &JsonValue, player_id: &str) -> Result<PlayerStats> {
    let mut doc = stats_document(body)?;
    let stats = to_map(&mut doc);

    let profile = doc.entity.map(|entity| {
        let info = entity.info.unwrap_or_default();
        PlayerProfile {
            name: owner_name(entity.name),
            position: info.position,
            shirt_number: info.shirt_num.and_then(|n| u32::try_from(n).ok()),
            age: entity.age.and_then(|age| match age {
                JsonValue::Null => None,
                JsonValue::String(s) => Some(s),
                other => Some(other.to_string()),
            }),
        }
    });

    Ok(PlayerStats {
        player_id: player_id.to_string(),
        profile,
        stats,
    })
}

// ============================================================================
// League table
// ============================================================================

/// Rows of `tables[0].entries`, ascending by position
pub fn league_table(body: &JsonValue, season_id: &str) -> Result<Vec<TableEntry>> {
    let doc: StandingsDocument = decode(body, "standings")?;

    let mut rows: Vec<TableEntry> = doc
        .tables
        .into_iter()
        .next()
        .map(|t| t.entries)
        .unwrap_or_default()
        .into_iter()
        .map(|e| TableEntry {
            position: e.position,
            club: e.team.name.unwrap_or_default(),
            played: e.overall.played,
            won: e.overall.won,
            drawn: e.overall.drawn,
            lost: e.overall.lost,
            goals_for: e.overall.goals_for,
            goals_against: e.overall.goals_against,
            goal_difference: e.overall.goals_difference,
            points: e.overall.points,
        })
        .collect();

    if rows.is_empty() {
        return Err(Error::no_data(format!("No league table for season {season_id}")));
    }
    rows.sort_by_key(|r| r.position);
    Ok(rows)
}

// ============================================================================
// Club results
// ============================================================================

fn team_id(fixture: &WireFixture, index: usize) -> Option<String> {
    fixture.teams.get(index)?.team.id.as_ref().and_then(normalize_id)
}

/// One fixture from `club_id`'s side, `None` unless played by it and scored
fn club_result(fixture: WireFixture, club_id: &str) -> Option<ClubResult> {
    let at_home = if team_id(&fixture, 0).as_deref() == Some(club_id) {
        true
    } else if team_id(&fixture, 1).as_deref() == Some(club_id) {
        false
    } else {
        return None;
    };

    let mut teams = fixture.teams.into_iter();
    let (home, away) = (teams.next()?, teams.next()?);
    let (home_score, away_score) = (home.score?, away.score?);
    let (opponent, goals_for, goals_against) = if at_home {
        (away, home_score, away_score)
    } else {
        (home, away_score, home_score)
    };

    let result = match goals_for.cmp(&goals_against) {
        Ordering::Greater => "W",
        Ordering::Equal => "D",
        Ordering::Less => "L",
    };

    Some(ClubResult {
        fixture_id: fixture.id.as_ref().and_then(normalize_id),
        gameweek: fixture.gameweek.and_then(|g| g.gameweek),
        kickoff: fixture.kickoff.and_then(|k| k.label),
        venue: if at_home { "home" } else { "away" }.to_string(),
        opponent: opponent.team.name.unwrap_or_default(),
        goals_for,
        goals_against,
        result: result.to_string(),
    })
}

/// Completed matches of `club_id`, in upstream order
pub fn club_results(body: &JsonValue, club_id: &str, season_id: &str) -> Result<Vec<ClubResult>> {
    let doc: TeamStandingDocument = decode(body, "team standings")?;
    let rows: Vec<ClubResult> = doc
        .fixtures
        .into_iter()
        .filter_map(|f| club_result(f, club_id))
        .collect();

    if rows.is_empty() {
        return Err(Error::no_data(format!(
            "No completed matches for club {club_id} in season {season_id}"
        )));
    }
    Ok(rows)
}

// ============================================================================
// Players
// ============================================================================

/// Every player on one page of `players`; a missing `content` is an empty page
pub fn players_page(body: &JsonValue) -> Result<Vec<WirePlayer>> {
    let page: PlayersPage = decode(body, "players")?;
    Ok(page.content)
}

/// Which players to keep by current club
#[derive(Debug, Clone, Copy)]
pub enum ClubFilter<'a> {
    /// Any club in the season
    AnyOf(&'a HashSet<String>),
    /// Exactly this club
    Only(&'a str),
}

impl ClubFilter<'_> {
    fn keeps(&self, club_id: Option<&str>) -> bool {
        match (self, club_id) {
            (_, None) => false,
            (Self::AnyOf(valid), Some(id)) => valid.contains(id),
            (Self::Only(wanted), Some(id)) => *wanted == id,
        }
    }
}

/// Flatten `players` keeping only those passing `filter`
///
/// Kept rows without a usable id are dropped.
pub fn filter_players(
    players: Vec<WirePlayer>,
    filter: ClubFilter<'_>,
    include_nationality: bool,
) -> Vec<Player> {
    players
        .into_iter()
        .filter_map(|p| {
            let club_id = p
                .current_team
                .as_ref()
                .and_then(|t| t.id.as_ref())
                .and_then(normalize_id);
            if !filter.keeps(club_id.as_deref()) {
                return None;
            }
            let Some(id) = p.id.as_ref().and_then(normalize_id) else {
                warn!("Skipping player {:?} with unusable id {:?}", p.name, p.id);
                return None;
            };
            Some(Player {
                id,
                name: owner_name(p.name),
                position: p.info.and_then(|i| i.position),
                club: p.current_team.and_then(|t| t.name),
                club_id,
                nationality: if include_nationality {
                    p.national_team.and_then(|n| n.country)
                } else {
                    None
                },
            })
        })
        .collect()
}

/// Case-insensitive substring search on display names
pub fn search_players(players: &[Player], name: &str) -> Result<Vec<Player>> {
    let needle = name.to_lowercase();
    let matches: Vec<Player> = players
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if matches.is_empty() {
        return Err(Error::not_found(format!("No players found matching '{name}'")));
    }
    Ok(matches)
}
