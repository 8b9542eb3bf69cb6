//! Tests for the response projections

use super::*;
use crate::error::Error;
use crate::records::Season;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;

fn season_list() -> Vec<Season> {
    seasons(&json!({"content": [
        {"id": 777.0, "label": "2025/26"},
        {"id": 719.0, "label": "2024/25"},
        {"id": 578, "label": "2023/24"}
    ]}))
    .unwrap()
}

fn players_body() -> serde_json::Value {
    json!({"content": [
        {
            "id": 1001.0,
            "name": {"display": "Mohamed Salah"},
            "info": {"position": "F"},
            "currentTeam": {"id": 10.0, "name": "Liverpool"},
            "nationalTeam": {"country": "Egypt"}
        },
        {
            "id": 1002,
            "name": {"display": "Bukayo Saka"},
            "info": {"position": "M"},
            "currentTeam": {"id": 1, "name": "Arsenal"},
            "nationalTeam": {"country": "England"}
        },
        {
            "id": 1003,
            "name": {"display": "Loan Player"},
            "currentTeam": {"id": 999, "name": "Somewhere Else"}
        },
        {
            "id": 1004,
            "name": {"display": "Free Agent"}
        }
    ]})
}

// ============================================================================
// Season Tests
// ============================================================================

#[test]
fn test_seasons_normalizes_ids() {
    let ids: Vec<_> = season_list().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["777", "719", "578"]);
}

#[test]
fn test_resolve_season_by_label() {
    let list = season_list();
    for season in &list {
        assert_eq!(resolve_season(&list, Some(&season.label)).unwrap(), season.id);
    }
}

#[test]
fn test_resolve_season_latest() {
    assert_eq!(resolve_season(&season_list(), None).unwrap(), "777");
}

#[test]
fn test_resolve_season_unknown_label() {
    let err = resolve_season(&season_list(), Some("2026/27")).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("Season '2026/27' not found"));
}

#[test]
fn test_resolve_season_empty() {
    let list = seasons(&json!({"content": []})).unwrap();
    let err = resolve_season(&list, None).unwrap_err();
    assert!(matches!(err, Error::NoData { .. }));
    assert!(err.to_string().contains("No seasons available"));
}

#[test]
fn test_seasons_missing_content() {
    let err = seasons(&json!({"pageInfo": {}})).unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

// ============================================================================
// Club Tests
// ============================================================================

#[test]
fn test_clubs_keeps_first_team_in_order() {
    let body = json!([
        {"id": 1.0, "shortName": "Arsenal", "teamType": "FIRST"},
        {"id": 2.0, "shortName": "Aston Villa", "teamType": "FIRST"},
        {"id": 501, "shortName": "Arsenal U21", "teamType": "U21"},
        {"id": 10, "shortName": "Liverpool", "teamType": "FIRST"}
    ]);

    let list = clubs(&body, "719").unwrap();
    let names: Vec<_> = list.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Arsenal", "Aston Villa", "Liverpool"]);
    assert_eq!(list[0].id, "1");

    let ids = club_ids(&list);
    assert!(ids.contains("10"));
    assert!(!ids.contains("501"));
}

#[test]
fn test_clubs_empty_is_no_data() {
    let body = json!([{"id": 501, "shortName": "Arsenal U21", "teamType": "U21"}]);
    assert!(matches!(clubs(&body, "719"), Err(Error::NoData { .. })));
}

#[test]
fn test_clubs_not_array_is_malformed() {
    let body = json!({"content": []});
    assert!(matches!(
        clubs(&body, "719"),
        Err(Error::MalformedResponse { .. })
    ));
}

#[test]
fn test_club_info() {
    let body = json!({
        "id": 1.0,
        "name": "Arsenal",
        "shortName": "Arsenal",
        "club": {"name": "Arsenal", "abbr": "ARS", "id": 1.0},
        "grounds": [{"name": "Emirates Stadium", "city": "London", "capacity": 60272.0}]
    });

    let info = club_info(&body).unwrap();
    assert_eq!(info.id, "1");
    assert_eq!(info.abbreviation.as_deref(), Some("ARS"));
    assert_eq!(info.grounds[0].capacity, Some(60272));
}

// ============================================================================
// Ranking Tests
// ============================================================================

#[test]
fn test_club_rankings() {
    let body = json!({"stats": {"content": [
        {"rank": 1, "owner": {"name": "Liverpool"}, "value": 86},
        {"rank": 2, "owner": {"name": {"display": "Arsenal"}}, "value": 69.0}
    ]}});

    let rows = club_rankings(&body, "goals").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].club, "Liverpool");
    assert_eq!(rows[1].club, "Arsenal");
    assert_eq!(rows[1].value, 69.0);
}

#[test]
fn test_player_rankings_nationality_toggle() {
    let body = json!({"stats": {"content": [{
        "rank": 1.0,
        "owner": {
            "name": {"display": "Mohamed Salah"},
            "currentTeam": {"name": "Liverpool"},
            "nationalTeam": {"country": "Egypt"}
        },
        "value": 29
    }]}});

    let with = player_rankings(&body, "goals", true).unwrap();
    assert_eq!(with[0].rank, 1);
    assert_eq!(with[0].club.as_deref(), Some("Liverpool"));
    assert_eq!(with[0].nationality.as_deref(), Some("Egypt"));

    let without = player_rankings(&body, "goals", false).unwrap();
    assert!(without[0].nationality.is_none());
}

#[test]
fn test_rankings_empty_is_no_data() {
    let body = json!({"stats": {"content": []}});
    assert!(matches!(
        club_rankings(&body, "goals"),
        Err(Error::NoData { .. })
    ));
    assert!(matches!(
        player_rankings(&json!({}), "goals", true),
        Err(Error::NoData { .. })
    ));
}

// ============================================================================
// Stats Tests
// ============================================================================

#[test]
fn test_stat_map_and_select() {
    let body = json!({"stats": [
        {"name": "wins", "value": 25},
        {"name": "goals", "value": 86.0}
    ]});

    let map = stat_map(&body).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(select_stat(&map, "goals").unwrap(), 86.0);

    let err = select_stat(&map, "corners").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("Examples: goals, wins"));
}

#[test]
fn test_stat_map_empty_is_ok() {
    assert!(stat_map(&json!({"stats": []})).unwrap().is_empty());
}

#[test]
fn test_stat_map_missing_stats_is_malformed() {
    assert!(matches!(
        stat_map(&json!({"entity": {}})),
        Err(Error::MalformedResponse { .. })
    ));
}

#[test]
fn test_player_stats_profile() {
    let body = json!({
        "stats": [{"name": "goals", "value": 15}, {"name": "appearances", "value": 10}],
        "entity": {
            "name": {"display": "Mohamed Salah"},
            "info": {"position": "F", "shirtNum": 11.0},
            "age": "33 years 100 days"
        }
    });

    let stats = player_stats(&body, "1001").unwrap();
    assert_eq!(stats.player_id, "1001");
    assert_eq!(stats.get("goals"), Some(15.0));

    let profile = stats.profile.unwrap();
    assert_eq!(profile.name, "Mohamed Salah");
    assert_eq!(profile.shirt_number, Some(11));
    assert_eq!(profile.age.as_deref(), Some("33 years 100 days"));
}

// ============================================================================
// League Table Tests
// ============================================================================

#[test]
fn test_league_table_sorted_by_position() {
    let body = json!({"tables": [{"entries": [
        {
            "position": 2,
            "team": {"id": 1, "name": "Arsenal"},
            "overall": {"played": 10, "won": 7, "drawn": 2, "lost": 1,
                        "goalsFor": 20, "goalsAgainst": 9, "goalsDifference": 11, "points": 23}
        },
        {
            "position": 1,
            "team": {"id": 10, "name": "Liverpool"},
            "overall": {"played": 10, "won": 8, "drawn": 1, "lost": 1,
                        "goalsFor": 25, "goalsAgainst": 8, "goalsDifference": 17, "points": 25}
        }
    ]}]});

    let rows = league_table(&body, "719").unwrap();
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].club, "Liverpool");
    assert_eq!(rows[0].points, 25);
    assert_eq!(rows[0].goal_difference, 17);
    assert_eq!(rows[1].club, "Arsenal");
    assert_eq!(rows[1].won, 7);
    assert_eq!(rows[1].goals_against, 9);
}

#[test]
fn test_league_table_empty() {
    assert!(matches!(
        league_table(&json!({"tables": []}), "719"),
        Err(Error::NoData { .. })
    ));
    assert!(matches!(
        league_table(&json!({"tables": [{"entries": []}]}), "719"),
        Err(Error::NoData { .. })
    ));
}

// ============================================================================
// Player Tests
// ============================================================================

#[test]
fn test_players_page_missing_content_is_empty() {
    assert!(players_page(&json!({})).unwrap().is_empty());
}

#[test]
fn test_filter_players_by_valid_set() {
    let valid: HashSet<String> = ["1".to_string(), "10".to_string()].into_iter().collect();
    let page = players_page(&players_body()).unwrap();
    assert_eq!(page.len(), 4);

    let kept = filter_players(page, ClubFilter::AnyOf(&valid), true);
    let ids: Vec<_> = kept.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002"]);
    assert_eq!(kept[0].club_id.as_deref(), Some("10"));
    assert_eq!(kept[0].nationality.as_deref(), Some("Egypt"));
}

#[test]
fn test_filter_players_single_club() {
    let page = players_page(&players_body()).unwrap();
    let kept = filter_players(page, ClubFilter::Only("1"), false);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Bukayo Saka");
    assert!(kept[0].nationality.is_none());
}

#[test]
fn test_search_players() {
    let valid: HashSet<String> = ["1".to_string(), "10".to_string()].into_iter().collect();
    let players = filter_players(
        players_page(&players_body()).unwrap(),
        ClubFilter::AnyOf(&valid),
        false,
    );

    let found = search_players(&players, "salah").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "1001");

    let err = search_players(&players, "Haaland").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(err.to_string().contains("No players found matching"));
}

#[test]
fn test_filter_players_tolerates_bad_ids() {
    let body = json!({"content": [
        {"id": 1001, "name": {"display": "Mohamed Salah"}, "currentTeam": {"id": 10, "name": "Liverpool"}},
        {"id": null, "currentTeam": {"id": 999.0}},
        {"id": {"bad": true}, "name": {"display": "Broken Row"}, "currentTeam": {"id": 10}},
        {"name": {"display": "No Id"}, "currentTeam": {"id": 10}}
    ]});

    let page = players_page(&body).unwrap();
    assert_eq!(page.len(), 4);

    let valid: HashSet<String> = ["10".to_string()].into_iter().collect();
    let kept = filter_players(page, ClubFilter::AnyOf(&valid), false);
    let ids: Vec<_> = kept.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1001"]);
}

#[test]
fn test_rankings_skip_rows_without_value() {
    let body = json!({"stats": {"content": [
        {"rank": 1, "owner": {"name": "Liverpool"}, "value": 86},
        {"rank": 2, "owner": {"name": "Arsenal"}},
        {"rank": 3, "owner": {"name": "Chelsea"}, "value": 64}
    ]}});

    let rows = club_rankings(&body, "goals").unwrap();
    let clubs: Vec<_> = rows.iter().map(|r| r.club.as_str()).collect();
    assert_eq!(clubs, vec!["Liverpool", "Chelsea"]);
    assert_eq!(rows[1].rank, 3);
}

#[test]
fn test_seasons_skip_incomplete_entries() {
    let list = seasons(&json!({"content": [
        {"id": 777.0, "label": "2025/26"},
        {"id": 719.0},
        {"label": "2023/24"}
    ]}))
    .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, "777");
}

type Side<'a> = (f64, &'a str, Option<i64>);

fn fixture(id: f64, home: Side<'_>, away: Side<'_>) -> serde_json::Value {
    json!({
        "id": id,
        "gameweek": {"gameweek": 1.0},
        "kickoff": {"label": "Sat 16 Aug 2025, 15:00 BST"},
        "teams": [
            {"team": {"id": home.0, "name": home.1}, "score": home.2},
            {"team": {"id": away.0, "name": away.1}, "score": away.2}
        ]
    })
}

#[test]
fn test_club_results_from_club_side() {
    let body = json!({"fixtures": [
        fixture(90001.0, (1.0, "Arsenal", Some(2)), (10.0, "Liverpool", Some(1))),
        fixture(90002.0, (4.0, "Chelsea", Some(3)), (1.0, "Arsenal", Some(0))),
        fixture(90003.0, (1.0, "Arsenal", None), (7.0, "Everton", None)),
        fixture(90004.0, (10.0, "Liverpool", Some(1)), (4.0, "Chelsea", Some(1)))
    ]});

    let rows = club_results(&body, "1", "777").unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].fixture_id.as_deref(), Some("90001"));
    assert_eq!(rows[0].gameweek, Some(1));
    assert_eq!(rows[0].venue, "home");
    assert_eq!(rows[0].opponent, "Liverpool");
    assert_eq!((rows[0].goals_for, rows[0].goals_against), (2, 1));
    assert_eq!(rows[0].result, "W");

    assert_eq!(rows[1].venue, "away");
    assert_eq!(rows[1].opponent, "Chelsea");
    assert_eq!((rows[1].goals_for, rows[1].goals_against), (0, 3));
    assert_eq!(rows[1].result, "L");
}

#[test]
fn test_club_results_none_played() {
    let body = json!({"fixtures": [
        fixture(90003.0, (1.0, "Arsenal", None), (7.0, "Everton", None))
    ]});
    let err = club_results(&body, "1", "777").unwrap_err();
    assert!(matches!(err, Error::NoData { .. }));
    assert!(err.to_string().contains("club 1 in season 777"));

    let err = club_results(&json!({}), "1", "777").unwrap_err();
    assert!(matches!(err, Error::NoData { .. }));
}
