//! Static statistic catalogs
//!
//! The upstream API does not validate stat keys, so each ranking endpoint is
//! checked against a locally maintained list before any request is issued.
//! The lists can drift from what the API actually serves.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// A named group of stat keys
pub type StatGroup = (&'static str, &'static [&'static str]);

/// How many keys to quote in error messages
const EXAMPLE_COUNT: usize = 5;

const CLUB_RANKING_STATS: &[StatGroup] = &[
    (
        "General",
        &["wins", "losses", "draws", "goals", "total_red_card", "total_yel_card"],
    ),
    (
        "Attack",
        &[
            "total_scoring_att",
            "ontarget_scoring_att",
            "hit_woodwork",
            "att_hd_goal",
            "att_pen_goal",
            "att_freekick_goal",
            "att_ibox_goal",
            "att_obox_goal",
            "goal_fastbreak",
            "total_offside",
        ],
    ),
    (
        "Defence",
        &[
            "goals_conceded",
            "clean_sheet",
            "saves",
            "outfielder_block",
            "interceptions",
            "total_tackle",
            "penalty_save",
            "last_man_tackle",
            "total_clearance",
            "head_clearance",
            "clearance_off_line",
            "own_goals",
            "penalty_conceded",
            "pen_goals_conceded",
            "dispossessed",
            "total_high_claim",
            "punches",
        ],
    ),
    (
        "Teamplay",
        &[
            "total_pass",
            "total_through_ball",
            "touches",
            "total_long_balls",
            "backward_pass",
            "total_cross",
            "corner_taken",
        ],
    ),
];

const PLAYER_RANKING_STATS: &[StatGroup] = &[
    (
        "General",
        &["appearances", "wins", "losses", "draws", "mins_played"],
    ),
    (
        "Attack",
        &[
            "goals",
            "goal_assist",
            "total_scoring_att",
            "ontarget_scoring_att",
            "hit_woodwork",
            "big_chance_created",
            "big_chance_missed",
            "att_pen_goal",
            "att_freekick_goal",
            "att_hd_goal",
            "att_ibox_goal",
            "att_obox_goal",
            "total_offside",
            "goal_fastbreak",
            "corner_taken",
        ],
    ),
    (
        "Teamplay",
        &[
            "total_pass",
            "pass_success",
            "total_cross",
            "cross_accuracy",
            "total_through_ball",
            "total_long_balls",
            "touches",
            "key_passes",
        ],
    ),
    (
        "Defence",
        &[
            "clean_sheet",
            "goals_conceded",
            "tackle_success",
            "last_man_tackle",
            "blocked_scoring_att",
            "interception",
            "clearance_off_line",
            "recoveries",
            "duel_won",
            "duel_lost",
            "aerial_won",
            "aerial_lost",
            "own_goals",
            "penalty_conceded",
        ],
    ),
    ("Discipline", &["yellow_card", "red_card", "fouls", "offside"]),
    (
        "Goalkeeping",
        &[
            "saves",
            "penalty_save",
            "punches",
            "high_claim",
            "catch",
            "sweeper_clearance",
            "throw_out",
            "goal_kicks",
        ],
    ),
];

const CLUB_DETAIL_STATS: &[StatGroup] = &[
    (
        "Basic Stats",
        &[
            "gameweek",
            "wins",
            "losses",
            "draws",
            "goals",
            "goals_conceded",
            "clean_sheet",
        ],
    ),
    (
        "Passing",
        &[
            "total_pass",
            "accurate_pass",
            "poss_won_att_3rd",
            "poss_won_mid_3rd",
            "poss_won_def_3rd",
        ],
    ),
    (
        "Attacking",
        &[
            "total_scoring_att",
            "ontarget_scoring_att",
            "big_chance_created",
            "big_chance_missed",
            "goal_assist",
            "goals_openplay",
            "goal_fastbreak",
            "hit_woodwork",
        ],
    ),
    (
        "Defending",
        &[
            "saves",
            "interception",
            "tackles",
            "blocked_scoring_att",
            "total_clearance",
            "head_clearance",
            "effective_clearance",
        ],
    ),
    (
        "Discipline",
        &["yellow_card", "total_yel_card", "red_card", "total_red_card"],
    ),
    (
        "Attendance",
        &["attendance_average", "attendance_highest", "attendance_lowest"],
    ),
];

static CLUB_RANKING_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| keys(CLUB_RANKING_STATS));
static PLAYER_RANKING_KEYS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| keys(PLAYER_RANKING_STATS));
static CLUB_DETAIL_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| keys(CLUB_DETAIL_STATS));

fn keys(groups: &[StatGroup]) -> HashSet<&'static str> {
    groups
        .iter()
        .flat_map(|(_, stats)| stats.iter().copied())
        .collect()
}

/// Which catalog a stat key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCatalog {
    /// Keys accepted by `stats/ranked/teams/{stat}`
    ClubRankings,
    /// Keys accepted by `stats/ranked/players/{stat}`
    PlayerRankings,
    /// Keys reported by `stats/team/{club}`
    ClubDetail,
}

impl StatCatalog {
    /// Stat groups in display order
    pub fn groups(self) -> &'static [StatGroup] {
        match self {
            Self::ClubRankings => CLUB_RANKING_STATS,
            Self::PlayerRankings => PLAYER_RANKING_STATS,
            Self::ClubDetail => CLUB_DETAIL_STATS,
        }
    }

    /// Every key as a flat list, first occurrence wins
    pub fn all(self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.groups()
            .iter()
            .flat_map(|(_, stats)| stats.iter().copied())
            .filter(|stat| seen.insert(*stat))
            .collect()
    }

    /// Keys grouped by category
    pub fn grouped(self) -> BTreeMap<&'static str, Vec<&'static str>> {
        self.groups()
            .iter()
            .map(|(group, stats)| (*group, stats.to_vec()))
            .collect()
    }

    /// Check whether `stat` is in this catalog
    pub fn contains(self, stat: &str) -> bool {
        let set = match self {
            Self::ClubRankings => &*CLUB_RANKING_KEYS,
            Self::PlayerRankings => &*PLAYER_RANKING_KEYS,
            Self::ClubDetail => &*CLUB_DETAIL_KEYS,
        };
        set.contains(stat)
    }

    /// Fail with [`Error::InvalidArgument`] unless `stat` is in this catalog
    pub fn validate(self, stat: &str) -> Result<()> {
        if self.contains(stat) {
            return Ok(());
        }
        let examples = self.all().into_iter().take(EXAMPLE_COUNT).collect::<Vec<_>>();
        Err(Error::invalid_argument(format!(
            "Invalid statistic type '{stat}' for {self}. Examples: {}",
            examples.join(", ")
        )))
    }
}

impl std::fmt::Display for StatCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClubRankings => write!(f, "club rankings"),
            Self::PlayerRankings => write!(f, "player rankings"),
            Self::ClubDetail => write!(f, "club statistics"),
        }
    }
}

impl std::str::FromStr for StatCatalog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "club" | "club_rankings" => Ok(Self::ClubRankings),
            "player" | "player_rankings" => Ok(Self::PlayerRankings),
            "club_detail" | "club_stats" => Ok(Self::ClubDetail),
            other => Err(Error::invalid_argument(format!(
                "Unknown stat catalog '{other}'. Expected club, player or club-detail"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StatCatalog::ClubRankings, "goals" ; "club goals")]
    #[test_case(StatCatalog::ClubRankings, "total_pass" ; "club passes")]
    #[test_case(StatCatalog::PlayerRankings, "goals" ; "player goals")]
    #[test_case(StatCatalog::PlayerRankings, "clean_sheet" ; "player clean sheets")]
    #[test_case(StatCatalog::ClubDetail, "attendance_average" ; "club attendance")]
    fn test_valid_stat(catalog: StatCatalog, stat: &str) {
        assert!(catalog.contains(stat));
        assert!(catalog.validate(stat).is_ok());
    }

    #[test_case(StatCatalog::ClubRankings, "not_a_stat" ; "unknown club stat")]
    #[test_case(StatCatalog::ClubRankings, "key_passes" ; "player only stat")]
    #[test_case(StatCatalog::PlayerRankings, "Goals" ; "case sensitive")]
    #[test_case(StatCatalog::PlayerRankings, "" ; "empty")]
    fn test_invalid_stat(catalog: StatCatalog, stat: &str) {
        let err = catalog.validate(stat).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert!(err.to_string().contains("Invalid statistic type"));
        assert!(err.to_string().contains("Examples: "));
    }

    #[test]
    fn test_all_is_deduplicated() {
        let all = StatCatalog::PlayerRankings.all();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(all[0], "appearances");
    }

    #[test]
    fn test_grouped() {
        let grouped = StatCatalog::ClubRankings.grouped();
        assert!(grouped["General"].contains(&"goals"));
        assert_eq!(grouped.len(), 4);
    }

    #[test]
    fn test_parse_catalog() {
        assert_eq!("club".parse::<StatCatalog>().unwrap(), StatCatalog::ClubRankings);
        assert_eq!(
            "club-detail".parse::<StatCatalog>().unwrap(),
            StatCatalog::ClubDetail
        );
        assert!("team".parse::<StatCatalog>().is_err());
    }
}
