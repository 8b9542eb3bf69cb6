//! Caller-facing client
//!
//! Each method composes one or more requests through the [`HttpClient`] and a
//! projection from [`crate::normalize`], then shapes the result. Nothing is
//! cached between calls: the season list and the valid-club set are fetched
//! again by every call that needs them.

use crate::catalog::StatCatalog;
use crate::compare::{resolve_name, validate_names, Comparison};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, Sleeper};
use crate::normalize::{self, ClubFilter};
use crate::output::{Output, StatsOutput};
use crate::pagination::{collect_pages, PageNumberPaginator};
use crate::records::{
    Club, ClubInfo, ClubRanking, ClubResult, Player, PlayerRanking, PlayerStats, Season,
    TableEntry,
};
use crate::types::{OutputFormat, QueryParams};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Client for the football data API
#[derive(Debug)]
pub struct EplClient {
    http: HttpClient,
    config: Config,
}

impl EplClient {
    /// Create a client from a validated config
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::new(HttpClientConfig::from(&config))?;
        Ok(Self { http, config })
    }

    /// Replace the sleep used between retries
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Sleeper) -> Self {
        self.http = self.http.with_sleeper(sleeper);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    fn season_query(&self, season_id: &str) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert("comps".to_string(), self.config.competition.id.to_string());
        query.insert("compSeasons".to_string(), season_id.to_string());
        query
    }

    // ========================================================================
    // Seasons
    // ========================================================================

    /// Every season of the configured competition
    pub async fn list_seasons(&self) -> Result<Vec<Season>> {
        let path = format!("competitions/{}/compseasons", self.config.competition.id);
        let body = self.http.execute(&path, &QueryParams::new()).await?;
        normalize::seasons(&body)
    }

    /// Season id for `label`, or the latest season without one
    pub async fn resolve_season(&self, label: Option<&str>) -> Result<String> {
        let seasons = self.list_seasons().await?;
        let id = normalize::resolve_season(&seasons, label)?;
        debug!("Resolved season {label:?} to {id}");
        Ok(id)
    }

    // ========================================================================
    // Clubs
    // ========================================================================

    async fn fetch_clubs(&self, season_id: &str) -> Result<Vec<Club>> {
        let body = self
            .http
            .execute(&format!("compseasons/{season_id}/teams"), &QueryParams::new())
            .await?;
        normalize::clubs(&body, season_id)
    }

    /// First-team clubs of a season
    pub async fn list_clubs(&self, season_id: &str, format: OutputFormat) -> Result<Output<Club>> {
        let clubs = self.fetch_clubs(season_id).await?;
        Output::render(clubs, format, Some(season_id))
    }

    /// Details of one club
    pub async fn club_info(&self, club_id: &str) -> Result<ClubInfo> {
        let body = self
            .http
            .execute(&format!("clubs/{club_id}"), &QueryParams::new())
            .await?;
        normalize::club_info(&body)
    }

    /// Completed matches of a club in a season
    pub async fn club_results(
        &self,
        club_id: &str,
        season_id: &str,
        format: OutputFormat,
    ) -> Result<Output<ClubResult>> {
        let mut query = QueryParams::new();
        query.insert("altIds".to_string(), "true".to_string());
        let body = self
            .http
            .execute(
                &format!("compseasons/{season_id}/standings/team/{club_id}"),
                &query,
            )
            .await?;
        let rows = normalize::club_results(&body, club_id, season_id)?;
        Output::render(rows, format, Some(season_id))
    }

    /// League table, for the latest season when `season_id` is `None`
    pub async fn get_club_table(
        &self,
        season_id: Option<&str>,
        format: OutputFormat,
    ) -> Result<Output<TableEntry>> {
        let season_id = match season_id {
            Some(id) => id.to_string(),
            None => self.resolve_season(None).await?,
        };
        let body = self
            .http
            .execute(
                &format!("compseasons/{season_id}/standings"),
                &QueryParams::new(),
            )
            .await?;
        let rows = normalize::league_table(&body, &season_id)?;
        Output::render(rows, format, Some(&season_id))
    }

    /// Clubs ranked by `stat`
    pub async fn get_club_rankings(
        &self,
        stat: &str,
        season_id: &str,
        format: OutputFormat,
    ) -> Result<Output<ClubRanking>> {
        StatCatalog::ClubRankings.validate(stat)?;

        let mut query = self.season_query(season_id);
        query.insert(
            "pageSize".to_string(),
            self.config.competition.club_page_size.to_string(),
        );
        query.insert("altIds".to_string(), "true".to_string());

        let body = self
            .http
            .execute(&format!("stats/ranked/teams/{stat}"), &query)
            .await?;
        let rows = normalize::club_rankings(&body, stat)?;
        Output::render(rows, format, Some(season_id))
    }

    /// A club's season statistics, or one of them when `stat` is given
    pub async fn get_club_stats(
        &self,
        club_id: &str,
        season_id: &str,
        stat: Option<&str>,
        format: OutputFormat,
    ) -> Result<StatsOutput> {
        let body = self
            .http
            .execute(
                &format!("stats/team/{club_id}"),
                &self.season_query(season_id),
            )
            .await?;
        let stats = normalize::stat_map(&body)?;

        match stat {
            Some(stat) => Ok(StatsOutput::Value(normalize::select_stat(&stats, stat)?)),
            None => StatsOutput::render(stats, format, Some(season_id)),
        }
    }

    // ========================================================================
    // Players
    // ========================================================================

    /// Players ranked by `stat`
    pub async fn get_player_rankings(
        &self,
        stat: &str,
        season_id: &str,
        format: OutputFormat,
    ) -> Result<Output<PlayerRanking>> {
        StatCatalog::PlayerRankings.validate(stat)?;

        let mut query = self.season_query(season_id);
        query.insert(
            "pageSize".to_string(),
            self.config.competition.player_page_size.to_string(),
        );
        query.insert(
            "compCodeForActivePlayer".to_string(),
            self.config.competition.comp_code.clone(),
        );
        query.insert("altIds".to_string(), "true".to_string());

        let body = self
            .http
            .execute(&format!("stats/ranked/players/{stat}"), &query)
            .await?;
        let rows =
            normalize::player_rankings(&body, stat, self.config.data.include_nationality)?;
        Output::render(rows, format, Some(season_id))
    }

    /// Players of a season, optionally of one club
    pub async fn list_players(
        &self,
        season_id: &str,
        club_id: Option<&str>,
        format: OutputFormat,
    ) -> Result<Output<Player>> {
        let players = self.fetch_players(season_id, club_id, None).await?;
        Output::render(players, format, Some(season_id))
    }

    /// [`EplClient::list_players`], stopping with [`Error::Cancelled`] once
    /// `cancel` fires
    pub async fn list_players_cancellable(
        &self,
        season_id: &str,
        club_id: Option<&str>,
        format: OutputFormat,
        cancel: &CancellationToken,
    ) -> Result<Output<Player>> {
        let players = self.fetch_players(season_id, club_id, Some(cancel)).await?;
        Output::render(players, format, Some(season_id))
    }

    async fn fetch_players(
        &self,
        season_id: &str,
        club_id: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Player>> {
        let valid;
        let filter = match club_id {
            Some(id) => ClubFilter::Only(id),
            None => {
                valid = normalize::club_ids(&self.fetch_clubs(season_id).await?);
                ClubFilter::AnyOf(&valid)
            }
        };

        let mut query = QueryParams::new();
        query.insert("compSeasons".to_string(), season_id.to_string());
        let paginator = PageNumberPaginator::new(
            self.config.request.page_size,
            self.config.request.max_pages,
        );
        let include_nationality = self.config.data.include_nationality;

        let players = collect_pages(
            &self.http,
            "players",
            &query,
            &paginator,
            cancel,
            normalize::players_page,
        )
        .await?;
        let total = players.len();
        let players = normalize::filter_players(players, filter, include_nationality);
        info!("Kept {} of {total} players for season {season_id}", players.len());

        if players.is_empty() {
            return Err(match club_id {
                Some(id) => {
                    let club = self.club_display_name(season_id, id).await;
                    Error::no_data(format!(
                        "No players found for {club} in season {season_id}"
                    ))
                }
                None => Error::no_data(format!("No players found in season {season_id}")),
            });
        }
        Ok(players)
    }

    /// Club name for messages, falling back to a placeholder
    async fn club_display_name(&self, season_id: &str, club_id: &str) -> String {
        let placeholder = format!("club {club_id}");
        match self.fetch_clubs(season_id).await {
            Ok(clubs) => clubs
                .into_iter()
                .find(|c| c.id == club_id)
                .map_or(placeholder, |c| c.name),
            Err(e) => {
                warn!("Could not look up club {club_id} for season {season_id}: {e}");
                placeholder
            }
        }
    }

    /// Players whose name contains `name`, ignoring case
    pub async fn search_players(
        &self,
        name: &str,
        season_id: &str,
        format: OutputFormat,
    ) -> Result<Output<Player>> {
        let players = self.fetch_players(season_id, None, None).await?;
        let matches = normalize::search_players(&players, name)?;
        Output::render(matches, format, Some(season_id))
    }

    /// Id of the first player matching `name`
    pub async fn resolve_player_id(&self, name: &str, season_id: &str) -> Result<String> {
        let players = self.fetch_players(season_id, None, None).await?;
        let matches = normalize::search_players(&players, name)?;
        matches
            .into_iter()
            .next()
            .map(|p| p.id)
            .ok_or_else(|| Error::not_found(format!("No players found matching '{name}'")))
    }

    /// A player's season statistics
    pub async fn get_player_stats(&self, player_id: &str, season_id: &str) -> Result<PlayerStats> {
        let body = self
            .http
            .execute(
                &format!("stats/player/{player_id}"),
                &self.season_query(season_id),
            )
            .await?;
        normalize::player_stats(&body, player_id)
    }

    /// Compare players by name
    ///
    /// Stats are fetched one player at a time. Names that do not resolve, or
    /// whose stats cannot be fetched, are reported in [`Comparison::failures`]. Fails with [`Error::Comparison`]
    /// unless at least two players make it through.
    pub async fn compare_players(
        &self,
        names: &[String],
        season_id: &str,
        stats: Option<&[String]>,
    ) -> Result<Comparison> {
        let names = validate_names(names)?;
        let snapshot = self.fetch_players(season_id, None, None).await?;

        let mut failures = Vec::new();
        let mut picked: Vec<(String, Player)> = Vec::new();
        for name in names {
            match resolve_name(&snapshot, &name) {
                None => failures.push(format!("'{name}': no player matching this name")),
                Some(player) => {
                    let duplicate = picked
                        .iter()
                        .find(|(_, p)| p.id == player.id)
                        .map(|(other, _)| other.clone());
                    match duplicate {
                        Some(other) => failures.push(format!(
                            "'{name}': resolves to the same player as '{other}'"
                        )),
                        None => picked.push((name, player.clone())),
                    }
                }
            }
        }

        let mut resolved = Vec::with_capacity(picked.len());
        for (name, player) in picked {
            match self.get_player_stats(&player.id, season_id).await {
                Ok(player_stats) => resolved.push((name, player, player_stats)),
                Err(e) => {
                    warn!("Stats for '{name}' ({}) unavailable: {e}", player.id);
                    failures.push(format!("'{name}': {e}"));
                }
            }
        }

        info!(
            "Comparing {} players in season {season_id}, {} failed",
            resolved.len(),
            failures.len()
        );
        Comparison::build(season_id, resolved, failures, stats)
    }
}
