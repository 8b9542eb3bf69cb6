//! CLI runner - executes commands

use crate::catalog::StatCatalog;
use crate::cli::commands::{CatalogArg, Cli, Commands, OutputFormat as CliFormat};
use crate::client::EplClient;
use crate::compare::Comparison;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{pretty_format, write_table_to_parquet, Output, StatsOutput};
use crate::types::{JsonValue, LogLevel, OutputFormat};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: Config,
}

impl Runner {
    /// Create a runner, loading the config file and `--set` overrides
    pub fn new(cli: Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        apply_overrides(&mut config, &cli.overrides)?;
        config.validate()?;
        Ok(Self { cli, config })
    }

    /// Level to log at when `RUST_LOG` is unset
    pub fn log_level(&self) -> LogLevel {
        if self.cli.verbose {
            LogLevel::Debug
        } else {
            self.config.logging.level
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::StatTypes { catalog } => self.stat_types(*catalog),
            Commands::Seasons => {
                let seasons = self.client()?.list_seasons().await?;
                self.emit(&Output::render(seasons, self.listing_format(), None)?)
            }
            Commands::Season => {
                let season_id = self.season_id(&self.client()?).await?;
                println!("{season_id}");
                Ok(())
            }
            Commands::Clubs => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                self.emit(&client.list_clubs(&season_id, self.listing_format()).await?)
            }
            Commands::ClubInfo { club_id } => {
                let info = self.client()?.club_info(club_id).await?;
                self.print_json(&serde_json::to_value(info)?)
            }
            Commands::ClubResults { club_id } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let results = client
                    .club_results(club_id, &season_id, self.listing_format())
                    .await?;
                self.emit(&results)
            }
            Commands::Table => {
                let client = self.client()?;
                let season_id = match (&self.cli.season_id, &self.cli.season) {
                    (Some(id), _) => Some(id.clone()),
                    (None, Some(label)) => {
                        Some(client.resolve_season(Some(label.as_str())).await?)
                    }
                    (None, None) => None,
                };
                let table = client
                    .get_club_table(season_id.as_deref(), self.listing_format())
                    .await?;
                self.emit(&table)
            }
            Commands::ClubRankings { stat } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let rows = client
                    .get_club_rankings(stat, &season_id, self.listing_format())
                    .await?;
                self.emit(&rows)
            }
            Commands::ClubStats { club_id, stat } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let stats = client
                    .get_club_stats(club_id, &season_id, stat.as_deref(), self.listing_format())
                    .await?;
                self.emit_stats(&stats)
            }
            Commands::PlayerRankings { stat } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let rows = client
                    .get_player_rankings(stat, &season_id, self.listing_format())
                    .await?;
                self.emit(&rows)
            }
            Commands::Players { club } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let players = client
                    .list_players(&season_id, club.as_deref(), self.listing_format())
                    .await?;
                self.emit(&players)
            }
            Commands::Search { name } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let players = client
                    .search_players(name, &season_id, self.listing_format())
                    .await?;
                self.emit(&players)
            }
            Commands::PlayerId { name } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                println!("{}", client.resolve_player_id(name, &season_id).await?);
                Ok(())
            }
            Commands::PlayerStats { player_id } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let stats = client.get_player_stats(player_id, &season_id).await?;
                if self.wants_table() {
                    let table =
                        StatsOutput::render(stats.stats, OutputFormat::Table, Some(&season_id))?;
                    self.emit_stats(&table)
                } else {
                    self.print_json(&serde_json::to_value(stats)?)
                }
            }
            Commands::Compare { names, stats } => {
                let client = self.client()?;
                let season_id = self.season_id(&client).await?;
                let stats = (!stats.is_empty()).then_some(stats.as_slice());
                let comparison = client.compare_players(names, &season_id, stats).await?;
                self.emit_comparison(&comparison)
            }
        }
    }

    fn client(&self) -> Result<EplClient> {
        EplClient::new(self.config.clone())
    }

    /// `--season-id`, else the season named by `--season`, else the latest
    async fn season_id(&self, client: &EplClient) -> Result<String> {
        match &self.cli.season_id {
            Some(id) => Ok(id.clone()),
            None => client.resolve_season(self.cli.season.as_deref()).await,
        }
    }

    fn wants_table(&self) -> bool {
        self.cli.format == CliFormat::Table || self.cli.parquet.is_some()
    }

    /// Shape to request from listing methods
    fn listing_format(&self) -> OutputFormat {
        if self.wants_table() {
            OutputFormat::Table
        } else {
            self.config.data.default_output_format
        }
    }

    fn stat_types(&self, catalog: CatalogArg) -> Result<()> {
        let catalog = StatCatalog::from(catalog);
        if self.cli.format == CliFormat::Table {
            for (group, stats) in catalog.groups() {
                println!("{group}:");
                for stat in *stats {
                    println!("  {stat}");
                }
            }
            return Ok(());
        }
        self.print_json(&serde_json::to_value(catalog.grouped())?)
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn emit<T: Serialize>(&self, output: &Output<T>) -> Result<()> {
        match output {
            Output::Table(batch) => self.emit_table(batch, || output.to_json()),
            Output::Records(_) => self.print_json(&output.to_json()?),
        }
    }

    fn emit_stats(&self, output: &StatsOutput) -> Result<()> {
        match output {
            StatsOutput::Table(batch) => self.emit_table(batch, || output.to_json()),
            _ => {
                if self.cli.parquet.is_some() {
                    warn!("A single statistic is not tabular, skipping Parquet output");
                }
                self.print_json(&output.to_json()?)
            }
        }
    }

    fn emit_comparison(&self, comparison: &Comparison) -> Result<()> {
        for failure in &comparison.failures {
            warn!("Skipped {failure}");
        }
        if self.wants_table() {
            let batch = comparison.table()?;
            self.emit_table(&batch, || Ok(serde_json::to_value(comparison)?))
        } else {
            self.print_json(&serde_json::to_value(comparison)?)
        }
    }

    /// Write `batch` to `--parquet` if set, then print it per `--format`
    fn emit_table<F>(&self, batch: &RecordBatch, as_json: F) -> Result<()>
    where
        F: FnOnce() -> Result<JsonValue>,
    {
        if let Some(path) = &self.cli.parquet {
            write_parquet(path, batch)?;
        }
        match self.cli.format {
            CliFormat::Table => {
                println!("{}", pretty_format(batch)?);
                Ok(())
            }
            CliFormat::Json | CliFormat::Pretty => self.print_json(&as_json()?),
        }
    }

    fn print_json(&self, value: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            CliFormat::Pretty => serde_json::to_string_pretty(value)?,
            CliFormat::Json | CliFormat::Table => serde_json::to_string(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let rows = write_table_to_parquet(path, batch, None)?;
    info!("Wrote {rows} rows to {}", path.display());
    Ok(())
}

/// Apply `KEY=VALUE` overrides in order
fn apply_overrides(config: &mut Config, overrides: &[String]) -> Result<()> {
    for item in overrides {
        let (key, value) = item.split_once('=').ok_or_else(|| {
            Error::config(format!("Invalid --set '{item}', expected KEY=VALUE"))
        })?;
        config.set(key.trim(), value)?;
    }
    Ok(())
}
