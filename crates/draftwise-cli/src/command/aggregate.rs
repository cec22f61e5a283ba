use std::path::PathBuf;

use anyhow::Context;
use draftwise_analysis::{
    aggregate::{Aggregation, Aggregator},
    config::AggregationConfig,
    record::{PlayerGameRow, TeamPickRow},
};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AggregateArg {
    /// Player rows JSON file (one row per player per game)
    #[arg(long)]
    players: PathBuf,
    /// Team pick rows JSON file; rebuilt from the player rows when omitted
    #[arg(long)]
    teams: Option<PathBuf>,
    /// Aggregation config JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file for the metrics bundle (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output file for the pick-rate dataset
    #[arg(long)]
    dataset_output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AggregateArg) -> anyhow::Result<()> {
    let players: Vec<PlayerGameRow> = util::read_json_file("player rows", &arg.players)?;
    let teams: Vec<TeamPickRow> = match &arg.teams {
        Some(path) => util::read_json_file("team rows", path)?,
        None => vec![],
    };
    let config: AggregationConfig =
        util::read_config_file("aggregation config", arg.config.as_deref())?;
    let aggregator = Aggregator::new(config).context("Invalid aggregation config")?;

    let Aggregation {
        metrics,
        dataset,
        report,
    } = aggregator.aggregate(&players, &teams);
    for (reason, count) in &report.skipped_rows {
        tracing::warn!(%reason, count, "player rows skipped");
    }
    for (reason, count) in &report.skipped_team_rows {
        tracing::warn!(%reason, count, "team rows skipped");
    }
    if report.accepted_rows == 0 {
        tracing::warn!("no player row was accepted; the bundle is empty");
    }

    Output::save_json(&metrics, arg.output.clone())?;
    if let Some(path) = &arg.dataset_output {
        Output::save_json(&dataset, Some(path.clone()))?;
    }
    Ok(())
}
