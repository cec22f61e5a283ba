use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use draftwise_analysis::metrics::DatasetId;
use draftwise_engine::{Side, Turn};
use draftwise_evaluator::{config::EngineConfig, evaluation::DraftEvaluation, scoring::DraftEngine};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Metrics bundle JSON file
    #[arg(long)]
    metrics: PathBuf,
    /// Draft script JSON file (bans and picks in sequence order)
    #[arg(long)]
    draft: PathBuf,
    /// Engine config JSON file
    #[arg(long)]
    engine_config: Option<PathBuf>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    dataset_id: DatasetId,
    metrics_generated_at: DateTime<Utc>,
    current_turn: Option<Turn>,
    finished: bool,
    ally: DraftEvaluation,
    opponent: DraftEvaluation,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let metrics = util::read_metrics_file(&arg.metrics)?;
    let config: EngineConfig =
        util::read_config_file("engine config", arg.engine_config.as_deref())?;
    let engine =
        DraftEngine::with_config(&metrics, config).context("Failed to build draft engine")?;
    let session = util::read_draft_file(&arg.draft)?;

    let report = EvaluationReport {
        dataset_id: metrics.dataset_id.clone(),
        metrics_generated_at: metrics.generated_at,
        current_turn: session.current_turn(),
        finished: session.is_finished(),
        ally: engine.evaluate_session(&session, Side::Ally),
        opponent: engine.evaluate_session(&session, Side::Opponent),
    };
    tracing::info!(
        ally = report.ally.total_score,
        opponent = report.opponent.total_score,
        "draft evaluated"
    );
    Output::save_json(&report, arg.output.clone())
}
