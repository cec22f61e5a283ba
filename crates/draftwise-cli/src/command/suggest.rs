use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use draftwise_analysis::{dataset::Dataset, metrics::DatasetId};
use draftwise_engine::{Turn, is_double_pick};
use draftwise_evaluator::{
    config::EngineConfig,
    scoring::DraftEngine,
    suggestions::{ComboSuggestion, Suggestion},
};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Metrics bundle JSON file
    #[arg(long)]
    metrics: PathBuf,
    /// Pick-rate dataset JSON file, used for blind-pick gating
    #[arg(long)]
    dataset: PathBuf,
    /// Draft script JSON file (bans and picks in sequence order)
    #[arg(long)]
    draft: PathBuf,
    /// Engine config JSON file
    #[arg(long)]
    engine_config: Option<PathBuf>,
    /// Number of suggestions (and combos) to output
    #[arg(long, default_value_t = 10)]
    top: usize,
    /// Also list pick pairs; always on for the first pick of a double pick
    #[arg(long)]
    combos: bool,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SuggestionReport {
    dataset_id: DatasetId,
    metrics_generated_at: DateTime<Utc>,
    turn: Turn,
    position: usize,
    baseline: f64,
    suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    combos: Option<Vec<ComboSuggestion>>,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let metrics = util::read_metrics_file(&arg.metrics)?;
    let dataset: Dataset = util::read_json_file("dataset", &arg.dataset)?;
    let config: EngineConfig =
        util::read_config_file("engine config", arg.engine_config.as_deref())?;
    let engine =
        DraftEngine::with_config(&metrics, config).context("Failed to build draft engine")?;
    let session = util::read_draft_file(&arg.draft)?;

    let (Some(turn), Some(position)) = (session.current_turn(), session.current_position()) else {
        anyhow::bail!("The draft is finished; there is no pick to suggest");
    };
    let ctx = engine.context(&session, turn.side);
    let baseline = engine.evaluate_draft(&ctx, ctx.ally()).total_score;

    let mut suggestions = engine.get_suggestions(&ctx, &dataset);
    suggestions.truncate(arg.top);
    let combos = (arg.combos || is_double_pick(position)).then(|| {
        let mut combos = engine.get_combo_suggestions(&ctx, &dataset);
        combos.truncate(arg.top);
        combos
    });
    if let Some(best) = suggestions.first() {
        tracing::info!(
            %turn,
            champion = %best.score.champion,
            role = %best.score.role,
            lookahead_delta = best.lookahead_delta,
            gated = best.gated,
            "top suggestion"
        );
    }

    let report = SuggestionReport {
        dataset_id: metrics.dataset_id.clone(),
        metrics_generated_at: metrics.generated_at,
        turn,
        position,
        baseline,
        suggestions,
        combos,
    };
    Output::save_json(&report, arg.output.clone())
}
