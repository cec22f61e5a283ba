//! Reuse of engines and evaluations across repeated queries.
//!
//! - [`EngineCache`] keeps one [`DraftEngine`] per dataset. Engines are
//!   immutable, so they are handed out as [`Arc`]s and shared freely.
//! - [`EvaluationMemo`] recomputes a side's [`DraftEvaluation`] only when the
//!   session revision or the engine's dataset changed since the last call.
//!   A memo belongs to one session; revisions of different sessions are not
//!   comparable.

use std::{collections::HashMap, sync::Arc};

use draftwise_analysis::metrics::{DatasetId, PrecomputedDraftMetrics};
use draftwise_engine::{DraftSession, Side};

use crate::{
    config::EngineConfig,
    evaluation::DraftEvaluation,
    scoring::{DraftEngine, EngineError},
};

#[derive(Debug, Default)]
pub struct EngineCache {
    config: EngineConfig,
    engines: HashMap<DatasetId, Arc<DraftEngine>>,
}

impl EngineCache {
    /// A cache whose engines are all built with `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            engines: HashMap::new(),
        }
    }

    /// The engine for `metrics.dataset_id`, built on first use.
    ///
    /// # Errors
    ///
    /// Fails when the engine cannot be built; nothing is cached then.
    pub fn get_or_build(
        &mut self,
        metrics: &PrecomputedDraftMetrics,
    ) -> Result<Arc<DraftEngine>, EngineError> {
        if let Some(engine) = self.engines.get(&metrics.dataset_id) {
            return Ok(Arc::clone(engine));
        }
        let engine = DraftEngine::with_config(metrics, self.config.clone())?.into_shared();
        tracing::debug!(dataset_id = %metrics.dataset_id, "draft engine built");
        self.engines
            .insert(metrics.dataset_id.clone(), Arc::clone(&engine));
        Ok(engine)
    }

    #[must_use]
    pub fn get(&self, dataset_id: &DatasetId) -> Option<Arc<DraftEngine>> {
        self.engines.get(dataset_id).cloned()
    }

    /// Drops the engine of one dataset. Returns whether it was cached.
    pub fn invalidate(&mut self, dataset_id: &DatasetId) -> bool {
        self.engines.remove(dataset_id).is_some()
    }

    /// Drops every engine.
    pub fn clear(&mut self) {
        self.engines.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[derive(Debug)]
struct MemoEntry {
    revision: u64,
    dataset_id: DatasetId,
    evaluation: DraftEvaluation,
}

#[derive(Debug, Default)]
pub struct EvaluationMemo {
    entries: [Option<MemoEntry>; 2],
    hits: u64,
    misses: u64,
}

impl EvaluationMemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The evaluation of `side` in `session`, recomputed only when stale.
    pub fn evaluate(
        &mut self,
        engine: &DraftEngine,
        session: &DraftSession,
        side: Side,
    ) -> &DraftEvaluation {
        let revision = session.revision();
        let dataset_id = engine.index().dataset_id();
        let slot = &mut self.entries[side.index()];
        let fresh = slot
            .as_ref()
            .is_some_and(|entry| entry.revision == revision && entry.dataset_id == *dataset_id);
        if fresh {
            self.hits += 1;
        } else {
            self.misses += 1;
            *slot = None;
        }
        &slot
            .get_or_insert_with(|| MemoEntry {
                revision,
                dataset_id: dataset_id.clone(),
                evaluation: engine.evaluate_session(session, side),
            })
            .evaluation
    }

    /// Forgets every memoized evaluation.
    pub fn invalidate(&mut self) {
        self.entries = [None, None];
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use draftwise_engine::Role;

    use crate::scoring::tests::{bundle, engine};

    use super::*;

    #[test]
    fn test_engine_cache_reuses_per_dataset() {
        let mut cache = EngineCache::default();
        let metrics = bundle();
        let first = cache.get_or_build(&metrics).unwrap();
        let second = cache.get_or_build(&metrics).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let mut other = bundle();
        other.dataset_id = DatasetId::new("other");
        let third = cache.get_or_build(&other).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&other.dataset_id));
        assert!(cache.get(&other.dataset_id).is_none());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_engine_cache_does_not_keep_failures() {
        let mut config = EngineConfig::default();
        config.search.top_k = 0;
        let mut cache = EngineCache::new(config);
        assert!(cache.get_or_build(&bundle()).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_memo_recomputes_on_revision_change() {
        let engine = engine();
        let mut memo = EvaluationMemo::new();
        let mut session = DraftSession::new();

        let empty = memo.evaluate(&engine, &session, Side::Ally).total_score;
        memo.evaluate(&engine, &session, Side::Ally);
        assert_eq!((memo.hits(), memo.misses()), (1, 1));

        session.pick_champion(Side::Ally, 0, Some("Aatrox".into()), Some(Role::Top));
        let evaluation = memo.evaluate(&engine, &session, Side::Ally);
        assert_eq!(evaluation.picks.len(), 1);
        assert_ne!(evaluation.total_score, empty);
        assert_eq!((memo.hits(), memo.misses()), (1, 2));

        memo.evaluate(&engine, &session, Side::Opponent);
        assert_eq!(memo.misses(), 3);
        memo.evaluate(&engine, &session, Side::Ally);
        assert_eq!(memo.hits(), 2);
    }

    #[test]
    fn test_memo_ignores_refused_mutations() {
        let engine = engine();
        let mut memo = EvaluationMemo::new();
        let mut session = DraftSession::new();
        session.pick_champion(Side::Ally, 0, Some("Aatrox".into()), Some(Role::Top));
        memo.evaluate(&engine, &session, Side::Ally);

        // Aatrox is locked, so the ban is refused and the state is unchanged.
        let outcome = session.ban("Aatrox".into());
        assert!(outcome.is_ignored());
        memo.evaluate(&engine, &session, Side::Ally);
        assert_eq!((memo.hits(), memo.misses()), (1, 1));

        memo.invalidate();
        memo.evaluate(&engine, &session, Side::Ally);
        assert_eq!(memo.misses(), 2);
    }
}
