//! Draft scoring and recommendation engine.
//!
//! This crate turns an indexed metrics bundle into answers about a draft in
//! progress, at three levels:
//!
//! 1. **Candidate scoring** ([`scoring`]) - scores one champion in one role
//!    against the current compositions as a weighted sum of components
//!    (intrinsic, reliability, blind, flex, synergy, counter, deny, exposure).
//!
//! 2. **Draft evaluation** ([`evaluation`]) - sums the locked picks of a team
//!    plus composition bonuses and penalties into a total score with a
//!    per-pick breakdown.
//!
//! 3. **Recommendation search** ([`search`], [`suggestions`]) - per-role
//!    shortlists, a bounded beam search projecting the side's next picks,
//!    pick pairs for double-pick phases, and blind-pick gating.
//!
//! # Architecture
//!
//! ```text
//! Suggestions (ranked, gated)
//!     ↓ uses
//! Beam continuation / combos (project future picks)
//!     ↓ uses
//! Draft evaluation (score a whole team)
//!     ↓ uses
//! Candidate scoring (score one pick)
//! ```
//!
//! # Supporting Modules
//!
//! - [`context`] - the draft snapshot every query is made against
//! - [`config`] - per-slot weight table, search bounds, composition rules
//! - [`cache`] - engine reuse per dataset and evaluation memoization
//!
//! # Design Principles
//!
//! ## Explicit State
//!
//! Every query takes a [`DraftContext`](context::DraftContext) built from a
//! session or by hand. The engine holds no draft state and never changes after
//! construction.
//!
//! ## Absence Is Not Zero
//!
//! Missing bundle entries surface as [`ScoreBasis::RolePrior`](scoring::ScoreBasis)
//! instead of silently scoring zero.
//!
//! ## Tunable Constants
//!
//! Slot weights, beam width, lookahead depth and gating threshold are
//! configuration ([`EngineConfig`](config::EngineConfig)), not derived values.
//!
//! # Example
//!
//! ```rust,no_run
//! use draftwise_analysis::{dataset::Dataset, metrics::PrecomputedDraftMetrics};
//! use draftwise_engine::{DraftSession, Side};
//! use draftwise_evaluator::scoring::DraftEngine;
//!
//! # let metrics: PrecomputedDraftMetrics = todo!();
//! # let dataset: Dataset = todo!();
//! let engine = DraftEngine::new(&metrics)?;
//! let session = DraftSession::new();
//! let ctx = engine.context(&session, Side::Ally);
//!
//! for suggestion in engine.get_suggestions(&ctx, &dataset).iter().take(5) {
//!     let score = &suggestion.score;
//!     println!("{} {}: {:+.3}", score.role, score.champion, suggestion.lookahead_delta);
//! }
//! # Ok::<(), draftwise_analysis::index::IndexBuildError>(())
//! ```
//!
//! # Current Limitations
//!
//! - **Ally-only lookahead**: the beam projects the side's own picks; enemy
//!   responses are not simulated.
//! - **Greedy pruning**: the beam keeps a fixed number of states per depth and
//!   may miss the best line.
//! - **Linear model**: components are combined additively and cannot express
//!   interactions beyond pair synergy and matchups.

pub mod cache;
pub mod config;
pub mod context;
pub mod evaluation;
pub mod scoring;
pub mod search;
pub mod suggestions;
