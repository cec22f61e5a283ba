//! Offline statistics for the draft advisor.
//!
//! This crate turns raw per-player match exports into the precomputed metrics
//! bundle the scoring engine runs on, and indexes that bundle for lookups.
//!
//! # Overview
//!
//! 1. **Parse Records** ([`record::PlayerGameRow`], [`record::TeamPickRow`]):
//!    tolerant input rows, validated one by one
//! 2. **Aggregate** ([`aggregate::Aggregator`]): smoothed win rates, within-role
//!    z-scores, composite components, counters, synergy and player reliability
//! 3. **Persist** ([`metrics::PrecomputedDraftMetrics`], [`dataset::Dataset`]):
//!    versioned, serializable outputs; [`schema`] migrates older bundles
//! 4. **Index** ([`index::MetricsIndex`]): validated O(1) lookups
//!
//! # Example
//!
//! ```no_run
//! use draftwise_analysis::{
//!     aggregate::Aggregator, config::AggregationConfig, index::MetricsIndex,
//!     record::PlayerGameRow,
//! };
//! use draftwise_engine::Role;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let rows: Vec<PlayerGameRow> = vec![]; // Load from file
//! let aggregation = Aggregator::new(AggregationConfig::default())?.aggregate(&rows, &[]);
//! println!("skipped {} rows", aggregation.report.skipped());
//!
//! let index = MetricsIndex::new(&aggregation.metrics)?;
//! if let Some(entry) = index.champion_role("Ahri", Role::Middle) {
//!     println!("Ahri mid: {:.3}", entry.winrate_adjusted);
//! }
//! # Ok(())
//! # }
//! ```

pub mod accumulator;
pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod index;
pub mod metric;
pub mod metrics;
pub mod record;
pub mod schema;
