//! Statistical primitives for the Draftwise project.
//!
//! This crate provides the small numeric toolkit the metrics pipeline is built on:
//!
//! - **Descriptive statistics**: mean, median, population variance and standard deviation
//! - **Z-scores**: standardize values against a reference population (one role bucket)
//! - **Beta-Binomial smoothing**: shrink observed win rates toward a prior average
//! - **Information measures**: normalized pointwise mutual information for co-picks
//! - **Running moments**: streaming mean/variance for row-by-row accumulation
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`zscore`]: Z-score standardization
//! - [`smoothing`]: Beta-Binomial shrinkage of rates
//! - [`information`]: Co-occurrence and NPMI
//! - [`moments`]: Welford streaming moments
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use draftwise_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Smoothing a win rate
//!
//! ```
//! use draftwise_stats::smoothing::BetaBinomialPrior;
//!
//! let prior = BetaBinomialPrior::new(0.5, 16.0);
//! let adjusted = prior.posterior_mean(3, 3);
//! assert!(adjusted > 0.5 && adjusted < 1.0);
//! ```

pub mod descriptive;
pub mod information;
pub mod moments;
pub mod smoothing;
pub mod zscore;
