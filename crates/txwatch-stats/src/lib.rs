//! # txwatch-stats
//!
//! Descriptive statistics behind every txwatch chart.
//!
//! ## Modules
//!
//! - `summary` - Box-plot summaries: quartiles, IQR fences, outliers, mean
//! - `group` - First-seen-order grouping, per-group aggregates, calendar keys
//! - `normalize` - Magnitude normalization for correlation/importance bars
//!
//! ## Input precondition
//!
//! Every function here assumes finite input. NaN and infinities are not
//! filtered: debug builds assert on them, release builds produce
//! unspecified (but non-panicking) results. Run untrusted data through
//! [`txwatch_core::sanitize`] first.

pub mod group;
pub mod normalize;
pub mod summary;

pub use group::*;
pub use normalize::*;
pub use summary::*;
