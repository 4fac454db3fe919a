//! Pure scoring core: composite scores, batch-relative thresholds and the
//! feed-size adjustment policy.

pub mod composite;
pub mod policy;
pub mod thresholds;

pub use composite::{CompositeScorer, ScoreWeights};
pub use policy::FeedSizePolicy;
pub use thresholds::{ThresholdPair, dynamic_thresholds};
