//! Maps a user's feed size to a percentile adjustment factor.

/// Step function from feed size to adjustment factor.
///
/// Feeds larger than `large_feed_above` widen the upper tiers, feeds smaller
/// than `small_feed_below` narrow them; the boundaries themselves map to the
/// default factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedSizePolicy {
    pub small_feed_below: u64,
    pub large_feed_above: u64,
    pub small_feed_factor: f64,
    pub default_factor: f64,
    pub large_feed_factor: f64,
}

impl FeedSizePolicy {
    /// Pin every feed size to `factor`, reproducing fixed-cutoff layouts.
    #[must_use]
    pub fn fixed(factor: f64) -> Self {
        Self {
            small_feed_factor: factor,
            default_factor: factor,
            large_feed_factor: factor,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn adjustment_factor(&self, feed_size: u64) -> f64 {
        if feed_size > self.large_feed_above {
            self.large_feed_factor
        } else if feed_size < self.small_feed_below {
            self.small_feed_factor
        } else {
            self.default_factor
        }
    }
}

impl Default for FeedSizePolicy {
    fn default() -> Self {
        Self {
            small_feed_below: 100,
            large_feed_above: 250,
            small_feed_factor: 0.9,
            default_factor: 1.0,
            large_feed_factor: 1.1,
        }
    }
}
