//! Batch-relative tier cutoffs.

/// Share of the batch, before adjustment, that may rank as prominent.
const PROMINENT_PERCENTILE: f64 = 0.1;
/// Share of the batch, before adjustment, that may rank as average or better.
const AVERAGE_PERCENTILE: f64 = 0.5;

/// Cutoffs separating the three layout tiers. A score must be strictly
/// greater than a cutoff to reach that tier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThresholdPair {
    pub prominent: f64,
    pub average: f64,
}

/// Derive cutoffs from the scores of a whole batch.
///
/// Scores are ranked descending and each cutoff is read at
/// `floor(len * adjustment_factor * percentile)`. Indices are not clamped: a
/// position past the end of the batch yields a cutoff of 0.
#[must_use]
pub fn dynamic_thresholds(scores: &[f64], adjustment_factor: f64) -> ThresholdPair {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.total_cmp(a));

    ThresholdPair {
        prominent: score_at_percentile(&ranked, adjustment_factor, PROMINENT_PERCENTILE),
        average: score_at_percentile(&ranked, adjustment_factor, AVERAGE_PERCENTILE),
    }
}

fn score_at_percentile(ranked: &[f64], adjustment_factor: f64, percentile: f64) -> f64 {
    let position = (ranked.len() as f64 * adjustment_factor * percentile).floor();
    if position.is_nan() || position < 0.0 {
        return 0.0;
    }
    ranked.get(position as usize).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_yields_zero_cutoffs() {
        assert_eq!(dynamic_thresholds(&[], 1.0), ThresholdPair::default());
        assert_eq!(dynamic_thresholds(&[], 1.1), ThresholdPair::default());
    }

    #[test]
    fn test_five_scores_at_neutral_factor() {
        let pair = dynamic_thresholds(&[10.0, 8.0, 6.0, 4.0, 2.0], 1.0);
        assert_eq!(pair.prominent, 10.0);
        assert_eq!(pair.average, 6.0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let pair = dynamic_thresholds(&[4.0, 10.0, 2.0, 6.0, 8.0], 1.0);
        assert_eq!(pair.prominent, 10.0);
        assert_eq!(pair.average, 6.0);
    }

    #[test]
    fn test_small_feed_factor_shifts_positions() {
        // 20 * 0.9 * 0.1 = 1.8 -> 1, 20 * 0.9 * 0.5 = 9
        let scores: Vec<f64> = (1..=20).map(f64::from).collect();
        let pair = dynamic_thresholds(&scores, 0.9);
        assert_eq!(pair.prominent, 19.0);
        assert_eq!(pair.average, 11.0);
    }

    #[test]
    fn test_large_feed_factor_shifts_positions() {
        // 20 * 1.1 * 0.1 = 2.2 -> 2, 20 * 1.1 * 0.5 = 11
        let scores: Vec<f64> = (1..=20).map(f64::from).collect();
        let pair = dynamic_thresholds(&scores, 1.1);
        assert_eq!(pair.prominent, 18.0);
        assert_eq!(pair.average, 9.0);
    }

    #[test]
    fn test_out_of_bounds_position_falls_back_to_zero() {
        // 2 * 1.1 * 0.5 = 1.1 -> 1 is still in bounds
        let pair = dynamic_thresholds(&[3.0, 1.0], 1.1);
        assert_eq!(pair.average, 1.0);

        // 2 * 5 * 0.1 = 1 is in bounds, 2 * 5 * 0.5 = 5 is not
        let pinned = dynamic_thresholds(&[3.0, 1.0], 5.0);
        assert_eq!(pinned.prominent, 1.0);
        assert_eq!(pinned.average, 0.0);
    }

    #[test]
    fn test_single_score_is_both_cutoffs() {
        let pair = dynamic_thresholds(&[4.2], 1.0);
        assert_eq!(pair.prominent, 4.2);
        assert_eq!(pair.average, 4.2);
    }

    #[test]
    fn test_negative_factor_yields_zero_cutoffs() {
        assert_eq!(
            dynamic_thresholds(&[5.0, 4.0], -1.0),
            ThresholdPair::default()
        );
    }
}
