//! Composite relevance score for a single article.

use crate::domain::Article;
use crate::error::LayoutError;
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
/// Recency score of content ingested within the last day.
const RECENCY_CEILING: f64 = 10.0;

/// Weight triple applied to the three scoring signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub hygge: f64,
    pub final_score: f64,
    pub recency: f64,
}

impl ScoreWeights {
    /// Affinity-leaning weights: hygge 0.5, final 0.2, recency 0.3.
    pub const HYGGE: Self = Self {
        hygge: 0.5,
        final_score: 0.2,
        recency: 0.3,
    };

    /// Even hygge/final weighting: hygge 0.4, final 0.4, recency 0.2.
    pub const BALANCED: Self = Self {
        hygge: 0.4,
        final_score: 0.4,
        recency: 0.2,
    };

    /// Look up a named preset (`hygge` or `balanced`).
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hygge" => Some(Self::HYGGE),
            "balanced" => Some(Self::BALANCED),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.hygge, self.final_score, self.recency]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::HYGGE
    }
}

/// Computes `hygge·w_h + final·w_f + recency·w_r` for an article.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeScorer {
    weights: ScoreWeights,
}

impl CompositeScorer {
    #[must_use]
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Score `article` as of `now`. `index` is the article's batch position,
    /// reported back when its date cannot be read.
    pub fn score(
        &self,
        index: usize,
        article: &Article,
        now: DateTime<Utc>,
    ) -> Result<f64, LayoutError> {
        let ingested =
            article
                .ingested_date()
                .map_err(|e| LayoutError::InvalidArticleData {
                    index,
                    reason: e.to_string(),
                })?;

        let hygge = article.hygge_score().unwrap_or(0.0) * self.weights.hygge;
        let final_score = article.final_score().unwrap_or(0.0) * self.weights.final_score;
        let recency = recency_score(ingested, now) * self.weights.recency;

        let score = hygge + final_score + recency;
        if score.is_finite() {
            Ok(score)
        } else {
            Err(LayoutError::Internal(format!(
                "composite score for article {index} is not finite"
            )))
        }
    }
}

/// `max(10 - ln(days), 0)` with `days` floored at 1.
#[must_use]
pub fn recency_score(ingested: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let days = ((now - ingested).num_milliseconds() as f64 / MILLIS_PER_DAY).max(1.0);
    (RECENCY_CEILING - days.ln()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn article(value: serde_json::Value) -> Article {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_recency_floor_for_fresh_and_future_content() {
        assert_eq!(recency_score(now(), now()), 10.0);
        assert_eq!(recency_score(now() + Duration::days(3), now()), 10.0);
        assert_eq!(recency_score(now() - Duration::hours(12), now()), 10.0);
    }

    #[test]
    fn test_recency_decays_logarithmically() {
        let ten_days = recency_score(now() - Duration::days(10), now());
        assert!((ten_days - (10.0 - 10f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_recency_bottoms_out_at_zero() {
        // e^10 days is roughly 60 years
        let ancient = now() - Duration::days(30_000);
        assert_eq!(recency_score(ancient, now()), 0.0);
    }

    #[test]
    fn test_score_uses_default_weights() {
        let scorer = CompositeScorer::default();
        let a = article(json!({
            "hygge_score": 8.0,
            "final_score": 5.0,
            "ingested_date": "2025-06-01T00:00:00Z"
        }));
        let score = scorer.score(0, &a, now()).unwrap();
        assert!((score - (8.0 * 0.5 + 5.0 * 0.2 + 10.0 * 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_score_respects_configured_weights() {
        let scorer = CompositeScorer::new(ScoreWeights::BALANCED);
        let a = article(json!({
            "hygge_score": 8.0,
            "final_score": 5.0,
            "ingested_date": "2025-06-01T00:00:00Z"
        }));
        let score = scorer.score(0, &a, now()).unwrap();
        assert!((score - (8.0 * 0.4 + 5.0 * 0.4 + 10.0 * 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_absent_signals_contribute_nothing() {
        let scorer = CompositeScorer::default();
        let a = article(json!({ "ingested_date": "2025-06-01T00:00:00Z" }));
        assert!((scorer.score(0, &a, now()).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unparseable_date_is_invalid_article_data() {
        let scorer = CompositeScorer::default();
        let a = article(json!({ "hygge_score": 1.0, "ingested_date": "not a date" }));
        match scorer.score(4, &a, now()) {
            Err(LayoutError::InvalidArticleData { index, .. }) => assert_eq!(index, 4),
            other => panic!("expected InvalidArticleData, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_score_is_internal_error() {
        let scorer = CompositeScorer::new(ScoreWeights {
            hygge: 4.0,
            final_score: 4.0,
            recency: 0.0,
        });
        let a = article(json!({
            "hygge_score": f64::MAX,
            "final_score": f64::MAX,
            "ingested_date": "2025-06-01T00:00:00Z"
        }));
        assert!(matches!(
            scorer.score(0, &a, now()),
            Err(LayoutError::Internal(_))
        ));
    }

    #[test]
    fn test_weight_presets() {
        assert_eq!(ScoreWeights::preset("hygge"), Some(ScoreWeights::HYGGE));
        assert_eq!(ScoreWeights::preset(" Balanced "), Some(ScoreWeights::BALANCED));
        assert_eq!(ScoreWeights::preset("custom"), None);
        assert_eq!(ScoreWeights::default(), ScoreWeights::HYGGE);
    }

    #[test]
    fn test_weight_validation() {
        assert!(ScoreWeights::HYGGE.is_valid());
        assert!(
            !ScoreWeights {
                hygge: -0.1,
                ..ScoreWeights::HYGGE
            }
            .is_valid()
        );
        assert!(
            !ScoreWeights {
                recency: f64::NAN,
                ..ScoreWeights::HYGGE
            }
            .is_valid()
        );
    }
}
