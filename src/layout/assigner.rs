//! Request-scoped layout assignment: feed size, scores, cutoffs, tiers.

use crate::domain::{AnnotatedArticle, Article, Layout};
use crate::error::LayoutError;
use crate::port::{FeedSizeOracle, OracleError};
use crate::scoring::{CompositeScorer, FeedSizePolicy, ThresholdPair, dynamic_thresholds};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Tier for `score`. Ties fall to the lower tier.
#[must_use]
pub fn classify(score: f64, thresholds: &ThresholdPair) -> Layout {
    if score > thresholds.prominent {
        Layout::Prominent
    } else if score > thresholds.average {
        Layout::Average
    } else {
        Layout::Minor
    }
}

/// Tags every article of a batch with a layout tier.
///
/// Holds no per-request state; one instance is shared by all requests.
#[derive(Clone)]
pub struct LayoutAssigner {
    oracle: Arc<dyn FeedSizeOracle>,
    scorer: CompositeScorer,
    policy: FeedSizePolicy,
    oracle_timeout: Duration,
}

impl LayoutAssigner {
    #[must_use]
    pub fn new(oracle: Arc<dyn FeedSizeOracle>) -> Self {
        Self {
            oracle,
            scorer: CompositeScorer::default(),
            policy: FeedSizePolicy::default(),
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: CompositeScorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FeedSizePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_oracle_timeout(mut self, oracle_timeout: Duration) -> Self {
        self.oracle_timeout = oracle_timeout;
        self
    }

    /// Assign layouts as of the current time.
    ///
    /// # Errors
    /// [`LayoutError::MissingArticles`] when `articles` is `None`,
    /// [`LayoutError::InvalidArticleData`] when any article's date cannot be
    /// read. Either error rejects the whole batch.
    pub async fn assign(
        &self,
        user_id: Option<&str>,
        articles: Option<Vec<Article>>,
    ) -> Result<Vec<AnnotatedArticle>, LayoutError> {
        self.assign_at(user_id, articles, Utc::now()).await
    }

    /// Assign layouts with recency measured against `now`.
    ///
    /// # Errors
    /// Same as [`LayoutAssigner::assign`].
    pub async fn assign_at(
        &self,
        user_id: Option<&str>,
        articles: Option<Vec<Article>>,
        now: DateTime<Utc>,
    ) -> Result<Vec<AnnotatedArticle>, LayoutError> {
        let articles = articles.ok_or(LayoutError::MissingArticles)?;
        if articles.is_empty() {
            debug!("Empty article batch, nothing to assign");
            return Ok(Vec::new());
        }

        // Score before the lookup so an invalid batch never reaches the store.
        let scores = articles
            .iter()
            .enumerate()
            .map(|(index, article)| self.scorer.score(index, article, now))
            .collect::<Result<Vec<_>, _>>()?;

        let feed_size = self.feed_size(user_id).await;
        let adjustment_factor = self.policy.adjustment_factor(feed_size);
        let thresholds = dynamic_thresholds(&scores, adjustment_factor);

        let annotated: Vec<AnnotatedArticle> = articles
            .into_iter()
            .zip(scores)
            .map(|(article, score)| AnnotatedArticle::new(article, classify(score, &thresholds)))
            .collect();

        let (prominent, average, minor) = tier_counts(&annotated);
        info!(
            anonymous = user_id.is_none(),
            articles = annotated.len(),
            feed_size,
            adjustment_factor,
            prominent_threshold = thresholds.prominent,
            average_threshold = thresholds.average,
            prominent,
            average,
            minor,
            "Assigned jigsaw layouts"
        );

        Ok(annotated)
    }

    /// Readiness of the feed-size store, bounded by the lookup timeout.
    ///
    /// # Errors
    /// [`OracleError::NotReady`] when the store fails the probe or does not
    /// answer in time.
    pub async fn store_ready(&self) -> Result<(), OracleError> {
        tokio::time::timeout(self.oracle_timeout, self.oracle.ready())
            .await
            .unwrap_or_else(|_| {
                Err(OracleError::NotReady(format!(
                    "timed out after {}ms",
                    self.oracle_timeout.as_millis()
                )))
            })
    }

    /// Feed size from the oracle; any failure or timeout counts as an empty feed.
    async fn feed_size(&self, user_id: Option<&str>) -> u64 {
        match tokio::time::timeout(self.oracle_timeout, self.oracle.feed_size(user_id)).await {
            Ok(Ok(size)) => size,
            Ok(Err(e)) => {
                warn!(error = %e, "Feed-size lookup failed, falling back to 0");
                0
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.oracle_timeout.as_millis() as u64,
                    "Feed-size lookup timed out, falling back to 0"
                );
                0
            }
        }
    }
}

fn tier_counts(articles: &[AnnotatedArticle]) -> (usize, usize, usize) {
    articles
        .iter()
        .fold((0, 0, 0), |(p, a, m), article| match article.jigsaw_layout {
            Layout::Prominent => (p + 1, a, m),
            Layout::Average => (p, a + 1, m),
            Layout::Minor => (p, a, m + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockFeedSizeOracle;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn article(hygge: f64) -> Article {
        serde_json::from_value(json!({
            "hygge_score": hygge,
            "ingested_date": "2025-06-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_classify_is_strictly_greater_than() {
        let thresholds = ThresholdPair {
            prominent: 10.0,
            average: 6.0,
        };
        assert_eq!(classify(10.5, &thresholds), Layout::Prominent);
        assert_eq!(classify(10.0, &thresholds), Layout::Average);
        assert_eq!(classify(6.0, &thresholds), Layout::Minor);
        assert_eq!(classify(2.0, &thresholds), Layout::Minor);
    }

    #[test]
    fn test_classify_with_zero_cutoffs() {
        let thresholds = ThresholdPair::default();
        assert_eq!(classify(0.1, &thresholds), Layout::Prominent);
        assert_eq!(classify(0.0, &thresholds), Layout::Minor);
    }

    #[tokio::test]
    async fn test_missing_articles_is_rejected() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(150));
        let assigner = LayoutAssigner::new(oracle.clone());

        let result = assigner.assign_at(Some("u1"), None, now()).await;

        assert_eq!(result, Err(LayoutError::MissingArticles));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_batch_skips_oracle() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(150));
        let assigner = LayoutAssigner::new(oracle.clone());

        let result = assigner.assign_at(None, Some(Vec::new()), now()).await;

        assert_eq!(result, Ok(Vec::new()));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_date_rejects_whole_batch() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(150));
        let assigner = LayoutAssigner::new(oracle.clone());
        let bad: Article = serde_json::from_value(json!({ "ingested_date": "soon" })).unwrap();

        let result = assigner
            .assign_at(Some("u1"), Some(vec![article(1.0), bad]), now())
            .await;

        assert!(matches!(
            result,
            Err(LayoutError::InvalidArticleData { index: 1, .. })
        ));
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_oracle_queried_once_per_batch() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(150));
        let assigner = LayoutAssigner::new(oracle.clone());
        let batch = (0..10).map(|i| article(f64::from(i))).collect();

        assigner.assign_at(Some("u1"), Some(batch), now()).await.unwrap();

        assert_eq!(oracle.calls(), 1);
        assert_eq!(oracle.last_user_id(), Some(Some("u1".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_ready_is_bounded_by_oracle_timeout() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(0));
        oracle.set_ready_hangs(true);
        let assigner =
            LayoutAssigner::new(oracle).with_oracle_timeout(Duration::from_millis(200));

        let result = assigner.store_ready().await;

        assert_eq!(
            result,
            Err(OracleError::NotReady("timed out after 200ms".to_string()))
        );
    }

    #[tokio::test]
    async fn test_store_ready_passes_through_probe_result() {
        let oracle = Arc::new(MockFeedSizeOracle::with_size(0));
        let assigner = LayoutAssigner::new(oracle.clone());
        assert_eq!(assigner.store_ready().await, Ok(()));

        oracle.set_ready(false);
        assert!(matches!(
            assigner.store_ready().await,
            Err(OracleError::NotReady(_))
        ));
    }

    #[test]
    fn test_tier_counts() {
        let annotated = vec![
            AnnotatedArticle::new(article(1.0), Layout::Prominent),
            AnnotatedArticle::new(article(1.0), Layout::Minor),
            AnnotatedArticle::new(article(1.0), Layout::Minor),
        ];
        assert_eq!(tier_counts(&annotated), (1, 0, 2));
    }
}
