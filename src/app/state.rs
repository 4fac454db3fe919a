use crate::adapter::redis::RedisFeedSizeOracle;
use crate::config::Settings;
use crate::error::ServiceError;
use crate::layout::LayoutAssigner;
use crate::port::FeedSizeOracle;
use std::sync::Arc;

/// Shared application state holding the layout assigner.
#[derive(Clone)]
pub struct AppState {
    assigner: Arc<LayoutAssigner>,
}

impl AppState {
    #[must_use]
    pub fn new(assigner: LayoutAssigner) -> Self {
        Self {
            assigner: Arc::new(assigner),
        }
    }

    /// Create `AppState` from configuration settings.
    ///
    /// Waits for the Redis connection backing the feed-size oracle.
    ///
    /// # Errors
    /// Returns [`ServiceError::Redis`] when the store cannot be reached.
    pub async fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        let oracle = RedisFeedSizeOracle::connect(
            settings.redis_connection_info(),
            settings.feed_keys.clone(),
            settings.redis_connect_timeout,
        )
        .await?;
        let oracle: Arc<dyn FeedSizeOracle> = Arc::new(oracle);

        let assigner = LayoutAssigner::new(oracle)
            .with_scorer(settings.scorer())
            .with_policy(settings.policy())
            .with_oracle_timeout(settings.feed_size_timeout);

        Ok(Self::new(assigner))
    }

    #[must_use]
    pub fn assigner(&self) -> &LayoutAssigner {
        &self.assigner
    }
}
