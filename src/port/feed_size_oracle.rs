//! FeedSizeOracle trait for looking up how many items a feed holds.
//!
//! This trait enables dependency injection for testability,
//! allowing unit tests to use mock implementations.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("feed-size store error: {0}")]
    Store(String),

    #[error("feed-size store is not ready: {0}")]
    NotReady(String),
}

/// Cardinality lookup over per-user and anonymous feeds.
///
/// This trait is dyn-compatible by using boxed futures.
/// Implementations include `RedisFeedSizeOracle` for production
/// and mock implementations for testing.
pub trait FeedSizeOracle: Send + Sync {
    /// Number of items in `user_id`'s feed, or in the anonymous feed when
    /// `user_id` is `None`.
    fn feed_size<'a>(
        &'a self,
        user_id: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<u64, OracleError>> + Send + 'a>>;

    /// Readiness probe for the underlying store.
    fn ready(&self) -> Pin<Box<dyn Future<Output = Result<(), OracleError>> + Send + '_>>;
}
