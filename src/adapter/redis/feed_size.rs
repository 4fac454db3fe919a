use super::FeedKeys;
use crate::error::ServiceError;
use crate::port::{FeedSizeOracle, OracleError};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info};

/// Feed-size oracle backed by Redis sorted sets (`ZCARD`).
///
/// The underlying `ConnectionManager` reconnects on its own; each call works
/// on a cheap clone of it.
#[derive(Clone)]
pub struct RedisFeedSizeOracle {
    connection: ConnectionManager,
    keys: FeedKeys,
}

impl RedisFeedSizeOracle {
    /// Open the connection and wait until it is established.
    ///
    /// # Errors
    /// Returns [`ServiceError::Redis`] if the client cannot be created or the
    /// first connection does not succeed within `connect_timeout`.
    pub async fn connect(
        info: redis::ConnectionInfo,
        keys: FeedKeys,
        connect_timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = redis::Client::open(info).map_err(|e| ServiceError::Redis(e.to_string()))?;

        let connection = tokio::time::timeout(connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                ServiceError::Redis(format!(
                    "connection not established within {}ms",
                    connect_timeout.as_millis()
                ))
            })?
            .map_err(|e| ServiceError::Redis(e.to_string()))?;

        info!(
            namespace = %keys.namespace,
            anonymous_key = %keys.anonymous_key,
            "Connected to Redis"
        );
        Ok(Self { connection, keys })
    }
}

impl FeedSizeOracle for RedisFeedSizeOracle {
    fn feed_size<'a>(
        &'a self,
        user_id: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<u64, OracleError>> + Send + 'a>> {
        let key = self.keys.key_for(user_id);
        let mut connection = self.connection.clone();
        Box::pin(async move {
            let size: u64 = connection
                .zcard(&key)
                .await
                .map_err(|e| OracleError::Store(e.to_string()))?;
            debug!(%key, size, "Fetched feed size");
            Ok(size)
        })
    }

    fn ready(&self) -> Pin<Box<dyn Future<Output = Result<(), OracleError>> + Send + '_>> {
        let mut connection = self.connection.clone();
        Box::pin(async move {
            let pong: String = redis::cmd("PING")
                .query_async(&mut connection)
                .await
                .map_err(|e| OracleError::NotReady(e.to_string()))?;
            if pong == "PONG" {
                Ok(())
            } else {
                Err(OracleError::NotReady(format!("unexpected PING reply: {pong}")))
            }
        })
    }
}
