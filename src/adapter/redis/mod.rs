mod feed_size;
mod keys;

pub use feed_size::RedisFeedSizeOracle;
pub use keys::FeedKeys;
