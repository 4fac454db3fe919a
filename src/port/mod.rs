pub mod feed_size_oracle;

pub use feed_size_oracle::{FeedSizeOracle, OracleError};
