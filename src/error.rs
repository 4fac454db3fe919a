use thiserror::Error;

/// Errors surfaced by a layout assignment request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Missing 'articles' in request body")]
    MissingArticles,

    #[error("Invalid article data at index {index}: {reason}")]
    InvalidArticleData { index: usize, reason: String },

    #[error("Internal layout error: {0}")]
    Internal(String),
}

/// Errors raised while bootstrapping or running the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to initialise feed-size store: {0}")]
    Redis(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
