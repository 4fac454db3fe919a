use std::env;
use std::fmt::Display;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

use crate::adapter::redis::FeedKeys;
use crate::error::ServiceError;
use crate::scoring::{CompositeScorer, FeedSizePolicy, ScoreWeights};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_password: Option<String>,
    /// HTTP server port (layout assignment + health)
    pub http_port: u16,
    pub feed_keys: FeedKeys,
    /// Upper bound on a single feed-size lookup
    pub feed_size_timeout: Duration,
    pub redis_connect_timeout: Duration,
    pub weights: ScoreWeights,
    /// Pins the adjustment factor regardless of feed size
    pub fixed_adjustment_factor: Option<f64>,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_host(&self.redis_host)?;
        validate_port(self.redis_port)?;
        validate_port(self.http_port)?;
        validate_timeout("FEED_SIZE_TIMEOUT_MS", self.feed_size_timeout)?;
        validate_timeout("REDIS_CONNECT_TIMEOUT_MS", self.redis_connect_timeout)?;
        if !self.weights.is_valid() {
            return Err(ServiceError::Config(
                "Layout weights must be finite and non-negative".into(),
            ));
        }
        if let Some(factor) = self.fixed_adjustment_factor {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(ServiceError::Config(
                    "LAYOUT_FIXED_ADJUSTMENT_FACTOR must be a positive number".into(),
                ));
            }
        }
        if self.feed_keys.namespace.trim().is_empty()
            || self.feed_keys.anonymous_key.trim().is_empty()
        {
            return Err(ServiceError::Config("Feed keys cannot be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn scorer(&self) -> CompositeScorer {
        CompositeScorer::new(self.weights)
    }

    #[must_use]
    pub fn policy(&self) -> FeedSizePolicy {
        self.fixed_adjustment_factor
            .map_or_else(FeedSizePolicy::default, FeedSizePolicy::fixed)
    }

    #[must_use]
    pub fn redis_connection_info(&self) -> redis::ConnectionInfo {
        redis::ConnectionInfo {
            addr: redis::ConnectionAddr::Tcp(self.redis_host.clone(), self.redis_port),
            redis: redis::RedisConnectionInfo {
                password: self.redis_password.clone(),
                ..Default::default()
            },
        }
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let redis_host = lookup("REDIS_HOST").ok_or_else(|| {
            ServiceError::Config("Missing required environment variable: REDIS_HOST".into())
        })?;
        let redis_port = parse_or(&lookup, "REDIS_PORT", 6379)?;
        let redis_password = get_var_or_file(&lookup, "REDIS_PASSWORD")?;

        let http_port = parse_or(&lookup, "PORT", 3000)?;

        let defaults = FeedKeys::default();
        let feed_keys = FeedKeys {
            namespace: lookup("FEED_KEY_NAMESPACE").unwrap_or(defaults.namespace),
            anonymous_key: lookup("ANON_FEED_KEY").unwrap_or(defaults.anonymous_key),
        };

        let feed_size_timeout =
            Duration::from_millis(parse_or(&lookup, "FEED_SIZE_TIMEOUT_MS", 500)?);
        let redis_connect_timeout =
            Duration::from_millis(parse_or(&lookup, "REDIS_CONNECT_TIMEOUT_MS", 3000)?);

        let weights = parse_weights(&lookup)?;
        let fixed_adjustment_factor = lookup("LAYOUT_FIXED_ADJUSTMENT_FACTOR")
            .map(|raw| parse_value("LAYOUT_FIXED_ADJUSTMENT_FACTOR", &raw))
            .transpose()?;

        let settings = Self {
            redis_host,
            redis_port,
            redis_password,
            http_port,
            feed_keys,
            feed_size_timeout,
            redis_connect_timeout,
            weights,
            fixed_adjustment_factor,
        };

        // Validate settings before returning
        settings.validate()?;

        Ok(settings)
    }
}

/// Validates that the host is not empty or whitespace-only.
fn validate_host(host: &str) -> Result<(), ServiceError> {
    if host.trim().is_empty() {
        return Err(ServiceError::Config("Host cannot be empty".into()));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ServiceError> {
    if port == 0 {
        return Err(ServiceError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

fn validate_timeout(name: &str, timeout: Duration) -> Result<(), ServiceError> {
    if timeout.is_zero() {
        return Err(ServiceError::Config(format!("{name} cannot be 0")));
    }
    Ok(())
}

/// Preset first, then per-weight overrides.
fn parse_weights<F>(lookup: &F) -> Result<ScoreWeights, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut weights = match lookup("LAYOUT_WEIGHT_PRESET") {
        Some(name) => ScoreWeights::preset(&name).ok_or_else(|| {
            ServiceError::Config(format!(
                "Unknown LAYOUT_WEIGHT_PRESET {name:?} (expected \"hygge\" or \"balanced\")"
            ))
        })?,
        None => ScoreWeights::default(),
    };
    weights.hygge = parse_or(lookup, "LAYOUT_HYGGE_WEIGHT", weights.hygge)?;
    weights.final_score = parse_or(lookup, "LAYOUT_FINAL_SCORE_WEIGHT", weights.final_score)?;
    weights.recency = parse_or(lookup, "LAYOUT_RECENCY_WEIGHT", weights.recency)?;
    Ok(weights)
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ServiceError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ServiceError::Config(format!("Invalid value for {name}: {e}")))
}

/// Read a value from a variable, with support for _FILE suffix (Docker Secrets)
fn get_var_or_file<F>(lookup: &F, name: &str) -> Result<Option<String>, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_var = format!("{name}_FILE");
    if let Some(file_path) = lookup(&file_var) {
        return fs::read_to_string(&file_path)
            .map(|content| Some(content.trim().to_string()))
            .map_err(|e| ServiceError::Config(format!("Failed to read {file_var}: {e}")));
    }
    Ok(lookup(name).filter(|value| !value.is_empty()))
}

/// Load and validate settings from the process environment.
pub fn get_configuration() -> Result<Settings, ServiceError> {
    Settings::from_lookup(|name| env::var(name).ok())
}
