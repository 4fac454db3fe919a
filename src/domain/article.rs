use crate::domain::Layout;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which the assigned tier is written back onto an article.
pub const LAYOUT_FIELD: &str = "jigsaw_layout";

const HYGGE_SCORE_FIELD: &str = "hygge_score";
const FINAL_SCORE_FIELD: &str = "final_score";
const INGESTED_DATE_FIELD: &str = "ingested_date";

/// Naive formats accepted for `ingested_date`, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// A feed article as received from the caller.
///
/// Only `hygge_score`, `final_score` and `ingested_date` are interpreted;
/// every other key is carried through untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Article {
    fields: Map<String, Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestedDateError {
    #[error("ingested_date is missing")]
    Missing,

    #[error("ingested_date {0} is not a recognised timestamp")]
    Unparseable(String),

    #[error("ingested_date {0} is out of range")]
    OutOfRange(String),
}

impl Article {
    /// Affinity signal; `None` when absent, non-numeric or non-finite.
    #[must_use]
    pub fn hygge_score(&self) -> Option<f64> {
        self.finite_number(HYGGE_SCORE_FIELD)
    }

    /// Relevance signal; `None` when absent, non-numeric or non-finite.
    #[must_use]
    pub fn final_score(&self) -> Option<f64> {
        self.finite_number(FINAL_SCORE_FIELD)
    }

    /// Parse `ingested_date` as RFC 3339, a naive UTC datetime, a bare date,
    /// or epoch milliseconds.
    pub fn ingested_date(&self) -> Result<DateTime<Utc>, IngestedDateError> {
        match self.fields.get(INGESTED_DATE_FIELD) {
            None | Some(Value::Null) => Err(IngestedDateError::Missing),
            Some(Value::String(raw)) => parse_date_str(raw),
            Some(Value::Number(n)) => {
                let millis = n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
                    .ok_or_else(|| IngestedDateError::Unparseable(n.to_string()))?;
                DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| IngestedDateError::OutOfRange(n.to_string()))
            }
            Some(other) => Err(IngestedDateError::Unparseable(other.to_string())),
        }
    }

    fn finite_number(&self, key: &str) -> Option<f64> {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
    }
}

fn parse_date_str(raw: &str) -> Result<DateTime<Utc>, IngestedDateError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| IngestedDateError::Unparseable(format!("{raw:?}")))
}

/// An article tagged with its layout tier.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AnnotatedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub jigsaw_layout: Layout,
}

impl AnnotatedArticle {
    /// Wrap `article`, dropping any stale layout tag it already carried.
    #[must_use]
    pub fn new(mut article: Article, layout: Layout) -> Self {
        article.fields.remove(LAYOUT_FIELD);
        Self {
            article,
            jigsaw_layout: layout,
        }
    }
}
