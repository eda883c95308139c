//! Date range for listing events.

use chrono::{DateTime, Duration, Utc};

/// Date range for listing events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// `days` before `now`, unbounded into the future. Bounds the number of
    /// events listed per run.
    pub fn lookback(now: DateTime<Utc>, days: i64) -> Self {
        DateRange {
            from: Some(now - Duration::days(days)),
            to: None,
        }
    }

    /// `from` as RFC3339, or `None` if unbounded.
    pub fn from_rfc3339(&self) -> Option<String> {
        self.from.map(|dt| dt.to_rfc3339())
    }

    /// `to` as RFC3339, or `None` if unbounded.
    pub fn to_rfc3339(&self) -> Option<String> {
        self.to.map(|dt| dt.to_rfc3339())
    }
}
