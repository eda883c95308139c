//! Read-only view of a calendar event, as the reconciler sees it.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::OWNED_MARKER;

/// A calendar event listed from the remote calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Provider-assigned event id
    pub id: String,
    pub summary: String,
    /// `None` for all-day events
    pub start: Option<DateTime<Utc>>,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, summary: impl Into<String>, start: Option<DateTime<Utc>>) -> Self {
        CalendarEvent {
            id: id.into(),
            summary: summary.into(),
            start,
        }
    }

    /// True iff this tool created the event.
    pub fn is_owned(&self) -> bool {
        self.summary.contains(OWNED_MARKER)
    }

    /// The `category】course` text following the title marker.
    pub fn identity(&self) -> Option<&str> {
        self.summary
            .split_once(OWNED_MARKER)
            .map(|(_, rest)| rest)
    }

    /// Start instant truncated to the minute.
    pub fn start_minute(&self) -> Option<DateTime<Utc>> {
        self.start.and_then(truncate_to_minute)
    }
}

pub(crate) fn truncate_to_minute(dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
    dt.with_second(0).and_then(|dt| dt.with_nanosecond(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_owned_predicate() {
        let owned = CalendarEvent::new("a", "【提出：レポート】統計学", None);
        let foreign = CalendarEvent::new("b", "統計学 補講", None);

        assert!(owned.is_owned());
        assert!(!foreign.is_owned());
        assert_eq!(owned.identity(), Some("レポート】統計学"));
        assert_eq!(foreign.identity(), None);
    }

    #[test]
    fn test_start_minute_truncates_seconds() {
        let start = Utc.with_ymd_and_hms(2025, 1, 15, 14, 59, 42).unwrap()
            + chrono::Duration::milliseconds(500);
        let event = CalendarEvent::new("a", "x", Some(start));
        assert_eq!(
            event.start_minute(),
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 14, 59, 0).unwrap())
        );
    }
}
