//! The event written to the calendar for a `Create` action.

use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::assignment::AssignmentRecord;
use crate::constants::{DEFAULT_COLOR_ID, DEFAULT_REMINDER_MINUTES, DEFAULT_TIME_ZONE, TOOL_SIGNATURE};

/// Settings that shape every created event.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSettings {
    pub time_zone: Tz,
    pub reminder_minutes: i64,
    pub color_id: String,
}

impl Default for PayloadSettings {
    fn default() -> Self {
        PayloadSettings {
            time_zone: DEFAULT_TIME_ZONE.parse().unwrap_or(chrono_tz::Asia::Tokyo),
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            color_id: DEFAULT_COLOR_ID.to_string(),
        }
    }
}

/// Provider-neutral shape of a new deadline event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    /// Start and end are the same instant
    pub at: NaiveDateTime,
    pub time_zone: Tz,
    pub color_id: String,
    /// Single popup reminder, minutes before `at`
    pub reminder_minutes: i64,
}

impl EventPayload {
    pub fn for_record(record: &AssignmentRecord, settings: &PayloadSettings) -> Self {
        EventPayload {
            summary: record.title(),
            description: TOOL_SIGNATURE.to_string(),
            at: record.deadline,
            time_zone: settings.time_zone,
            color_id: settings.color_id.clone(),
            reminder_minutes: settings.reminder_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Category;
    use crate::calendar_event::CalendarEvent;
    use chrono::NaiveDate;

    #[test]
    fn test_payload_is_recognized_as_owned() {
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let record = AssignmentRecord::new(Category::Report, "統計学", deadline);

        let payload = EventPayload::for_record(&record, &PayloadSettings::default());

        assert_eq!(payload.summary, "【提出：レポート】統計学");
        assert_eq!(payload.description, "[manaba-auto]");
        assert_eq!(payload.time_zone, chrono_tz::Asia::Tokyo);
        assert_eq!(payload.reminder_minutes, 60);
        assert_eq!(payload.color_id, "11");
        assert!(CalendarEvent::new("x", payload.summary, None).is_owned());
    }
}
