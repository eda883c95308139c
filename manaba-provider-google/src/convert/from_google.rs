use anyhow::{Result, bail};
use manaba_core::CalendarEvent;

use super::FromGoogle;

impl FromGoogle<google_calendar::types::Event> for CalendarEvent {
    fn from_google(event: google_calendar::types::Event) -> Result<Self> {
        if event.id.is_empty() {
            bail!("Event has no id");
        }

        // All-day events have only `date`; they get no start instant.
        let start = event.start.as_ref().and_then(|s| s.date_time);

        Ok(CalendarEvent::new(event.id, event.summary, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn google_event(id: &str, start: google_calendar::types::EventDateTime) -> google_calendar::types::Event {
        google_calendar::types::Event {
            id: id.to_string(),
            summary: "【提出：小テスト】英語".to_string(),
            start: Some(start),
            ..Default::default()
        }
    }

    #[test]
    fn test_timed_event() {
        let at = Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap();
        let event = google_event(
            "abc",
            google_calendar::types::EventDateTime {
                date: None,
                date_time: Some(at),
                time_zone: "Asia/Tokyo".to_string(),
            },
        );

        let converted = CalendarEvent::from_google(event).unwrap();

        assert_eq!(converted.id, "abc");
        assert_eq!(converted.start, Some(at));
        assert!(converted.is_owned());
    }

    #[test]
    fn test_all_day_event_has_no_start() {
        let event = google_event(
            "abc",
            google_calendar::types::EventDateTime {
                date: NaiveDate::from_ymd_opt(2025, 1, 20),
                date_time: None,
                time_zone: String::new(),
            },
        );

        let converted = CalendarEvent::from_google(event).unwrap();

        assert_eq!(converted.start, None);
    }

    #[test]
    fn test_event_without_id_is_rejected() {
        let event = google_calendar::types::Event::default();
        assert!(CalendarEvent::from_google(event).is_err());
    }
}
