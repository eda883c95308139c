use chrono::NaiveDateTime;
use chrono_tz::Tz;
use manaba_core::assignment::local_to_utc;
use manaba_core::payload::EventPayload;

use super::ToGoogle;

impl ToGoogle<google_calendar::types::Event> for EventPayload {
    fn to_google(&self) -> google_calendar::types::Event {
        let at = local_to_google(self.at, self.time_zone);

        let reminders = google_calendar::types::Reminders {
            overrides: vec![google_calendar::types::EventReminder {
                method: "popup".to_string(),
                minutes: self.reminder_minutes,
            }],
            use_default: false,
        };

        google_calendar::types::Event {
            summary: self.summary.clone(),
            description: self.description.clone(),
            start: Some(at.clone()),
            end: Some(at),
            color_id: self.color_id.clone(),
            reminders: Some(reminders),
            ..Default::default()
        }
    }
}

/// Local wall-clock time to Google's EventDateTime, keeping the zone name
/// so the event displays in that zone.
fn local_to_google(at: NaiveDateTime, tz: Tz) -> google_calendar::types::EventDateTime {
    let instant = local_to_utc(at, tz);

    google_calendar::types::EventDateTime {
        date: None,
        date_time: Some(instant),
        time_zone: tz.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use manaba_core::payload::PayloadSettings;
    use manaba_core::{AssignmentRecord, Category};

    #[test]
    fn test_payload_to_google() {
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let record = AssignmentRecord::new(Category::Report, "統計学", deadline);
        let payload = EventPayload::for_record(&record, &PayloadSettings::default());

        let event = payload.to_google();

        assert_eq!(event.summary, "【提出：レポート】統計学");
        assert_eq!(event.description, "[manaba-auto]");
        assert_eq!(event.color_id, "11");

        let start = event.start.expect("start");
        let end = event.end.expect("end");
        assert_eq!(start.date_time, Some(Utc.with_ymd_and_hms(2025, 1, 15, 14, 59, 0).unwrap()));
        assert_eq!(start.time_zone, "Asia/Tokyo");
        assert_eq!(start.date_time, end.date_time);

        let reminders = event.reminders.expect("reminders");
        assert!(!reminders.use_default);
        assert_eq!(reminders.overrides.len(), 1);
        assert_eq!(reminders.overrides[0].method, "popup");
        assert_eq!(reminders.overrides[0].minutes, 60);
    }

    #[test]
    fn test_gap_deadline_is_not_written_as_utc() {
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 9)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let record = AssignmentRecord::new(Category::Quiz, "Statistics", deadline);
        let settings = PayloadSettings {
            time_zone: chrono_tz::America::New_York,
            ..PayloadSettings::default()
        };

        let event = EventPayload::for_record(&record, &settings).to_google();

        let start = event.start.expect("start");
        assert_eq!(start.date_time, Some(Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap()));
        assert_eq!(start.time_zone, "America/New_York");
    }
}
