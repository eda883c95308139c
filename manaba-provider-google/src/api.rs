use anyhow::{Context, Result};
use chrono::Utc;
use google_calendar::Client;
use google_calendar::types::{OrderBy, SendUpdates};
use manaba_core::CalendarEvent;
use manaba_core::date_range::DateRange;
use manaba_core::payload::EventPayload;
use tracing::{debug, info};

use crate::convert::{FromGoogle, ToGoogle};
use crate::session::Session;

/// One Google calendar the tool writes deadlines into.
pub struct GoogleCalendar {
    client: Client,
    calendar_id: String,
}

impl GoogleCalendar {
    pub fn new(session: &Session, calendar_id: &str) -> Result<Self> {
        Ok(GoogleCalendar {
            client: session.client(Utc::now())?,
            calendar_id: calendar_id.to_string(),
        })
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Events created by this tool within `range`. Everything else on the
    /// calendar is dropped here and never reaches the reconciler.
    pub async fn list_owned_events(&self, range: &DateRange) -> Result<Vec<CalendarEvent>> {
        let time_min = range.from_rfc3339().unwrap_or_default();
        let time_max = range.to_rfc3339().unwrap_or_default();

        let response = self
            .client
            .events()
            .list_all(
                &self.calendar_id,
                "",
                0,
                OrderBy::default(),
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // expand recurring events
                &time_max,
                &time_min,
                "",
                "",
            )
            .await
            .context("Failed to fetch events")?;

        let mut owned = Vec::new();

        for event in response.body {
            if event.status == "cancelled" || event.id.is_empty() {
                continue;
            }

            let event = CalendarEvent::from_google(event)?;
            if event.is_owned() {
                owned.push(event);
            } else {
                debug!("Skipping foreign event {}", event.id);
            }
        }

        info!("Listed {} owned events on {}", owned.len(), self.calendar_id);
        Ok(owned)
    }

    /// Insert a new event and return its id.
    pub async fn insert_event(&self, payload: &EventPayload) -> Result<String> {
        let google_event = payload.to_google();

        let response = self
            .client
            .events()
            .insert(
                &self.calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &google_event,
            )
            .await
            .with_context(|| format!("Failed to create event: {}", payload.summary))?;

        Ok(response.body.id)
    }

    /// Delete an event. An event that is already gone counts as deleted.
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        let result = self
            .client
            .events()
            .delete(&self.calendar_id, event_id, false, SendUpdates::None)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("410") || error_str.contains("Gone") {
                    debug!("Event {} already deleted", event_id);
                    Ok(())
                } else {
                    Err(e).with_context(|| format!("Failed to delete event: {}", event_id))
                }
            }
        }
    }
}
