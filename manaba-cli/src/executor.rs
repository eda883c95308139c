//! Applying a reconciliation plan to the calendar.

use anyhow::{Context, Result};
use manaba_core::payload::{EventPayload, PayloadSettings};
use manaba_core::{CalendarAction, Plan};
use manaba_provider_google::GoogleCalendar;
use tracing::{debug, info};

use crate::observer::SyncObserver;
use crate::render::Render;

/// The two calendar writes a plan needs.
pub trait CalendarWriter {
    /// Insert an event and return its id.
    async fn insert(&self, payload: &EventPayload) -> Result<String>;

    async fn delete(&self, event_id: &str) -> Result<()>;
}

impl CalendarWriter for GoogleCalendar {
    async fn insert(&self, payload: &EventPayload) -> Result<String> {
        self.insert_event(payload).await
    }

    async fn delete(&self, event_id: &str) -> Result<()> {
        self.delete_event(event_id).await
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub created: usize,
    pub deleted: usize,
    pub kept: usize,
}

/// Execute `plan` in order. Stops at the first failed write; everything
/// before it stays applied and the next run picks up the rest.
pub async fn apply<W: CalendarWriter>(
    writer: &W,
    plan: &Plan,
    settings: &PayloadSettings,
    observer: &dyn SyncObserver,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for action in &plan.actions {
        match action {
            CalendarAction::Create { record } => {
                let payload = EventPayload::for_record(record, settings);
                let id = writer
                    .insert(&payload)
                    .await
                    .with_context(|| format!("Failed to create {}", record.title()))?;
                debug!("Created event {} for {}", id, record.identity());
                report.created += 1;
            }
            CalendarAction::Delete {
                event_id, summary, ..
            } => {
                writer
                    .delete(event_id)
                    .await
                    .with_context(|| format!("Failed to delete {}", summary))?;
                report.deleted += 1;
            }
            CalendarAction::Keep { .. } => {
                report.kept += 1;
            }
        }

        info!("{}", action);
        observer.log(&format!("   {}", action.render()));
    }

    Ok(report)
}
