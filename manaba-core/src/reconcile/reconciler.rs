use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::assignment::{AssignmentRecord, SubmittedMarker};
use crate::calendar_event::{CalendarEvent, truncate_to_minute};
use crate::reconcile::{CalendarAction, DeleteReason, Plan};

/// Identity of an assignment on the calendar: `category】course` plus the
/// deadline instant at minute precision.
type Key = (String, DateTime<Utc>);

/// Diffs extracted assignments against the tool's own calendar events.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    /// Zone the record deadlines are expressed in
    time_zone: Tz,
}

impl Reconciler {
    pub fn new(time_zone: Tz) -> Self {
        Reconciler { time_zone }
    }

    /// Compute the action list for one pass.
    ///
    /// Events that are not owned by the tool are ignored outright, so no
    /// action ever carries their id.
    pub fn reconcile(
        &self,
        records: &[AssignmentRecord],
        submitted: &[SubmittedMarker],
        events: &[CalendarEvent],
        now: DateTime<Utc>,
    ) -> Plan {
        let submitted: HashSet<String> = submitted.iter().map(SubmittedMarker::identity).collect();

        let mut deletes = Vec::new();
        let mut surviving: HashMap<Key, &CalendarEvent> = HashMap::new();

        for event in events {
            let Some(identity) = event.identity() else {
                debug!("Ignoring foreign event {}", event.id);
                continue;
            };

            let reason = if submitted.contains(identity) {
                Some(DeleteReason::Submitted)
            } else if event.start.is_some_and(|start| start < now) {
                Some(DeleteReason::Expired)
            } else {
                None
            };

            if let Some(reason) = reason {
                deletes.push(delete(event, reason));
                continue;
            }

            // Without a start time the event can never match a record.
            let Some(start) = event.start_minute() else {
                continue;
            };

            let key = (identity.to_string(), start);
            if surviving.contains_key(&key) {
                deletes.push(delete(event, DeleteReason::Duplicate));
            } else {
                surviving.insert(key, event);
            }
        }

        let mut actions = deletes;
        let mut scheduled: HashSet<Key> = HashSet::new();

        for record in records {
            let key = self.record_key(record);

            // Late-accepting listings stay 受付中 after the deadline.
            if key.1 < now {
                debug!("Not scheduling {}: deadline has passed", record);
                continue;
            }

            if !scheduled.insert(key.clone()) {
                debug!("Skipping repeated record {}", record);
                continue;
            }

            match surviving.get(&key) {
                Some(event) => actions.push(CalendarAction::Keep {
                    event_id: event.id.clone(),
                    summary: event.summary.clone(),
                }),
                None => actions.push(CalendarAction::Create {
                    record: record.clone(),
                }),
            }
        }

        Plan { actions }
    }

    fn record_key(&self, record: &AssignmentRecord) -> Key {
        let deadline = record.deadline_utc(self.time_zone);
        (
            record.identity(),
            truncate_to_minute(deadline).unwrap_or(deadline),
        )
    }
}

fn delete(event: &CalendarEvent, reason: DeleteReason) -> CalendarAction {
    CalendarAction::Delete {
        event_id: event.id.clone(),
        summary: event.summary.clone(),
        reason,
    }
}
