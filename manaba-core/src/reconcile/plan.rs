use serde::{Deserialize, Serialize};

use crate::error::{ManabaError, ManabaResult};
use crate::reconcile::CalendarAction;

/// Ordered actions of one reconciliation pass: deletes first, then
/// keeps/creates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    pub actions: Vec<CalendarAction>,
}

impl Plan {
    /// Whether applying the plan would change the calendar.
    pub fn is_noop(&self) -> bool {
        !self
            .actions
            .iter()
            .any(|a| !matches!(a, CalendarAction::Keep { .. }))
    }

    /// (created, deleted, kept)
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut created = 0;
        let mut deleted = 0;
        let mut kept = 0;

        for action in &self.actions {
            match action {
                CalendarAction::Create { .. } => created += 1,
                CalendarAction::Delete { .. } => deleted += 1,
                CalendarAction::Keep { .. } => kept += 1,
            }
        }

        (created, deleted, kept)
    }

    pub fn to_json_pretty(&self) -> ManabaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ManabaError::Serialization(e.to_string()))
    }
}
