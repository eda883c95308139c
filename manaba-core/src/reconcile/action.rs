use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assignment::AssignmentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteReason {
    /// The course+category was seen as submitted or answered
    Submitted,
    /// The event's start time has passed
    Expired,
    /// Another owned event already holds the same key
    Duplicate,
}

impl fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteReason::Submitted => write!(f, "submitted"),
            DeleteReason::Expired => write!(f, "expired"),
            DeleteReason::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// One decision of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CalendarAction {
    Create {
        record: AssignmentRecord,
    },
    Delete {
        event_id: String,
        summary: String,
        reason: DeleteReason,
    },
    Keep {
        event_id: String,
        summary: String,
    },
}

impl CalendarAction {
    pub fn symbol(&self) -> &'static str {
        match self {
            CalendarAction::Create { .. } => "+",
            CalendarAction::Delete { .. } => "-",
            CalendarAction::Keep { .. } => "=",
        }
    }

    /// The existing event this action refers to (`None` for creates).
    pub fn event_id(&self) -> Option<&str> {
        match self {
            CalendarAction::Create { .. } => None,
            CalendarAction::Delete { event_id, .. } | CalendarAction::Keep { event_id, .. } => {
                Some(event_id)
            }
        }
    }
}

impl fmt::Display for CalendarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarAction::Create { record } => write!(f, "{} {}", self.symbol(), record),
            CalendarAction::Delete {
                summary, reason, ..
            } => write!(f, "{} {} [{}]", self.symbol(), summary, reason),
            CalendarAction::Keep { summary, .. } => write!(f, "{} {}", self.symbol(), summary),
        }
    }
}
