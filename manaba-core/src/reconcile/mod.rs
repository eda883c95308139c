//! Reconciliation of extracted assignments against owned calendar events.

mod action;
mod plan;
mod reconciler;

pub use action::{CalendarAction, DeleteReason};
pub use plan::Plan;
pub use reconciler::Reconciler;
