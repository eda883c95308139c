//! Core of manaba-sync.
//!
//! This crate holds the pure part of the tool:
//! - `extract` turns manaba listing rows into assignment records and
//!   submitted markers
//! - `reconcile` diffs those against the tool's own calendar events and
//!   returns the actions to apply
//!
//! Nothing here performs network I/O; fetching pages and writing to the
//! calendar belong to the CLI and provider crates.

pub mod assignment;
pub mod calendar_event;
pub mod config;
pub mod constants;
pub mod date_range;
pub mod error;
pub mod extract;
pub mod page;
pub mod payload;
pub mod reconcile;

pub use assignment::{AssignmentRecord, Category, SubmittedMarker};
pub use calendar_event::CalendarEvent;
pub use extract::{CategoryListing, CoursePage, ExtractWarning, Extraction, ListingRows, extract};
pub use reconcile::{CalendarAction, DeleteReason, Plan, Reconciler};
