//! manaba-provider-google - writes manaba deadlines into Google Calendar.
//!
//! This crate is the thin executor around `manaba-core`: it lists the
//! tool's own events and inserts or deletes them as a reconciliation plan
//! dictates. It never decides what to change.
//!
//! The session file holds the OAuth client credentials and tokens:
//!   ~/.config/manaba-sync/google-session.toml

pub mod api;
pub mod convert;
pub mod session;

pub use api::GoogleCalendar;
pub use session::Session;
