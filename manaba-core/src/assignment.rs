//! Assignment types produced by the extractor.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{CATEGORY_CLOSE, OWNED_MARKER};

/// Wall-clock time in `tz` as an instant. Ambiguous times take the earlier
/// offset; times inside a DST gap move forward by whole hours until they exist.
pub fn local_to_utc(at: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    (0..=24)
        .find_map(|hours| tz.from_local_datetime(&(at + Duration::hours(hours))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        // No zone has skipped more than a day.
        .unwrap_or_else(|| at.and_utc())
}

/// Normalized deadline format written into calendar payloads.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:00";

/// The three assignment listings a manaba course exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Report,
    Quiz,
    Survey,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Report, Category::Quiz, Category::Survey];

    /// Label shown on manaba and written into event titles.
    pub fn label(self) -> &'static str {
        match self {
            Category::Report => "レポート",
            Category::Quiz => "小テスト",
            Category::Survey => "アンケート",
        }
    }

    /// Appended to a course URL to reach this category's listing page.
    pub fn path_suffix(self) -> &'static str {
        match self {
            Category::Report => "_report",
            Category::Quiz => "_query",
            Category::Survey => "_survey",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Course+category identity as it appears in an event title after the
/// marker, e.g. `レポート】統計学`.
pub fn identity(category: Category, course_name: &str) -> String {
    format!("{}{}{}", category.label(), CATEGORY_CLOSE, course_name)
}

/// An open, not yet submitted assignment with a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub category: Category,
    pub course_name: String,
    /// Local wall-clock time in the configured zone, minute precision.
    pub deadline: NaiveDateTime,
}

impl AssignmentRecord {
    pub fn new(category: Category, course_name: impl Into<String>, deadline: NaiveDateTime) -> Self {
        AssignmentRecord {
            category,
            course_name: course_name.into(),
            deadline,
        }
    }

    /// Calendar event summary, e.g. `【提出：レポート】統計学`.
    pub fn title(&self) -> String {
        format!("{}{}", OWNED_MARKER, self.identity())
    }

    pub fn identity(&self) -> String {
        identity(self.category, &self.course_name)
    }

    /// `YYYY-MM-DDTHH:MM:00`
    pub fn deadline_string(&self) -> String {
        self.deadline.format(DEADLINE_FORMAT).to_string()
    }

    /// The deadline as an instant, see [`local_to_utc`].
    pub fn deadline_utc(&self, tz: Tz) -> DateTime<Utc> {
        local_to_utc(self.deadline, tz)
    }
}

impl fmt::Display for AssignmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title(), self.deadline.format("%Y-%m-%d %H:%M"))
    }
}

/// A course+category the extractor saw as already submitted or answered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmittedMarker {
    pub category: Category,
    pub course_name: String,
}

impl SubmittedMarker {
    pub fn new(category: Category, course_name: impl Into<String>) -> Self {
        SubmittedMarker {
            category,
            course_name: course_name.into(),
        }
    }

    pub fn identity(&self) -> String {
        identity(self.category, &self.course_name)
    }
}

impl fmt::Display for SubmittedMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}
