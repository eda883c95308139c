//! Turns listing-page row text into assignment records and submitted markers.
//!
//! Extraction is best-effort: a course without a name anchor or a category
//! listing that failed to load is skipped and reported as an
//! [`ExtractWarning`], and the remaining courses are still processed.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assignment::{AssignmentRecord, Category, SubmittedMarker};
use crate::constants::{STATUS_NOT_SUBMITTED, STATUS_OPEN, STATUS_SUBMITTED};

static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}").expect("valid regex"));

const TOKEN_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Everything fetched for one course.
#[derive(Debug, Clone)]
pub struct CoursePage {
    /// Where the page came from (URL or file name), used in warnings
    pub location: String,
    /// `None` when the page has no course name anchor
    pub course_name: Option<String>,
    pub listings: Vec<CategoryListing>,
    /// Set when the course page itself could not be fetched
    pub unavailable: Option<String>,
}

impl CoursePage {
    pub fn unavailable(location: impl Into<String>, reason: impl Into<String>) -> Self {
        CoursePage {
            location: location.into(),
            course_name: None,
            listings: Vec::new(),
            unavailable: Some(reason.into()),
        }
    }

    /// True if at least one category listing was fetched.
    pub fn has_loaded_listing(&self) -> bool {
        self.listings
            .iter()
            .any(|l| matches!(l.rows, ListingRows::Loaded(_)))
    }
}

/// One category listing of a course.
#[derive(Debug, Clone)]
pub struct CategoryListing {
    pub category: Category,
    pub rows: ListingRows,
}

#[derive(Debug, Clone)]
pub enum ListingRows {
    /// Text of each table row, in page order
    Loaded(Vec<String>),
    /// The page could not be fetched or parsed
    Unavailable(String),
}

/// Non-fatal extraction outcomes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractWarning {
    #[error("Skipped {location}: {reason}")]
    CourseUnavailable { location: String, reason: String },

    #[error("Skipped {location}: no course name on page")]
    MissingCourseName { location: String },

    #[error("Skipped {course} ({category}): {reason}")]
    ParseSkip {
        course: String,
        category: Category,
        reason: String,
    },

    #[error("Ambiguous status in {course} ({category}): {row}")]
    AmbiguousStatus {
        course: String,
        category: Category,
        row: String,
    },
}

/// Extractor output.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Deduplicated, in first-seen order
    pub records: Vec<AssignmentRecord>,
    /// Deduplicated, in first-seen order
    pub submitted: Vec<SubmittedMarker>,
    pub warnings: Vec<ExtractWarning>,
}

impl Extraction {
    fn push_record(&mut self, seen: &mut HashSet<AssignmentRecord>, record: AssignmentRecord) {
        if seen.insert(record.clone()) {
            self.records.push(record);
        }
    }

    fn push_submitted(&mut self, seen: &mut HashSet<SubmittedMarker>, marker: SubmittedMarker) {
        if seen.insert(marker.clone()) {
            self.submitted.push(marker);
        }
    }
}

/// What a single row says about its assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Open, not submitted, with this deadline
    Pending(NaiveDateTime),
    Submitted,
    /// Matched no rule (closed, missing dates, header rows...)
    Ignored,
}

/// Classify one row. The second value is true when the row carries both
/// not-submitted and submitted status text.
pub fn classify_row(text: &str) -> (RowOutcome, bool) {
    let not_submitted = text.contains(STATUS_NOT_SUBMITTED);
    let submitted = STATUS_SUBMITTED.iter().any(|s| text.contains(s));
    let ambiguous = not_submitted && submitted;

    if not_submitted && text.contains(STATUS_OPEN) {
        match latest_deadline(text) {
            Some(deadline) => return (RowOutcome::Pending(deadline), ambiguous),
            None => debug!("Row has open status but no deadline: {}", text),
        }
    }

    if submitted {
        return (RowOutcome::Submitted, ambiguous);
    }

    (RowOutcome::Ignored, ambiguous)
}

/// Lexicographically greatest parseable `YYYY-MM-DD HH:MM` token in `text`.
/// With the fixed zero-padded format this is also the latest time.
pub fn latest_deadline(text: &str) -> Option<NaiveDateTime> {
    DATE_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| NaiveDateTime::parse_from_str(token, TOKEN_FORMAT).is_ok())
        .max()
        .and_then(|token| NaiveDateTime::parse_from_str(token, TOKEN_FORMAT).ok())
}

/// Extract records and submitted markers from every course page.
pub fn extract(pages: &[CoursePage]) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen_records = HashSet::new();
    let mut seen_submitted = HashSet::new();

    for page in pages {
        if let Some(reason) = &page.unavailable {
            extraction.warnings.push(ExtractWarning::CourseUnavailable {
                location: page.location.clone(),
                reason: reason.clone(),
            });
            continue;
        }

        let Some(course) = page.course_name.as_deref().map(str::trim).filter(|n| !n.is_empty())
        else {
            warn!("No course name on {}, skipping", page.location);
            extraction.warnings.push(ExtractWarning::MissingCourseName {
                location: page.location.clone(),
            });
            continue;
        };

        for listing in &page.listings {
            let rows = match &listing.rows {
                ListingRows::Loaded(rows) => rows,
                ListingRows::Unavailable(reason) => {
                    warn!("Skipping {} ({}): {}", course, listing.category, reason);
                    extraction.warnings.push(ExtractWarning::ParseSkip {
                        course: course.to_string(),
                        category: listing.category,
                        reason: reason.clone(),
                    });
                    continue;
                }
            };

            for row in rows {
                let (outcome, ambiguous) = classify_row(row);

                if ambiguous {
                    warn!("Ambiguous status in {} ({}): {}", course, listing.category, row);
                    extraction.warnings.push(ExtractWarning::AmbiguousStatus {
                        course: course.to_string(),
                        category: listing.category,
                        row: row.clone(),
                    });
                }

                match outcome {
                    RowOutcome::Pending(deadline) => extraction.push_record(
                        &mut seen_records,
                        AssignmentRecord::new(listing.category, course, deadline),
                    ),
                    RowOutcome::Submitted => extraction.push_submitted(
                        &mut seen_submitted,
                        SubmittedMarker::new(listing.category, course),
                    ),
                    RowOutcome::Ignored => {}
                }
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn course(name: &str, listings: Vec<CategoryListing>) -> CoursePage {
        CoursePage {
            location: format!("https://example.test/{name}"),
            course_name: Some(name.to_string()),
            listings,
            unavailable: None,
        }
    }

    fn rows(category: Category, rows: &[&str]) -> CategoryListing {
        CategoryListing {
            category,
            rows: ListingRows::Loaded(rows.iter().map(|r| r.to_string()).collect()),
        }
    }

    #[test]
    fn test_report_row_takes_latest_date() {
        let pages = vec![course(
            "統計学",
            vec![rows(
                Category::Report,
                &["第3回レポート 受付中 未提出 2025-01-10 09:00 2025-01-15 23:59"],
            )],
        )];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        let record = &extraction.records[0];
        assert_eq!(record.title(), "【提出：レポート】統計学");
        assert_eq!(record.deadline_string(), "2025-01-15T23:59:00");
        assert!(extraction.submitted.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_latest_deadline_ignores_token_order() {
        let text = "2025-03-01 10:00 〜 2025-02-01 10:00 〜 2025-02-28 23:59";
        assert_eq!(latest_deadline(text), Some(at(2025, 3, 1, 10, 0)));
    }

    #[test]
    fn test_latest_deadline_skips_impossible_dates() {
        let text = "2025-13-40 25:00 2025-02-01 10:00";
        assert_eq!(latest_deadline(text), Some(at(2025, 2, 1, 10, 0)));
        assert_eq!(latest_deadline("no dates here"), None);
    }

    #[test]
    fn test_row_without_date_is_filtered() {
        let pages = vec![course("英語", vec![rows(Category::Quiz, &["小テスト 受付中 未提出"])])];

        let extraction = extract(&pages);

        assert!(extraction.records.is_empty());
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn test_closed_row_is_ignored() {
        let (outcome, ambiguous) = classify_row("受付終了 未提出 2025-01-10 09:00");
        assert_eq!(outcome, RowOutcome::Ignored);
        assert!(!ambiguous);
    }

    #[test]
    fn test_submitted_markers_collapse() {
        let pages = vec![course(
            "経営学",
            vec![rows(
                Category::Survey,
                &[
                    "授業アンケート 回答済み 2025-01-10 09:00",
                    "中間アンケート 受付終了 提出済み",
                    "期末アンケート 済",
                ],
            )],
        )];

        let extraction = extract(&pages);

        assert!(extraction.records.is_empty());
        assert_eq!(extraction.submitted, vec![SubmittedMarker::new(Category::Survey, "経営学")]);
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let row = "受付中 未提出 2025-01-15 23:59";
        let pages = vec![
            course("統計学", vec![rows(Category::Report, &[row, row])]),
            course("統計学", vec![rows(Category::Report, &[row])]),
        ];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
    }

    #[test]
    fn test_missing_course_name_skips_course() {
        let pages = vec![
            CoursePage {
                location: "https://example.test/course_1".to_string(),
                course_name: None,
                listings: vec![rows(Category::Report, &["受付中 未提出 2025-01-15 23:59"])],
                unavailable: None,
            },
            course("物理学", vec![rows(Category::Report, &["受付中 未提出 2025-01-20 12:00"])]),
        ];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].course_name, "物理学");
        assert_eq!(
            extraction.warnings,
            vec![ExtractWarning::MissingCourseName {
                location: "https://example.test/course_1".to_string()
            }]
        );
    }

    #[test]
    fn test_unavailable_course_is_reported() {
        let pages = vec![
            CoursePage::unavailable("https://example.test/course_1", "HTTP 503"),
            course("物理学", vec![rows(Category::Report, &["受付中 未提出 2025-01-20 12:00"])]),
        ];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(
            extraction.warnings,
            vec![ExtractWarning::CourseUnavailable {
                location: "https://example.test/course_1".to_string(),
                reason: "HTTP 503".to_string(),
            }]
        );
        assert!(!pages[0].has_loaded_listing());
        assert!(pages[1].has_loaded_listing());
    }

    #[test]
    fn test_failed_listing_only_skips_that_category() {
        let pages = vec![course(
            "化学",
            vec![
                CategoryListing {
                    category: Category::Report,
                    rows: ListingRows::Unavailable("HTTP 500".to_string()),
                },
                rows(Category::Quiz, &["受付中 未提出 2025-02-01 08:30"]),
            ],
        )];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.records[0].category, Category::Quiz);
        assert!(matches!(
            extraction.warnings.as_slice(),
            [ExtractWarning::ParseSkip { category: Category::Report, .. }]
        ));
    }

    #[test]
    fn test_ambiguous_row_is_flagged() {
        let row = "受付中 未提出 提出済み 2025-01-15 23:59";
        let pages = vec![course("統計学", vec![rows(Category::Report, &[row])])];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        assert!(extraction.submitted.is_empty());
        assert!(matches!(
            extraction.warnings.as_slice(),
            [ExtractWarning::AmbiguousStatus { .. }]
        ));
    }

    #[test]
    fn test_same_course_can_have_pending_and_submitted_rows() {
        let pages = vec![course(
            "統計学",
            vec![rows(
                Category::Report,
                &["第1回 受付終了 提出済み", "第2回 受付中 未提出 2025-01-22 23:59"],
            )],
        )];

        let extraction = extract(&pages);

        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.submitted.len(), 1);
    }
}
