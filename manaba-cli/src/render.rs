//! TUI rendering traits for manaba-sync types.
//!
//! Adds colored terminal rendering to manaba-core types using owo_colors.

use manaba_core::{AssignmentRecord, CalendarAction, ExtractWarning, Plan, SubmittedMarker};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarAction {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            CalendarAction::Create { record } => format!(
                "{} {} {}",
                symbol.green(),
                record.title().green(),
                record.deadline_string().dimmed()
            ),
            CalendarAction::Delete {
                summary, reason, ..
            } => format!(
                "{} {} {}",
                symbol.red(),
                summary.red(),
                format!("({})", reason).dimmed()
            ),
            CalendarAction::Keep { summary, .. } => {
                format!("{} {}", symbol.dimmed(), summary.dimmed())
            }
        }
    }
}

impl Render for AssignmentRecord {
    fn render(&self) -> String {
        format!("{} {}", self.title(), self.deadline_string().dimmed())
    }
}

impl Render for SubmittedMarker {
    fn render(&self) -> String {
        format!("{} {}", self, "(submitted)".dimmed())
    }
}

impl Render for ExtractWarning {
    fn render(&self) -> String {
        format!("{} {}", "!".yellow(), self.to_string().yellow())
    }
}

impl Render for Plan {
    fn render(&self) -> String {
        if self.actions.is_empty() {
            return "   No events".dimmed().to_string();
        }

        self.actions
            .iter()
            .map(|action| format!("   {}", action.render()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One-line summary of what a plan does, e.g. "2 created, 1 deleted, 3 kept".
pub fn render_counts(created: usize, deleted: usize, kept: usize) -> String {
    format!(
        "{} created, {} deleted, {} kept",
        created.green(),
        deleted.red(),
        kept
    )
}
