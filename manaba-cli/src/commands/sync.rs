use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use tracing::info;

use manaba_core::{ExtractWarning, Plan, Reconciler};
use manaba_core::date_range::DateRange;
use manaba_provider_google::{GoogleCalendar, Session};

use crate::commands::{load_config, scan_manaba};
use crate::executor::{self, ApplyReport};
use crate::observer::{QuietObserver, SyncObserver, TerminalObserver};
use crate::render::{self, Render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reconcile and write to the calendar
    Apply,
    /// Reconcile and print the plan
    Plan { json: bool },
}

pub async fn run(mode: Mode) -> Result<()> {
    let observer: Box<dyn SyncObserver> = match mode {
        Mode::Plan { json: true } => Box::new(QuietObserver),
        _ => Box::new(TerminalObserver::new()),
    };

    let result = run_with(mode, observer.as_ref()).await;
    observer.finish();
    result
}

async fn run_with(mode: Mode, observer: &dyn SyncObserver) -> Result<()> {
    let config = load_config()?;
    let tz = config.tz().map_err(|e| anyhow::anyhow!(e))?;
    let settings = config.payload_settings().map_err(|e| anyhow::anyhow!(e))?;

    let extraction = scan_manaba(&config, observer).await?;
    observer.progress(60);

    let session = Session::load(&config.google_session_path())?;
    let calendar = GoogleCalendar::new(&session, &config.calendar_id)?;

    let now = Utc::now();
    let events = calendar
        .list_owned_events(&DateRange::lookback(now, config.lookback_days))
        .await?;
    info!("{} owned events on {}", events.len(), calendar.calendar_id());

    let plan = Reconciler::new(tz).reconcile(
        &extraction.records,
        &extraction.submitted,
        &events,
        now,
    );

    match mode {
        Mode::Plan { json: true } => {
            return write_json_plan(
                &mut std::io::stdout(),
                &mut std::io::stderr(),
                &plan,
                &extraction.warnings,
            );
        }
        Mode::Plan { json: false } => {
            observer.progress(100);
            observer.finish();
            println!("📅 {}", calendar.calendar_id());
            println!("{}", plan.render());
            let (created, deleted, kept) = plan.counts();
            println!("\nPlanned: {}", render::render_counts(created, deleted, kept));
        }
        Mode::Apply => {
            observer.log(&format!("📅 {}", calendar.calendar_id()));
            let report = executor::apply(&calendar, &plan, &settings, observer).await?;
            observer.progress(100);
            observer.finish();

            let ApplyReport {
                created,
                deleted,
                kept,
            } = report;
            if plan.is_noop() {
                println!("{}", "Calendar already up to date".dimmed());
            }
            println!("Synced: {}", render::render_counts(created, deleted, kept));
        }
    }

    for warning in &extraction.warnings {
        println!("   {}", warning.render());
    }

    Ok(())
}

/// The plan as JSON on `out`; extraction warnings go to `err` so `out`
/// stays machine-readable.
fn write_json_plan(
    out: &mut impl Write,
    err: &mut impl Write,
    plan: &Plan,
    warnings: &[ExtractWarning],
) -> Result<()> {
    writeln!(out, "{}", plan.to_json_pretty().map_err(|e| anyhow::anyhow!(e))?)?;
    for warning in warnings {
        writeln!(err, "warning: {}", warning)?;
    }
    Ok(())
}
