use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::{load_config, scan_manaba};
use crate::observer::{SyncObserver, TerminalObserver};
use crate::render::Render;

/// Print what manaba says without touching the calendar.
pub async fn run() -> Result<()> {
    let config = load_config()?;
    let observer = TerminalObserver::new();

    let result = scan_manaba(&config, &observer).await;
    observer.finish();
    let extraction = result?;

    println!("{}", "Open assignments".bold());
    if extraction.records.is_empty() {
        println!("   {}", "None".dimmed());
    }
    for record in &extraction.records {
        println!("   {}", record.render());
    }

    if !extraction.submitted.is_empty() {
        println!();
        println!("{}", "Submitted".bold());
        for marker in &extraction.submitted {
            println!("   {}", marker.render());
        }
    }

    if !extraction.warnings.is_empty() {
        println!();
        for warning in &extraction.warnings {
            println!("   {}", warning.render());
        }
    }

    Ok(())
}
