pub mod config;
pub mod scan;
pub mod sync;

use anyhow::{Context, Result};
use dialoguer::Input;
use manaba_core::config::SyncConfig;
use manaba_core::{Extraction, extract};
use tracing::{info, warn};

use crate::manaba::{ManabaClient, collect_course_pages};
use crate::observer::SyncObserver;

/// Load the config file, turning core errors into anyhow ones.
pub(crate) fn load_config() -> Result<SyncConfig> {
    SyncConfig::load().map_err(|e| anyhow::anyhow!(e))
}

/// Log into manaba and run the extractor over every course.
pub(crate) async fn scan_manaba(
    config: &SyncConfig,
    observer: &dyn SyncObserver,
) -> Result<Extraction> {
    observer.progress(5);

    let (username, password) = credentials(config)?;
    let client = ManabaClient::new(username, password)?;

    observer.progress(10);
    let pages = collect_course_pages(&client, &config.home_url(), observer).await?;
    let extraction = extract(&pages);

    info!(
        "Extracted {} records and {} submitted markers from {} courses",
        extraction.records.len(),
        extraction.submitted.len(),
        pages.len()
    );
    for warning in &extraction.warnings {
        warn!("{}", warning);
    }

    Ok(extraction)
}

/// Username and password from config or environment, prompting for
/// whatever is missing.
fn credentials(config: &SyncConfig) -> Result<(String, String)> {
    let username = match &config.username {
        Some(name) => name.clone(),
        None => Input::<String>::new()
            .with_prompt("manaba ID")
            .interact_text()?,
    };

    let password = match &config.password {
        Some(password) => password.clone(),
        None => rpassword::prompt_password("manaba password: ")
            .context("Failed to read password")?,
    };

    Ok((username, password))
}
