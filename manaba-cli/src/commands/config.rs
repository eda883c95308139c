use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::load_config;
use manaba_core::config::SyncConfig;

pub fn run() -> Result<()> {
    let config_path = SyncConfig::config_path().map_err(|e| anyhow::anyhow!(e))?;
    let config = load_config()?;

    println!("{}", "Paths".bold());
    println!("  Config:          {}", config_path.display());
    println!("  Google session:  {}", config.google_session_path().display());

    println!();
    println!("{}", "Settings".bold());
    println!("  manaba:     {}", config.home_url());
    println!(
        "  Login:      {}",
        config.username.as_deref().unwrap_or("(prompt)")
    );
    println!("  Calendar:   {}", config.calendar_id);
    println!("  Time zone:  {}", config.time_zone);
    println!("  Lookback:   {} days", config.lookback_days);

    Ok(())
}
