//! manaba-sync configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CALENDAR_ID, DEFAULT_COLOR_ID, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_REMINDER_MINUTES, DEFAULT_TIME_ZONE,
};
use crate::error::{ManabaError, ManabaResult};
use crate::payload::PayloadSettings;

static DEFAULT_GOOGLE_SESSION: &str = "~/.config/manaba-sync/google-session.toml";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_calendar_id() -> String {
    DEFAULT_CALENDAR_ID.to_string()
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_lookback_days() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_reminder_minutes() -> i64 {
    DEFAULT_REMINDER_MINUTES
}

fn default_color_id() -> String {
    DEFAULT_COLOR_ID.to_string()
}

fn default_google_session() -> PathBuf {
    PathBuf::from(DEFAULT_GOOGLE_SESSION)
}

fn environment() -> Environment {
    Environment::with_prefix("MANABA").try_parsing(true)
}

/// Configuration at ~/.config/manaba-sync/config.toml
///
/// Every key can be overridden with a `MANABA_` environment variable,
/// e.g. `MANABA_PASSWORD` or `MANABA_CALENDAR_ID`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    /// manaba root, e.g. `https://slms.mi.sanno.ac.jp/ct`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,

    /// IANA name of the zone manaba deadlines are written in
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    #[serde(default = "default_reminder_minutes")]
    pub reminder_minutes: i64,

    #[serde(default = "default_color_id")]
    pub color_id: String,

    /// Google OAuth session (client credentials and tokens)
    #[serde(default = "default_google_session")]
    pub google_session: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            base_url: default_base_url(),
            username: None,
            password: None,
            calendar_id: default_calendar_id(),
            time_zone: default_time_zone(),
            lookback_days: default_lookback_days(),
            reminder_minutes: default_reminder_minutes(),
            color_id: default_color_id(),
            google_session: default_google_session(),
        }
    }
}

impl SyncConfig {
    pub fn config_path() -> ManabaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ManabaError::Config("Could not determine config directory".into()))?
            .join("manaba-sync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path, creating a commented-out file first if
    /// none exists.
    pub fn load() -> ManabaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) layered under `MANABA_` environment variables.
    pub fn load_from(path: &Path) -> ManabaResult<Self> {
        Self::load_layered(path, environment())
    }

    fn load_layered(path: &Path, env: Environment) -> ManabaResult<Self> {
        let config: SyncConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(env)
            .build()
            .map_err(|e| ManabaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ManabaError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ManabaResult<()> {
        self.tz()?;

        if self.lookback_days < 0 {
            return Err(ManabaError::Config(format!(
                "lookback_days must not be negative (got {})",
                self.lookback_days
            )));
        }

        if self.reminder_minutes < 0 {
            return Err(ManabaError::Config(format!(
                "reminder_minutes must not be negative (got {})",
                self.reminder_minutes
            )));
        }

        Ok(())
    }

    pub fn tz(&self) -> ManabaResult<Tz> {
        self.time_zone
            .parse()
            .map_err(|_| ManabaError::TimeZone(self.time_zone.clone()))
    }

    /// Home page listing the user's courses.
    pub fn home_url(&self) -> String {
        format!("{}/home", self.base_url.trim_end_matches('/'))
    }

    pub fn google_session_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.google_session.to_string_lossy()).into_owned();
        PathBuf::from(expanded)
    }

    pub fn payload_settings(&self) -> ManabaResult<PayloadSettings> {
        Ok(PayloadSettings {
            time_zone: self.tz()?,
            reminder_minutes: self.reminder_minutes,
            color_id: self.color_id.clone(),
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ManabaResult<()> {
        let contents = format!(
            "\
# manaba-sync configuration

# manaba root URL:
# base_url = \"{DEFAULT_BASE_URL}\"

# Login (the password can also come from MANABA_PASSWORD or a prompt):
# username = \"s1234567\"

# Google Calendar to write deadlines into:
# calendar_id = \"{DEFAULT_CALENDAR_ID}\"

# Zone manaba deadlines are written in:
# time_zone = \"{DEFAULT_TIME_ZONE}\"

# How many past days of events to inspect:
# lookback_days = {DEFAULT_LOOKBACK_DAYS}

# Popup reminder before each deadline, in minutes:
# reminder_minutes = {DEFAULT_REMINDER_MINUTES}

# Google Calendar event color:
# color_id = \"{DEFAULT_COLOR_ID}\"

# Google session file (client_id, client_secret, access_token, refresh_token):
# google_session = \"{DEFAULT_GOOGLE_SESSION}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ManabaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ManabaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
