//! Google session (OAuth client + tokens) loaded from disk.
//!
//! Obtaining and refreshing the tokens happens outside manaba-sync; an
//! expired session is reported as an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use google_calendar::Client;
use serde::{Deserialize, Serialize};

pub struct Session {
    path: PathBuf,
    data: SessionData,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    client_id: String,
    client_secret: String,
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Google session not found.\n\n\
                Create {} with:\n\n\
                client_id = \"your-client-id.apps.googleusercontent.com\"\n\
                client_secret = \"your-client-secret\"\n\
                access_token = \"...\"\n\
                refresh_token = \"...\"",
                path.display()
            );
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        Self::from_toml(path, &contents)
    }

    fn from_toml(path: &Path, contents: &str) -> Result<Self> {
        let data: SessionData = toml::from_str(contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;

        Ok(Session {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.data.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// A Calendar API client, or an error if the access token has expired.
    pub fn client(&self, now: DateTime<Utc>) -> Result<Client> {
        if self.is_expired(now) {
            anyhow::bail!(
                "Google session in {} expired; refresh its access token and retry",
                self.path.display()
            );
        }

        Ok(Client::new(
            self.data.client_id.clone(),
            self.data.client_secret.clone(),
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        ))
    }
}
