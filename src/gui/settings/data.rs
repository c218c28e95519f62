use std::{
    ops::RangeInclusive,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    backend::normalize_base_url,
    core::{
        ClientConfig,
        PanelError,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9871";
pub const POLL_INTERVAL_RANGE: RangeInclusive<u64> = 1..=60;
pub const REQUEST_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=120;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), poll_interval_secs: 3, request_timeout_secs: 10 }
    }
}

impl ServerSettings {
    pub fn validate(&self) -> Result<(), PanelError> {
        normalize_base_url(&self.base_url)?;

        if !POLL_INTERVAL_RANGE.contains(&self.poll_interval_secs) {
            return Err(PanelError::Custom(format!(
                "Abfrageintervall muss zwischen {} und {} Sekunden liegen",
                POLL_INTERVAL_RANGE.start(),
                POLL_INTERVAL_RANGE.end()
            )));
        }
        if !REQUEST_TIMEOUT_RANGE.contains(&self.request_timeout_secs) {
            return Err(PanelError::Custom(format!(
                "Zeitlimit muss zwischen {} und {} Sekunden liegen",
                REQUEST_TIMEOUT_RANGE.start(),
                REQUEST_TIMEOUT_RANGE.end()
            )));
        }

        Ok(())
    }

    /// Values out of range are clamped so a hand-edited file still yields a usable client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.trim().to_string(),
            poll_interval: Duration::from_secs(
                self.poll_interval_secs
                    .clamp(*POLL_INTERVAL_RANGE.start(), *POLL_INTERVAL_RANGE.end()),
            ),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs
                    .clamp(*REQUEST_TIMEOUT_RANGE.start(), *REQUEST_TIMEOUT_RANGE.end()),
            ),
        }
    }
}
