//! Station configuration.
//!
//! Loaded once at startup from environment variables (a `.env` file is
//! honored when present) and passed by value into the station; there is no
//! global configuration state.

use std::env;
use tappost_core::{Error, Result};

/// Default access point name for the provisioning portal.
const DEFAULT_AP_NAME: &str = "TAPPOST-SETUP";

/// Default device identifier reported with registered cards.
const DEFAULT_DEVICE_ID: &str = "device-001";

/// Runtime settings for one station.
#[derive(Debug, Clone)]
pub struct StationConfig {
    /// Backend base URL.
    pub api_url: String,

    /// Static device API key sent on every request.
    pub api_key: String,

    /// Identifier this station reports when registering cards.
    pub device_id: String,

    /// Access point name used by the provisioning portal.
    pub ap_name: String,
}

impl StationConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `TAPPOST_API_URL`, `TAPPOST_API_KEY`, `TAPPOST_DEVICE_ID` and
    /// `TAPPOST_AP_NAME`. The URL and key are required; the rest default.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a required variable is missing.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_url = env::var("TAPPOST_API_URL")
            .map_err(|_| Error::Config("TAPPOST_API_URL must be set".into()))?;
        let api_key = env::var("TAPPOST_API_KEY")
            .map_err(|_| Error::Config("TAPPOST_API_KEY must be set".into()))?;
        let device_id =
            env::var("TAPPOST_DEVICE_ID").unwrap_or_else(|_| DEFAULT_DEVICE_ID.into());
        let ap_name = env::var("TAPPOST_AP_NAME").unwrap_or_else(|_| DEFAULT_AP_NAME.into());

        Ok(Self {
            api_url,
            api_key,
            device_id,
            ap_name,
        })
    }

    /// Build a config directly, for tests and embedding.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            device_id: DEFAULT_DEVICE_ID.into(),
            ap_name: DEFAULT_AP_NAME.into(),
        }
    }
}
