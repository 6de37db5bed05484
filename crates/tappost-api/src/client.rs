//! HTTP backend client.
//!
//! One request per operation, no retries, fixed timeout. A pre-flight
//! connectivity check short-circuits every operation to its failure arm when
//! the uplink is detached, so no request is ever issued into a dead link.

#![allow(async_fn_in_trait)]

use crate::{
    Result,
    error::ApiError,
    link::{Connectivity, NetworkLink},
    types::{
        ActiveEventEnvelope, CardDetectedRequest, CheckInOutcome, CheckInRequest, EventFetch,
        SubmitOutcome,
    },
};
use std::time::Duration;
use tappost_core::{
    CardUid, CheckInReceipt,
    constants::{
        API_TIMEOUT_MS, ENDPOINT_CARDS_DETECTED, ENDPOINT_CHECK_IN, ENDPOINT_EVENTS_ACTIVE,
        HEADER_DEVICE_API_KEY,
    },
};
use tracing::{debug, info, warn};

/// The three backend operations the station performs.
///
/// Implemented by [`HttpBackend`] for the real service and by
/// [`MockBackend`](crate::mock::MockBackend) for tests and the emulator.
/// Outcomes are infallible by design: every failure mode is an arm the
/// caller must branch on.
pub trait Backend: Send + Sync {
    /// Look up the attendance event currently active on the backend.
    async fn fetch_active_event(&self) -> EventFetch;

    /// Check a card in against an event.
    async fn check_in(&self, uid: &CardUid, event_id: &str) -> CheckInOutcome;

    /// Submit a detected card for registration.
    async fn submit_card(&self, uid: &CardUid) -> SubmitOutcome;
}

/// Connection settings for the backend client.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Service base URL, scheme included, no trailing slash required.
    pub base_url: String,

    /// Static API key sent on every request.
    pub api_key: String,

    /// Identifier this station reports when registering cards.
    pub device_id: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Build a config with the standard request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            device_id: device_id.into(),
            timeout: Duration::from_millis(API_TIMEOUT_MS),
        }
    }
}

/// Backend client speaking JSON over HTTP.
#[derive(Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    config: BackendConfig,
    link: NetworkLink,
}

impl HttpBackend {
    /// Build a client from connection settings and the station's uplink.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the base URL is empty or the underlying HTTP
    /// client cannot be built.
    pub fn new(config: BackendConfig, link: NetworkLink) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ApiError::Config("base URL must not be empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config, link })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl Backend for HttpBackend {
    async fn fetch_active_event(&self) -> EventFetch {
        if !self.link.is_attached() {
            warn!("network detached, skipping event fetch");
            return EventFetch::NoEvent;
        }

        let url = self.url(ENDPOINT_EVENTS_ACTIVE);
        debug!(%url, "GET");

        let response = match self
            .http
            .get(&url)
            .header(HEADER_DEVICE_API_KEY, &self.config.api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "event fetch failed");
                return EventFetch::NoEvent;
            }
        };

        let status = response.status().as_u16();
        debug!(status, "event fetch response");

        if status != 200 {
            info!(status, "no active event");
            return EventFetch::NoEvent;
        }

        match response.text().await {
            Ok(body) => classify_event_fetch(&body),
            Err(error) => {
                warn!(%error, "event fetch body read failed");
                EventFetch::NoEvent
            }
        }
    }

    async fn check_in(&self, uid: &CardUid, event_id: &str) -> CheckInOutcome {
        if !self.link.is_attached() {
            warn!("network detached, skipping check-in");
            return CheckInOutcome::Failed { status: None };
        }

        let url = self.url(ENDPOINT_CHECK_IN);
        let body = CheckInRequest {
            uid: uid.as_str(),
            event_id,
        };
        debug!(%url, uid = %uid, event_id, "POST");

        let response = match self
            .http
            .post(&url)
            .header(HEADER_DEVICE_API_KEY, &self.config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "check-in request failed");
                return CheckInOutcome::Failed { status: None };
            }
        };

        let status = response.status().as_u16();
        debug!(status, "check-in response");

        let body = response.text().await.unwrap_or_default();
        classify_check_in(status, &body)
    }

    async fn submit_card(&self, uid: &CardUid) -> SubmitOutcome {
        if !self.link.is_attached() {
            warn!("network detached, skipping card submit");
            return SubmitOutcome::Failed { status: None };
        }

        let url = self.url(ENDPOINT_CARDS_DETECTED);
        let body = CardDetectedRequest {
            uid: uid.as_str(),
            device_id: &self.config.device_id,
        };
        debug!(%url, uid = %uid, "POST");

        let response = match self
            .http
            .post(&url)
            .header(HEADER_DEVICE_API_KEY, &self.config.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "card submit failed");
                return SubmitOutcome::Failed { status: None };
            }
        };

        let status = response.status().as_u16();
        debug!(status, "card submit response");
        classify_submit(status)
    }
}

/// Map an event-fetch response body to its outcome.
fn classify_event_fetch(body: &str) -> EventFetch {
    match serde_json::from_str::<ActiveEventEnvelope>(body) {
        Ok(envelope) => EventFetch::Active(envelope.event),
        Err(error) => {
            warn!(%error, "event fetch body unparsable");
            EventFetch::NoEvent
        }
    }
}

/// Map a check-in response to its outcome.
fn classify_check_in(status: u16, body: &str) -> CheckInOutcome {
    match status {
        409 => CheckInOutcome::AlreadyCheckedIn,
        200 => match serde_json::from_str::<CheckInReceipt>(body) {
            Ok(receipt) => CheckInOutcome::CheckedIn(receipt),
            Err(error) => {
                warn!(%error, "check-in body unparsable");
                CheckInOutcome::Failed { status: Some(200) }
            }
        },
        other => CheckInOutcome::Failed {
            status: Some(other),
        },
    }
}

/// Map a card-submit status to its outcome.
fn classify_submit(status: u16) -> SubmitOutcome {
    match status {
        200 => SubmitOutcome::Accepted,
        409 => SubmitOutcome::AlreadyActivated,
        other => SubmitOutcome::Failed {
            status: Some(other),
        },
    }
}
