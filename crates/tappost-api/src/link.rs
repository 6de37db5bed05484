//! Network attachment state and provisioning.
//!
//! The station provisions its uplink once at startup: a captive portal waits
//! for credentials for up to three minutes, and each connect attempt gets
//! thirty seconds. After that, the only network question the firmware ever
//! asks is "are we attached right now?" — answered by [`NetworkLink`] and
//! consulted by the backend client before every request.

#![allow(async_fn_in_trait)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tappost_core::constants::{CONNECT_TIMEOUT_SECS, PORTAL_TIMEOUT_SECS};

/// Something that knows whether the network is currently attached.
pub trait Connectivity: Send + Sync {
    /// `true` when requests can be attempted.
    fn is_attached(&self) -> bool;
}

/// Shared attachment flag for the station's single uplink.
///
/// Cloned freely; all clones observe the same state. Set by the provisioner
/// on a successful connect, cleared if the link drops.
#[derive(Debug, Clone, Default)]
pub struct NetworkLink {
    attached: Arc<AtomicBool>,
}

impl NetworkLink {
    /// Create a detached link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the link attached.
    pub fn attach(&self) {
        self.attached.store(true, Ordering::SeqCst);
    }

    /// Mark the link detached.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }
}

impl Connectivity for NetworkLink {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

/// Timeouts governing the one-shot provisioning phase.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// How long the credential portal stays open.
    pub portal_timeout: Duration,

    /// How long a single connect attempt may take.
    pub connect_timeout: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            portal_timeout: Duration::from_secs(PORTAL_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Network provisioning helper contract.
///
/// `auto_connect` blocks through the whole portal/connect sequence and
/// reports plain success or failure; on failure the station requests a
/// device restart rather than retrying.
pub trait Provisioner: Send + Sync {
    /// Run the provisioning sequence, opening a portal named `ap_name` if no
    /// stored credentials work. Returns `true` once the link is attached.
    async fn auto_connect(&mut self, ap_name: &str) -> bool;
}

/// Scripted provisioner for development and testing.
#[derive(Debug)]
pub struct MockProvisioner {
    config: ProvisionConfig,
    link: NetworkLink,
    succeed: bool,
}

impl MockProvisioner {
    /// Create a provisioner that attaches `link` when run.
    pub fn new(config: ProvisionConfig, link: NetworkLink) -> Self {
        Self {
            config,
            link,
            succeed: true,
        }
    }

    /// Make `auto_connect` fail, simulating a portal timeout.
    pub fn fail_connect(mut self) -> Self {
        self.succeed = false;
        self
    }

    /// The configured timeouts.
    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }
}

impl Provisioner for MockProvisioner {
    async fn auto_connect(&mut self, ap_name: &str) -> bool {
        tracing::info!(ap_name, "provisioning uplink");
        if self.succeed {
            self.link.attach();
        }
        self.succeed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_starts_detached() {
        let link = NetworkLink::new();
        assert!(!link.is_attached());
    }

    #[test]
    fn test_link_clones_share_state() {
        let link = NetworkLink::new();
        let clone = link.clone();

        link.attach();
        assert!(clone.is_attached());

        clone.detach();
        assert!(!link.is_attached());
    }

    #[test]
    fn test_provision_config_defaults() {
        let config = ProvisionConfig::default();
        assert_eq!(config.portal_timeout, Duration::from_secs(180));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_mock_provisioner_attaches_link() {
        let link = NetworkLink::new();
        let mut provisioner = MockProvisioner::new(ProvisionConfig::default(), link.clone());

        assert!(provisioner.auto_connect("TAPPOST-SETUP").await);
        assert!(link.is_attached());
    }

    #[tokio::test]
    async fn test_mock_provisioner_failure_leaves_link_detached() {
        let link = NetworkLink::new();
        let mut provisioner =
            MockProvisioner::new(ProvisionConfig::default(), link.clone()).fail_connect();

        assert!(!provisioner.auto_connect("TAPPOST-SETUP").await);
        assert!(!link.is_attached());
    }
}
