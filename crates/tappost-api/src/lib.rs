//! Backend API client for the badge station.
//!
//! Three operations, each a single request with a fixed timeout and a static
//! device API key header: submit a detected card for registration, fetch the
//! active attendance event, and check a card in against an event. Every
//! operation returns a discriminated outcome the station branches on
//! exhaustively; transport failures fold into the failure arm rather than
//! surfacing as errors, since the station's only recovery is a timed error
//! screen either way.

pub mod client;
pub mod error;
pub mod link;
pub mod mock;
pub mod types;

pub use client::{Backend, BackendConfig, HttpBackend};
pub use error::{ApiError, Result};
pub use link::{Connectivity, MockProvisioner, NetworkLink, ProvisionConfig, Provisioner};
pub use types::{CheckInOutcome, EventFetch, SubmitOutcome};
