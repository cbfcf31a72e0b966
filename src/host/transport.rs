//! Tunnel transport negotiation.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ============================================================================
// TransportEndpoint
// ============================================================================

/// Endpoint passed to the transport on configuration.
///
/// Serializes as `{ "wisp": "wss://host/wisp/" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEndpoint {
    /// WebSocket tunnel URL.
    pub wisp: String,
}

// ============================================================================
// TransportNegotiator
// ============================================================================

/// Selects the transport the proxy backend is reached through.
#[async_trait]
pub trait TransportNegotiator: Send + Sync {
    /// Opens the negotiator against its worker script.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker cannot be started.
    async fn connect(&self, worker: &str) -> Result<()>;

    /// Returns the identifier of the active transport, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the negotiator cannot be queried.
    async fn current_transport(&self) -> Result<Option<String>>;

    /// Activates a transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be configured.
    async fn set_transport(&self, transport: &str, endpoints: &[TransportEndpoint]) -> Result<()>;
}

// ============================================================================
// Tests
// ============================================================================
