//! Proxy startup and transport negotiation.
//!
//! # Startup order
//!
//! 1. Engine loads its assets and initializes
//! 2. Background interceptor is registered
//! 3. Transport worker is connected
//! 4. Configured transport is selected with the tunnel endpoint
//!
//! Any failure stops the sequence. The shell stays usable: proxied surfaces
//! created afterwards load their targets directly.

// ============================================================================
// Imports
// ============================================================================

use std::sync::atomic::Ordering;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::host::TransportEndpoint;
use crate::status::{StatusMode, messages};

use super::Shell;

// ============================================================================
// Shell - Startup
// ============================================================================

impl Shell {
    /// Runs the proxy startup sequence and reports the result on the
    /// status line.
    ///
    /// Returns `true` if the proxy is ready.
    pub async fn start_proxy(&self) -> bool {
        self.set_status(messages::INITIALIZING, StatusMode::Loading);

        match self.setup_proxy().await {
            Ok(()) => {
                info!(uuid = %self.inner.uuid, "Proxy ready");
                self.set_status(messages::PROXY_READY, StatusMode::Live);
                true
            }
            Err(e) => {
                warn!(uuid = %self.inner.uuid, error = %e, "Proxy startup failed");
                self.set_status(messages::PROXY_FAILED, StatusMode::Idle);
                false
            }
        }
    }

    async fn setup_proxy(&self) -> Result<()> {
        let inner = &self.inner;
        let engine = inner.engine.as_ref().ok_or(Error::ProxyUnavailable)?;

        engine
            .initialize(&inner.config.engine_files)
            .await
            .map_err(|e| Error::proxy_init(e.to_string()))?;
        inner.engine_ready.store(true, Ordering::Release);
        debug!("Engine initialized");

        if let Some(interceptor) = &inner.interceptor {
            interceptor
                .register(&inner.config.interceptor_script)
                .await
                .map_err(|e| Error::proxy_init(format!("interceptor: {e}")))?;
            debug!(script = %inner.config.interceptor_script, "Interceptor registered");
        }

        if let Some(transport) = &inner.transport {
            transport
                .connect(&inner.config.transport_worker)
                .await
                .map_err(|e| Error::transport(format!("worker: {e}")))?;
            inner.transport_connected.store(true, Ordering::Release);
            debug!(worker = %inner.config.transport_worker, "Transport worker connected");
        }

        self.ensure_transport().await
    }

    /// Makes sure the configured transport is active.
    ///
    /// A no-op when it already is, or when no transport is connected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the negotiator rejects the change.
    pub(crate) async fn ensure_transport(&self) -> Result<()> {
        let inner = &self.inner;
        let Some(transport) = &inner.transport else {
            return Ok(());
        };
        if !inner.transport_connected.load(Ordering::Acquire) {
            return Ok(());
        }

        let expected = &inner.config.transport;
        let current = transport.current_transport().await?;
        if current.as_deref() == Some(expected.as_str()) {
            return Ok(());
        }

        let endpoint = TransportEndpoint {
            wisp: inner.config.tunnel_url()?,
        };
        info!(
            transport = %expected,
            previous = ?current,
            wisp = %endpoint.wisp,
            "Selecting transport"
        );
        transport
            .set_transport(expected, std::slice::from_ref(&endpoint))
            .await
            .map_err(|e| Error::transport(e.to_string()))
    }
}
