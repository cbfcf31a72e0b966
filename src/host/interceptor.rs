//! Background request interceptor.
//!
//! The interceptor runs outside the page (a service worker in the browser).
//! The shell registers it once at startup; the routing decision it applies
//! to every fetch lives here so both sides agree on it.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use url::Url;

use crate::config::ShellConfig;
use crate::error::Result;

// ============================================================================
// RequestInterceptor
// ============================================================================

/// Registers the background interceptor.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Registers the interceptor script.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is refused.
    async fn register(&self, script: &str) -> Result<()>;
}

// ============================================================================
// RequestRoute
// ============================================================================

/// Where an intercepted fetch goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestRoute {
    /// Local asset, fetched unmodified.
    LocalAsset,
    /// Handed to the engine's fetch handler.
    Proxy,
    /// Plain network fetch.
    Network,
}

/// Decides how an intercepted request is served.
///
/// Relative URLs resolve against the configured origin. Paths under the
/// local root are served as assets even if they contain the proxy marker.
/// Only same-origin requests whose path starts with the proxy marker reach
/// the engine.
#[must_use]
pub fn route_request(url: &str, config: &ShellConfig) -> RequestRoute {
    let origin = config.origin_url().ok();
    let joined = match &origin {
        Some(origin) => origin.join(url),
        None => Url::parse(url),
    };
    let Ok(parsed) = joined else {
        return RequestRoute::Network;
    };

    if parsed.path().starts_with(&config.local_root) {
        return RequestRoute::LocalAsset;
    }

    let same_origin = origin
        .as_ref()
        .is_some_and(|origin| origin.origin() == parsed.origin());
    if same_origin && parsed.path().starts_with(&config.proxy_marker) {
        return RequestRoute::Proxy;
    }

    RequestRoute::Network
}

// ============================================================================
// Tests
// ============================================================================
