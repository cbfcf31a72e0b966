//! Proxy rewriting engine interface.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EngineFiles;
use crate::error::Result;

use super::Frame;

// ============================================================================
// ProxyEngine
// ============================================================================

/// The external engine that rewrites third-party pages onto the hosting
/// origin.
#[async_trait]
pub trait ProxyEngine: Send + Sync {
    /// Loads the engine. Called once, before any proxied navigation.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine assets cannot be loaded.
    async fn initialize(&self, files: &EngineFiles) -> Result<()>;

    /// Creates an engine-managed frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProxyUnavailable`](crate::Error::ProxyUnavailable)
    /// if the engine is not initialized.
    fn create_frame(&self) -> Result<Box<dyn ProxyFrame>>;
}

// ============================================================================
// ProxyFrame
// ============================================================================

/// A frame whose navigation goes through the engine.
#[async_trait]
pub trait ProxyFrame: Send + Sync {
    /// Returns the mountable frame.
    fn frame(&self) -> Arc<dyn Frame>;

    /// Navigates through the engine's own entry point.
    ///
    /// Resolves on dispatch, not on load completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the URL.
    async fn go(&self, url: &str) -> Result<()>;
}
