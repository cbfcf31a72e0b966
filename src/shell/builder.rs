//! Builder pattern for shell configuration.
//!
//! Collects the configuration and host collaborators, validates them and
//! either builds an idle [`Shell`] or launches one through the full startup
//! sequence.
//!
//! # Example
//!
//! ```ignore
//! let shell = Shell::builder()
//!     .config(ShellConfig::load("shell.json")?)
//!     .viewport(viewport)
//!     .asset_server(assets)
//!     .engine(engine)
//!     .transport(transport)
//!     .interceptor(interceptor)
//!     .launch()
//!     .await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use crate::config::ShellConfig;
use crate::error::{Error, Result};
use crate::host::{AssetServer, ProxyEngine, RequestInterceptor, TransportNegotiator, Viewport};

use super::core::{Collaborators, Shell};

// ============================================================================
// ShellBuilder
// ============================================================================

/// Builder for configuring a [`Shell`].
///
/// Use [`Shell::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct ShellBuilder {
    config: ShellConfig,
    viewport: Option<Arc<dyn Viewport>>,
    assets: Option<Arc<dyn AssetServer>>,
    engine: Option<Arc<dyn ProxyEngine>>,
    transport: Option<Arc<dyn TransportNegotiator>>,
    interceptor: Option<Arc<dyn RequestInterceptor>>,
}

impl fmt::Debug for ShellBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellBuilder")
            .field("config", &self.config)
            .field("viewport", &self.viewport.is_some())
            .field("assets", &self.assets.is_some())
            .field("engine", &self.engine.is_some())
            .field("transport", &self.transport.is_some())
            .field("interceptor", &self.interceptor.is_some())
            .finish()
    }
}

// ============================================================================
// ShellBuilder Implementation
// ============================================================================

impl ShellBuilder {
    /// Creates a builder with default configuration and no collaborators.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    #[inline]
    #[must_use]
    pub fn config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the container surfaces are mounted into. Required.
    #[inline]
    #[must_use]
    pub fn viewport(mut self, viewport: Arc<dyn Viewport>) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Sets the local asset server. Required.
    #[inline]
    #[must_use]
    pub fn asset_server(mut self, assets: Arc<dyn AssetServer>) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Sets the proxy engine.
    ///
    /// Without one, proxied surfaces load targets directly.
    #[inline]
    #[must_use]
    pub fn engine(mut self, engine: Arc<dyn ProxyEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Sets the transport negotiator.
    #[inline]
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn TransportNegotiator>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the background request interceptor.
    #[inline]
    #[must_use]
    pub fn interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    /// Builds a shell with no tabs and the proxy not started.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the configuration is invalid
    /// - [`Error::Config`] if the viewport or asset server is not set
    pub fn build(self) -> Result<Shell> {
        self.config.validate()?;

        let viewport = self.viewport.ok_or_else(|| {
            Error::config("Viewport is required. Use .viewport() to set it.")
        })?;
        let assets = self.assets.ok_or_else(|| {
            Error::config("Asset server is required. Use .asset_server() to set it.")
        })?;

        Shell::new(
            self.config,
            Collaborators {
                viewport,
                assets,
                engine: self.engine,
                transport: self.transport,
                interceptor: self.interceptor,
            },
        )
    }

    /// Builds the shell, starts the proxy and opens the start page.
    ///
    /// Proxy startup failures are reported on the status line, not here.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub async fn launch(self) -> Result<Shell> {
        let shell = self.build()?;
        shell.start_proxy().await;
        shell.create_tab(None).await;
        Ok(shell)
    }
}

// ============================================================================
// Tests
// ============================================================================
