//! Shell configuration.
//!
//! A single [`ShellConfig`] replaces the per-variant constants of the UI
//! chrome: search template, virtual scheme, proxy marker, transport and
//! zoom bounds are all data here.
//!
//! # Example
//!
//! ```
//! use bolt_tabs::ShellConfig;
//!
//! let config = ShellConfig::new()
//!     .with_search_template("https://www.google.com/search?q=%s")
//!     .with_origin("https://proxy.example.net");
//!
//! assert!(config.validate().is_ok());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default search template.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.duckduckgo.com/search?q=%s";

/// Placeholder substituted with the encoded query.
pub const SEARCH_PLACEHOLDER: &str = "%s";

/// Permissions granted to every frame.
const DEFAULT_FRAME_ALLOW: &[&str] = &[
    "geolocation",
    "microphone",
    "camera",
    "clipboard-read",
    "clipboard-write",
    "autoplay",
    "payment",
    "display-capture",
];

// ============================================================================
// EngineFiles
// ============================================================================

/// Asset locations handed to the proxy engine on initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineFiles {
    /// Compiled rewriter module.
    pub wasm: String,
    /// Bundled engine script.
    pub all: String,
    /// Synchronous helper script.
    pub sync: String,
}

impl Default for EngineFiles {
    fn default() -> Self {
        Self {
            wasm: "/scram/scramjet.wasm.wasm".to_string(),
            all: "/scram/scramjet.all.js".to_string(),
            sync: "/scram/scramjet.sync.js".to_string(),
        }
    }
}

// ============================================================================
// FrameDefaults
// ============================================================================

/// Attributes applied to every frame when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDefaults {
    /// Accessible frame title.
    pub title: String,
    /// Permission policy entries.
    pub allow: Vec<String>,
}

impl Default for FrameDefaults {
    fn default() -> Self {
        Self {
            title: "Tab content".to_string(),
            allow: DEFAULT_FRAME_ALLOW.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl FrameDefaults {
    /// Returns the allow-list joined the way a frame `allow` attribute expects.
    #[must_use]
    pub fn allow_attribute(&self) -> String {
        self.allow.join("; ")
    }
}

// ============================================================================
// ZoomBounds
// ============================================================================

/// Limits and step for the global zoom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomBounds {
    /// Smallest factor.
    pub min: f64,
    /// Largest factor.
    pub max: f64,
    /// Increment per key press or wheel tick.
    pub step: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 3.0,
            step: 0.1,
        }
    }
}

// ============================================================================
// ShellConfig
// ============================================================================

/// Configuration for a [`Shell`](crate::Shell).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    /// Search URL with a `%s` placeholder.
    pub search_template: String,

    /// Reserved pseudo-scheme for local assets, without `://`.
    pub virtual_scheme: String,

    /// Same-origin prefix the virtual scheme maps onto.
    pub local_root: String,

    /// Extension appended to extension-less asset paths.
    pub default_extension: String,

    /// Asset name used for an empty virtual path.
    pub index_name: String,

    /// Path segment the proxy engine inserts before the encoded target.
    pub proxy_marker: String,

    /// Scheme and host of the hosting page.
    pub origin: String,

    /// Transport identifier that must be active for proxied navigation.
    pub transport: String,

    /// Tunnel path on the origin.
    pub tunnel_path: String,

    /// Worker script of the transport negotiator.
    pub transport_worker: String,

    /// Background interceptor script.
    pub interceptor_script: String,

    /// Engine assets.
    pub engine_files: EngineFiles,

    /// First destination of every new tab.
    pub start_page: String,

    /// Frame attributes.
    pub frame_defaults: FrameDefaults,

    /// Zoom limits.
    pub zoom: ZoomBounds,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            virtual_scheme: "bolt".to_string(),
            local_root: "/bolt/".to_string(),
            default_extension: "html".to_string(),
            index_name: "index".to_string(),
            proxy_marker: "/scramjet/".to_string(),
            origin: "http://localhost:8080".to_string(),
            transport: "/epoxy/index.mjs".to_string(),
            tunnel_path: "/wisp/".to_string(),
            transport_worker: "/baremux/worker.js".to_string(),
            interceptor_script: "/sw.js".to_string(),
            engine_files: EngineFiles::default(),
            start_page: "bolt://about".to_string(),
            frame_defaults: FrameDefaults::default(),
            zoom: ZoomBounds::default(),
        }
    }
}

// ============================================================================
// ShellConfig - Constructors
// ============================================================================

impl ShellConfig {
    /// Creates a configuration with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read or
    /// [`Error::Json`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// ============================================================================
// ShellConfig - Builder Methods
// ============================================================================

impl ShellConfig {
    /// Sets the search template.
    #[inline]
    #[must_use]
    pub fn with_search_template(mut self, template: impl Into<String>) -> Self {
        self.search_template = template.into();
        self
    }

    /// Sets the virtual scheme name (without `://`).
    #[inline]
    #[must_use]
    pub fn with_virtual_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.virtual_scheme = scheme.into();
        self
    }

    /// Sets the hosting page origin.
    #[inline]
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the start page of new tabs.
    #[inline]
    #[must_use]
    pub fn with_start_page(mut self, start_page: impl Into<String>) -> Self {
        self.start_page = start_page.into();
        self
    }

    /// Sets the zoom limits.
    #[inline]
    #[must_use]
    pub fn with_zoom_bounds(mut self, bounds: ZoomBounds) -> Self {
        self.zoom = bounds;
        self
    }
}

// ============================================================================
// ShellConfig - Derived Values
// ============================================================================

impl ShellConfig {
    /// Returns the virtual scheme prefix, e.g. `bolt://`.
    #[must_use]
    pub fn virtual_prefix(&self) -> String {
        format!("{}://", self.virtual_scheme)
    }

    /// Parses the hosting page origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if the origin is not an absolute URL.
    pub fn origin_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.origin)?)
    }

    /// Builds the tunnel endpoint from the page origin.
    ///
    /// `https` pages tunnel over `wss`, everything else over `ws`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`] if the origin cannot be parsed, or
    /// [`Error::Config`] if it has no host.
    pub fn tunnel_url(&self) -> Result<String> {
        let origin = self.origin_url()?;
        let scheme = if origin.scheme() == "https" { "wss" } else { "ws" };
        let host = origin
            .host_str()
            .ok_or_else(|| Error::config(format!("Origin has no host: {}", self.origin)))?;
        let authority = match origin.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Ok(format!("{scheme}://{authority}{}", self.tunnel_path))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if !self.search_template.contains(SEARCH_PLACEHOLDER) {
            return Err(Error::config(format!(
                "Search template must contain {SEARCH_PLACEHOLDER}: {}",
                self.search_template
            )));
        }

        if self.virtual_scheme.is_empty() || self.virtual_scheme.contains(':') {
            return Err(Error::config(format!(
                "Virtual scheme must be a bare scheme name: {:?}",
                self.virtual_scheme
            )));
        }

        if !self.local_root.starts_with('/') || !self.local_root.ends_with('/') {
            return Err(Error::config(format!(
                "Local root must start and end with '/': {}",
                self.local_root
            )));
        }

        if self.proxy_marker.is_empty() {
            return Err(Error::config("Proxy marker must not be empty"));
        }

        self.tunnel_url()
            .map_err(|e| Error::config(format!("Invalid origin {}: {e}", self.origin)))?;

        let zoom = self.zoom;
        if !(zoom.min > 0.0 && zoom.min <= zoom.max && zoom.step > 0.0) {
            return Err(Error::config(format!(
                "Invalid zoom bounds: min={} max={} step={}",
                zoom.min, zoom.max, zoom.step
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
