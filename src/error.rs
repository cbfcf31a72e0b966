//! Error types for the tab shell.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! Construction and configuration return [`Result<T>`] which uses [`Error`].
//! Navigation never surfaces these to the caller: failures degrade a single
//! tab (status line + load state) and are reported through
//! [`NavigationOutcome`](crate::NavigationOutcome).
//!
//! ```ignore
//! use bolt_tabs::{Result, ShellConfig};
//!
//! fn load() -> Result<ShellConfig> {
//!     let config = ShellConfig::load("shell.json")?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Tabs | [`Error::TabNotFound`] |
//! | Proxy | [`Error::ProxyInit`], [`Error::ProxyUnavailable`], [`Error::Transport`] |
//! | Navigation | [`Error::Dispatch`], [`Error::Probe`], [`Error::Frame`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::UrlParse`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when shell configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Tab Errors
    // ========================================================================
    /// Tab not found.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    // ========================================================================
    // Proxy Errors
    // ========================================================================
    /// Proxy engine failed to initialize.
    #[error("Proxy failed to start: {message}")]
    ProxyInit {
        /// Description of the initialization failure.
        message: String,
    },

    /// Proxy engine is not initialized.
    ///
    /// Returned when no engine is configured, and by engine frame creation
    /// before a successful initialization.
    #[error("Proxy engine unavailable")]
    ProxyUnavailable,

    /// Transport negotiation failed.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// A surface rejected a navigation dispatch.
    #[error("Navigation to {target} failed: {message}")]
    Dispatch {
        /// Target handed to the surface.
        target: String,
        /// Description of the failure.
        message: String,
    },

    /// Existence probe against the local asset server failed.
    #[error("Probe of {path} failed: {message}")]
    Probe {
        /// Asset path that was probed.
        path: String,
        /// Description of the failure.
        message: String,
    },

    /// Host frame operation failed.
    #[error("Frame error: {message}")]
    Frame {
        /// Description of the frame failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates a proxy initialization error.
    #[inline]
    pub fn proxy_init(message: impl Into<String>) -> Self {
        Self::ProxyInit {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    #[inline]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a dispatch error.
    #[inline]
    pub fn dispatch(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dispatch {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Creates a probe error.
    #[inline]
    pub fn probe(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a frame error.
    #[inline]
    pub fn frame(message: impl Into<String>) -> Self {
        Self::Frame {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error comes from the proxy stack.
    #[inline]
    #[must_use]
    pub fn is_proxy_error(&self) -> bool {
        matches!(
            self,
            Self::ProxyInit { .. } | Self::ProxyUnavailable | Self::Transport { .. }
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors affect a single navigation and may succeed on
    /// a reload or a new navigation.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Dispatch { .. } | Self::Probe { .. } | Self::Frame { .. } | Self::Transport { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::dispatch("https://example.com", "frame detached");
        assert_eq!(
            err.to_string(),
            "Navigation to https://example.com failed: frame detached"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("search template must contain %s");
        assert_eq!(
            err.to_string(),
            "Configuration error: search template must contain %s"
        );
    }

    #[test]
    fn test_tab_not_found_display() {
        let err = Error::tab_not_found(TabId::new(7).expect("non-zero"));
        assert_eq!(err.to_string(), "Tab not found: tab-7");
    }

    #[test]
    fn test_is_proxy_error() {
        assert!(Error::proxy_init("wasm missing").is_proxy_error());
        assert!(Error::ProxyUnavailable.is_proxy_error());
        assert!(Error::transport("no tunnel").is_proxy_error());
        assert!(!Error::config("bad").is_proxy_error());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::dispatch("x", "y").is_recoverable());
        assert!(Error::probe("/bolt/a.html", "offline").is_recoverable());
        assert!(!Error::config("bad").is_recoverable());
        assert!(!Error::ProxyUnavailable.is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err, Error::UrlParse(_)));
    }
}
