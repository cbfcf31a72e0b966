//! Status line reporter.
//!
//! The status line is a two-part signal: text plus a [`StatusMode`] that the
//! chrome renders as an indicator. Consumers subscribe through a
//! [`tokio::sync::watch`] receiver and always see the latest value.
//!
//! ```
//! use bolt_tabs::{StatusMode, StatusReporter};
//!
//! let status = StatusReporter::new();
//! let rx = status.subscribe();
//!
//! status.set("Loading...", StatusMode::Loading);
//! assert_eq!(rx.borrow().text, "Loading...");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

// ============================================================================
// Messages
// ============================================================================

/// Fixed status texts.
pub mod messages {
    /// Engine startup in progress.
    pub const INITIALIZING: &str = "Initializing proxy...";
    /// Engine started.
    pub const PROXY_READY: &str = "Proxy ready.";
    /// Engine failed to start.
    pub const PROXY_FAILED: &str = "Proxy failed to start.";
    /// Navigation dispatched.
    pub const LOADING: &str = "Loading...";
    /// Load completed.
    pub const LOADED: &str = "Loaded";
    /// Surface rejected the navigation.
    pub const NAVIGATION_FAILED: &str = "Navigation failed.";
    /// Transport could not be configured.
    pub const TRANSPORT_FAILED: &str = "Proxy transport unavailable.";
    /// Virtual asset missing.
    pub const FILE_MISSING: &str = "Bolt file does not exist.";
    /// Focused tab has a destination.
    pub const FOCUSED: &str = "Focused on active tab.";
    /// Focused tab is blank.
    pub const READY: &str = "Ready to browse.";
    /// History back.
    pub const GOING_BACK: &str = "Going back...";
    /// History forward.
    pub const GOING_FORWARD: &str = "Going forward...";
    /// Reload.
    pub const RELOADING: &str = "Reloading tab...";
}

// ============================================================================
// StatusMode
// ============================================================================

/// Indicator state of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMode {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A load or startup step is in flight.
    Loading,
    /// Content is live.
    Live,
}

impl StatusMode {
    /// Returns the string representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for StatusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Status
// ============================================================================

/// One status line value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    /// Message text.
    pub text: String,
    /// Indicator mode.
    pub mode: StatusMode,
}

// ============================================================================
// StatusReporter
// ============================================================================

/// Publisher of the shared status line.
#[derive(Debug)]
pub struct StatusReporter {
    tx: watch::Sender<Status>,
}

impl StatusReporter {
    /// Creates a reporter with an empty idle status.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Status::default());
        Self { tx }
    }

    /// Publishes a new status.
    pub fn set(&self, text: impl Into<String>, mode: StatusMode) {
        let status = Status {
            text: text.into(),
            mode,
        };
        trace!(text = %status.text, mode = %status.mode, "Status");
        self.tx.send_replace(status);
    }

    /// Returns the current status.
    #[must_use]
    pub fn current(&self) -> Status {
        self.tx.borrow().clone()
    }

    /// Subscribes to status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.tx.subscribe()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
