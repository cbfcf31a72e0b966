//! Rendering surface adapters.
//!
//! A surface is a frame plus the way navigation reaches it. Each tab owns
//! one surface of each [`SurfaceKind`] for its whole life and mounts exactly
//! one of them into the viewport.
//!
//! | Type | Navigation |
//! |------|------------|
//! | [`ProxiedSurface`] | Engine entry point (direct fallback if the engine is down) |
//! | [`NativeSurface`] | Frame location set directly |
//!
//! Both report load completion the same way: a [`LoadEvent`] on the shell's
//! event channel.

// ============================================================================
// Submodules
// ============================================================================

mod native;
mod pages;
mod proxied;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::Result;
use crate::host::Frame;
use crate::identifiers::TabId;

// ============================================================================
// Re-exports
// ============================================================================

pub use native::NativeSurface;
pub use pages::missing_file_document;
pub use proxied::ProxiedSurface;

// ============================================================================
// SurfaceKind
// ============================================================================

/// Which surface a tab has mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    /// Traffic rewritten by the proxy engine.
    Proxied,
    /// Loaded directly.
    Native,
}

impl SurfaceKind {
    /// Returns the string representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proxied => "proxied",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LoadEvent
// ============================================================================

/// A surface finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadEvent {
    /// Owning tab.
    pub tab_id: TabId,
    /// Surface that fired.
    pub kind: SurfaceKind,
}

/// Sending half of the shell's load event channel.
pub type LoadSender = mpsc::UnboundedSender<LoadEvent>;

// ============================================================================
// Surface
// ============================================================================

/// One capability over both surface variants.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Returns the variant.
    fn kind(&self) -> SurfaceKind;

    /// Returns the mountable frame.
    fn frame(&self) -> &Arc<dyn Frame>;

    /// Starts loading a target.
    ///
    /// Resolves once the navigation is dispatched; completion arrives later
    /// as a [`LoadEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dispatch`](crate::Error::Dispatch) if the dispatch
    /// itself is rejected.
    async fn navigate(&self, target: &str) -> Result<()>;
}

// ============================================================================
// Internal
// ============================================================================

/// Forwards a frame's load callback to the shell's event channel.
pub(crate) fn wire_load_events(
    frame: &dyn Frame,
    tab_id: TabId,
    kind: SurfaceKind,
    events: LoadSender,
) {
    frame.on_load(Box::new(move || {
        trace!(tab_id = %tab_id, kind = %kind, "Frame load fired");
        // The shell may already be gone; a dropped receiver is fine.
        let _ = events.send(LoadEvent { tab_id, kind });
    }));
}

// ============================================================================
// Tests
// ============================================================================
