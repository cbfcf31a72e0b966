//! Embeddable frames and the shared viewport.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use crate::config::FrameDefaults;
use crate::error::Result;
use crate::identifiers::NodeId;
use crate::zoom::SurfaceTransform;

// ============================================================================
// Types
// ============================================================================

/// Callback fired when a frame finishes loading.
pub type LoadHandler = Box<dyn Fn() + Send + Sync>;

// ============================================================================
// Frame
// ============================================================================

/// A host rendering frame (an `<iframe>` in the browser).
///
/// Frames are plain handles: every method is synchronous and cheap, matching
/// DOM property writes. Loading itself is asynchronous and reported through
/// the handler registered with [`Frame::on_load`].
pub trait Frame: Send + Sync {
    /// Returns the node identity used by the viewport.
    fn node(&self) -> NodeId;

    /// Applies title and permission attributes.
    fn apply_defaults(&self, defaults: &FrameDefaults);

    /// Points the frame at a URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the location.
    fn set_src(&self, url: &str) -> Result<()>;

    /// Renders an inline document.
    fn set_srcdoc(&self, html: &str);

    /// Removes any inline document so `src` shows again.
    fn clear_srcdoc(&self);

    /// Returns the current location, if readable.
    ///
    /// Hosts fall back to the last `src` when the content location is
    /// cross-origin.
    fn location(&self) -> Option<String>;

    /// Applies a zoom transform and compensating size.
    fn set_transform(&self, transform: &SurfaceTransform);

    /// Toggles active-tab styling.
    fn set_active(&self, active: bool);

    /// Steps back in the frame's session history.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame's history is not accessible.
    fn history_back(&self) -> Result<()>;

    /// Steps forward in the frame's session history.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame's history is not accessible.
    fn history_forward(&self) -> Result<()>;

    /// Reloads the current document.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame's location is not accessible.
    fn reload(&self) -> Result<()>;

    /// Registers the "finished loading" callback.
    ///
    /// A frame holds one handler; registering again replaces it.
    fn on_load(&self, handler: LoadHandler);
}

// ============================================================================
// Viewport
// ============================================================================

/// The shared container every tab mounts its surface into.
pub trait Viewport: Send + Sync {
    /// Creates a detached frame.
    fn create_frame(&self) -> Arc<dyn Frame>;

    /// Appends a frame's node.
    fn attach(&self, frame: &dyn Frame);

    /// Removes a frame's node if it is attached.
    fn detach(&self, frame: &dyn Frame);
}
