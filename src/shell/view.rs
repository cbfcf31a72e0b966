//! Zoom and zoom input on the shell.

// ============================================================================
// Imports
// ============================================================================

use tracing::debug;

use crate::zoom::{Modifiers, ZoomAction, action_for_key, action_for_wheel};

use super::Shell;

// ============================================================================
// Shell - Zoom
// ============================================================================

impl Shell {
    /// Sets the shared zoom factor and applies it to every tab.
    ///
    /// Returns the stored factor after clamping.
    pub fn set_zoom(&self, requested: f64) -> f64 {
        let factor = self.inner.zoom.set(requested);
        self.apply_zoom();
        factor
    }

    /// Applies a zoom step to every tab.
    pub fn zoom(&self, action: ZoomAction) -> f64 {
        let factor = self.inner.zoom.apply(action);
        self.apply_zoom();
        factor
    }

    /// Handles a key press from the chrome.
    ///
    /// Returns `true` if it was a zoom shortcut and the host must suppress
    /// the default action.
    pub fn handle_key(&self, key: &str, modifiers: Modifiers) -> bool {
        match action_for_key(key, modifiers) {
            Some(action) => {
                self.zoom(action);
                true
            }
            None => false,
        }
    }

    /// Handles a wheel tick from the chrome.
    ///
    /// Returns `true` if it zoomed and the host must suppress scrolling.
    pub fn handle_wheel(&self, delta_y: f64, modifiers: Modifiers) -> bool {
        match action_for_wheel(delta_y, modifiers) {
            Some(action) => {
                self.zoom(action);
                true
            }
            None => false,
        }
    }

    /// Pushes the current transform to every mounted surface.
    fn apply_zoom(&self) {
        let transform = self.inner.zoom.transform();
        let registry = self.inner.registry.lock();
        for entry in registry.iter() {
            entry.mounted().frame().set_transform(&transform);
        }
        debug!(factor = transform.scale, tabs = registry.len(), "Zoom applied");
    }
}
