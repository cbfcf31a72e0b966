//! Plain embedded frame surface.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::address::ensure_protocol;
use crate::config::FrameDefaults;
use crate::error::{Error, Result};
use crate::host::{Frame, Viewport};
use crate::identifiers::TabId;

use super::{LoadSender, Surface, SurfaceKind, wire_load_events};

// ============================================================================
// NativeSurface
// ============================================================================

/// A bare frame whose location is set directly.
pub struct NativeSurface {
    frame: Arc<dyn Frame>,
}

impl fmt::Debug for NativeSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeSurface")
            .field("node", &self.frame.node())
            .finish()
    }
}

impl NativeSurface {
    /// Creates a native surface for a tab.
    pub(crate) fn create(
        viewport: &dyn Viewport,
        defaults: &FrameDefaults,
        tab_id: TabId,
        events: LoadSender,
    ) -> Self {
        let frame = viewport.create_frame();
        frame.apply_defaults(defaults);
        wire_load_events(frame.as_ref(), tab_id, SurfaceKind::Native, events);
        Self { frame }
    }

    /// Wraps an existing frame that is already configured and wired.
    pub(crate) fn from_frame(frame: Arc<dyn Frame>) -> Self {
        Self { frame }
    }
}

#[async_trait]
impl Surface for NativeSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Native
    }

    fn frame(&self) -> &Arc<dyn Frame> {
        &self.frame
    }

    async fn navigate(&self, target: &str) -> Result<()> {
        let location = direct_location(target);
        debug!(location = %location, node = %self.frame.node(), "Native navigate");
        self.frame
            .set_src(&location)
            .map_err(|e| Error::dispatch(target, e.to_string()))
    }
}

/// Resolves the location a direct frame is pointed at.
///
/// Origin-relative paths stay as they are; anything else gets a scheme.
pub(crate) fn direct_location(target: &str) -> String {
    if target.starts_with('/') {
        target.to_string()
    } else {
        ensure_protocol(target)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::identifiers::NodeId;
    use crate::zoom::SurfaceTransform;

    struct SrcFrame {
        node: NodeId,
        src: Mutex<Option<String>>,
        refuse: bool,
    }

    impl SrcFrame {
        fn new(refuse: bool) -> Arc<Self> {
            Arc::new(Self {
                node: NodeId::next(),
                src: Mutex::new(None),
                refuse,
            })
        }
    }

    impl Frame for SrcFrame {
        fn node(&self) -> NodeId {
            self.node
        }
        fn apply_defaults(&self, _defaults: &FrameDefaults) {}
        fn set_src(&self, url: &str) -> Result<()> {
            if self.refuse {
                return Err(Error::frame("location refused"));
            }
            *self.src.lock() = Some(url.to_string());
            Ok(())
        }
        fn set_srcdoc(&self, _html: &str) {}
        fn clear_srcdoc(&self) {}
        fn location(&self) -> Option<String> {
            self.src.lock().clone()
        }
        fn set_transform(&self, _transform: &SurfaceTransform) {}
        fn set_active(&self, _active: bool) {}
        fn history_back(&self) -> Result<()> {
            Ok(())
        }
        fn history_forward(&self) -> Result<()> {
            Ok(())
        }
        fn reload(&self) -> Result<()> {
            Ok(())
        }
        fn on_load(&self, _handler: crate::host::LoadHandler) {}
    }

    #[test]
    fn test_navigate_sets_location() {
        let frame = SrcFrame::new(false);
        let surface = NativeSurface::from_frame(Arc::clone(&frame) as Arc<dyn Frame>);

        tokio_test::block_on(surface.navigate("example.com")).expect("dispatch");
        assert_eq!(frame.location().as_deref(), Some("https://example.com"));
        assert_eq!(surface.kind(), SurfaceKind::Native);
    }

    #[test]
    fn test_refused_location_is_dispatch_error() {
        let frame = SrcFrame::new(true);
        let surface = NativeSurface::from_frame(frame as Arc<dyn Frame>);

        let err = tokio_test::block_on(surface.navigate("/bolt/about.html")).unwrap_err();
        assert!(matches!(err, Error::Dispatch { ref target, .. } if target == "/bolt/about.html"));
    }

    #[test]
    fn test_direct_location() {
        assert_eq!(direct_location("/bolt/about.html"), "/bolt/about.html");
        assert_eq!(direct_location("example.com"), "https://example.com");
        assert_eq!(direct_location("http://a.b/c"), "http://a.b/c");
    }
}
