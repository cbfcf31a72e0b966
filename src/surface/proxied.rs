//! Engine-managed frame surface.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::FrameDefaults;
use crate::error::{Error, Result};
use crate::host::{Frame, ProxyEngine, ProxyFrame, Viewport};
use crate::identifiers::TabId;

use super::native::{NativeSurface, direct_location};
use super::{LoadSender, Surface, SurfaceKind, wire_load_events};

// ============================================================================
// Types
// ============================================================================

/// How proxied navigation is carried out.
enum Route {
    /// Through the engine.
    Engine(Box<dyn ProxyFrame>),
    /// Engine unavailable: behave like a native surface.
    Direct(NativeSurface),
}

// ============================================================================
// ProxiedSurface
// ============================================================================

/// A surface whose traffic goes through the proxy engine.
pub struct ProxiedSurface {
    frame: Arc<dyn Frame>,
    route: Route,
}

impl fmt::Debug for ProxiedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxiedSurface")
            .field("node", &self.frame.node())
            .field("engine", &self.is_engine_backed())
            .finish()
    }
}

impl ProxiedSurface {
    /// Creates a proxied surface for a tab.
    ///
    /// Without a ready engine the surface falls back to a plain frame so
    /// navigation is never dropped.
    pub(crate) fn create(
        engine: Option<&dyn ProxyEngine>,
        viewport: &dyn Viewport,
        defaults: &FrameDefaults,
        tab_id: TabId,
        events: LoadSender,
    ) -> Self {
        let proxy = match engine.map(|engine| engine.create_frame()) {
            Some(Ok(proxy)) => Some(proxy),
            Some(Err(e)) => {
                warn!(tab_id = %tab_id, error = %e, "Engine frame unavailable, using direct frame");
                None
            }
            None => None,
        };

        let (frame, route) = match proxy {
            Some(proxy) => (proxy.frame(), Route::Engine(proxy)),
            None => {
                let frame = viewport.create_frame();
                (
                    Arc::clone(&frame),
                    Route::Direct(NativeSurface::from_frame(frame)),
                )
            }
        };

        frame.apply_defaults(defaults);
        wire_load_events(frame.as_ref(), tab_id, SurfaceKind::Proxied, events);

        Self { frame, route }
    }

    /// Returns `true` if navigation goes through the engine.
    #[inline]
    #[must_use]
    pub fn is_engine_backed(&self) -> bool {
        matches!(self.route, Route::Engine(_))
    }
}

#[async_trait]
impl Surface for ProxiedSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Proxied
    }

    fn frame(&self) -> &Arc<dyn Frame> {
        &self.frame
    }

    async fn navigate(&self, target: &str) -> Result<()> {
        match &self.route {
            Route::Engine(proxy) => {
                debug!(target = %target, node = %self.frame.node(), "Proxied navigate");
                proxy
                    .go(target)
                    .await
                    .map_err(|e| Error::dispatch(target, e.to_string()))
            }
            Route::Direct(direct) => {
                debug!(
                    location = %direct_location(target),
                    node = %self.frame.node(),
                    "Proxied navigate without engine"
                );
                direct.navigate(target).await
            }
        }
    }
}
