//! Tab lifecycle: open, activate, close and surface mounting.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info};

use crate::identifiers::TabId;
use crate::status::{StatusMode, messages};
use crate::surface::{NativeSurface, ProxiedSurface, SurfaceKind};

use super::registry::{TabEntry, TabRegistry};
use super::{NavigationOutcome, Shell};

// ============================================================================
// Shell - Tabs
// ============================================================================

impl Shell {
    /// Opens a tab, focuses it and navigates it.
    ///
    /// Blank or missing `initial` input opens the configured start page.
    pub async fn create_tab(&self, initial: Option<&str>) -> TabId {
        self.open_and_navigate(initial).await.0
    }

    /// Focuses a tab.
    ///
    /// Returns `false` if the tab does not exist.
    pub fn activate(&self, tab_id: TabId) -> bool {
        let mut registry = self.inner.registry.lock();
        let activated = self.activate_locked(&mut registry, tab_id);
        if !activated {
            debug!(tab_id = %tab_id, "Activate ignored for unknown tab");
        }
        activated
    }

    /// Closes a tab.
    ///
    /// Closing the active tab focuses the most recently created remaining
    /// tab. Closing the last tab opens a fresh one on the start page in the
    /// same step, so the shell is never observed without tabs.
    ///
    /// Returns `false` if the tab does not exist.
    pub async fn close_tab(&self, tab_id: TabId) -> bool {
        let replacement = {
            let mut registry = self.inner.registry.lock();
            let Some(entry) = registry.remove(tab_id) else {
                debug!(tab_id = %tab_id, "Close ignored for unknown tab");
                return false;
            };
            self.inner.viewport.detach(entry.mounted().frame().as_ref());
            info!(tab_id = %tab_id, remaining = registry.len(), "Tab closed");

            if registry.is_empty() {
                let new_id = self.open_tab_locked(&mut registry);
                self.activate_locked(&mut registry, new_id);
                Some(new_id)
            } else {
                if registry.active_id().is_none()
                    && let Some(last) = registry.last()
                {
                    self.activate_locked(&mut registry, last);
                }
                None
            }
        };

        if let Some(new_id) = replacement {
            let start_page = self.inner.config.start_page.clone();
            self.navigate(new_id, &start_page).await;
        }
        true
    }
}

// ============================================================================
// Shell - Tabs Internal
// ============================================================================

impl Shell {
    pub(crate) async fn open_and_navigate(
        &self,
        initial: Option<&str>,
    ) -> (TabId, NavigationOutcome) {
        let tab_id = {
            let mut registry = self.inner.registry.lock();
            let tab_id = self.open_tab_locked(&mut registry);
            self.activate_locked(&mut registry, tab_id);
            tab_id
        };

        let target = initial
            .map(str::trim)
            .filter(|input| !input.is_empty())
            .unwrap_or(self.inner.config.start_page.as_str())
            .to_string();

        let outcome = self.navigate(tab_id, &target).await;
        (tab_id, outcome)
    }

    /// Creates both surfaces and mounts the native one.
    fn open_tab_locked(&self, registry: &mut TabRegistry) -> TabId {
        let inner = &self.inner;
        let tab_id = registry.allocate_id();
        let defaults = &inner.config.frame_defaults;

        let engine = if self.is_proxy_ready() {
            inner.engine.as_deref()
        } else {
            None
        };

        let proxied = ProxiedSurface::create(
            engine,
            inner.viewport.as_ref(),
            defaults,
            tab_id,
            inner.events_tx.clone(),
        );
        let native = NativeSurface::create(
            inner.viewport.as_ref(),
            defaults,
            tab_id,
            inner.events_tx.clone(),
        );
        let engine_backed = proxied.is_engine_backed();

        let entry = TabEntry::new(tab_id, Arc::new(proxied), Arc::new(native));
        {
            let frame = entry.mounted().frame();
            frame.set_transform(&inner.zoom.transform());
            inner.viewport.attach(frame.as_ref());
        }
        registry.insert(entry);

        info!(tab_id = %tab_id, engine_backed, tabs = registry.len(), "Tab opened");
        tab_id
    }

    /// Focuses a tab and refreshes the shared chrome for it.
    pub(crate) fn activate_locked(&self, registry: &mut TabRegistry, tab_id: TabId) -> bool {
        if !registry.set_active(tab_id) {
            return false;
        }

        for entry in registry.iter() {
            entry.mounted().frame().set_active(entry.id == tab_id);
        }

        let Some(entry) = registry.get(tab_id) else {
            return false;
        };
        entry
            .mounted()
            .frame()
            .set_transform(&self.inner.zoom.transform());

        let shown = self.display_for(entry);
        if shown.is_empty() {
            self.set_status(messages::READY, StatusMode::Idle);
        } else {
            self.set_status(messages::FOCUSED, StatusMode::Live);
        }
        debug!(tab_id = %tab_id, display = %shown, "Tab activated");
        self.set_address_bar(shown);
        true
    }

    /// Mounts the surface of `kind`, if it is not mounted already.
    ///
    /// Returns `true` if the mounted surface changed.
    pub(crate) fn mount_surface(&self, entry: &mut TabEntry, kind: SurfaceKind, active: bool) -> bool {
        if entry.state.surface_kind == kind {
            return false;
        }

        let viewport = &self.inner.viewport;
        viewport.detach(entry.mounted().frame().as_ref());
        entry.state.surface_kind = kind;

        let frame = entry.mounted().frame();
        viewport.attach(frame.as_ref());
        frame.set_active(active);
        frame.set_transform(&self.inner.zoom.transform());

        debug!(tab_id = %entry.id, kind = %kind, node = %frame.node(), "Surface mounted");
        true
    }

    /// Address bar text for a tab.
    pub(crate) fn display_for(&self, entry: &TabEntry) -> String {
        if let Some(display) = entry.state.display_url.as_deref()
            && !display.is_empty()
        {
            return display.to_string();
        }
        entry
            .state
            .navigate_target
            .as_deref()
            .map(|target| self.inner.normalizer.display_from_location(target))
            .unwrap_or_default()
    }
}
