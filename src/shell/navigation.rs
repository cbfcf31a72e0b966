//! Navigation pipeline and history controls.
//!
//! A navigation runs these steps in order and stops at the first one that
//! ends it:
//!
//! | Step | Ends with |
//! |------|-----------|
//! | Resolve tab, normalize input | [`NavigationOutcome::Ignored`] |
//! | Mount surface, select transport | [`NavigationOutcome::Failed`] |
//! | Record target and display | |
//! | Probe local asset | [`NavigationOutcome::Missing`] |
//! | Dispatch to surface | [`NavigationOutcome::Failed`] or [`NavigationOutcome::Dispatched`] |
//!
//! Every step after an await re-checks the tab's navigation generation; a
//! newer navigation on the same tab ends the older one with
//! [`NavigationOutcome::Superseded`]. Load completion is not part of the
//! pipeline, it arrives later as a [`LoadEvent`](crate::LoadEvent).

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::address::{Address, MISSING_FILE_LABEL, tab_label};
use crate::identifiers::TabId;
use crate::status::{StatusMode, messages};
use crate::surface::{SurfaceKind, missing_file_document};

use super::Shell;
use super::registry::TabEntry;
use super::tab::LoadState;

// ============================================================================
// NavigationOutcome
// ============================================================================

/// How a navigation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationOutcome {
    /// Blank input or unknown tab. Nothing changed.
    Ignored,
    /// Handed to a surface; completion follows as a load event.
    Dispatched,
    /// Local asset missing; the fallback document is shown.
    Missing,
    /// Transport selection or dispatch failed.
    Failed,
    /// A newer navigation on the same tab took over.
    Superseded,
}

impl NavigationOutcome {
    /// Returns `true` if a surface received the target.
    #[inline]
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched)
    }
}

/// History direction.
#[derive(Debug, Clone, Copy)]
enum Traverse {
    Back,
    Forward,
}

// ============================================================================
// Shell - Navigation
// ============================================================================

impl Shell {
    /// Navigates a tab to raw user input.
    pub async fn navigate(&self, tab_id: TabId, raw_input: &str) -> NavigationOutcome {
        if !self.inner.registry.lock().contains(tab_id) {
            debug!(tab_id = %tab_id, "Navigate ignored for unknown tab");
            return NavigationOutcome::Ignored;
        }

        let address = self.inner.normalizer.normalize(raw_input);
        if address.is_empty() {
            return NavigationOutcome::Ignored;
        }

        self.run_navigation(tab_id, address).await
    }

    /// Handles address bar submission.
    ///
    /// Navigates the active tab, or opens a tab for the input if none is
    /// active.
    pub async fn submit_address(&self, raw_input: &str) -> NavigationOutcome {
        let value = raw_input.trim();
        if value.is_empty() {
            return NavigationOutcome::Ignored;
        }

        match self.active_tab_id() {
            Some(tab_id) => self.navigate(tab_id, value).await,
            None => self.open_and_navigate(Some(value)).await.1,
        }
    }

    /// Reloads the active tab.
    pub async fn reload(&self) -> NavigationOutcome {
        match self.active_tab_id() {
            Some(tab_id) => self.reload_tab(tab_id).await,
            None => NavigationOutcome::Ignored,
        }
    }

    /// Re-dispatches a tab's last target through surface selection.
    ///
    /// A tab that never navigated reloads its mounted frame in place.
    pub async fn reload_tab(&self, tab_id: TabId) -> NavigationOutcome {
        let snapshot = {
            let registry = self.inner.registry.lock();
            registry.get(tab_id).map(|entry| {
                (
                    entry.state.navigate_target.clone(),
                    entry.state.display_url.clone(),
                    Arc::clone(entry.mounted()),
                )
            })
        };
        let Some((target, display, surface)) = snapshot else {
            return NavigationOutcome::Ignored;
        };

        self.set_status(messages::RELOADING, StatusMode::Loading);

        let Some(target) = target else {
            if let Err(e) = surface.frame().reload() {
                warn!(tab_id = %tab_id, error = %e, "Frame reload failed");
                self.set_status(messages::NAVIGATION_FAILED, StatusMode::Idle);
                return NavigationOutcome::Failed;
            }
            return NavigationOutcome::Dispatched;
        };

        let display_text = display
            .filter(|display| !display.is_empty())
            .unwrap_or_else(|| self.inner.normalizer.display_from_location(&target));
        self.run_navigation(
            tab_id,
            Address {
                navigate_target: target,
                display_text,
            },
        )
        .await
    }

    /// Goes back in the active tab's history.
    pub fn back(&self) -> bool {
        self.traverse(Traverse::Back)
    }

    /// Goes forward in the active tab's history.
    pub fn forward(&self) -> bool {
        self.traverse(Traverse::Forward)
    }
}

// ============================================================================
// Shell - Navigation Internal
// ============================================================================

impl Shell {
    async fn run_navigation(&self, tab_id: TabId, address: Address) -> NavigationOutcome {
        let Address {
            navigate_target: target,
            display_text: display,
        } = address;

        let local = self.inner.normalizer.is_local_target(&target);
        let kind = if local {
            SurfaceKind::Native
        } else {
            SurfaceKind::Proxied
        };
        debug!(tab_id = %tab_id, target = %target, kind = %kind, "Navigating");

        let Some(generation) = self.begin_navigation(tab_id, kind) else {
            return NavigationOutcome::Ignored;
        };

        if kind == SurfaceKind::Proxied
            && let Err(e) = self.ensure_transport().await
        {
            warn!(tab_id = %tab_id, error = %e, "Transport selection failed");
            self.set_status(messages::TRANSPORT_FAILED, StatusMode::Idle);
            return NavigationOutcome::Failed;
        }

        let recorded = self.with_current(tab_id, generation, |entry, _| {
            entry.state.navigate_target = Some(target.clone());
            entry.state.display_url = Some(display.clone());
        });
        if let Err(outcome) = recorded {
            return outcome;
        }

        if local && !self.asset_exists(&target).await {
            let shown = self.with_current(tab_id, generation, |entry, active| {
                self.show_missing(entry, active, &target);
            });
            return match shown {
                Ok(()) => NavigationOutcome::Missing,
                Err(outcome) => outcome,
            };
        }

        let prepared = self.with_current(tab_id, generation, |entry, _| {
            let previous = entry.state.load_state;
            entry.state.load_state = LoadState::Loading;
            let surface = Arc::clone(entry.mounted());
            surface.frame().clear_srcdoc();
            (surface, previous)
        });
        let (surface, previous) = match prepared {
            Ok(prepared) => prepared,
            Err(outcome) => return outcome,
        };

        self.set_status(messages::LOADING, StatusMode::Loading);

        if let Err(e) = surface.navigate(&target).await {
            warn!(tab_id = %tab_id, target = %target, error = %e, "Navigation dispatch failed");
            let restored = self.with_current(tab_id, generation, |entry, _| {
                if entry.state.load_state.is_loading() {
                    entry.state.load_state = match previous {
                        LoadState::Loaded => LoadState::Loaded,
                        _ => LoadState::Idle,
                    };
                }
            });
            if let Err(NavigationOutcome::Superseded) = restored {
                return NavigationOutcome::Superseded;
            }
            self.set_status(messages::NAVIGATION_FAILED, StatusMode::Idle);
            return NavigationOutcome::Failed;
        }

        let updated = self.with_current(tab_id, generation, |entry, active| {
            let display = self.display_for(entry);
            entry.state.label = tab_label(Some(&display));
            entry
                .mounted()
                .frame()
                .set_transform(&self.inner.zoom.transform());
            if active {
                self.set_address_bar(display);
            }
        });

        match updated {
            Ok(()) => NavigationOutcome::Dispatched,
            Err(outcome) => outcome,
        }
    }

    /// Mounts the surface for `kind` and starts a new generation.
    fn begin_navigation(&self, tab_id: TabId, kind: SurfaceKind) -> Option<u64> {
        let mut registry = self.inner.registry.lock();
        let active = registry.is_active(tab_id);
        let entry = registry.get_mut(tab_id)?;
        self.mount_surface(entry, kind, active);
        entry.state.generation += 1;
        Some(entry.state.generation)
    }

    /// Runs `f` on a tab if it still exists and no newer navigation started.
    fn with_current<R>(
        &self,
        tab_id: TabId,
        generation: u64,
        f: impl FnOnce(&mut TabEntry, bool) -> R,
    ) -> Result<R, NavigationOutcome> {
        let mut registry = self.inner.registry.lock();
        let active = registry.is_active(tab_id);
        let Some(entry) = registry.get_mut(tab_id) else {
            debug!(tab_id = %tab_id, "Tab closed during navigation");
            return Err(NavigationOutcome::Ignored);
        };
        if entry.state.generation != generation {
            debug!(
                tab_id = %tab_id,
                generation,
                current = entry.state.generation,
                "Navigation superseded"
            );
            return Err(NavigationOutcome::Superseded);
        }
        Ok(f(entry, active))
    }

    /// Probes the asset server. Probe errors count as missing.
    async fn asset_exists(&self, target: &str) -> bool {
        match self.inner.assets.exists(target).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(path = %target, error = %e, "Asset probe failed, treating as missing");
                false
            }
        }
    }

    /// Renders the missing-file document into the mounted surface.
    fn show_missing(&self, entry: &mut TabEntry, active: bool, target: &str) {
        let normalizer = &self.inner.normalizer;
        let file_name = normalizer.missing_file_name(target);
        let html = missing_file_document(&file_name, normalizer.local_root());

        let frame = entry.mounted().frame();
        frame.set_srcdoc(&html);
        frame.set_transform(&self.inner.zoom.transform());

        entry.state.load_state = LoadState::Missing;
        entry.state.label = MISSING_FILE_LABEL.to_string();

        info!(tab_id = %entry.id, file = %file_name, "Local asset missing");
        if active {
            self.set_address_bar(self.display_for(entry));
        }
        self.set_status(messages::FILE_MISSING, StatusMode::Idle);
    }

    fn traverse(&self, direction: Traverse) -> bool {
        let mut registry = self.inner.registry.lock();
        let Some(tab_id) = registry.active_id() else {
            return false;
        };
        let Some(entry) = registry.get_mut(tab_id) else {
            return false;
        };

        let frame = entry.mounted().frame();
        let result = match direction {
            Traverse::Back => {
                self.set_status(messages::GOING_BACK, StatusMode::Loading);
                frame.history_back()
            }
            Traverse::Forward => {
                self.set_status(messages::GOING_FORWARD, StatusMode::Loading);
                frame.history_forward()
            }
        };

        match result {
            Ok(()) => {
                debug!(tab_id = %tab_id, direction = ?direction, "History traversal");
                entry.state.display_url = None;
                entry.state.load_state = LoadState::Loading;
                entry.state.generation += 1;
                true
            }
            Err(e) => {
                warn!(tab_id = %tab_id, direction = ?direction, error = %e, "History traversal failed");
                self.set_status(messages::NAVIGATION_FAILED, StatusMode::Idle);
                false
            }
        }
    }
}
