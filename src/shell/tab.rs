//! Tab handle and tab snapshots.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifiers::TabId;
use crate::surface::SurfaceKind;

use super::{NavigationOutcome, Shell};

// ============================================================================
// LoadState
// ============================================================================

/// Loading indicator state of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing dispatched yet, or the last dispatch was rejected.
    #[default]
    Idle,
    /// Dispatched, waiting for the surface's load event.
    Loading,
    /// Surface reported completion.
    Loaded,
    /// Showing the missing-file document.
    Missing,
}

impl LoadState {
    /// Returns `true` while a load is in flight.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ============================================================================
// TabInfo
// ============================================================================

/// Point-in-time view of a tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: TabId,
    pub display_url: Option<String>,
    pub navigate_target: Option<String>,
    pub label: String,
    pub surface_kind: SurfaceKind,
    pub load_state: LoadState,
    pub active: bool,
}

// ============================================================================
// Tab
// ============================================================================

/// A handle to one tab of a [`Shell`].
///
/// Handles stay valid after the tab is closed; operations on a closed tab
/// are no-ops and accessors return `None`.
#[derive(Clone)]
pub struct Tab {
    id: TabId,
    shell: Shell,
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("shell", self.shell.uuid())
            .finish()
    }
}

impl Tab {
    pub(crate) fn new(id: TabId, shell: Shell) -> Self {
        Self { id, shell }
    }
}

// ============================================================================
// Tab - Accessors
// ============================================================================

impl Tab {
    /// Returns the tab ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Returns a snapshot, or `None` once closed.
    #[must_use]
    pub fn info(&self) -> Option<TabInfo> {
        self.shell.tab_info(self.id)
    }

    /// Returns `true` while the tab is registered.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.info().is_some()
    }

    /// Returns `true` if this is the active tab.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shell.active_tab_id() == Some(self.id)
    }

    /// Returns the address shown for this tab.
    #[must_use]
    pub fn display_url(&self) -> Option<String> {
        self.info().and_then(|info| info.display_url)
    }

    /// Returns the resolved target last handed to a surface.
    #[must_use]
    pub fn navigate_target(&self) -> Option<String> {
        self.info().and_then(|info| info.navigate_target)
    }

    /// Returns the tab strip label.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.info().map(|info| info.label)
    }

    #[must_use]
    pub fn load_state(&self) -> Option<LoadState> {
        self.info().map(|info| info.load_state)
    }

    #[must_use]
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.info().map(|info| info.surface_kind)
    }
}

// ============================================================================
// Tab - Operations
// ============================================================================

impl Tab {
    /// Navigates this tab to user input.
    pub async fn goto(&self, raw_input: &str) -> NavigationOutcome {
        self.shell.navigate(self.id, raw_input).await
    }

    /// Re-dispatches this tab's last target.
    pub async fn reload(&self) -> NavigationOutcome {
        self.shell.reload_tab(self.id).await
    }

    /// Makes this the active tab.
    pub fn focus(&self) -> bool {
        self.shell.activate(self.id)
    }

    /// Closes this tab.
    pub async fn close(&self) -> bool {
        self.shell.close_tab(self.id).await
    }
}
