//! Ordered tab collection, id assignment and active-tab selection.
//!
//! The registry is plain data guarded by the shell's lock. It never awaits
//! and never touches the viewport; the shell does both around it.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::address::NEW_TAB_LABEL;
use crate::identifiers::TabId;
use crate::surface::{Surface, SurfaceKind};

use super::tab::{LoadState, TabInfo};

// ============================================================================
// TabState
// ============================================================================

/// Mutable per-tab navigation state.
#[derive(Debug, Clone)]
pub(crate) struct TabState {
    /// What the address bar shows for this tab.
    pub display_url: Option<String>,
    /// What was last handed to a surface.
    pub navigate_target: Option<String>,
    /// Mounted surface variant.
    pub surface_kind: SurfaceKind,
    /// Loading indicator state.
    pub load_state: LoadState,
    /// Tab strip label.
    pub label: String,
    /// Bumped on every navigation start.
    pub generation: u64,
}

impl Default for TabState {
    fn default() -> Self {
        Self {
            display_url: None,
            navigate_target: None,
            surface_kind: SurfaceKind::Native,
            load_state: LoadState::Idle,
            label: NEW_TAB_LABEL.to_string(),
            generation: 0,
        }
    }
}

// ============================================================================
// TabEntry
// ============================================================================

/// A tab and the two surfaces it owns.
pub(crate) struct TabEntry {
    pub id: TabId,
    pub proxied: Arc<dyn Surface>,
    pub native: Arc<dyn Surface>,
    pub state: TabState,
}

impl TabEntry {
    /// Creates an entry with the native surface mounted.
    pub fn new(id: TabId, proxied: Arc<dyn Surface>, native: Arc<dyn Surface>) -> Self {
        Self {
            id,
            proxied,
            native,
            state: TabState::default(),
        }
    }

    /// Returns the surface of the given kind.
    #[inline]
    pub fn surface(&self, kind: SurfaceKind) -> &Arc<dyn Surface> {
        match kind {
            SurfaceKind::Proxied => &self.proxied,
            SurfaceKind::Native => &self.native,
        }
    }

    /// Returns the mounted surface.
    #[inline]
    pub fn mounted(&self) -> &Arc<dyn Surface> {
        self.surface(self.state.surface_kind)
    }

    /// Takes a public snapshot.
    pub fn info(&self, active: bool) -> TabInfo {
        TabInfo {
            id: self.id,
            display_url: self.state.display_url.clone(),
            navigate_target: self.state.navigate_target.clone(),
            label: self.state.label.clone(),
            surface_kind: self.state.surface_kind,
            load_state: self.state.load_state,
            active,
        }
    }
}

// ============================================================================
// TabRegistry
// ============================================================================

/// Ordered tabs plus the active selection.
pub(crate) struct TabRegistry {
    /// Creation order.
    order: Vec<TabId>,
    /// Entries by ID.
    tabs: FxHashMap<TabId, TabEntry>,
    /// Last assigned ID.
    last_id: Option<TabId>,
    /// Focused tab.
    active: Option<TabId>,
}

impl TabRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            tabs: FxHashMap::default(),
            last_id: None,
            active: None,
        }
    }

    /// Allocates the next tab ID. IDs are never reused.
    pub fn allocate_id(&mut self) -> TabId {
        let id = self.last_id.map_or(TabId::FIRST, TabId::saturating_next);
        self.last_id = Some(id);
        id
    }

    /// Appends an entry.
    pub fn insert(&mut self, entry: TabEntry) {
        self.order.push(entry.id);
        self.tabs.insert(entry.id, entry);
    }

    /// Removes an entry, clearing the selection if it was active.
    pub fn remove(&mut self, id: TabId) -> Option<TabEntry> {
        let entry = self.tabs.remove(&id)?;
        self.order.retain(|tab_id| *tab_id != id);
        if self.active == Some(id) {
            self.active = None;
        }
        Some(entry)
    }

    #[inline]
    pub fn get(&self, id: TabId) -> Option<&TabEntry> {
        self.tabs.get(&id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: TabId) -> Option<&mut TabEntry> {
        self.tabs.get_mut(&id)
    }

    #[inline]
    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    #[inline]
    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    #[inline]
    pub fn is_active(&self, id: TabId) -> bool {
        self.active == Some(id)
    }

    /// Selects a tab. Returns `false` if it does not exist.
    pub fn set_active(&mut self, id: TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Returns the most recently created remaining tab.
    #[inline]
    pub fn last(&self) -> Option<TabId> {
        self.order.last().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns IDs in creation order.
    pub fn ids(&self) -> Vec<TabId> {
        self.order.clone()
    }

    /// Iterates entries in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TabEntry> {
        self.order.iter().filter_map(|id| self.tabs.get(id))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::Result;
    use crate::host::Frame;

    /// Surface stand-in; the registry never calls into surfaces.
    struct Inert(SurfaceKind);

    #[async_trait]
    impl Surface for Inert {
        fn kind(&self) -> SurfaceKind {
            self.0
        }

        fn frame(&self) -> &Arc<dyn Frame> {
            unimplemented!("registry tests never touch frames")
        }

        async fn navigate(&self, _target: &str) -> Result<()> {
            Ok(())
        }
    }

    fn entry(registry: &mut TabRegistry) -> TabEntry {
        let id = registry.allocate_id();
        TabEntry::new(
            id,
            Arc::new(Inert(SurfaceKind::Proxied)),
            Arc::new(Inert(SurfaceKind::Native)),
        )
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut registry = TabRegistry::new();
        let first = entry(&mut registry);
        let first_id = first.id;
        registry.insert(first);
        registry.remove(first_id);

        let second = entry(&mut registry);
        assert!(second.id > first_id);
        assert_eq!(second.id.to_string(), "tab-2");
    }

    #[test]
    fn test_allocation_saturates_at_max() {
        let mut registry = TabRegistry::new();
        registry.last_id = TabId::new(u32::MAX - 1);

        assert_eq!(registry.allocate_id().as_u32(), u32::MAX);
        assert_eq!(registry.allocate_id().as_u32(), u32::MAX);
    }

    #[test]
    fn test_new_entry_mounts_native() {
        let mut registry = TabRegistry::new();
        let e = entry(&mut registry);
        assert_eq!(e.state.surface_kind, SurfaceKind::Native);
        assert_eq!(e.mounted().kind(), SurfaceKind::Native);
        assert_eq!(e.state.load_state, LoadState::Idle);
        assert_eq!(e.state.label, "New Tab");
    }

    #[test]
    fn test_remove_active_clears_selection() {
        let mut registry = TabRegistry::new();
        let e = entry(&mut registry);
        let id = e.id;
        registry.insert(e);
        assert!(registry.set_active(id));

        assert!(registry.remove(id).is_some());
        assert_eq!(registry.active_id(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_order_and_last() {
        let mut registry = TabRegistry::new();
        let ids: Vec<TabId> = (0..3)
            .map(|_| {
                let e = entry(&mut registry);
                let id = e.id;
                registry.insert(e);
                id
            })
            .collect();

        assert_eq!(registry.ids(), ids);
        registry.remove(ids[2]);
        assert_eq!(registry.last(), Some(ids[1]));
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn test_set_active_unknown_tab() {
        let mut registry = TabRegistry::new();
        let missing = TabId::new(9).expect("non-zero");
        assert!(!registry.set_active(missing));
        assert_eq!(registry.active_id(), None);
    }
}
