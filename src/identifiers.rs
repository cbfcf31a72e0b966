//! Type-safe identifiers for shell entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabId`] | Tab identifier, assigned monotonically by the registry |
//! | [`NodeId`] | Identity of a host frame node in the viewport |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// ============================================================================
// TabId
// ============================================================================

/// Identifier of a tab.
///
/// Ids are handed out in increasing order and never reused within a shell.
/// Displayed as `tab-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(NonZeroU32);

impl TabId {
    /// The first ID a registry hands out.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a tab ID, returning `None` for zero.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0.get()
    }

    /// Returns the following ID, saturating at `u32::MAX`.
    #[inline]
    #[must_use]
    pub fn saturating_next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

// ============================================================================
// NodeId
// ============================================================================

/// Global counter for node IDs.
static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a mountable frame node.
///
/// Hosts allocate one per frame with [`NodeId::next`] so the viewport can
/// tell frames apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocates the next process-unique node ID.
    #[inline]
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_rejects_zero() {
        assert!(TabId::new(0).is_none());
        assert_eq!(TabId::new(3).map(|id| id.as_u32()), Some(3));
    }

    #[test]
    fn test_tab_id_next() {
        assert_eq!(TabId::FIRST.as_u32(), 1);
        assert_eq!(TabId::FIRST.saturating_next().as_u32(), 2);
        let max = TabId::new(u32::MAX).expect("non-zero");
        assert_eq!(max.saturating_next(), max);
    }

    #[test]
    fn test_tab_id_display() {
        let id = TabId::new(12).expect("non-zero");
        assert_eq!(id.to_string(), "tab-12");
    }

    #[test]
    fn test_tab_id_serializes_as_number() {
        let id = TabId::new(5).expect("non-zero");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "5");
    }

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
