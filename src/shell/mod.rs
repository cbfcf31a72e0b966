//! Tab shell: registry, navigation controller and shared chrome.
//!
//! A [`Shell`] owns every tab, the shared zoom factor, the status line and
//! the address bar. Host surfaces are reached only through the traits in
//! [`host`](crate::host).
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Shell struct and accessors |
//! | `builder` | Configuration and launch |
//! | `startup` | Proxy startup, transport selection |
//! | `tabs` | Open, activate, close, surface mounting |
//! | `navigation` | Navigation pipeline, reload, history |
//! | `events` | Load completion handling |
//! | `view` | Zoom and zoom input |
//! | `registry` | Ordered tab storage |
//! | `tab` | Tab handle and snapshots |

// ============================================================================
// Submodules
// ============================================================================

mod builder;
mod core;
mod events;
mod navigation;
mod registry;
mod startup;
mod tab;
mod tabs;
mod view;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::ShellBuilder;
pub use core::Shell;
pub use navigation::NavigationOutcome;
pub use tab::{LoadState, Tab, TabInfo};
