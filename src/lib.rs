//! Bolt tabs - tab and navigation state machine for a browser-embedded
//! web proxy.
//!
//! The crate is the client-side core of a proxy browser shell: it turns
//! address bar input into destinations, keeps an ordered set of tabs, and
//! routes each tab through either a proxy-rewritten frame or a plain frame.
//!
//! # Architecture
//!
//! - **Shell (Rust)**: tabs, navigation, zoom, status line, address bar
//! - **Host (embedding)**: frames, viewport, proxy engine, transport,
//!   asset probe, reached only through the traits in [`host`]
//!
//! Key design principles:
//!
//! - Each tab owns one proxied and one native surface and mounts exactly one
//! - `bolt://` addresses map onto local assets and never touch the proxy
//! - Navigation failures degrade one tab and never propagate as errors
//! - Load completion is event-driven, delivered on a channel
//!
//! # Quick Start
//!
//! ```ignore
//! use bolt_tabs::{Result, Shell, ShellConfig};
//!
//! async fn start(host: Host) -> Result<()> {
//!     let shell = Shell::builder()
//!         .config(ShellConfig::load("shell.json")?)
//!         .viewport(host.viewport())
//!         .asset_server(host.assets())
//!         .engine(host.engine())
//!         .transport(host.transport())
//!         .launch()
//!         .await?;
//!
//!     let events = shell.clone();
//!     tokio::spawn(async move { events.run_event_loop().await });
//!
//!     shell.submit_address("rust lang").await;
//!     shell.create_tab(Some("bolt://docs/readme")).await;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`shell`] | [`Shell`], [`Tab`], navigation and lifecycle |
//! | [`address`] | Address normalization and display derivation |
//! | [`surface`] | Proxied and native rendering surfaces |
//! | [`host`] | Traits implemented by the embedding |
//! | [`zoom`] | Shared zoom factor and input mapping |
//! | [`status`] | Status line |
//! | [`config`] | [`ShellConfig`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |

// ============================================================================
// Modules
// ============================================================================

/// Address normalization.
///
/// Converts raw input into a navigation target plus display text.
pub mod address;

/// Shell configuration.
pub mod config;

/// Error types and result aliases.
///
/// Construction and configuration return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Host collaborator traits.
pub mod host;

/// Type-safe identifiers for shell entities.
pub mod identifiers;

/// Tab shell.
///
/// Use [`Shell::builder()`] to configure and launch a shell.
pub mod shell;

/// Status line.
pub mod status;

/// Rendering surfaces.
pub mod surface;

/// Zoom controller.
pub mod zoom;

// ============================================================================
// Re-exports
// ============================================================================

// Shell types
pub use shell::{LoadState, NavigationOutcome, Shell, ShellBuilder, Tab, TabInfo};

// Address types
pub use address::{Address, Normalizer};

// Configuration types
pub use config::{EngineFiles, FrameDefaults, ShellConfig, ZoomBounds};

// Host traits
pub use host::{
    AssetServer, Frame, LoadHandler, ProxyEngine, ProxyFrame, RequestInterceptor, RequestRoute,
    TransportEndpoint, TransportNegotiator, Viewport, route_request,
};

// Surface types
pub use surface::{LoadEvent, Surface, SurfaceKind};

// Status types
pub use status::{Status, StatusMode, StatusReporter};

// Zoom types
pub use zoom::{Modifiers, SurfaceTransform, ZoomAction, ZoomController};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{NodeId, TabId};
