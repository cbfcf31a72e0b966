//! Host collaborators.
//!
//! The shell never touches the page directly. Everything it needs from its
//! environment comes through the traits in this module, implemented by the
//! embedding (a `wasm-bindgen` glue layer in the browser, or an in-memory
//! double in tests).
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | Embeddable frames and the shared viewport |
//! | `engine` | Proxy rewriting engine and its frames |
//! | `transport` | Tunnel transport negotiation |
//! | `assets` | Local asset existence probe |
//! | `interceptor` | Background request interceptor and routing |

// ============================================================================
// Submodules
// ============================================================================

mod assets;
mod engine;
mod frame;
mod interceptor;
mod transport;

// ============================================================================
// Re-exports
// ============================================================================

pub use assets::AssetServer;
pub use engine::{ProxyEngine, ProxyFrame};
pub use frame::{Frame, LoadHandler, Viewport};
pub use interceptor::{RequestInterceptor, RequestRoute, route_request};
pub use transport::{TransportEndpoint, TransportNegotiator};
