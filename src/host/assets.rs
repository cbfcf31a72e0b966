//! Local asset server probe.

use async_trait::async_trait;

use crate::error::Result;

/// Static file server behind the virtual scheme.
#[async_trait]
pub trait AssetServer: Send + Sync {
    /// Checks whether an asset exists with a lightweight, uncached request.
    ///
    /// # Errors
    ///
    /// Returns an error if the server could not be reached. Callers treat
    /// this as "missing".
    async fn exists(&self, path: &str) -> Result<bool>;
}
