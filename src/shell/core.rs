//! Shell struct, constructor and accessors.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, Notify, mpsc, watch};
use tracing::debug;
use uuid::Uuid;

use crate::address::Normalizer;
use crate::config::ShellConfig;
use crate::error::{Error, Result};
use crate::host::{AssetServer, ProxyEngine, RequestInterceptor, TransportNegotiator, Viewport};
use crate::identifiers::{NodeId, TabId};
use crate::status::{Status, StatusMode, StatusReporter};
use crate::surface::{LoadEvent, LoadSender};
use crate::zoom::ZoomController;

use super::builder::ShellBuilder;
use super::registry::TabRegistry;
use super::tab::{Tab, TabInfo};

// ============================================================================
// Types
// ============================================================================

/// Host collaborators handed over by the builder.
pub(crate) struct Collaborators {
    pub viewport: Arc<dyn Viewport>,
    pub assets: Arc<dyn AssetServer>,
    pub engine: Option<Arc<dyn ProxyEngine>>,
    pub transport: Option<Arc<dyn TransportNegotiator>>,
    pub interceptor: Option<Arc<dyn RequestInterceptor>>,
}

/// Internal shared state for a shell.
pub(crate) struct ShellInner {
    /// Unique identifier for this shell.
    pub uuid: Uuid,
    pub config: ShellConfig,
    pub normalizer: Normalizer,
    /// All tabs plus the active selection.
    pub registry: Mutex<TabRegistry>,
    pub zoom: ZoomController,
    pub status: StatusReporter,
    /// Address bar text.
    pub address_bar: watch::Sender<String>,
    pub viewport: Arc<dyn Viewport>,
    pub assets: Arc<dyn AssetServer>,
    pub engine: Option<Arc<dyn ProxyEngine>>,
    /// Set once the engine initialized.
    pub engine_ready: AtomicBool,
    pub transport: Option<Arc<dyn TransportNegotiator>>,
    /// Set once the transport worker is connected.
    pub transport_connected: AtomicBool,
    pub interceptor: Option<Arc<dyn RequestInterceptor>>,
    /// Cloned into every surface's load callback.
    pub events_tx: LoadSender,
    /// Held by whoever is draining load events.
    pub events_rx: AsyncMutex<mpsc::UnboundedReceiver<LoadEvent>>,
    /// Stops [`Shell::run_event_loop`].
    pub shutdown: Notify,
}

// ============================================================================
// Shell
// ============================================================================

/// The tab and navigation state machine of one browser shell.
///
/// `Shell` is a cheap clone handle; every clone drives the same tabs.
///
/// # Example
///
/// ```ignore
/// let shell = Shell::builder()
///     .viewport(viewport)
///     .asset_server(assets)
///     .engine(engine)
///     .launch()
///     .await?;
///
/// shell.submit_address("example.com").await;
/// shell.create_tab(Some("bolt://docs/readme")).await;
/// ```
#[derive(Clone)]
pub struct Shell {
    pub(crate) inner: Arc<ShellInner>,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.lock();
        f.debug_struct("Shell")
            .field("uuid", &self.inner.uuid)
            .field("tabs", &registry.len())
            .field("active", &registry.active_id())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Shell - Constructor
// ============================================================================

impl Shell {
    /// Creates a shell builder.
    #[inline]
    #[must_use]
    pub fn builder() -> ShellBuilder {
        ShellBuilder::new()
    }

    /// Creates a shell with no tabs. Startup has not run yet.
    pub(crate) fn new(config: ShellConfig, collaborators: Collaborators) -> Result<Self> {
        let normalizer = Normalizer::new(&config)?;
        let zoom = ZoomController::new(config.zoom);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (address_bar, _) = watch::channel(String::new());
        let uuid = Uuid::new_v4();

        debug!(
            uuid = %uuid,
            engine = collaborators.engine.is_some(),
            transport = collaborators.transport.is_some(),
            "Shell created"
        );

        Ok(Self {
            inner: Arc::new(ShellInner {
                uuid,
                config,
                normalizer,
                registry: Mutex::new(TabRegistry::new()),
                zoom,
                status: StatusReporter::new(),
                address_bar,
                viewport: collaborators.viewport,
                assets: collaborators.assets,
                engine: collaborators.engine,
                engine_ready: AtomicBool::new(false),
                transport: collaborators.transport,
                transport_connected: AtomicBool::new(false),
                interceptor: collaborators.interceptor,
                events_tx,
                events_rx: AsyncMutex::new(events_rx),
                shutdown: Notify::new(),
            }),
        })
    }
}

// ============================================================================
// Shell - Accessors
// ============================================================================

impl Shell {
    /// Returns the Rust-side unique UUID.
    #[inline]
    #[must_use]
    pub fn uuid(&self) -> &Uuid {
        &self.inner.uuid
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.inner.config
    }

    #[inline]
    #[must_use]
    pub fn normalizer(&self) -> &Normalizer {
        &self.inner.normalizer
    }

    /// Returns `true` once the proxy engine has initialized.
    #[inline]
    #[must_use]
    pub fn is_proxy_ready(&self) -> bool {
        self.inner.engine_ready.load(Ordering::Acquire)
    }

    /// Returns the number of open tabs.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.inner.registry.lock().len()
    }

    /// Returns tab IDs in creation order.
    #[must_use]
    pub fn tab_ids(&self) -> Vec<TabId> {
        self.inner.registry.lock().ids()
    }

    /// Returns the active tab's ID.
    #[must_use]
    pub fn active_tab_id(&self) -> Option<TabId> {
        self.inner.registry.lock().active_id()
    }

    /// Returns a handle to the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<Tab> {
        self.active_tab_id().map(|id| Tab::new(id, self.clone()))
    }

    /// Returns a handle to a tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab is not open.
    pub fn tab(&self, tab_id: TabId) -> Result<Tab> {
        if !self.inner.registry.lock().contains(tab_id) {
            return Err(Error::tab_not_found(tab_id));
        }
        Ok(Tab::new(tab_id, self.clone()))
    }

    /// Returns a snapshot of one tab.
    #[must_use]
    pub fn tab_info(&self, tab_id: TabId) -> Option<TabInfo> {
        let registry = self.inner.registry.lock();
        let active = registry.is_active(tab_id);
        registry.get(tab_id).map(|entry| entry.info(active))
    }

    /// Returns snapshots of all tabs in creation order.
    #[must_use]
    pub fn tabs(&self) -> Vec<TabInfo> {
        let registry = self.inner.registry.lock();
        registry
            .iter()
            .map(|entry| entry.info(registry.is_active(entry.id)))
            .collect()
    }

    /// Returns the node currently mounted for a tab.
    #[must_use]
    pub fn mounted_node(&self, tab_id: TabId) -> Option<NodeId> {
        let registry = self.inner.registry.lock();
        registry.get(tab_id).map(|entry| entry.mounted().frame().node())
    }

    /// Returns the current status line.
    #[must_use]
    pub fn status(&self) -> Status {
        self.inner.status.current()
    }

    /// Subscribes to status line changes.
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<Status> {
        self.inner.status.subscribe()
    }

    /// Returns the address bar text.
    #[must_use]
    pub fn address_bar(&self) -> String {
        self.inner.address_bar.borrow().clone()
    }

    /// Subscribes to address bar changes.
    #[must_use]
    pub fn subscribe_address_bar(&self) -> watch::Receiver<String> {
        self.inner.address_bar.subscribe()
    }

    /// Returns the shared zoom factor.
    #[inline]
    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.inner.zoom.factor()
    }
}

// ============================================================================
// Shell - Internal
// ============================================================================

impl Shell {
    #[inline]
    pub(crate) fn set_status(&self, text: &str, mode: StatusMode) {
        self.inner.status.set(text, mode);
    }

    #[inline]
    pub(crate) fn set_address_bar(&self, text: impl Into<String>) {
        self.inner.address_bar.send_replace(text.into());
    }
}
