//! In-memory host for integration tests.
//!
//! Every collaborator records what the shell asked of it. Frames never load
//! on their own; tests call [`MockFrame::finish_load`] to simulate the
//! host's load event, then [`Shell::process_pending_events`] to apply it.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use bolt_tabs::{
    AssetServer, EngineFiles, Error, Frame, FrameDefaults, LoadHandler, NodeId, ProxyEngine,
    ProxyFrame, RequestInterceptor, Result, Shell, ShellBuilder, ShellConfig, SurfaceTransform,
    TransportEndpoint, TransportNegotiator, Viewport,
};

// ============================================================================
// Tracing
// ============================================================================

/// Installs a test subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// MockFrame
// ============================================================================

#[derive(Default)]
struct FrameState {
    sources: Vec<String>,
    srcdoc: Option<String>,
    location: Option<String>,
    transform: Option<SurfaceTransform>,
    active: bool,
    defaults: Option<FrameDefaults>,
    back: usize,
    forward: usize,
    reloads: usize,
}

pub struct MockFrame {
    node: NodeId,
    state: Mutex<FrameState>,
    handler: Mutex<Option<LoadHandler>>,
    fail_src: AtomicBool,
}

impl MockFrame {
    fn new() -> Self {
        Self {
            node: NodeId::next(),
            state: Mutex::new(FrameState::default()),
            handler: Mutex::new(None),
            fail_src: AtomicBool::new(false),
        }
    }

    /// Makes the next `set_src` calls fail.
    pub fn fail_navigation(&self, fail: bool) {
        self.fail_src.store(fail, Ordering::SeqCst);
    }

    /// Simulates the host's load event, optionally moving the location.
    pub fn finish_load(&self, location: Option<&str>) {
        if let Some(location) = location {
            self.state.lock().location = Some(location.to_string());
        }
        let handler = self.handler.lock();
        if let Some(handler) = handler.as_ref() {
            handler();
        }
    }

    pub fn sources(&self) -> Vec<String> {
        self.state.lock().sources.clone()
    }

    pub fn last_source(&self) -> Option<String> {
        self.state.lock().sources.last().cloned()
    }

    pub fn srcdoc(&self) -> Option<String> {
        self.state.lock().srcdoc.clone()
    }

    pub fn transform(&self) -> Option<SurfaceTransform> {
        self.state.lock().transform
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    pub fn defaults(&self) -> Option<FrameDefaults> {
        self.state.lock().defaults.clone()
    }

    pub fn history_counts(&self) -> (usize, usize, usize) {
        let state = self.state.lock();
        (state.back, state.forward, state.reloads)
    }

    pub fn has_load_handler(&self) -> bool {
        self.handler.lock().is_some()
    }
}

impl Frame for MockFrame {
    fn node(&self) -> NodeId {
        self.node
    }

    fn apply_defaults(&self, defaults: &FrameDefaults) {
        self.state.lock().defaults = Some(defaults.clone());
    }

    fn set_src(&self, url: &str) -> Result<()> {
        if self.fail_src.load(Ordering::SeqCst) {
            return Err(Error::frame(format!("refused {url}")));
        }
        let mut state = self.state.lock();
        state.sources.push(url.to_string());
        state.location = Some(url.to_string());
        Ok(())
    }

    fn set_srcdoc(&self, html: &str) {
        self.state.lock().srcdoc = Some(html.to_string());
    }

    fn clear_srcdoc(&self) {
        self.state.lock().srcdoc = None;
    }

    fn location(&self) -> Option<String> {
        self.state.lock().location.clone()
    }

    fn set_transform(&self, transform: &SurfaceTransform) {
        self.state.lock().transform = Some(*transform);
    }

    fn set_active(&self, active: bool) {
        self.state.lock().active = active;
    }

    fn history_back(&self) -> Result<()> {
        self.state.lock().back += 1;
        Ok(())
    }

    fn history_forward(&self) -> Result<()> {
        self.state.lock().forward += 1;
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        self.state.lock().reloads += 1;
        Ok(())
    }

    fn on_load(&self, handler: LoadHandler) {
        *self.handler.lock() = Some(handler);
    }
}

// ============================================================================
// MockViewport
// ============================================================================

#[derive(Default)]
pub struct MockViewport {
    frames: Mutex<Vec<Arc<MockFrame>>>,
    mounted: Mutex<Vec<NodeId>>,
    detached: Mutex<Vec<NodeId>>,
}

impl MockViewport {
    /// Registers a frame so tests can look it up by node.
    pub fn new_frame(&self) -> Arc<MockFrame> {
        let frame = Arc::new(MockFrame::new());
        self.frames.lock().push(Arc::clone(&frame));
        frame
    }

    pub fn frame(&self, node: NodeId) -> Arc<MockFrame> {
        self.frames
            .lock()
            .iter()
            .find(|frame| frame.node == node)
            .cloned()
            .expect("frame created through this viewport")
    }

    pub fn mounted(&self) -> Vec<NodeId> {
        self.mounted.lock().clone()
    }

    pub fn is_mounted(&self, node: NodeId) -> bool {
        self.mounted.lock().contains(&node)
    }

    pub fn detached(&self) -> Vec<NodeId> {
        self.detached.lock().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }
}

impl Viewport for MockViewport {
    fn create_frame(&self) -> Arc<dyn Frame> {
        self.new_frame()
    }

    fn attach(&self, frame: &dyn Frame) {
        let mut mounted = self.mounted.lock();
        assert!(
            !mounted.contains(&frame.node()),
            "{} attached twice",
            frame.node()
        );
        mounted.push(frame.node());
    }

    fn detach(&self, frame: &dyn Frame) {
        self.mounted.lock().retain(|node| *node != frame.node());
        self.detached.lock().push(frame.node());
    }
}

// ============================================================================
// MockEngine
// ============================================================================

/// Holds an engine dispatch for one URL until released, then fails it.
pub struct DispatchGate {
    pub url: String,
    pub entered: Notify,
    pub release: Notify,
}

pub struct MockEngine {
    viewport: Arc<MockViewport>,
    fail_init: AtomicBool,
    initialized: Mutex<Option<EngineFiles>>,
    dispatched: Arc<Mutex<Vec<String>>>,
    gate: Arc<Mutex<Option<Arc<DispatchGate>>>>,
}

impl MockEngine {
    pub fn new(viewport: Arc<MockViewport>) -> Self {
        Self {
            viewport,
            fail_init: AtomicBool::new(false),
            initialized: Mutex::new(None),
            dispatched: Arc::new(Mutex::new(Vec::new())),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Gates engine dispatches of `url` on frames created afterwards too.
    pub fn gate_dispatch(&self, url: &str) -> Arc<DispatchGate> {
        let gate = Arc::new(DispatchGate {
            url: url.to_string(),
            entered: Notify::new(),
            release: Notify::new(),
        });
        *self.gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn fail_init(&self) {
        self.fail_init.store(true, Ordering::SeqCst);
    }

    pub fn initialized_with(&self) -> Option<EngineFiles> {
        self.initialized.lock().clone()
    }

    /// Targets handed to engine frames, in order.
    pub fn dispatched(&self) -> Vec<String> {
        self.dispatched.lock().clone()
    }
}

#[async_trait]
impl ProxyEngine for MockEngine {
    async fn initialize(&self, files: &EngineFiles) -> Result<()> {
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(Error::proxy_init("wasm failed to load"));
        }
        *self.initialized.lock() = Some(files.clone());
        Ok(())
    }

    fn create_frame(&self) -> Result<Box<dyn ProxyFrame>> {
        Ok(Box::new(MockProxyFrame {
            frame: self.viewport.new_frame(),
            dispatched: Arc::clone(&self.dispatched),
            gate: Arc::clone(&self.gate),
        }))
    }
}

struct MockProxyFrame {
    frame: Arc<MockFrame>,
    dispatched: Arc<Mutex<Vec<String>>>,
    gate: Arc<Mutex<Option<Arc<DispatchGate>>>>,
}

#[async_trait]
impl ProxyFrame for MockProxyFrame {
    fn frame(&self) -> Arc<dyn Frame> {
        Arc::clone(&self.frame) as Arc<dyn Frame>
    }

    async fn go(&self, url: &str) -> Result<()> {
        self.dispatched.lock().push(url.to_string());
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate.filter(|gate| gate.url == url) {
            gate.entered.notify_one();
            gate.release.notified().await;
            return Err(Error::dispatch(url, "connection reset"));
        }
        let rewritten = format!(
            "http://localhost:8080/scramjet/{}",
            urlencoding::encode(url)
        );
        self.frame.set_src(&rewritten)
    }
}

// ============================================================================
// MockTransport
// ============================================================================

#[derive(Default)]
pub struct MockTransport {
    worker: Mutex<Option<String>>,
    current: Mutex<Option<String>>,
    changes: Mutex<Vec<(String, Vec<TransportEndpoint>)>>,
    fail_set: AtomicBool,
}

impl MockTransport {
    pub fn worker(&self) -> Option<String> {
        self.worker.lock().clone()
    }

    pub fn changes(&self) -> Vec<(String, Vec<TransportEndpoint>)> {
        self.changes.lock().clone()
    }

    /// Simulates another page switching the shared transport.
    pub fn set_current(&self, transport: Option<&str>) {
        *self.current.lock() = transport.map(str::to_string);
    }

    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TransportNegotiator for MockTransport {
    async fn connect(&self, worker: &str) -> Result<()> {
        *self.worker.lock() = Some(worker.to_string());
        Ok(())
    }

    async fn current_transport(&self) -> Result<Option<String>> {
        Ok(self.current.lock().clone())
    }

    async fn set_transport(&self, transport: &str, endpoints: &[TransportEndpoint]) -> Result<()> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(Error::transport("tunnel refused"));
        }
        self.changes
            .lock()
            .push((transport.to_string(), endpoints.to_vec()));
        *self.current.lock() = Some(transport.to_string());
        Ok(())
    }
}

// ============================================================================
// MockAssets
// ============================================================================

#[derive(Default)]
pub struct MockAssets {
    files: Mutex<HashSet<String>>,
    probes: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockAssets {
    pub fn with_files(files: &[&str]) -> Self {
        let assets = Self::default();
        assets
            .files
            .lock()
            .extend(files.iter().map(|f| f.to_string()));
        assets
    }

    pub fn add(&self, path: &str) {
        self.files.lock().insert(path.to_string());
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.lock().clone()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AssetServer for MockAssets {
    async fn exists(&self, path: &str) -> Result<bool> {
        self.probes.lock().push(path.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::probe(path, "connection reset"));
        }
        Ok(self.files.lock().contains(path))
    }
}

// ============================================================================
// MockInterceptor
// ============================================================================

#[derive(Default)]
pub struct MockInterceptor {
    registered: Mutex<Vec<String>>,
}

impl MockInterceptor {
    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().clone()
    }
}

#[async_trait]
impl RequestInterceptor for MockInterceptor {
    async fn register(&self, script: &str) -> Result<()> {
        self.registered.lock().push(script.to_string());
        Ok(())
    }
}

// ============================================================================
// TestHost
// ============================================================================

/// All collaborators of one shell.
pub struct TestHost {
    pub viewport: Arc<MockViewport>,
    pub engine: Arc<MockEngine>,
    pub transport: Arc<MockTransport>,
    pub assets: Arc<MockAssets>,
    pub interceptor: Arc<MockInterceptor>,
}

/// Assets present by default: the start page and one document.
pub const DEFAULT_FILES: &[&str] = &["/bolt/about.html", "/bolt/docs/readme.html"];

impl TestHost {
    pub fn new() -> Self {
        init_tracing();
        let viewport = Arc::new(MockViewport::default());
        Self {
            engine: Arc::new(MockEngine::new(Arc::clone(&viewport))),
            viewport,
            transport: Arc::new(MockTransport::default()),
            assets: Arc::new(MockAssets::with_files(DEFAULT_FILES)),
            interceptor: Arc::new(MockInterceptor::default()),
        }
    }

    /// A builder wired to every collaborator.
    pub fn builder(&self) -> ShellBuilder {
        Shell::builder()
            .config(ShellConfig::default())
            .viewport(Arc::clone(&self.viewport) as Arc<dyn Viewport>)
            .asset_server(Arc::clone(&self.assets) as Arc<dyn AssetServer>)
            .engine(Arc::clone(&self.engine) as Arc<dyn ProxyEngine>)
            .transport(Arc::clone(&self.transport) as Arc<dyn TransportNegotiator>)
            .interceptor(Arc::clone(&self.interceptor) as Arc<dyn RequestInterceptor>)
    }

    /// Launches a shell and applies the first tab's load.
    pub async fn launch(&self) -> Shell {
        let shell = self.builder().launch().await.expect("launch");
        self.finish_active_load(&shell);
        shell
    }

    /// Frame currently mounted for a tab.
    pub fn mounted_frame(&self, shell: &Shell, tab_id: bolt_tabs::TabId) -> Arc<MockFrame> {
        let node = shell.mounted_node(tab_id).expect("tab is open");
        self.viewport.frame(node)
    }

    /// Fires the active tab's load event and applies it.
    pub fn finish_active_load(&self, shell: &Shell) {
        let tab_id = shell.active_tab_id().expect("active tab");
        self.finish_load(shell, tab_id, None);
    }

    /// Fires a tab's load event at an optional new location and applies it.
    pub fn finish_load(&self, shell: &Shell, tab_id: bolt_tabs::TabId, location: Option<&str>) {
        self.mounted_frame(shell, tab_id).finish_load(location);
        shell.process_pending_events();
    }
}
