//! Load event handling.
//!
//! Surfaces report load completion on an unbounded channel owned by the
//! shell. Hosts either spawn [`Shell::run_event_loop`] or call
//! [`Shell::process_pending_events`] from their own loop.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace};

use crate::address::tab_label;
use crate::status::{StatusMode, messages};
use crate::surface::LoadEvent;

use super::Shell;
use super::tab::LoadState;

// ============================================================================
// Shell - Events
// ============================================================================

impl Shell {
    /// Drains load events until [`shutdown`](Self::shutdown) is called.
    ///
    /// The shell keeps a sender alive, so the channel never closes on its
    /// own. Only one drain runs at a time; a second caller waits.
    pub async fn run_event_loop(&self) {
        let mut rx = self.inner.events_rx.lock().await;
        debug!(uuid = %self.inner.uuid, "Event loop started");

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some(event) => self.handle_load_event(event),
                    None => break,
                },
                () = self.inner.shutdown.notified() => break,
            }
        }

        debug!(uuid = %self.inner.uuid, "Event loop stopped");
    }

    /// Stops a running [`run_event_loop`](Self::run_event_loop).
    pub fn shutdown(&self) {
        self.inner.shutdown.notify_one();
    }

    /// Handles every queued load event without waiting.
    ///
    /// Returns the number handled; `0` while the event loop owns the
    /// channel.
    pub fn process_pending_events(&self) -> usize {
        let Ok(mut rx) = self.inner.events_rx.try_lock() else {
            return 0;
        };

        let mut handled = 0;
        while let Ok(event) = rx.try_recv() {
            self.handle_load_event(event);
            handled += 1;
        }
        handled
    }

    /// Applies a surface load completion to its tab.
    ///
    /// Ignored for closed tabs, for unmounted surfaces and while the tab
    /// shows the missing-file document.
    pub(crate) fn handle_load_event(&self, event: LoadEvent) {
        let mut registry = self.inner.registry.lock();
        let active = registry.is_active(event.tab_id);
        let Some(entry) = registry.get_mut(event.tab_id) else {
            trace!(tab_id = %event.tab_id, "Load event for closed tab");
            return;
        };

        if entry.state.surface_kind != event.kind {
            trace!(tab_id = %event.tab_id, kind = %event.kind, "Load event from unmounted surface");
            return;
        }
        if entry.state.load_state == LoadState::Missing {
            trace!(tab_id = %event.tab_id, "Load event for missing-file document");
            return;
        }

        let frame = entry.mounted().frame();
        let shown = match entry.state.display_url.as_deref() {
            Some(known) if !known.is_empty() => known.to_string(),
            _ => frame
                .location()
                .or_else(|| entry.state.navigate_target.clone())
                .map(|location| self.inner.normalizer.display_from_location(&location))
                .unwrap_or_default(),
        };
        frame.set_transform(&self.inner.zoom.transform());

        entry.state.label = tab_label(Some(&shown));
        entry.state.load_state = LoadState::Loaded;
        if !shown.is_empty() {
            entry.state.display_url = Some(shown.clone());
        }

        debug!(tab_id = %event.tab_id, display = %shown, "Tab loaded");
        if active && !shown.is_empty() {
            self.set_address_bar(shown);
        }
        self.set_status(messages::LOADED, StatusMode::Live);
    }
}
