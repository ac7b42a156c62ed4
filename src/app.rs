//! Top-level orchestration
//!
//! `App` wires the settings store, the hotkey manager, the window coordinator
//! and the tray together. Every input (tray click, hotkey press, panel
//! submission, quit) arrives as an `AppEvent` on the control thread and is
//! handled here, so visibility toggles from any source go through one path.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::{CrosshairSettings, SettingsPayload, SettingsStore};
use crate::coordinator::{OverlaySurface, SettingsPanel, SubmissionOutcome, WindowCoordinator};
use crate::error::SubmissionError;
use crate::hotkeys::{HotkeyBackend, HotkeyManager};
use crate::tray::{TrayAction, TrayController, TrayHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Uninitialized,
    Loading,
    Running,
    ShutDown,
}

/// Where a visibility toggle came from (logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleSource {
    Tray,
    Hotkey,
    Direct,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    ToggleOverlay(ToggleSource),
    OpenSettings,
    CloseSettings,
    SettingsSubmitted(SettingsPayload),
    Quit,
}

impl From<TrayAction> for AppEvent {
    fn from(action: TrayAction) -> Self {
        match action {
            TrayAction::OpenSettings => AppEvent::OpenSettings,
            TrayAction::ToggleOverlay => AppEvent::ToggleOverlay(ToggleSource::Tray),
            TrayAction::Quit => AppEvent::Quit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub settings_path: PathBuf,
    /// Perform store writes on a background thread
    pub background_writes: bool,
    pub start_hidden: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            settings_path: SettingsStore::default_path(),
            background_writes: true,
            start_hidden: false,
        }
    }
}

pub struct App<H, O, P, T>
where
    H: HotkeyBackend,
    O: OverlaySurface,
    P: SettingsPanel,
    T: TrayHost,
{
    state: RunState,
    options: StartupOptions,
    store: Option<SettingsStore>,
    hotkeys: HotkeyManager<H>,
    coordinator: WindowCoordinator<O, P>,
    tray: TrayController<T>,
}

impl<H, O, P, T> App<H, O, P, T>
where
    H: HotkeyBackend,
    O: OverlaySurface,
    P: SettingsPanel,
    T: TrayHost,
{
    pub fn new(options: StartupOptions, hotkeys: H, overlay: O, panel: P, tray: T) -> Self {
        Self {
            state: RunState::Uninitialized,
            options,
            store: None,
            hotkeys: HotkeyManager::new(hotkeys),
            coordinator: WindowCoordinator::new(overlay, panel),
            tray: TrayController::new(tray),
        }
    }

    /// Load settings, feed both surfaces, bind the toggle key, build the tray
    pub fn start(&mut self) {
        if self.state != RunState::Uninitialized {
            warn!(state = ?self.state, "start called twice, ignoring");
            return;
        }
        self.state = RunState::Loading;

        let mut store = SettingsStore::open(&self.options.settings_path);
        if self.options.background_writes {
            store = store.with_background_writer();
        }
        let settings = store.current().clone();
        info!(path = %store.path().display(), settings = ?settings, "Settings loaded");
        self.store = Some(store);

        self.coordinator.push_settings_to_overlay(&settings);
        self.coordinator.push_settings_to_panel(&settings);
        if self.options.start_hidden {
            self.coordinator.hide_overlay();
        } else {
            self.coordinator.show_overlay();
        }

        // Failure leaves nothing bound; the tray reads "no key set"
        if self.hotkeys.rebind(settings.toggle_key.as_deref()).is_err()
            && let Some(e) = self.hotkeys.last_error()
        {
            self.coordinator.report_hotkey_error(e.clone());
        }
        self.refresh_tray();

        self.state = RunState::Running;
        info!("Crosshair overlay running");
    }

    pub fn handle(&mut self, event: AppEvent) -> Flow {
        if self.state != RunState::Running {
            debug!(state = ?self.state, event = ?event, "Ignoring event outside Running");
            return match self.state {
                RunState::ShutDown => Flow::Exit,
                _ => Flow::Continue,
            };
        }

        match event {
            AppEvent::ToggleOverlay(source) => {
                self.toggle_overlay(source);
            }
            AppEvent::OpenSettings => self.coordinator.open_settings_panel(),
            AppEvent::CloseSettings => self.coordinator.close_settings_panel(),
            AppEvent::SettingsSubmitted(payload) => {
                let _ = self.on_settings_submitted(payload);
            }
            AppEvent::Quit => {
                info!("Quit requested");
                self.shutdown();
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    /// The one toggle path shared by tray, hotkey and direct calls
    pub fn toggle_overlay(&mut self, source: ToggleSource) -> bool {
        let visible = self.coordinator.toggle_overlay();
        info!(source = ?source, visible, "Overlay toggled");
        visible
    }

    /// Accept a full replacement from the settings panel
    ///
    /// Rejected submissions leave the live settings untouched. Accepted ones are
    /// stored, the toggle key is rebound only if it changed, and the overlay and
    /// tray are refreshed.
    pub fn on_settings_submitted(&mut self, payload: SettingsPayload) -> Result<(), SubmissionError> {
        let Some(store) = self.store.as_mut() else {
            warn!("Settings submitted before the store was loaded");
            return Ok(());
        };

        let settings = match payload.validate() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Rejected settings submission");
                self.coordinator
                    .report_submission(SubmissionOutcome::Rejected(e.clone()));
                return Err(e);
            }
        };

        let previous = store.replace(settings.clone());
        info!(settings = ?settings, "Settings updated");

        let hotkey_error = if previous.toggle_key != settings.toggle_key {
            self.hotkeys.rebind(settings.toggle_key.as_deref()).err()
        } else {
            debug!(key = settings.toggle_key_str(), "Toggle key unchanged, not rebinding");
            None
        };

        self.coordinator.push_settings_to_overlay(&settings);
        self.coordinator.push_settings_to_panel(&settings);
        self.refresh_tray();
        self.coordinator
            .report_submission(SubmissionOutcome::Applied { hotkey_error });
        Ok(())
    }

    /// Release hotkeys, hide windows, then persist. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.state == RunState::ShutDown {
            return;
        }
        info!("Shutting down");
        self.hotkeys.release();
        self.coordinator.release();
        if let Some(store) = self.store.as_mut() {
            store.flush();
        }
        self.state = RunState::ShutDown;
    }

    fn refresh_tray(&mut self) {
        let bound = self.hotkeys.bound().map(|hotkey| hotkey.to_string());
        self.tray.refresh(bound.as_deref());
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Live settings, `None` before `start`
    pub fn settings(&self) -> Option<&CrosshairSettings> {
        self.store.as_ref().map(SettingsStore::current)
    }

    pub fn hotkeys(&self) -> &HotkeyManager<H> {
        &self.hotkeys
    }

    pub fn coordinator(&self) -> &WindowCoordinator<O, P> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut WindowCoordinator<O, P> {
        &mut self.coordinator
    }

    pub fn tray(&self) -> &TrayController<T> {
        &self.tray
    }
}
