//! Window coordinator
//!
//! Owns the overlay and the settings panel as opaque surfaces. Neither surface
//! keeps its own copy of the truth: the overlay is told what to draw, the
//! panel is told what to show, and both are told again on every accepted update.

use tracing::{debug, info};

use crate::config::CrosshairSettings;
use crate::error::{HotkeyError, SubmissionError};

/// The click-through layer that draws the crosshair
pub trait OverlaySurface {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// "settings changed": redraw with the full new value
    fn apply_settings(&mut self, settings: &CrosshairSettings);
}

/// The form window used to edit settings
pub trait SettingsPanel {
    fn is_open(&self) -> bool;
    fn show(&mut self);
    /// Soft dismiss: the panel keeps its form state
    fn hide(&mut self);
    fn load_settings(&mut self, settings: &CrosshairSettings);
    fn report(&mut self, outcome: SubmissionOutcome);
    /// The stored toggle key could not be bound outside of a submission
    fn report_hotkey_error(&mut self, error: HotkeyError);
}

/// Result of a panel submission, sent back to the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Settings were accepted; the toggle key may still have failed to bind
    Applied { hotkey_error: Option<HotkeyError> },
    /// Nothing changed
    Rejected(SubmissionError),
}

pub struct WindowCoordinator<O: OverlaySurface, P: SettingsPanel> {
    overlay: O,
    panel: P,
}

impl<O: OverlaySurface, P: SettingsPanel> WindowCoordinator<O, P> {
    pub fn new(overlay: O, panel: P) -> Self {
        Self { overlay, panel }
    }

    pub fn show_overlay(&mut self) {
        self.overlay.set_visible(true);
    }

    pub fn hide_overlay(&mut self) {
        self.overlay.set_visible(false);
    }

    /// Flip overlay visibility and return the new state
    pub fn toggle_overlay(&mut self) -> bool {
        let visible = !self.overlay.is_visible();
        self.overlay.set_visible(visible);
        visible
    }

    pub fn push_settings_to_overlay(&mut self, settings: &CrosshairSettings) {
        debug!(color = %settings.color, size = settings.size, thickness = settings.thickness, style = %settings.style, "Pushing settings to overlay");
        self.overlay.apply_settings(settings);
    }

    pub fn push_settings_to_panel(&mut self, settings: &CrosshairSettings) {
        self.panel.load_settings(settings);
    }

    pub fn open_settings_panel(&mut self) {
        info!("Opening settings panel");
        self.panel.show();
    }

    pub fn close_settings_panel(&mut self) {
        self.panel.hide();
    }

    pub fn report_submission(&mut self, outcome: SubmissionOutcome) {
        self.panel.report(outcome);
    }

    pub fn report_hotkey_error(&mut self, error: HotkeyError) {
        self.panel.report_hotkey_error(error);
    }

    /// Hide both surfaces ahead of exit
    pub fn release(&mut self) {
        self.panel.hide();
        self.overlay.set_visible(false);
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
