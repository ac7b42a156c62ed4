//! GUI-specific constants for layout, status colors and intervals

/// Settings panel dimensions
pub const PANEL_WIDTH: f32 = 360.0;
pub const PANEL_HEIGHT: f32 = 420.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_WARNING: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// How often tray and hotkey queues are polled
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Tray icon edge length in pixels
pub const TRAY_ICON_SIZE: u32 = 32;

pub const APP_TITLE: &str = "Crosshair Overlay";
pub const PANEL_TITLE: &str = "Crosshair Settings";
