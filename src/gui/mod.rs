//! Native host: egui overlay and settings panel, tray icon

pub mod color;
pub mod components;
pub mod constants;
pub mod manager;
pub mod overlay;
pub mod tray;

pub use manager::run_gui;
