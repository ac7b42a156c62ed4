//! Reusable GUI components for the settings panel

pub mod settings_editor;
