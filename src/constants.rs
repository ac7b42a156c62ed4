//! Application-wide constants: file locations, defaults, ranges, tray labels

/// Settings file location
pub mod config {
    /// Directory created under the OS config dir
    pub const APP_DIR: &str = "crosshair-overlay";

    /// Settings file name inside `APP_DIR`
    pub const FILENAME: &str = "settings.json";
}

/// Hard-coded crosshair used when nothing usable is on disk
pub mod defaults {
    pub const COLOR: &str = "#FFFFFF";
    pub const SIZE: u32 = 4;
    pub const THICKNESS: u32 = 2;
    pub const TOGGLE_KEY: &str = "F8";
}

/// Ranges enforced when loading settings from disk
pub mod validation {
    pub const MIN_SIZE: u32 = 1;
    pub const MAX_SIZE: u32 = 64;
    pub const MIN_THICKNESS: u32 = 1;
    pub const MAX_THICKNESS: u32 = 16;
}

/// Accepted key combinations
pub mod hotkeys {
    /// Highest function key offered on its own (F1..=F12)
    pub const MAX_PLAIN_FUNCTION_KEY: u8 = 12;

    /// Highest function key offered with a modifier (Ctrl/Alt/Shift + F1..=F6)
    pub const MAX_MODIFIED_FUNCTION_KEY: u8 = 6;

    /// Separator between modifier and key in the string form
    pub const SEPARATOR: char = '+';
}

/// Tray menu identifiers and labels
pub mod tray {
    pub const TOOLTIP: &str = "Crosshair Overlay";

    pub const OPEN_SETTINGS_ID: &str = "open-settings";
    pub const TOGGLE_OVERLAY_ID: &str = "toggle-overlay";
    pub const QUIT_ID: &str = "quit";

    pub const OPEN_SETTINGS_LABEL: &str = "Settings...";
    pub const QUIT_LABEL: &str = "Quit";

    /// Shown in place of the key when nothing is bound
    pub const NO_KEY_LABEL: &str = "no key set";
}
