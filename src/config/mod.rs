//! Crosshair settings: model, persistence and the live store
//!
//! - **settings**: `CrosshairSettings` and the payload it is parsed from
//! - **store**: `SettingsStore`, the single owner of the live value (JSON on disk)
//! - **writer**: background thread that performs store writes

pub mod settings;
pub mod store;
mod writer;

pub use settings::{CrosshairSettings, CrosshairStyle, SettingsPayload};
pub use store::SettingsStore;
