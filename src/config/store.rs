//! Settings store: the single owner of the live crosshair settings

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::settings::{CrosshairSettings, SettingsPayload};
use super::writer::SettingsWriter;
use crate::error::PersistenceError;

/// Holds the live settings and keeps the settings file in sync with it
pub struct SettingsStore {
    path: PathBuf,
    current: CrosshairSettings,
    writer: Option<SettingsWriter>,
}

impl SettingsStore {
    /// `<config dir>/crosshair-overlay/settings.json`, or the working directory
    /// when the platform has no config dir
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Open the store at `path`, loading whatever is there
    /// Writes happen inline until `with_background_writer` is called
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = load_or_default(&path);
        Self {
            path,
            current,
            writer: None,
        }
    }

    /// Move file writes off the calling thread
    ///
    /// If the writer thread cannot be started the store keeps writing inline.
    pub fn with_background_writer(mut self) -> Self {
        match SettingsWriter::spawn(self.path.clone()) {
            Ok(writer) => self.writer = Some(writer),
            Err(e) => warn!(error = %e, "Failed to start settings writer thread, writing inline"),
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the settings file, falling back to defaults
    pub fn load(&self) -> CrosshairSettings {
        load_or_default(&self.path)
    }

    /// Persist `settings`; failures are logged and otherwise ignored
    pub fn save(&self, settings: &CrosshairSettings) {
        match &self.writer {
            Some(writer) => writer.submit(settings.clone()),
            None => {
                if let Err(e) = write_settings(&self.path, settings) {
                    error!(error = %e, "Failed to save settings, keeping in-memory state");
                }
            }
        }
    }

    pub fn current(&self) -> &CrosshairSettings {
        &self.current
    }

    /// Swap in a new live value, persist it, and hand back the old one
    pub fn replace(&mut self, settings: CrosshairSettings) -> CrosshairSettings {
        let previous = std::mem::replace(&mut self.current, settings);
        self.save(&self.current);
        previous
    }

    /// Drain the background writer and write the live value one last time
    ///
    /// Runs synchronously; safe to call more than once.
    pub fn flush(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            writer.shutdown();
        }
        match write_settings(&self.path, &self.current) {
            Ok(()) => info!(path = %self.path.display(), "Settings persisted"),
            Err(e) => error!(error = %e, "Failed to persist settings at shutdown"),
        }
    }
}

fn load_or_default(path: &Path) -> CrosshairSettings {
    match read_settings(path) {
        Ok(Some(settings)) => {
            info!(path = %path.display(), "Loaded settings");
            settings
        }
        Ok(None) => {
            info!(path = %path.display(), "No settings file found, using defaults");
            CrosshairSettings::default()
        }
        Err(e) => {
            error!(error = %e, "Failed to load settings, using defaults");
            CrosshairSettings::default()
        }
    }
}

/// Read and migrate the settings file
/// Returns `Ok(None)` when there is no file yet
pub(crate) fn read_settings(path: &Path) -> Result<Option<CrosshairSettings>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        warn!(path = %path.display(), "Settings file is empty");
        return Ok(None);
    }

    let payload: SettingsPayload =
        serde_json::from_str(&contents).map_err(|source| PersistenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(payload.into_loaded()))
}

/// Write the settings file through a temp file so a crash never leaves it half-written
pub(crate) fn write_settings(path: &Path, settings: &CrosshairSettings) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(settings).map_err(PersistenceError::Serialize)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| PersistenceError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
