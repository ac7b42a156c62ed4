//! Background settings writer
//!
//! Keeps file I/O off the control thread. Writes are fire-and-forget: failures
//! are logged and the in-memory value stays authoritative.

use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

use super::settings::CrosshairSettings;
use super::store::write_settings;

pub struct SettingsWriter {
    tx: Option<Sender<CrosshairSettings>>,
    handle: Option<JoinHandle<()>>,
}

impl SettingsWriter {
    pub fn spawn(path: PathBuf) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<CrosshairSettings>();

        let handle = thread::Builder::new()
            .name("settings-writer".to_string())
            .spawn(move || {
                info!(path = %path.display(), "Settings writer started");
                while let Ok(mut settings) = rx.recv() {
                    // Only the newest queued value matters
                    while let Ok(newer) = rx.try_recv() {
                        settings = newer;
                    }
                    match write_settings(&path, &settings) {
                        Ok(()) => debug!(path = %path.display(), "Settings written"),
                        Err(e) => error!(error = %e, "Failed to write settings"),
                    }
                }
                debug!("Settings writer stopped");
            })?;

        Ok(Self {
            tx: Some(tx),
            handle: Some(handle),
        })
    }

    /// Queue `settings` for writing
    pub fn submit(&self, settings: CrosshairSettings) {
        let sent = self.tx.as_ref().map(|tx| tx.send(settings).is_ok());
        if sent != Some(true) {
            warn!("Settings writer is not running, dropping write");
        }
    }

    /// Close the queue and wait for pending writes to finish
    pub fn shutdown(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            error!("Settings writer thread panicked");
        }
    }
}

impl Drop for SettingsWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
