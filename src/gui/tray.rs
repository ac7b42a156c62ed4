//! System tray via the tray-icon crate
//!
//! On Linux tray-icon needs a GTK main loop, which egui (winit) does not run,
//! so the icon lives on its own GTK thread and menus are handed over through a
//! channel. Elsewhere the icon is owned directly by the GUI thread.

use anyhow::{Context, Result};
use tracing::{error, info};
use tray_icon::menu::{Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use super::constants::TRAY_ICON_SIZE;
use crate::constants::tray::TOOLTIP;
use crate::tray::{TrayAction, TrayHost, TrayMenu};

pub struct NativeTray {
    #[cfg(target_os = "linux")]
    menus: Option<std::sync::mpsc::Sender<TrayMenu>>,
    #[cfg(not(target_os = "linux"))]
    icon: Option<TrayIcon>,
}

impl NativeTray {
    #[cfg(target_os = "linux")]
    pub fn new() -> Self {
        use std::sync::mpsc;
        use std::time::Duration;

        let (tx, rx) = mpsc::channel::<TrayMenu>();
        let spawned = std::thread::Builder::new()
            .name("tray-gtk".to_string())
            .spawn(move || {
                if let Err(err) = gtk::init() {
                    error!(error = ?err, "Failed to initialize GTK for tray icon");
                    return;
                }

                let tray_icon = match create_tray_icon() {
                    Ok(tray_icon) => tray_icon,
                    Err(err) => {
                        error!(error = ?err, "Failed to create tray icon in GTK thread");
                        return;
                    }
                };
                info!("Tray icon initialized in GTK thread");

                gtk::glib::timeout_add_local(Duration::from_millis(100), move || {
                    while let Ok(menu) = rx.try_recv() {
                        apply_menu(&tray_icon, &menu);
                    }
                    gtk::glib::ControlFlow::Continue
                });
                gtk::main();
            });

        match spawned {
            Ok(_) => Self { menus: Some(tx) },
            Err(err) => {
                error!(error = ?err, "Failed to spawn tray thread");
                Self { menus: None }
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    pub fn new() -> Self {
        match create_tray_icon() {
            Ok(icon) => Self { icon: Some(icon) },
            Err(err) => {
                error!(error = ?err, "Failed to create tray icon");
                Self { icon: None }
            }
        }
    }
}

impl Default for NativeTray {
    fn default() -> Self {
        Self::new()
    }
}

impl TrayHost for NativeTray {
    #[cfg(target_os = "linux")]
    fn set_menu(&mut self, menu: &TrayMenu) {
        let delivered = self.menus.as_ref().map(|tx| tx.send(menu.clone()).is_ok());
        if delivered == Some(false) {
            error!("Tray thread is gone, menu not updated");
            self.menus = None;
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn set_menu(&mut self, menu: &TrayMenu) {
        if let Some(icon) = &self.icon {
            apply_menu(icon, menu);
        }
    }
}

fn apply_menu(tray_icon: &TrayIcon, menu: &TrayMenu) {
    match build_native_menu(menu) {
        Ok(native) => tray_icon.set_menu(Some(Box::new(native))),
        Err(err) => error!(error = ?err, "Failed to build tray menu"),
    }
}

fn build_native_menu(menu: &TrayMenu) -> Result<Menu> {
    let native = Menu::new();
    for item in &menu.items {
        if item.action == TrayAction::Quit {
            native
                .append(&PredefinedMenuItem::separator())
                .context("Failed to append separator")?;
        }
        let entry = MenuItem::with_id(item.action.id(), &item.label, true, None);
        native
            .append(&entry)
            .with_context(|| format!("Failed to append menu item '{}'", item.label))?;
    }
    Ok(native)
}

fn create_tray_icon() -> Result<TrayIcon> {
    let tray_icon = TrayIconBuilder::new()
        .with_tooltip(TOOLTIP)
        .with_icon(crosshair_icon()?)
        .build()
        .context("Failed to build tray icon")?;

    info!("Tray icon created");
    Ok(tray_icon)
}

/// White ring with a center dot on a transparent background
fn crosshair_icon() -> Result<Icon> {
    let size = TRAY_ICON_SIZE;
    let center = (size as f32 - 1.0) / 2.0;
    let ring_outer = size as f32 / 2.0 - 1.0;
    let ring_inner = ring_outer - 3.0;
    let dot = 3.0;

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let distance = (dx * dx + dy * dy).sqrt();
            let lit = distance <= dot || (ring_inner..=ring_outer).contains(&distance);
            if lit {
                rgba.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }

    Icon::from_rgba(rgba, size, size).context("Failed to create icon from RGBA data")
}
