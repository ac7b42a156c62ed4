//! eframe host: wires the native overlay, settings panel, tray and hotkeys into `App`

use std::time::Duration;

use anyhow::{anyhow, Result};
use eframe::{egui, CreationContext, NativeOptions};
use tracing::{debug, info};
use tray_icon::menu::MenuEvent;

use super::components::settings_editor::{self, EguiSettingsPanel};
use super::constants::*;
use super::overlay::EguiOverlay;
use super::tray::NativeTray;
use crate::app::{App, AppEvent, Flow, StartupOptions, ToggleSource};
use crate::coordinator::SettingsPanel;
use crate::hotkeys::{self, NativeHotkeys};
use crate::tray::TrayAction;

type NativeApp = App<NativeHotkeys, EguiOverlay, EguiSettingsPanel, NativeTray>;

struct CrosshairApp {
    app: NativeApp,
    exiting: bool,
}

impl CrosshairApp {
    fn new(_cc: &CreationContext<'_>, options: StartupOptions) -> Self {
        info!("Initializing egui host");

        // Hotkey manager and tray must be created on the GUI thread
        let mut app = App::new(
            options,
            NativeHotkeys::new(),
            EguiOverlay::new(),
            EguiSettingsPanel::new(),
            NativeTray::new(),
        );
        app.start();

        Self { app, exiting: false }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: AppEvent) {
        if self.exiting {
            return;
        }
        if self.app.handle(event) == Flow::Exit {
            self.exiting = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn process_tray_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            match TrayAction::from_id(event.id.0.as_str()) {
                Some(action) => {
                    info!(action = ?action, "Tray menu clicked");
                    self.dispatch(ctx, action.into());
                }
                None => debug!(id = ?event.id, "Ignoring unknown tray menu id"),
            }
        }
    }

    fn process_hotkeys(&mut self, ctx: &egui::Context) {
        let presses = hotkeys::drain_presses(self.app.hotkeys().bound());
        for _ in 0..presses {
            self.dispatch(ctx, AppEvent::ToggleOverlay(ToggleSource::Hotkey));
        }
    }

    fn show_settings_panel(&mut self, ctx: &egui::Context) {
        let panel = self.app.coordinator_mut().panel_mut();
        if !panel.is_created() {
            return;
        }

        let open = panel.is_open();
        let mut submitted = None;
        let mut close_requested = false;

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("settings_panel"),
            egui::ViewportBuilder::default()
                .with_title(PANEL_TITLE)
                .with_inner_size([PANEL_WIDTH, PANEL_HEIGHT])
                .with_visible(open),
            |ctx, _class| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    submitted = settings_editor::ui(ui, panel);
                });

                // Closing only hides the panel so the form survives
                if ctx.input(|i| i.viewport().close_requested()) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                    close_requested = true;
                }
            },
        );

        if let Some(payload) = submitted {
            self.dispatch(ctx, AppEvent::SettingsSubmitted(payload));
        }
        if close_requested {
            self.dispatch(ctx, AppEvent::CloseSettings);
        }
    }
}

impl eframe::App for CrosshairApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_tray_events(ctx);
        self.process_hotkeys(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let center = ui.max_rect().center();
                self.app.coordinator().overlay().paint(ui.painter(), center);
            });

        self.show_settings_panel(ctx);

        // The overlay is click-through, so this only comes from the OS (logout, kill)
        if ctx.input(|i| i.viewport().close_requested()) && !self.exiting {
            info!("Overlay window closed, shutting down");
            self.dispatch(ctx, AppEvent::Quit);
        }

        ctx.request_repaint_after(Duration::from_millis(EVENT_POLL_INTERVAL_MS));
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.app.shutdown();
        info!("Crosshair overlay exiting");
    }
}

pub fn run_gui(options: StartupOptions) -> Result<()> {
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_transparent(true)
            .with_decorations(false)
            .with_fullscreen(true)
            .with_mouse_passthrough(true)
            .with_window_level(egui::WindowLevel::AlwaysOnTop)
            .with_taskbar(false),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(CrosshairApp::new(cc, options)))),
    )
    .map_err(|err| anyhow!("Failed to launch egui overlay: {err}"))
}
