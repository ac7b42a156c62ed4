//! Settings panel: crosshair form shown in its own viewport

use eframe::egui;
use tracing::debug;

use crate::config::{CrosshairSettings, CrosshairStyle, SettingsPayload};
use crate::constants::validation::{MAX_SIZE, MAX_THICKNESS, MIN_SIZE, MIN_THICKNESS};
use crate::coordinator::{SettingsPanel, SubmissionOutcome};
use crate::error::HotkeyError;
use crate::gui::color::{format_hex_color, parse_hex_color};
use crate::gui::constants::*;
use crate::hotkeys::valid_hotkeys;

/// Label for the "no hotkey" choice
const NO_KEY_CHOICE: &str = "None";

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

/// Form fields being edited; survives hide/show
#[derive(Debug, Clone)]
struct Draft {
    color: String,
    size: u32,
    thickness: u32,
    style: CrosshairStyle,
    toggle_key: String,
}

impl From<&CrosshairSettings> for Draft {
    fn from(settings: &CrosshairSettings) -> Self {
        Self {
            color: settings.color.clone(),
            size: settings.size,
            thickness: settings.thickness,
            style: settings.style,
            toggle_key: settings.toggle_key_str().to_string(),
        }
    }
}

impl Draft {
    fn to_payload(&self) -> SettingsPayload {
        SettingsPayload {
            color: Some(self.color.trim().to_string()),
            size: Some(i64::from(self.size)),
            thickness: Some(i64::from(self.thickness)),
            style: Some(self.style.as_str().to_string()),
            toggle_key: Some(self.toggle_key.clone()),
        }
    }
}

pub struct EguiSettingsPanel {
    open: bool,
    /// Set once the viewport has been shown; it is then only ever hidden
    created: bool,
    draft: Draft,
    status: Option<StatusMessage>,
}

impl EguiSettingsPanel {
    pub fn new() -> Self {
        Self {
            open: false,
            created: false,
            draft: Draft::from(&CrosshairSettings::default()),
            status: None,
        }
    }

    /// Whether the viewport exists (open or hidden)
    pub fn is_created(&self) -> bool {
        self.created
    }
}

impl Default for EguiSettingsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsPanel for EguiSettingsPanel {
    fn is_open(&self) -> bool {
        self.open
    }

    fn show(&mut self) {
        self.open = true;
        self.created = true;
    }

    fn hide(&mut self) {
        self.open = false;
    }

    fn load_settings(&mut self, settings: &CrosshairSettings) {
        self.draft = Draft::from(settings);
    }

    fn report(&mut self, outcome: SubmissionOutcome) {
        self.status = Some(match outcome {
            SubmissionOutcome::Applied { hotkey_error: None } => StatusMessage {
                text: "Settings saved".to_string(),
                color: STATUS_OK,
            },
            SubmissionOutcome::Applied {
                hotkey_error: Some(e),
            } => StatusMessage {
                text: format!("Settings saved, but the hotkey is not active: {e}"),
                color: STATUS_WARNING,
            },
            SubmissionOutcome::Rejected(e) => StatusMessage {
                text: format!("Settings not saved: {e}"),
                color: STATUS_ERROR,
            },
        });
    }

    fn report_hotkey_error(&mut self, error: HotkeyError) {
        self.status = Some(StatusMessage {
            text: format!("Toggle key is not active: {error}"),
            color: STATUS_WARNING,
        });
    }
}

/// Renders the settings form and returns a payload when the user saves
pub fn ui(ui: &mut egui::Ui, panel: &mut EguiSettingsPanel) -> Option<SettingsPayload> {
    let mut submitted = None;
    let draft = &mut panel.draft;

    ui.group(|ui| {
        ui.label(egui::RichText::new("Crosshair").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Color:");
            ui.add(egui::TextEdit::singleline(&mut draft.color).desired_width(100.0));

            // Color picker button - parses hex string, shows picker, updates string
            if let Some(mut color) = parse_hex_color(&draft.color)
                && ui.color_edit_button_srgba(&mut color).changed()
            {
                draft.color = format_hex_color(color);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Size:");
            ui.add(egui::Slider::new(&mut draft.size, MIN_SIZE..=MAX_SIZE));
        });

        ui.horizontal(|ui| {
            ui.label("Thickness:");
            ui.add(egui::Slider::new(&mut draft.thickness, MIN_THICKNESS..=MAX_THICKNESS));
        });

        ui.horizontal(|ui| {
            ui.label("Style:");
            egui::ComboBox::from_id_salt("crosshair_style")
                .selected_text(draft.style.label())
                .show_ui(ui, |ui| {
                    for style in CrosshairStyle::ALL {
                        ui.selectable_value(&mut draft.style, style, style.label());
                    }
                });
        });
    });

    ui.add_space(SECTION_SPACING);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Hotkey").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label("Show/Hide:");
            let selected = if draft.toggle_key.is_empty() {
                NO_KEY_CHOICE
            } else {
                draft.toggle_key.as_str()
            };
            egui::ComboBox::from_id_salt("toggle_key")
                .selected_text(selected.to_string())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut draft.toggle_key, String::new(), NO_KEY_CHOICE);
                    for hotkey in valid_hotkeys() {
                        let key = hotkey.to_string();
                        ui.selectable_value(&mut draft.toggle_key, key.clone(), key);
                    }
                });
        });
    });

    ui.add_space(SECTION_SPACING);

    ui.horizontal(|ui| {
        if ui.button("Save").clicked() {
            debug!("Save clicked in settings panel");
            submitted = Some(draft.to_payload());
        }
        if ui.button("Reset to Defaults").clicked() {
            debug!("Reset clicked in settings panel");
            submitted = Some(SettingsPayload::from(&CrosshairSettings::default()));
        }
    });

    if let Some(message) = &panel.status {
        ui.add_space(ITEM_SPACING);
        ui.colored_label(message.color, &message.text);
    }

    submitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmissionError;

    #[test]
    fn test_draft_payload_validates_to_loaded_settings() {
        let settings = CrosshairSettings {
            color: "#00FF00".to_string(),
            size: 10,
            thickness: 4,
            style: CrosshairStyle::Cross,
            toggle_key: None,
        };
        let mut panel = EguiSettingsPanel::new();
        panel.load_settings(&settings);

        assert_eq!(panel.draft.to_payload().validate(), Ok(settings));
    }

    #[test]
    fn test_hide_keeps_draft() {
        let mut panel = EguiSettingsPanel::new();
        panel.show();
        panel.draft.size = 30;
        panel.hide();
        panel.show();

        assert!(panel.is_open());
        assert!(panel.is_created());
        assert_eq!(panel.draft.size, 30);
    }

    #[test]
    fn test_hotkey_error_shows_warning() {
        let mut panel = EguiSettingsPanel::new();
        panel.report_hotkey_error(HotkeyError::UnknownKey("Hyper+Q".to_string()));
        let status = panel.status.as_ref().unwrap();
        assert_eq!(status.color, STATUS_WARNING);
        assert!(status.text.contains("Hyper+Q"));
    }

    #[test]
    fn test_report_sets_status() {
        let mut panel = EguiSettingsPanel::new();
        panel.report(SubmissionOutcome::Rejected(SubmissionError::EmptyColor));
        let status = panel.status.as_ref().unwrap();
        assert_eq!(status.color, STATUS_ERROR);
        assert!(status.text.contains("color must not be empty"));
    }
}
