//! Overlay surface drawn on the transparent root viewport

use egui::{Color32, Painter, Pos2, Stroke, Vec2};
use tracing::warn;

use super::color::parse_hex_color;
use crate::config::{CrosshairSettings, CrosshairStyle};
use crate::coordinator::OverlaySurface;

/// Circle radius relative to `size`
const CIRCLE_SCALE: f32 = 2.5;

/// Arm length relative to `size`
const ARM_SCALE: f32 = 2.0;

pub struct EguiOverlay {
    visible: bool,
    settings: CrosshairSettings,
    color: Color32,
}

impl EguiOverlay {
    pub fn new() -> Self {
        let settings = CrosshairSettings::default();
        let color = resolve_color(&settings.color);
        Self {
            visible: false,
            settings,
            color,
        }
    }

    /// Draw the crosshair centered on `center`; draws nothing while hidden
    pub fn paint(&self, painter: &Painter, center: Pos2) {
        if !self.visible {
            return;
        }

        let size = self.settings.size as f32;
        let stroke = Stroke::new(self.settings.thickness as f32, self.color);

        match self.settings.style {
            CrosshairStyle::Dot => {
                painter.circle_filled(center, size, self.color);
            }
            CrosshairStyle::Cross => {
                let arm = size * ARM_SCALE;
                painter.line_segment([center - Vec2::X * arm, center + Vec2::X * arm], stroke);
                painter.line_segment([center - Vec2::Y * arm, center + Vec2::Y * arm], stroke);
            }
            CrosshairStyle::Circle => {
                painter.circle_stroke(center, size * CIRCLE_SCALE, stroke);
            }
            CrosshairStyle::DotCircle => {
                painter.circle_filled(center, (size / 2.0).max(1.0), self.color);
                painter.circle_stroke(center, size * CIRCLE_SCALE, stroke);
            }
        }
    }
}

impl Default for EguiOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface for EguiOverlay {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn apply_settings(&mut self, settings: &CrosshairSettings) {
        self.color = resolve_color(&settings.color);
        self.settings = settings.clone();
    }
}

fn resolve_color(hex: &str) -> Color32 {
    parse_hex_color(hex).unwrap_or_else(|| {
        warn!(color = %hex, "Invalid crosshair color, drawing white");
        Color32::WHITE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_settings_resolves_color() {
        let mut overlay = EguiOverlay::new();
        overlay.apply_settings(&CrosshairSettings {
            color: "#FF0000".to_string(),
            ..CrosshairSettings::default()
        });
        assert_eq!(overlay.color, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_invalid_color_falls_back_to_white() {
        let mut overlay = EguiOverlay::new();
        overlay.apply_settings(&CrosshairSettings {
            color: "chartreuse".to_string(),
            ..CrosshairSettings::default()
        });
        assert_eq!(overlay.color, Color32::WHITE);
        assert_eq!(overlay.settings.color, "chartreuse");
    }
}
